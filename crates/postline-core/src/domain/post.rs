use serde::{Deserialize, Serialize};

use crate::validation::ValidationErrors;

/// Post entity - a user-authored item.
///
/// `id` is assigned by the client. `version` is carried through untouched
/// and is never compared on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub body: String,
    pub version: Option<i32>,
}

impl Post {
    /// Build a post, rejecting a blank title or body.
    pub fn new(
        id: i32,
        user_id: i32,
        title: impl Into<String>,
        body: impl Into<String>,
        version: Option<i32>,
    ) -> Result<Self, ValidationErrors> {
        PostDraft {
            id: Some(id),
            user_id: Some(user_id),
            title: title.into(),
            body: body.into(),
            version,
        }
        .into_post()
    }

    /// Apply a revision. `id` and `user_id` always come from `self`.
    pub fn revise(self, revision: PostRevision) -> Self {
        Self {
            id: self.id,
            user_id: self.user_id,
            title: revision.title,
            body: revision.body,
            version: revision.version,
        }
    }
}

/// Unvalidated post payload as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub title: String,
    pub body: String,
    pub version: Option<i32>,
}

impl PostDraft {
    /// Validate the draft as a complete new post.
    pub fn into_post(self) -> Result<Post, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_present("id", &self.id);
        errors.require_present("userId", &self.user_id);
        errors.require_not_blank("title", &self.title);
        errors.require_not_blank("body", &self.body);

        match (self.id, self.user_id) {
            (Some(id), Some(user_id)) if errors.is_empty() => Ok(Post {
                id,
                user_id,
                title: self.title,
                body: self.body,
                version: self.version,
            }),
            _ => Err(errors),
        }
    }

    /// Validate only the mutable fields, discarding `id` and `user_id`.
    pub fn into_revision(self) -> Result<PostRevision, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_not_blank("title", &self.title);
        errors.require_not_blank("body", &self.body);
        errors.into_result()?;

        Ok(PostRevision {
            title: self.title,
            body: self.body,
            version: self.version,
        })
    }
}

/// Validated replacement for the mutable fields of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRevision {
    pub title: String,
    pub body: String,
    pub version: Option<i32>,
}
