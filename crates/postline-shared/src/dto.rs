//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Serialize};

/// Body of a create or update request.
///
/// Every field is optional on the wire so that a missing or `null` title
/// reaches validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostRequest {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub version: Option<i32>,
}
