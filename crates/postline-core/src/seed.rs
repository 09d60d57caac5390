//! Startup seeding of an empty post repository.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::Post;
use crate::error::RepoError;
use crate::ports::PostRepository;

/// Where the seed document comes from.
#[derive(Debug, Clone)]
pub enum SeedSource {
    /// A document compiled into the binary.
    Embedded {
        name: &'static str,
        contents: &'static str,
    },
    /// A document read from disk at startup.
    File(PathBuf),
}

impl SeedSource {
    /// Human-readable origin, used in logs and errors.
    pub fn describe(&self) -> String {
        match self {
            SeedSource::Embedded { name, .. } => format!("embedded:{}", name),
            SeedSource::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String, SeedError> {
        match self {
            SeedSource::Embedded { contents, .. } => Ok((*contents).to_string()),
            SeedSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| SeedError::Io {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

/// Shape of the seed document: `{ "posts": [Post, ...] }`.
#[derive(Debug, Deserialize)]
struct SeedDocument {
    posts: Vec<Post>,
}

/// What a seed run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Loaded { count: u64 },
    Skipped { existing: u64 },
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed seed document {origin}: {source}")]
    Malformed {
        origin: String,
        source: serde_json::Error,
    },

    #[error("Seed document {origin} lists post {id} more than once")]
    DuplicateId { origin: String, id: i32 },

    #[error("Failed to store seed posts: {0}")]
    Repository(#[from] RepoError),
}

/// Fills an empty repository from a seed document.
///
/// A repository that already holds posts is left untouched and the source
/// is never read. A document that repeats an id is rejected before anything
/// is stored.
pub struct SeedLoader {
    repo: Arc<dyn PostRepository>,
}

impl SeedLoader {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn run(&self, source: &SeedSource) -> Result<SeedOutcome, SeedError> {
        let existing = self.repo.count().await?;
        if existing > 0 {
            return Ok(SeedOutcome::Skipped { existing });
        }

        let raw = source.read()?;
        let document: SeedDocument =
            serde_json::from_str(&raw).map_err(|source_err| SeedError::Malformed {
                origin: source.describe(),
                source: source_err,
            })?;

        let mut seen = HashSet::with_capacity(document.posts.len());
        if let Some(dup) = document.posts.iter().find(|p| !seen.insert(p.id)) {
            return Err(SeedError::DuplicateId {
                origin: source.describe(),
                id: dup.id,
            });
        }

        let count = self.repo.save_all(document.posts).await?;
        Ok(SeedOutcome::Loaded { count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::BaseRepository;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecRepo {
        posts: Mutex<Vec<Post>>,
    }

    #[async_trait]
    impl BaseRepository<Post, i32> for VecRepo {
        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn save(&self, entity: Post) -> Result<Post, RepoError> {
            let mut posts = self.posts.lock().unwrap();
            posts.retain(|p| p.id != entity.id);
            posts.push(entity.clone());
            Ok(entity)
        }

        async fn delete_by_id(&self, id: i32) -> Result<(), RepoError> {
            self.posts.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }

        async fn count(&self) -> Result<u64, RepoError> {
            Ok(self.posts.lock().unwrap().len() as u64)
        }
    }

    impl PostRepository for VecRepo {}

    const TWO_POSTS: &str = r#"{
        "posts": [
            { "id": 1, "userId": 1, "title": "First Post", "body": "This is my first post.", "version": null },
            { "id": 2, "userId": 1, "title": "Second Post", "body": "This is my second post.", "version": null }
        ]
    }"#;

    fn embedded(contents: &'static str) -> SeedSource {
        SeedSource::Embedded {
            name: "posts.json",
            contents,
        }
    }

    #[tokio::test]
    async fn test_seeds_empty_repository() {
        let repo = Arc::new(VecRepo::default());
        let loader = SeedLoader::new(repo.clone());

        let outcome = loader.run(&embedded(TWO_POSTS)).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Loaded { count: 2 });
        assert_eq!(repo.count().await.unwrap(), 2);
        let first = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(first.title, "First Post");
    }

    #[tokio::test]
    async fn test_skips_non_empty_repository() {
        let repo = Arc::new(VecRepo::default());
        repo.save(Post::new(7, 2, "Existing", "Already here", None).unwrap())
            .await
            .unwrap();
        let loader = SeedLoader::new(repo.clone());

        let outcome = loader.run(&embedded(TWO_POSTS)).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Skipped { existing: 1 });
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_non_empty_repository_never_reads_source() {
        let repo = Arc::new(VecRepo::default());
        repo.save(Post::new(7, 2, "Existing", "Already here", None).unwrap())
            .await
            .unwrap();
        let loader = SeedLoader::new(repo);

        let missing = SeedSource::File(PathBuf::from("/definitely/not/here/posts.json"));
        let outcome = loader.run(&missing).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Skipped { existing: 1 });
    }

    #[tokio::test]
    async fn test_malformed_document_is_an_error() {
        let repo = Arc::new(VecRepo::default());
        let loader = SeedLoader::new(repo.clone());

        let err = loader.run(&embedded(r#"{ "items": [] }"#)).await.unwrap_err();

        assert!(matches!(err, SeedError::Malformed { .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_repeated_id_is_rejected() {
        let repo = Arc::new(VecRepo::default());
        let loader = SeedLoader::new(repo.clone());

        let doc = r#"{
            "posts": [
                { "id": 1, "userId": 1, "title": "First", "body": "One", "version": null },
                { "id": 1, "userId": 1, "title": "Again", "body": "Two", "version": null }
            ]
        }"#;
        let err = loader.run(&embedded(doc)).await.unwrap_err();

        assert!(matches!(err, SeedError::DuplicateId { id: 1, .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let loader = SeedLoader::new(Arc::new(VecRepo::default()));

        let missing = SeedSource::File(PathBuf::from("/definitely/not/here/posts.json"));
        let err = loader.run(&missing).await.unwrap_err();

        assert!(matches!(err, SeedError::Io { .. }));
    }
}
