use async_trait::async_trait;

use crate::domain::Post;
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find every entity, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity. An existing entity with the same ID is replaced.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Deleting a missing ID is not an error.
    async fn delete_by_id(&self, id: ID) -> Result<(), RepoError>;

    /// Number of stored entities.
    async fn count(&self) -> Result<u64, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Save many posts at once, returning how many were written.
    async fn save_all(&self, posts: Vec<Post>) -> Result<u64, RepoError> {
        let mut saved = 0;
        for post in posts {
            self.save(post).await?;
            saved += 1;
        }
        Ok(saved)
    }
}
