//! In-memory post repository - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postline_core::domain::Post;
use postline_core::error::RepoError;
use postline_core::ports::{BaseRepository, PostRepository};

/// Post store backed by a `BTreeMap` behind an async `RwLock`.
///
/// Posts are kept ordered by id, so `find_all` is stable across calls.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<BTreeMap<i32, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
        }
    }

    /// Start from an existing set of posts. Later duplicates win.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            store: RwLock::new(posts.into_iter().map(|p| (p.id, p)).collect()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.insert(entity.id, entity.clone()).is_some() {
            tracing::debug!(post_id = entity.id, "Replaced existing post");
        }
        Ok(entity)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        if store.remove(&id).is_none() {
            tracing::debug!(post_id = id, "Delete of missing post ignored");
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.len() as u64)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn save_all(&self, posts: Vec<Post>) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let count = posts.len() as u64;
        store.extend(posts.into_iter().map(|p| (p.id, p)));
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i32, title: &str) -> Post {
        Post::new(id, 1, title, "Some body", None).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryPostRepository::new();
        repo.save(post(3, "New Post")).await.unwrap();

        let found = repo.find_by_id(3).await.unwrap();
        assert_eq!(found, Some(post(3, "New Post")));
        assert_eq!(repo.find_by_id(4).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_replaces_existing_id() {
        let repo = InMemoryPostRepository::new();
        repo.save(post(1, "Before")).await.unwrap();
        repo.save(post(1, "After")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().title, "After");
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let repo = InMemoryPostRepository::with_posts([post(5, "e"), post(2, "b"), post(9, "i")]);

        let ids: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let repo = InMemoryPostRepository::with_posts([post(1, "a")]);

        repo.delete_by_id(42).await.unwrap();
        repo.delete_by_id(1).await.unwrap();
        repo.delete_by_id(1).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_all() {
        let repo = InMemoryPostRepository::new();
        let saved = repo
            .save_all(vec![post(1, "a"), post(2, "b")])
            .await
            .unwrap();

        assert_eq!(saved, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
