//! Startup seeding.

use anyhow::Context;
use postline_core::seed::{SeedLoader, SeedOutcome, SeedSource};

use crate::config::SeedConfig;
use crate::state::AppState;

const BUNDLED_POSTS: &str = include_str!("../data/posts.json");

fn source(config: &SeedConfig) -> SeedSource {
    match &config.file {
        Some(path) => SeedSource::File(path.clone()),
        None => SeedSource::Embedded {
            name: "posts.json",
            contents: BUNDLED_POSTS,
        },
    }
}

/// Populate an empty repository. Any failure aborts startup.
pub async fn seed_posts(state: &AppState, config: &SeedConfig) -> anyhow::Result<()> {
    if !config.enabled {
        tracing::info!("Seeding disabled");
        return Ok(());
    }

    let source = source(config);
    let outcome = SeedLoader::new(state.posts.clone())
        .run(&source)
        .await
        .with_context(|| format!("Failed to seed posts from {}", source.describe()))?;

    match outcome {
        SeedOutcome::Loaded { count } => {
            tracing::info!(count, source = %source.describe(), "Loaded posts from JSON")
        }
        SeedOutcome::Skipped { existing } => {
            tracing::info!(existing, "Posts already present, skipping seed")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use postline_core::ports::BaseRepository;
    use postline_infra::InMemoryPostRepository;

    use super::*;

    #[actix_rt::test]
    async fn test_bundled_posts_seed_empty_repository() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let state = AppState::with_repository(repo.clone());
        let config = SeedConfig {
            enabled: true,
            file: None,
        };

        seed_posts(&state, &config).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 4);
        let first = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(first.title, "First Post");
    }

    #[actix_rt::test]
    async fn test_disabled_seed_leaves_repository_empty() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let state = AppState::with_repository(repo.clone());
        let config = SeedConfig {
            enabled: false,
            file: None,
        };

        seed_posts(&state, &config).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[actix_rt::test]
    async fn test_missing_seed_file_is_fatal() {
        let state = AppState::with_repository(Arc::new(InMemoryPostRepository::new()));
        let config = SeedConfig {
            enabled: true,
            file: Some(PathBuf::from("/definitely/not/here/posts.json")),
        };

        let err = seed_posts(&state, &config).await.unwrap_err();

        assert!(err.to_string().contains("Failed to seed posts"));
    }
}
