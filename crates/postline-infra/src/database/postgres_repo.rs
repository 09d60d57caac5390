//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DbConn, DbErr, EntityTrait, PaginatorTrait, QueryOrder};

use postline_core::domain::Post;
use postline_core::error::RepoError;
use postline_core::ports::{BaseRepository, PostRepository};

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository.
///
/// Expects an existing `posts` table matching [`post::Model`].
pub struct PostgresPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// `INSERT ... ON CONFLICT (id) DO UPDATE`, overwriting every non-key column.
    fn upsert() -> OnConflict {
        OnConflict::column(post::Column::Id)
            .update_columns([
                post::Column::UserId,
                post::Column::Title,
                post::Column::Body,
                post::Column::Version,
            ])
            .to_owned()
    }
}

fn map_db_err(e: DbErr) -> RepoError {
    if matches!(e, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) {
        return RepoError::Connection(e.to_string());
    }

    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = id, "Finding post by id");

        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        tracing::debug!(post_id = entity.id, "Saving post");

        let active_model: post::ActiveModel = entity.into();
        let model = PostEntity::insert(active_model)
            .on_conflict(Self::upsert())
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            tracing::debug!(post_id = id, "Delete of missing post ignored");
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find()
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn save_all(&self, posts: Vec<Post>) -> Result<u64, RepoError> {
        if posts.is_empty() {
            return Ok(0);
        }

        let count = posts.len() as u64;
        let models = posts.into_iter().map(post::ActiveModel::from);
        PostEntity::insert_many(models)
            .on_conflict(Self::upsert())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count, "Bulk-saved posts");
        Ok(count)
    }
}
