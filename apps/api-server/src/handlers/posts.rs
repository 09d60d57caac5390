//! Post resource handlers.

use actix_web::{HttpResponse, web};

use postline_core::DomainError;
use postline_core::domain::PostDraft;
use postline_core::ports::BaseRepository;
use postline_shared::PostRequest;

use crate::middleware::error::AppResult;
use crate::state::AppState;

const ENTITY: &str = "Post";

fn into_draft(req: PostRequest) -> PostDraft {
    PostDraft {
        id: req.id,
        user_id: req.user_id,
        title: req.title.unwrap_or_default(),
        body: req.body.unwrap_or_default(),
        version: req.version,
    }
}

/// GET /api/v1/posts
pub async fn find_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/v1/posts/{id}
pub async fn find_by_id(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/v1/posts
///
/// Saving an id that already exists replaces the stored post.
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = into_draft(body.into_inner()).into_post()?;
    let saved = state.posts.save(post).await?;

    Ok(HttpResponse::Created().json(saved))
}

/// PUT /api/v1/posts/{id}
///
/// Only `title`, `body` and `version` are taken from the request; the stored
/// `id` and `userId` are kept.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let revision = into_draft(body.into_inner()).into_revision()?;

    let existing = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

    let saved = state.posts.save(existing.revise(revision)).await?;

    Ok(HttpResponse::Ok().json(saved))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    state.posts.delete_by_id(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
