//! Like handlers.

use actix_web::{HttpResponse, web};

use quill_core::error::DomainError;
use quill_shared::dto::{LikeCountResponse, LikeRequest, LikeStatusResponse, MessageResponse};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /likes/
pub async fn like_post(
    state: web::Data<AppState>,
    CurrentUser(identity): CurrentUser,
    body: web::Json<LikeRequest>,
) -> AppResult<HttpResponse> {
    let like = state
        .blog
        .like_post(&identity, body.post_id)
        .await
        .map_err(|e| match e {
            // A repeated like is a client mistake, not a conflict.
            DomainError::Duplicate(msg) => AppError::BadRequest(msg),
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(like))
}

/// DELETE /likes/{post_id}
pub async fn unlike_post(
    state: web::Data<AppState>,
    CurrentUser(identity): CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.blog.unlike_post(&identity, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Like removed successfully")))
}

/// GET /likes/count/{post_id}
pub async fn like_count(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let total_likes = state.blog.like_count(post_id).await?;

    Ok(HttpResponse::Ok().json(LikeCountResponse {
        post_id,
        total_likes,
    }))
}

/// GET /likes/status/{post_id}
pub async fn like_status(
    state: web::Data<AppState>,
    CurrentUser(identity): CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let is_liked = state.blog.is_liked_by(&identity, post_id).await?;

    Ok(HttpResponse::Ok().json(LikeStatusResponse { post_id, is_liked }))
}
