//! Comment handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use quill_shared::dto::{CommentCreateRequest, MessageResponse};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /comments/ - the caller is recorded as the author.
pub async fn create_comment(
    state: web::Data<AppState>,
    CurrentUser(identity): CurrentUser,
    body: web::Json<CommentCreateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;
    let comment = state
        .blog
        .add_comment(&identity, req.post_id, req.content)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// GET /comments/post/{post_id}
pub async fn comments_for_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let comments = state.blog.comments_for_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// DELETE /comments/{id} - author or admin only.
pub async fn delete_comment(
    state: web::Data<AppState>,
    CurrentUser(identity): CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state
        .blog
        .delete_comment(&identity, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment deleted successfully")))
}
