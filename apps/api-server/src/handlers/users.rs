//! User account handlers.

use actix_web::{HttpResponse, web};

use quill_shared::dto::MessageResponse;

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// DELETE /users/{id} - the account owner or an admin.
pub async fn delete_user(
    state: web::Data<AppState>,
    CurrentUser(identity): CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.auth.delete_user(&identity, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}
