//! Authentication handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use quill_core::domain::Identity;
use quill_shared::dto::{
    CurrentUserResponse, LoginForm, RegisterUserRequest, TokenResponse, UserResponse,
};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_response(id: i32, username: String, role: &str) -> UserResponse {
    UserResponse {
        id,
        username,
        role: role.to_string(),
    }
}

/// POST /auth/
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;
    let user = state.auth.register(&req.username, &req.password).await?;

    Ok(HttpResponse::Created().json(user_response(
        user.id,
        user.username,
        user.role.as_str(),
    )))
}

/// POST /auth/token - OAuth2 password flow, form encoded.
pub async fn token(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let token = state.auth.login(&form.username, &form.password).await?;
    let expires_in = u64::try_from(state.auth.token_lifetime_seconds()).unwrap_or_default();

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token, expires_in)))
}

/// GET / - Protected route echoing the caller.
pub async fn me(CurrentUser(identity): CurrentUser) -> AppResult<HttpResponse> {
    let Identity { id, username, role } = identity;

    Ok(HttpResponse::Ok().json(CurrentUserResponse {
        user: user_response(id, username, role.as_str()),
    }))
}
