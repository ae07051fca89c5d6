//! Contact form and newsletter handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use quill_core::domain::NewContactMessage;
use quill_shared::dto::{ContactMessageRequest, SubscriptionRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /contact/
pub async fn list_messages(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.blog.contact_messages().await?))
}

/// POST /contact/
pub async fn submit_message(
    state: web::Data<AppState>,
    body: web::Json<ContactMessageRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;
    let message = state
        .blog
        .submit_contact(NewContactMessage {
            name: req.name,
            email: req.email,
            phone: req.phone,
            subject: req.subject,
            message: req.message,
        })
        .await?;

    Ok(HttpResponse::Created().json(message))
}

/// GET /subscribe/
pub async fn list_subscriptions(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.blog.subscriptions().await?))
}

/// POST /subscribe/
pub async fn subscribe(
    state: web::Data<AppState>,
    body: web::Json<SubscriptionRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;
    let subscription = state.blog.subscribe(req.email).await?;
    Ok(HttpResponse::Created().json(subscription))
}
