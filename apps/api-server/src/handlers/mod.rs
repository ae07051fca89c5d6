//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod contact;
mod health;
mod likes;
mod posts;
mod users;


use actix_web::{HttpRequest, error, web};

use crate::middleware::error::AppError;

/// Upper bound for a buffered request body (multipart posts carry two images).
const MAX_PAYLOAD_BYTES: usize = 24 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::FormConfig::default().error_handler(form_error))
        .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
        // Public routes
        .route("/health", web::get().to(health::health_check))
        // Auth routes
        .route("/", web::get().to(auth::me))
        .route("/auth/", web::post().to(auth::register))
        .route("/auth/token", web::post().to(auth::token))
        .route("/users/{id}", web::delete().to(users::delete_user))
        // Contact & newsletter
        .service(
            web::resource("/contact/")
                .route(web::get().to(contact::list_messages))
                .route(web::post().to(contact::submit_message)),
        )
        .service(
            web::resource("/subscribe/")
                .route(web::get().to(contact::list_subscriptions))
                .route(web::post().to(contact::subscribe)),
        )
        // Posts
        .service(
            web::resource("/posts/")
                .route(web::get().to(posts::list_posts))
                .route(web::post().to(posts::create_post)),
        )
        .route("/posts/recent", web::get().to(posts::recent_posts))
        .service(
            web::resource("/posts/{id}")
                .route(web::get().to(posts::get_post))
                .route(web::put().to(posts::update_post))
                .route(web::delete().to(posts::delete_post)),
        )
        // Comments
        .route("/comments/", web::post().to(comments::create_comment))
        .route(
            "/comments/post/{post_id}",
            web::get().to(comments::comments_for_post),
        )
        .route("/comments/{id}", web::delete().to(comments::delete_comment))
        // Likes
        .route("/likes/", web::post().to(likes::like_post))
        .route("/likes/count/{post_id}", web::get().to(likes::like_count))
        .route("/likes/status/{post_id}", web::get().to(likes::like_status))
        .route("/likes/{post_id}", web::delete().to(likes::unlike_post));
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(vec![err.to_string()]).into()
}

fn form_error(err: error::UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(vec![err.to_string()]).into()
}
