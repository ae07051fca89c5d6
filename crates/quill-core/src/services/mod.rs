//! Application services built on top of the ports.

mod auth;
mod blog;

pub use auth::AuthGateway;
pub use blog::{BlogService, RECENT_POSTS_LIMIT};
