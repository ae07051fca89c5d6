//! Domain entities - the core business objects.

mod comment;
mod contact;
mod identity;
mod like;
mod post;
mod user;

pub use comment::{Comment, NewComment};
pub use contact::{ContactMessage, NewContactMessage, NewSubscription, NewsletterSubscription};
pub use identity::Identity;
pub use like::{Like, NewLike};
pub use post::{NewPost, Post, PostContent};
pub use user::{NewUser, Role, User};
