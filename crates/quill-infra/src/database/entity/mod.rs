//! SeaORM entities. Relationships are expressed as foreign-key columns only.

pub mod comment;
pub mod contact_message;
pub mod like;
pub mod newsletter_subscription;
pub mod post;
pub mod user;
