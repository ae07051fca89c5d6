//! # Quill Shared
//!
//! Wire types shared by the HTTP layer and API clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
