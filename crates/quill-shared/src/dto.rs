//! Data Transfer Objects - request/response types for the API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- Auth ---

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 100, message = "Username must be 1 to 100 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// OAuth2 password-flow form posted to `/auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub role: String,
}

/// Body of `GET /`: the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    #[serde(rename = "User")]
    pub user: UserResponse,
}

// --- Posts ---

/// Create or fully replace a post. Omitted optional fields are stored as null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostRequest {
    #[validate(length(min = 1, max = 100, message = "Category must be 1 to 100 characters"))]
    pub category: String,
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: String,
    #[serde(default)]
    pub image1: Option<String>,
    #[serde(default)]
    pub intro_content: Option<String>,
    #[serde(default)]
    pub content1: Option<String>,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub quote_author: Option<String>,
    #[serde(default)]
    pub main_content: Option<String>,
    #[serde(default)]
    pub image2: Option<String>,
    #[serde(default)]
    pub final_content: Option<String>,
    /// Only honoured on update; creation always stamps today's date.
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

// --- Comments & likes ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentCreateRequest {
    #[validate(length(min = 1, message = "Comment must not be empty"))]
    pub content: String,
    pub post_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    pub post_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeCountResponse {
    pub post_id: i32,
    pub total_likes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeStatusResponse {
    pub post_id: i32,
    pub is_liked: bool,
}

// --- Contact & newsletter ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactMessageRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email(message = "Not a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubscriptionRequest {
    #[validate(email(message = "Not a valid email address"))]
    pub email: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(email: &str) -> SubscriptionRequest {
        SubscriptionRequest {
            email: email.to_string(),
        }
    }

    #[test]
    fn test_subscription_email_is_validated() {
        assert!(subscription("reader@example.com").validate().is_ok());
        for bad in ["a@@b.com", "a@b..com", "a@b.com@c.org", "a@-b.com", "no-at-sign"] {
            assert!(subscription(bad).validate().is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_blank_required_fields_are_rejected() {
        let register = RegisterUserRequest {
            username: String::new(),
            password: "pw".into(),
        };
        let errors = register.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));

        let post = PostRequest {
            category: "food".into(),
            ..Default::default()
        };
        let errors = post.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(!errors.field_errors().contains_key("category"));
    }

    #[test]
    fn test_contact_phone_is_optional() {
        let message = ContactMessageRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: None,
            subject: "Hello".into(),
            message: "Lovely blog".into(),
        };
        assert!(message.validate().is_ok());
    }
}
