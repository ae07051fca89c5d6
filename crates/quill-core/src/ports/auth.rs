//! Authentication and authorization ports.

use async_trait::async_trait;

use crate::domain::Role;

/// Claims carried by an access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
    pub exp: i64,
}

/// Token service trait for issuing and checking bearer tokens.
pub trait TokenService: Send + Sync {
    /// Generate an access token for a user.
    fn generate_token(&self, user_id: i32, username: &str, role: Role)
    -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of freshly issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
///
/// Hashing is CPU bound; implementations keep it off the async executor.
#[async_trait]
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    async fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash. A malformed hash never matches.
    async fn verify(&self, password: &str, hash: &str) -> bool;

    /// A well-formed hash that matches no password, verified against when the
    /// username is unknown so both login failures cost the same.
    fn decoy_hash(&self) -> &str;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Could not validate user.")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Credential store error: {0}")]
    Store(String),
}
