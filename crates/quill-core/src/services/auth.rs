//! Auth gateway - login, token resolution and ownership checks.

use std::sync::Arc;

use crate::domain::{Identity, NewUser, Role, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};

/// Request-facing authentication component.
///
/// Combines the credential store, the password hasher and the token service.
/// Every call is independent; nothing is cached between requests.
#[derive(Clone)]
pub struct AuthGateway {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthGateway {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Lifetime of issued tokens, reported to clients as `expires_in`.
    pub fn token_lifetime_seconds(&self) -> i64 {
        self.tokens.expiration_seconds()
    }

    /// Register a regular account.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, DomainError> {
        self.create_account(username, password, Role::User).await
    }

    /// Bootstrap an administrator account.
    pub async fn create_admin(&self, username: &str, password: &str) -> Result<User, DomainError> {
        self.create_account(username, password, Role::Admin).await
    }

    async fn create_account(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, DomainError> {
        let password_hash = self
            .passwords
            .hash(password)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = self
            .users
            .create(NewUser::new(username, password_hash, role))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => {
                    DomainError::Duplicate("Username already registered".into())
                }
                other => other.into(),
            })?;

        tracing::info!(user_id = user.id, role = %user.role, "Account created");
        Ok(user)
    }

    /// Exchange a username/password pair for a bearer token.
    ///
    /// An unknown username and a wrong password produce the same error, and
    /// both pay for one password verification.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        let stored_hash = user
            .as_ref()
            .map_or(self.passwords.decoy_hash(), |u| u.password_hash.as_str());
        let verified = self.passwords.verify(password, stored_hash).await;

        let Some(user) = user.filter(|_| verified) else {
            tracing::debug!(%username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        self.tokens
            .generate_token(user.id, &user.username, user.role)
    }

    /// Resolve a presented token to the caller's current identity.
    ///
    /// The role is read from the user record, not the token, so role changes
    /// apply on the next request. A token for a deleted user is rejected.
    pub async fn resolve_current_user(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.tokens.validate_token(token)?;

        self.users
            .find_by_id(claims.user_id)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?
            .map(Identity::from)
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Owner-or-override rule used for every content mutation.
    pub fn authorize(identity: &Identity, resource_owner_id: i32, override_role: Role) -> bool {
        identity.id == resource_owner_id || identity.role == override_role
    }

    /// Delete an account; its comments and likes go with it.
    pub async fn delete_user(&self, identity: &Identity, user_id: i32) -> Result<(), DomainError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("User", user_id));
        }
        if !Self::authorize(identity, user_id, Role::Admin) {
            return Err(DomainError::Forbidden(
                "Not authorized to delete this user".into(),
            ));
        }

        self.users.delete(user_id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("User", user_id),
            other => other.into(),
        })?;

        tracing::info!(user_id, deleted_by = identity.id, "User deleted");
        Ok(())
    }
}
