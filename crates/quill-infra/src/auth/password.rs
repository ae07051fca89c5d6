//! Argon2 password hashing implementation.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use tokio::task;

use quill_core::ports::{AuthError, PasswordService};

/// Hash of random bytes under the default Argon2id parameters.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$rExntp7jWhbGNAPqrsqaoA$Qe3EnRuyyR/dmtdU9u9rlTAtgnvb2rv1L2pUtm2fMV0";

/// Argon2id password service with a fresh random salt per hash.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_blocking(argon2: &Argon2<'_>, password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashingError(e.to_string()))
}

fn verify_blocking(argon2: &Argon2<'_>, password: &str, hash: &str) -> bool {
    // Parameters are read from the PHC string, so hashes made with other
    // cost settings still verify.
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::debug!("Stored password hash is malformed");
            return false;
        }
    };

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[async_trait]
impl PasswordService for Argon2PasswordService {
    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();

        task::spawn_blocking(move || hash_blocking(&argon2, &password))
            .await
            .map_err(|e| AuthError::HashingError(e.to_string()))?
    }

    async fn verify(&self, password: &str, hash: &str) -> bool {
        let argon2 = self.argon2.clone();
        let (password, hash) = (password.to_owned(), hash.to_owned());

        task::spawn_blocking(move || verify_blocking(&argon2, &password, &hash))
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Password verification task failed");
                false
            })
    }

    fn decoy_hash(&self) -> &str {
        DECOY_HASH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();
        let password = "secure_password_123";

        let hash = service.hash(password).await.unwrap();
        assert!(service.verify(password, &hash).await);
        assert!(!service.verify("wrong_password", &hash).await);
    }

    #[tokio::test]
    async fn test_hash_is_salted() {
        let service = Argon2PasswordService::new();

        let first = service.hash("same-password").await.unwrap();
        let second = service.hash("same-password").await.unwrap();

        assert_ne!(first, second);
        assert!(service.verify("same-password", &first).await);
        assert!(service.verify("same-password", &second).await);
    }

    #[tokio::test]
    async fn test_hash_does_not_contain_plaintext() {
        let service = Argon2PasswordService::new();
        let hash = service.hash("hunter2-plaintext").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("hunter2-plaintext"));
    }

    #[tokio::test]
    async fn test_malformed_hash_fails_closed() {
        let service = Argon2PasswordService::new();

        assert!(!service.verify("anything", "not-a-phc-string").await);
        assert!(!service.verify("anything", "").await);
        assert!(!service.verify("anything", "$argon2id$v=19$garbage").await);
    }

    #[tokio::test]
    async fn test_decoy_hash_is_well_formed_and_matches_nothing() {
        let service = Argon2PasswordService::new();
        let decoy = service.decoy_hash();

        // Same cost as a real hash, so verifying it takes as long.
        let parsed = PasswordHash::new(decoy).unwrap();
        let real = service.hash("pw").await.unwrap();
        let real = PasswordHash::new(&real).unwrap();
        assert_eq!(parsed.algorithm, real.algorithm);
        assert_eq!(parsed.params, real.params);

        assert!(!service.verify("", decoy).await);
        assert!(!service.verify("password", decoy).await);
    }
}
