//! Argon2id password hashing
//!
//! Hashing and verification are CPU-bound; the `_async` variants run on
//! tokio's blocking pool so request handlers never stall the runtime.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use once_cell::sync::Lazy;
use tracing::warn;

/// Hash checked when the username is unknown, so a failed login costs the
/// same whether or not the account exists
static DECOY_HASH: Lazy<Option<String>> =
    Lazy::new(|| PasswordService::hash("nutrifit-decoy-password").ok());

fn argon2() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| anyhow!("Password task failed: {}", e))?
}

pub struct PasswordService;

impl PasswordService {
    /// PHC-format Argon2id hash with a random salt
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow!("Failed to hash password: {}", e))
    }

    /// Check `password` against a stored hash; a corrupt hash never matches
    pub fn verify(password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => argon2().verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                warn!(error = %e, "Stored password hash is unreadable");
                false
            }
        }
    }

    pub async fn hash_async(password: String) -> Result<String> {
        blocking(move || Self::hash(&password)).await
    }

    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        blocking(move || Ok(Self::verify(&password, &hash))).await
    }

    /// Burn one verification for a login with an unknown username
    pub async fn verify_decoy(password: String) -> Result<()> {
        blocking(move || {
            if let Some(decoy) = DECOY_HASH.as_deref() {
                Self::verify(&password, decoy);
            }
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash("secure_password_123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordService::verify("secure_password_123", &hash));
        assert!(!PasswordService::verify("wrong_password", &hash));
    }

    #[test]
    fn test_salted() {
        let a = PasswordService::hash("test_password").unwrap();
        let b = PasswordService::hash("test_password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_corrupt_hash_never_matches() {
        assert!(!PasswordService::verify("anything", "not-a-phc-string"));
        assert!(!PasswordService::verify("", ""));
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "async_test_password".to_string();
        let hash = PasswordService::hash_async(password.clone()).await.unwrap();

        assert!(PasswordService::verify_async(password, hash.clone()).await.unwrap());
        assert!(!PasswordService::verify_async("wrong".to_string(), hash).await.unwrap());
        PasswordService::verify_decoy("guess".to_string()).await.unwrap();
    }
}
