//! Argon2id password hashing
//!
//! Hashing is CPU-bound, so the async entry points run on the blocking pool.

use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub struct PasswordService;

impl PasswordService {
    fn hash_blocking(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    fn verify_blocking(password: &str, stored: &str) -> Result<bool> {
        let parsed =
            PasswordHash::new(stored).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    pub async fn hash(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash_blocking(&password))
            .await
            .context("password hashing task panicked")?
    }

    pub async fn verify(password: String, stored: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify_blocking(&password, &stored))
            .await
            .context("password verification task panicked")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = PasswordService::hash("secure_password_123".into()).await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordService::verify("secure_password_123".into(), hash.clone())
            .await
            .unwrap());
        assert!(!PasswordService::verify("wrong_password".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ() {
        let a = PasswordService::hash("same".into()).await.unwrap();
        let b = PasswordService::hash("same".into()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_error() {
        assert!(PasswordService::verify("pw".into(), "not-a-hash".into())
            .await
            .is_err());
    }
}
