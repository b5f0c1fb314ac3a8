//! Argon2 implementation of `CredentialHasher`.
//!
//! Hashing and verification run on the blocking pool: both are deliberately
//! expensive and would otherwise stall the request scheduler.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use domains::ports::CredentialHasher;
use domains::{AppError, Result};

#[derive(Debug, Default)]
pub struct ArgonCredentialHasher;

impl ArgonCredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialHasher for ArgonCredentialHasher {
    /// Hashes with a fresh random salt, producing a PHC string that embeds
    /// algorithm, parameters, and salt.
    async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| AppError::Internal(format!("password hashing failed: {err}")))
        })
        .await
        .map_err(|err| AppError::Internal(format!("hashing task panicked: {err}")))?
    }

    /// Verifies a candidate against a stored PHC string. An unparseable
    /// stored hash verifies as false rather than erroring.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || {
            let parsed = match PasswordHash::new(&hash) {
                Ok(parsed) => parsed,
                Err(_) => return Ok(false),
            };
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|err| AppError::Internal(format!("verify task panicked: {err}")))?
    }
}
