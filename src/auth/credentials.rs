//! Credential sealing and verification.
//!
//! `UserService` only ever sees sealed credentials through this trait, so the
//! hashing scheme can change without touching the user operations.

use anyhow::Result;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

pub trait CredentialVerifier: Send + Sync {
    /// Turn a plaintext secret into the form stored on the user record.
    fn seal(&self, secret: &str) -> Result<String>;

    /// Check a plaintext secret against a stored value.
    fn verify(&self, secret: &str, sealed: &str) -> bool;
}

/// Argon2id with a random salt per credential, stored as a PHC string.
#[derive(Default, Clone)]
pub struct Argon2Credentials {
    argon2: Argon2<'static>,
}

impl Argon2Credentials {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialVerifier for Argon2Credentials {
    fn seal(&self, secret: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    fn verify(&self, secret: &str, sealed: &str) -> bool {
        match PasswordHash::new(sealed) {
            Ok(parsed) => self
                .argon2
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored credential is not a valid PHC string: {}", e);
                false
            }
        }
    }
}
