//! bcrypt password hashing

use crate::errors::{DomainError, DomainResult};

use super::config::BCRYPT_MAX_PASSWORD_BYTES;

/// Salted bcrypt hashing run on the blocking pool
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt
    ///
    /// Passwords longer than 72 bytes fail with `DomainError::Validation`
    /// instead of being truncated by bcrypt.
    pub async fn hash(&self, password: &str) -> DomainResult<String> {
        if password.len() > BCRYPT_MAX_PASSWORD_BYTES {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at most {} bytes",
                    BCRYPT_MAX_PASSWORD_BYTES
                ),
            });
        }
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })
    }

    /// Check a password against a stored hash
    pub async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Invalid password hash: {}", e),
            })
    }
}
