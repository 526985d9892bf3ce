//! Password reset service module
//!
//! Hashes new passwords with bcrypt and overwrites the stored credential,
//! consuming a reset grant recorded by passcode verification when required.

mod config;
mod hasher;
mod service;


pub use config::{PasswordResetConfig, BCRYPT_MAX_PASSWORD_BYTES, MAX_PASSWORD_LENGTH};
pub use hasher::BcryptPasswordHasher;
pub use service::{PasswordResetService, ResetPasswordResult};
