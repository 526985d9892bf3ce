//! Shared utilities and common types for the storefront server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - Error response structures
//! - Email normalization, validation and masking

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CleanupConfig, ConfigError, CorsConfig, DatabaseConfig, Environment, LogFormat,
    LoggingConfig, MailConfig, MailProvider, OtpConfig, PasswordConfig, ResetConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::email;
