//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the storefront recovery
//! service. It provides concrete implementations of the core repository and
//! mail traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL pool, migrations and repositories using SQLx
//! - **Mail**: SMTP delivery through lettre and an in-process logging dispatcher
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `smtp-mail`: Enable SMTP mail delivery (default)

// Re-export core error types for convenience
pub use shop_core::errors::{DomainError, DomainResult};

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Mail module - outbound passcode delivery
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail transport error
    #[error("Mail service error: {0}")]
    Mail(String),
}
