//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and health checks
//! - Embedded schema migrations
//! - Repository implementations for accounts, passcodes and reset grants

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlAccountRepository, MySqlOtpRepository, MySqlResetGrantRepository};
