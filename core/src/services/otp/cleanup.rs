//! Expired passcode cleanup for periodic maintenance of the passcode store
//!
//! Verification never depends on this sweeper: expired rows are filtered out
//! at lookup time. The sweeper only keeps the tables from growing.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use shop_shared::config::CleanupConfig;

use crate::errors::DomainError;
use crate::repositories::{OtpRepository, ResetGrantRepository};
use crate::services::clock::{Clock, SystemClock};

/// Configuration for the cleanup service
#[derive(Debug, Clone)]
pub struct OtpCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for OtpCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

impl From<&CleanupConfig> for OtpCleanupConfig {
    fn from(config: &CleanupConfig) -> Self {
        Self {
            interval_seconds: config.interval_seconds,
            enabled: config.enabled,
        }
    }
}

/// Service for deleting expired passcodes and reset grants
pub struct OtpCleanupService<O: OtpRepository + 'static, G: ResetGrantRepository + 'static> {
    otps: Arc<O>,
    grants: Arc<G>,
    clock: Arc<dyn Clock>,
    config: OtpCleanupConfig,
}

impl<O: OtpRepository, G: ResetGrantRepository> OtpCleanupService<O, G> {
    /// Create a new cleanup service reading the system clock
    pub fn new(otps: Arc<O>, grants: Arc<G>, config: OtpCleanupConfig) -> Self {
        Self::with_clock(otps, grants, Arc::new(SystemClock), config)
    }

    pub fn with_clock(
        otps: Arc<O>,
        grants: Arc<G>,
        clock: Arc<dyn Clock>,
        config: OtpCleanupConfig,
    ) -> Self {
        Self {
            otps,
            grants,
            clock,
            config,
        }
    }

    /// Run a single cleanup cycle
    ///
    /// Deletes passcodes and reset grants that expired before now. A failure
    /// in one table is recorded in the result and does not stop the other.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let now = self.clock.now();
        let mut result = CleanupResult::default();

        match self.otps.delete_expired(now).await {
            Ok(count) => result.expired_otps_deleted = count,
            Err(e) => {
                error!(error = %e, event = "otp_cleanup_failed", "Failed to delete expired passcodes");
                result.errors.push(format!("Passcode cleanup error: {}", e));
            }
        }

        match self.grants.delete_expired(now).await {
            Ok(count) => result.expired_grants_deleted = count,
            Err(e) => {
                error!(error = %e, event = "grant_cleanup_failed", "Failed to delete expired reset grants");
                result.errors.push(format!("Reset grant cleanup error: {}", e));
            }
        }

        info!(
            expired_otps = result.expired_otps_deleted,
            expired_grants = result.expired_grants_deleted,
            event = "otp_cleanup_completed",
            "Passcode cleanup completed"
        );

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled. The first cycle runs
    /// immediately.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Passcode cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Passcode cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Passcode cleanup cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired passcodes deleted
    pub expired_otps_deleted: u64,
    /// Number of expired reset grants deleted
    pub expired_grants_deleted: u64,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get total number of rows removed
    pub fn total_cleaned(&self) -> u64 {
        self.expired_otps_deleted + self.expired_grants_deleted
    }
}
