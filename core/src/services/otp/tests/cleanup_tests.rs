//! Tests for the expired passcode sweeper

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::otp_record::OtpRecord;
use crate::domain::entities::reset_grant::ResetGrant;
use crate::repositories::mock::{MockOtpRepository, MockResetGrantRepository};
use crate::repositories::{OtpRepository, ResetGrantRepository};
use crate::services::clock::FixedClock;
use crate::services::otp::{OtpCleanupConfig, OtpCleanupService};

#[tokio::test]
async fn test_cleanup_removes_only_expired_rows() {
    let now = Utc::now();
    let otps = Arc::new(MockOtpRepository::new());
    let grants = Arc::new(MockResetGrantRepository::new());

    otps.insert(OtpRecord::new("old@example.com".into(), now - Duration::minutes(30), 10))
        .await
        .unwrap();
    otps.insert(OtpRecord::new("live@example.com".into(), now, 10))
        .await
        .unwrap();
    grants
        .insert(ResetGrant::new("old@example.com".into(), now - Duration::hours(1), 10))
        .await
        .unwrap();

    let service = OtpCleanupService::with_clock(
        otps.clone(),
        grants.clone(),
        Arc::new(FixedClock::new(now)),
        OtpCleanupConfig::default(),
    );

    let result = service.run_cleanup().await.unwrap();
    assert!(result.is_success());
    assert_eq!(result.expired_otps_deleted, 1);
    assert_eq!(result.expired_grants_deleted, 1);
    assert_eq!(result.total_cleaned(), 2);

    assert_eq!(otps.len().await, 1);
    assert_eq!(otps.records_for("live@example.com").await.len(), 1);
    assert!(grants.is_empty().await);
}

#[tokio::test]
async fn test_cleanup_collects_store_errors() {
    let service = OtpCleanupService::new(
        Arc::new(MockOtpRepository::failing()),
        Arc::new(MockResetGrantRepository::new()),
        OtpCleanupConfig::default(),
    );

    let result = service.run_cleanup().await.unwrap();
    assert!(!result.is_success());
    assert_eq!(result.errors.len(), 1);
}

#[tokio::test]
async fn test_disabled_cleanup_does_nothing() {
    let now = Utc::now();
    let otps = Arc::new(MockOtpRepository::new());
    otps.insert(OtpRecord::new("old@example.com".into(), now - Duration::hours(1), 10))
        .await
        .unwrap();

    let service = Arc::new(OtpCleanupService::new(
        otps.clone(),
        Arc::new(MockResetGrantRepository::new()),
        OtpCleanupConfig {
            enabled: false,
            ..Default::default()
        },
    ));

    let result = service.run_cleanup().await.unwrap();
    assert_eq!(result.total_cleaned(), 0);
    assert!(service.start_background_task().is_none());
    assert_eq!(otps.len().await, 1);
}

#[tokio::test]
async fn test_background_task_runs_first_cycle_immediately() {
    let now = Utc::now();
    let otps = Arc::new(MockOtpRepository::new());
    otps.insert(OtpRecord::new("old@example.com".into(), now - Duration::hours(1), 10))
        .await
        .unwrap();

    let service = Arc::new(OtpCleanupService::new(
        otps.clone(),
        Arc::new(MockResetGrantRepository::new()),
        OtpCleanupConfig {
            interval_seconds: 3600,
            enabled: true,
        },
    ));

    let handle = service.start_background_task().unwrap();
    for _ in 0..50 {
        if otps.is_empty().await {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    handle.abort();

    assert!(otps.is_empty().await);
}
