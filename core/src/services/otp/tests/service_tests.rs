//! Unit tests for the passcode service

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::account::{Account, AccountRole};
use crate::domain::entities::otp_record::CODE_LENGTH;
use crate::errors::DomainError;
use crate::repositories::mock::{
    MockAccountRepository, MockOtpRepository, MockResetGrantRepository,
};
use crate::services::clock::{Clock, FixedClock};
use crate::services::otp::{OtpService, OtpServiceConfig};

use super::mocks::MockMailService;

const EMAIL: &str = "user@example.com";

type TestService =
    OtpService<MockAccountRepository, MockOtpRepository, MockResetGrantRepository, MockMailService>;

struct Fixture {
    service: Arc<TestService>,
    otps: Arc<MockOtpRepository>,
    grants: Arc<MockResetGrantRepository>,
    mail: Arc<MockMailService>,
    clock: Arc<FixedClock>,
}

fn registered_accounts() -> MockAccountRepository {
    MockAccountRepository::with_accounts([Account::new(
        EMAIL.to_string(),
        "Jane Shopper".to_string(),
        "$2b$04$existing".to_string(),
        AccountRole::User,
    )])
}

fn fixture_with(config: OtpServiceConfig, otps: MockOtpRepository, mail_fails: bool) -> Fixture {
    build_fixture(config, otps, MockResetGrantRepository::new(), mail_fails)
}

fn build_fixture(
    config: OtpServiceConfig,
    otps: MockOtpRepository,
    grants: MockResetGrantRepository,
    mail_fails: bool,
) -> Fixture {
    let otps = Arc::new(otps);
    let grants = Arc::new(grants);
    let mail = Arc::new(MockMailService::new(mail_fails));
    let clock = Arc::new(FixedClock::new(Utc::now()));

    let service = OtpService::with_clock(
        Arc::new(registered_accounts()),
        otps.clone(),
        grants.clone(),
        mail.clone(),
        clock.clone(),
        config,
    );

    Fixture {
        service: Arc::new(service),
        otps,
        grants,
        mail,
        clock,
    }
}

fn fixture() -> Fixture {
    fixture_with(OtpServiceConfig::default(), MockOtpRepository::new(), false)
}

#[tokio::test]
async fn test_issue_otp_success() {
    let f = fixture();
    let issued_at = f.clock.now();

    let result = f.service.issue_otp(EMAIL).await.unwrap();
    assert_eq!(result.email, EMAIL);
    assert_eq!(result.expires_at, issued_at + Duration::minutes(10));
    assert!(result.message_id.starts_with("mock-msg-"));

    // Code was mailed and stored
    let sent = f.mail.last_code_for(EMAIL).unwrap();
    assert_eq!(sent.len(), CODE_LENGTH);

    let stored = f.otps.records_for(EMAIL).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, result.otp_id);
    assert_eq!(stored[0].code, sent);
}

#[tokio::test]
async fn test_issue_otp_normalizes_email() {
    let f = fixture();

    let result = f.service.issue_otp("  User@Example.COM ").await.unwrap();
    assert_eq!(result.email, EMAIL);
    assert!(f.mail.last_code_for(EMAIL).is_some());
}

#[tokio::test]
async fn test_issue_otp_unknown_account() {
    let f = fixture();

    let result = f.service.issue_otp("ghost@example.com").await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));

    // Nothing stored, nothing sent
    assert!(f.otps.is_empty().await);
    assert_eq!(f.mail.sent_count(), 0);
}

#[tokio::test]
async fn test_issue_otp_invalid_email() {
    let f = fixture();

    let result = f.service.issue_otp("not-an-email").await;
    match result {
        Err(DomainError::Validation { message }) => {
            assert!(message.contains("Invalid email format"));
        }
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_issue_otp_delivery_failure_is_distinct() {
    let f = fixture_with(OtpServiceConfig::default(), MockOtpRepository::new(), true);

    let result = f.service.issue_otp(EMAIL).await;
    assert!(matches!(result, Err(DomainError::DeliveryFailure { .. })));

    // The row stays and expires on its own
    assert_eq!(f.otps.len().await, 1);
}

#[tokio::test]
async fn test_issue_otp_store_failure() {
    let f = fixture_with(OtpServiceConfig::default(), MockOtpRepository::failing(), false);

    let result = f.service.issue_otp(EMAIL).await;
    assert!(matches!(result, Err(DomainError::StoreFailure { .. })));
    assert_eq!(f.mail.sent_count(), 0);
}

#[tokio::test]
async fn test_verify_otp_succeeds_exactly_once() {
    let f = fixture();
    f.service.issue_otp(EMAIL).await.unwrap();
    let code = f.mail.last_code_for(EMAIL).unwrap();

    let result = f.service.verify_otp(EMAIL, &code).await.unwrap();
    assert_eq!(result.email, EMAIL);
    assert!(f.otps.is_empty().await);

    let second = f.service.verify_otp(EMAIL, &code).await;
    assert_eq!(second.unwrap_err(), DomainError::InvalidOtp);
}

#[tokio::test]
async fn test_verify_otp_wrong_code_and_wrong_email_are_identical() {
    let f = fixture();
    f.service.issue_otp(EMAIL).await.unwrap();
    let code = f.mail.last_code_for(EMAIL).unwrap();
    let wrong_code = if code == "999999" { "100000" } else { "999999" };

    let wrong_code_err = f.service.verify_otp(EMAIL, wrong_code).await.unwrap_err();
    let wrong_email_err = f
        .service
        .verify_otp("other@example.com", &code)
        .await
        .unwrap_err();

    assert_eq!(wrong_code_err, wrong_email_err);
    assert_eq!(wrong_code_err.to_string(), wrong_email_err.to_string());

    // Failed attempts leave the record usable
    assert!(f.service.verify_otp(EMAIL, &code).await.is_ok());
}

#[tokio::test]
async fn test_verify_otp_malformed_code_reads_as_invalid() {
    let f = fixture();
    f.service.issue_otp(EMAIL).await.unwrap();

    for candidate in ["", "12345", "1234567", "12a456"] {
        let result = f.service.verify_otp(EMAIL, candidate).await;
        assert_eq!(result.unwrap_err(), DomainError::InvalidOtp);
    }
}

#[tokio::test]
async fn test_verify_otp_accepts_at_expiry_instant() {
    let f = fixture();
    let result = f.service.issue_otp(EMAIL).await.unwrap();
    let code = f.mail.last_code_for(EMAIL).unwrap();

    f.clock.set(result.expires_at);
    assert!(f.service.verify_otp(EMAIL, &code).await.is_ok());
}

#[tokio::test]
async fn test_verify_otp_rejects_after_expiry() {
    let f = fixture();
    f.service.issue_otp(EMAIL).await.unwrap();
    let code = f.mail.last_code_for(EMAIL).unwrap();

    f.clock.advance(Duration::minutes(10) + Duration::seconds(1));
    let result = f.service.verify_otp(EMAIL, &code).await;
    assert_eq!(result.unwrap_err(), DomainError::InvalidOtp);
}

#[tokio::test]
async fn test_newer_code_verifies_while_older_is_outstanding() {
    let f = fixture();
    f.service.issue_otp(EMAIL).await.unwrap();
    let first = f.mail.last_code_for(EMAIL).unwrap();

    f.clock.advance(Duration::seconds(30));
    f.service.issue_otp(EMAIL).await.unwrap();
    let second = f.mail.last_code_for(EMAIL).unwrap();

    assert!(f.service.verify_otp(EMAIL, &second).await.is_ok());

    // Reissue does not invalidate by default
    let remaining = f.otps.records_for(EMAIL).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].code, first);
}

#[tokio::test]
async fn test_reissue_invalidates_previous_when_configured() {
    let config = OtpServiceConfig {
        invalidate_previous_on_issue: true,
        ..Default::default()
    };
    let f = fixture_with(config, MockOtpRepository::new(), false);

    f.service.issue_otp(EMAIL).await.unwrap();
    let first = f.mail.last_code_for(EMAIL).unwrap();
    f.service.issue_otp(EMAIL).await.unwrap();
    let second = f.mail.last_code_for(EMAIL).unwrap();

    assert_eq!(f.otps.records_for(EMAIL).await.len(), 1);
    if first != second {
        assert_eq!(
            f.service.verify_otp(EMAIL, &first).await.unwrap_err(),
            DomainError::InvalidOtp
        );
    }
    assert!(f.service.verify_otp(EMAIL, &second).await.is_ok());
}

#[tokio::test]
async fn test_verify_otp_records_reset_grant() {
    let f = fixture();
    f.service.issue_otp(EMAIL).await.unwrap();
    let code = f.mail.last_code_for(EMAIL).unwrap();

    let result = f.service.verify_otp(EMAIL, &code).await.unwrap();
    assert_eq!(
        result.grant_expires_at,
        Some(result.verified_at + Duration::minutes(10))
    );
    assert_eq!(f.grants.len().await, 1);
}

#[tokio::test]
async fn test_verify_otp_without_grants() {
    let config = OtpServiceConfig {
        issue_reset_grant: false,
        ..Default::default()
    };
    let f = fixture_with(config, MockOtpRepository::new(), false);
    f.service.issue_otp(EMAIL).await.unwrap();
    let code = f.mail.last_code_for(EMAIL).unwrap();

    let result = f.service.verify_otp(EMAIL, &code).await.unwrap();
    assert!(result.grant_expires_at.is_none());
    assert!(f.grants.is_empty().await);
}

#[tokio::test]
async fn test_grant_store_failure_leaves_code_usable() {
    let otps = MockOtpRepository::new();
    let f = build_fixture(
        OtpServiceConfig::default(),
        otps.clone(),
        MockResetGrantRepository::failing_inserts(),
        false,
    );
    f.service.issue_otp(EMAIL).await.unwrap();
    let code = f.mail.last_code_for(EMAIL).unwrap();

    let result = f.service.verify_otp(EMAIL, &code).await;
    assert!(matches!(result, Err(DomainError::StoreFailure { .. })));
    assert!(f.grants.is_empty().await);

    // Code was not consumed
    let remaining = f.otps.records_for(EMAIL).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].code, code);

    // Once the grant store recovers the same code still works
    let retry = build_fixture(
        OtpServiceConfig::default(),
        otps,
        MockResetGrantRepository::new(),
        false,
    );
    assert!(retry.service.verify_otp(EMAIL, &code).await.is_ok());
    assert!(f.otps.is_empty().await);
    assert_eq!(retry.grants.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_verification_consumes_once() {
    let f = fixture();
    f.service.issue_otp(EMAIL).await.unwrap();
    let code = f.mail.last_code_for(EMAIL).unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = f.service.clone();
            let code = code.clone();
            tokio::spawn(async move { service.verify_otp(EMAIL, &code).await })
        })
        .collect();

    let results = futures_util::future::join_all(handles).await;
    let successes = results
        .iter()
        .filter(|r| matches!(r, Ok(Ok(_))))
        .count();
    let invalid = results
        .iter()
        .filter(|r| matches!(r, Ok(Err(DomainError::InvalidOtp))))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(invalid, 15);
    assert_eq!(f.grants.len().await, 1);
}
