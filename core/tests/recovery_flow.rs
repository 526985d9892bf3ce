//! Integration tests for the full recovery flow: issue, verify, reset

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use shop_core::domain::entities::account::{Account, AccountRole};
use shop_core::errors::DomainError;
use shop_core::repositories::mock::{
    MockAccountRepository, MockOtpRepository, MockResetGrantRepository,
};
use shop_core::repositories::AccountRepository;
use shop_core::services::otp::{MailServiceTrait, OtpService, OtpServiceConfig};
use shop_core::services::password::{PasswordResetConfig, PasswordResetService};

// Mock mail service keeping the last code
#[derive(Default)]
struct CapturingMailService {
    last_code: Mutex<Option<String>>,
}

#[async_trait]
impl MailServiceTrait for CapturingMailService {
    async fn send_otp(&self, _to: &str, code: &str) -> Result<String, String> {
        *self.last_code.lock().unwrap() = Some(code.to_string());
        Ok("msg-1".to_string())
    }

    fn provider_name(&self) -> &'static str {
        "capture"
    }
}

#[tokio::test]
async fn test_issue_verify_reset() {
    let accounts = Arc::new(MockAccountRepository::new());
    accounts
        .create(Account::new(
            "user@example.com".into(),
            "Jane".into(),
            "$2b$04$previous".into(),
            AccountRole::User,
        ))
        .await
        .unwrap();
    let otps = Arc::new(MockOtpRepository::new());
    let grants = Arc::new(MockResetGrantRepository::new());
    let mail = Arc::new(CapturingMailService::default());

    let otp_service = OtpService::new(
        accounts.clone(),
        otps,
        grants.clone(),
        mail.clone(),
        OtpServiceConfig::default(),
    );
    let reset_service = PasswordResetService::new(
        accounts.clone(),
        grants,
        PasswordResetConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
    );

    // Reset before verification is refused
    let early = reset_service
        .reset_password("user@example.com", "brand-new-pass")
        .await;
    assert_eq!(early.unwrap_err(), DomainError::ResetNotAuthorized);

    otp_service.issue_otp("user@example.com").await.unwrap();
    let code = mail.last_code.lock().unwrap().clone().unwrap();

    otp_service.verify_otp("user@example.com", &code).await.unwrap();
    reset_service
        .reset_password("user@example.com", "brand-new-pass")
        .await
        .unwrap();

    let account = accounts
        .find_by_email("user@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(reset_service
        .hasher()
        .verify("brand-new-pass", &account.password_hash)
        .await
        .unwrap());

    // Replaying the same code fails the documented way
    let replay = otp_service.verify_otp("user@example.com", &code).await;
    assert_eq!(replay.unwrap_err().to_string(), "Invalid or expired OTP");
}
