//! In-process mail dispatcher for development and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

use shop_core::services::otp::MailServiceTrait;
use shop_shared::utils::email::mask_email;

/// A message accepted by [`LogMailService`]
#[derive(Debug, Clone)]
pub struct RecordedMail {
    pub message_id: String,
    pub to: String,
    pub code: String,
    pub sent_at: DateTime<Utc>,
}

/// Messages kept in memory; the oldest is dropped once full
pub const MAX_RECORDED_MAILS: usize = 100;

/// Mail service that keeps recent messages in memory and logs a masked
/// notice. The code is logged only when built with [`LogMailService::logging_codes`].
#[derive(Clone, Default)]
pub struct LogMailService {
    sent: Arc<Mutex<VecDeque<RecordedMail>>>,
    log_codes: bool,
}

impl LogMailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log mailer that also writes each code to the log, for local development
    pub fn logging_codes() -> Self {
        Self {
            log_codes: true,
            ..Self::default()
        }
    }

    pub fn logs_codes(&self) -> bool {
        self.log_codes
    }

    /// Recorded messages still held, oldest first
    pub fn sent(&self) -> Vec<RecordedMail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Code of the most recent message to `to`
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|mail| mail.to == to)
            .map(|mail| mail.code.clone())
    }
}

#[async_trait]
impl MailServiceTrait for LogMailService {
    async fn send_otp(&self, to: &str, code: &str) -> Result<String, String> {
        let message_id = format!("log-{}", Uuid::new_v4());

        {
            let mut sent = self.sent.lock().unwrap_or_else(PoisonError::into_inner);
            if sent.len() >= MAX_RECORDED_MAILS {
                sent.pop_front();
            }
            sent.push_back(RecordedMail {
                message_id: message_id.clone(),
                to: to.to_string(),
                code: code.to_string(),
                sent_at: Utc::now(),
            });
        }

        if self.log_codes {
            tracing::info!(
                to = %mask_email(to),
                message_id = %message_id,
                code = %code,
                event = "otp_email_logged",
                "Passcode email recorded by log mailer"
            );
        } else {
            tracing::info!(
                to = %mask_email(to),
                message_id = %message_id,
                event = "otp_email_logged",
                "Passcode email recorded by log mailer"
            );
        }

        Ok(message_id)
    }

    fn provider_name(&self) -> &'static str {
        "log"
    }
}
