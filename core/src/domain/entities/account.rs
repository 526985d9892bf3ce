//! Account entity representing a registered storefront user or vendor.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Represents the role of an account in the storefront
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// A shopper
    User,
    /// A seller managing products and orders
    Vendor,
    /// Back-office staff
    Admin,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::User => "user",
            AccountRole::Vendor => "vendor",
            AccountRole::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(AccountRole::User),
            "vendor" => Ok(AccountRole::Vendor),
            "admin" => Ok(AccountRole::Admin),
            other => Err(DomainError::Validation {
                message: format!("Unknown account role: {}", other),
            }),
        }
    }
}

/// Account entity as seen by the recovery flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Login email, stored normalized (trimmed, lowercase)
    pub email: String,

    /// Display name
    pub name: String,

    /// bcrypt hash of the current password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role of the account
    pub role: AccountRole,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new Account instance
    pub fn new(email: String, name: String, password_hash: String, role: AccountRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    pub fn is_vendor(&self) -> bool {
        self.role == AccountRole::Vendor
    }
}
