// 💳 Account Entity - a bank account record
//
// Identity: integer id assigned by storage (never reused)
// Values: name, currency, country, balance, status (can change)
// Fixed at creation: account_number, created_at

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status given to every account that is created without one
pub const DEFAULT_STATUS: &str = "Active";

/// Number of decimal digits in a generated account number
pub const ACCOUNT_NUMBER_LEN: usize = 20;

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// A persisted bank account, exactly as it is returned over the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    /// Storage-assigned identity
    pub id: i64,

    /// Holder name (e.g., "farah orfaly")
    pub name: String,

    /// 20-digit account number, generated once
    pub account_number: String,

    /// Currency symbol or code ("$", "€", "USD")
    pub currency: String,

    pub country: String,

    pub balance: f64,

    pub status: String,

    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Generate a fresh 20-digit account number.
    ///
    /// Digits come from a random v4 UUID; uniqueness is still enforced by the
    /// `accounts.account_number` UNIQUE index.
    pub fn generate_account_number() -> String {
        let modulus = 10u128.pow(ACCOUNT_NUMBER_LEN as u32);
        let value = uuid::Uuid::new_v4().as_u128() % modulus;
        format!("{:0width$}", value, width = ACCOUNT_NUMBER_LEN)
    }

    /// Apply the supplied fields of `update`, leaving all others untouched
    pub fn apply(&mut self, update: &AccountUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(currency) = &update.currency {
            self.currency = currency.clone();
        }
        if let Some(country) = &update.country {
            self.country = country.clone();
        }
        if let Some(balance) = update.balance {
            self.balance = balance;
        }
        if let Some(status) = &update.status {
            self.status = status.clone();
        }
    }
}

// ============================================================================
// REQUEST SHAPES
// ============================================================================

/// Fields accepted when creating an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub currency: String,
    pub country: String,

    #[serde(default)]
    pub balance: Option<f64>,

    #[serde(default)]
    pub status: Option<String>,
}

impl NewAccount {
    pub fn new(name: &str, currency: &str, country: &str) -> Self {
        NewAccount {
            name: name.to_string(),
            currency: currency.to_string(),
            country: country.to_string(),
            balance: None,
            status: None,
        }
    }

    pub fn balance_or_default(&self) -> f64 {
        self.balance.unwrap_or(0.0)
    }

    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS)
    }
}

/// Partial update: `None` means "leave as is".
///
/// Unknown keys (including `id`, `account_number` and `created_at`) are
/// ignored by deserialization, so immutable fields cannot be overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountUpdate {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub balance: Option<f64>,

    #[serde(default)]
    pub status: Option<String>,
}

impl AccountUpdate {
    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.currency.is_none()
            && self.country.is_none()
            && self.balance.is_none()
            && self.status.is_none()
    }
}
