// 📐 Shape Layer - Schema Validation
// Validates account request bodies before they reach storage

use crate::entities::{AccountUpdate, NewAccount};
use serde::Serialize;

/// Longest accepted holder name
pub const MAX_NAME_LEN: usize = 32;

/// Longest accepted currency (a symbol like "€" or an ISO code like "EUR")
pub const MAX_CURRENCY_LEN: usize = 3;

/// Longest accepted country name
pub const MAX_COUNTRY_LEN: usize = 32;

/// Longest accepted status label
pub const MAX_STATUS_LEN: usize = 10;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

// ============================================================================
// FIELD RULES
// ============================================================================

fn check_text(errors: &mut Vec<ValidationError>, field: &str, value: &str, max_len: Option<usize>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "Required field is empty"));
        return;
    }

    if let Some(max) = max_len {
        if value.chars().count() > max {
            errors.push(ValidationError::new(
                field,
                &format!("Must be at most {} characters", max),
            ));
        }
    }
}

fn check_balance(errors: &mut Vec<ValidationError>, balance: f64) {
    if !balance.is_finite() {
        errors.push(ValidationError::new("balance", "Must be a finite number"));
    }
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// ACCOUNT VALIDATORS
// ============================================================================

/// Validate a creation request. All problems are reported at once.
pub fn validate_new_account(new: &NewAccount) -> ValidationResult {
    let mut errors = Vec::new();

    check_text(&mut errors, "name", &new.name, Some(MAX_NAME_LEN));
    check_text(&mut errors, "currency", &new.currency, Some(MAX_CURRENCY_LEN));
    check_text(&mut errors, "country", &new.country, Some(MAX_COUNTRY_LEN));

    if let Some(balance) = new.balance {
        check_balance(&mut errors, balance);
    }

    if let Some(status) = &new.status {
        check_text(&mut errors, "status", status, Some(MAX_STATUS_LEN));
    }

    into_result(errors)
}

/// Validate a partial update. Only supplied fields are checked.
pub fn validate_update(update: &AccountUpdate) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(name) = &update.name {
        check_text(&mut errors, "name", name, Some(MAX_NAME_LEN));
    }
    if let Some(currency) = &update.currency {
        check_text(&mut errors, "currency", currency, Some(MAX_CURRENCY_LEN));
    }
    if let Some(country) = &update.country {
        check_text(&mut errors, "country", country, Some(MAX_COUNTRY_LEN));
    }
    if let Some(balance) = update.balance {
        check_balance(&mut errors, balance);
    }
    if let Some(status) = &update.status {
        check_text(&mut errors, "status", status, Some(MAX_STATUS_LEN));
    }

    into_result(errors)
}
