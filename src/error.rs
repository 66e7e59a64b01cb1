use thiserror::Error;

use crate::schema::ValidationError;

/// Failures of the account service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid account: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    #[error("account {0} not found")]
    NotFound(i64),

    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type ServiceResult<T> = Result<T, ServiceError>;
