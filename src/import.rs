// 📂 Bulk import - CSV → accounts
//
// Expected header: name,currency,country[,balance,status]
// Every row goes through the same validation as an HTTP create.

use std::path::Path;

use anyhow::{Context, Result};

use crate::entities::NewAccount;
use crate::error::ServiceError;
use crate::service::AccountService;

/// A row that could not be imported (line numbers count the header as line 1)
#[derive(Debug, Clone)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub created: Vec<i64>,
    pub rejected: Vec<RejectedRow>,
}

/// Create one account per CSV row. Bad rows are skipped and reported;
/// a storage failure aborts the whole import.
pub fn import_accounts(service: &AccountService, csv_path: &Path) -> Result<ImportSummary> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    let mut summary = ImportSummary::default();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                summary.rejected.push(RejectedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let new: NewAccount = match record.deserialize(Some(&headers)) {
            Ok(new) => new,
            Err(e) => {
                summary.rejected.push(RejectedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match service.create(new) {
            Ok(account) => summary.created.push(account.id),
            Err(ServiceError::Validation(errors)) => {
                let reason = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                summary.rejected.push(RejectedRow { line, reason });
            }
            Err(e) => return Err(anyhow::Error::new(e)).context("Import aborted"),
        }
    }

    tracing::info!(
        created = summary.created.len(),
        rejected = summary.rejected.len(),
        "csv import finished"
    );

    Ok(summary)
}
