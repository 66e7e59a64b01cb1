// IE Bank - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod import;
pub mod schema;
pub mod service;
pub mod telemetry;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use db::{
    delete_account, get_account, get_all_accounts, insert_account, open_database,
    setup_database, update_account, verify_count,
};
pub use entities::{Account, AccountUpdate, NewAccount};
pub use error::{ServiceError, ServiceResult};
pub use import::{import_accounts, ImportSummary, RejectedRow};
pub use schema::{validate_new_account, validate_update, ValidationError, ValidationResult};
pub use service::AccountService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
