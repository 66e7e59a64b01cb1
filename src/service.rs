// 🏦 Account Resource Service
// Create / list / get / update / delete over the accounts table.
//
// The connection is injected at construction; nothing here owns global state.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use rusqlite::Connection;

use crate::db;
use crate::entities::{Account, AccountUpdate, NewAccount};
use crate::error::{ServiceError, ServiceResult};
use crate::schema;

#[derive(Clone)]
pub struct AccountService {
    db: Arc<Mutex<Connection>>,
}

impl AccountService {
    pub fn new(conn: Connection) -> Self {
        AccountService {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    fn conn(&self) -> ServiceResult<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| ServiceError::Storage(anyhow!("database lock poisoned")))
    }

    pub fn create(&self, new: NewAccount) -> ServiceResult<Account> {
        if let Err(errors) = schema::validate_new_account(&new) {
            tracing::warn!(?errors, "rejected account creation");
            return Err(ServiceError::Validation(errors));
        }

        let account = db::insert_account(&*self.conn()?, &new)?;
        tracing::info!(id = account.id, account_number = %account.account_number, "account created");
        Ok(account)
    }

    pub fn list(&self) -> ServiceResult<Vec<Account>> {
        Ok(db::get_all_accounts(&*self.conn()?)?)
    }

    pub fn get(&self, id: i64) -> ServiceResult<Account> {
        db::get_account(&*self.conn()?, id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Apply only the supplied fields; everything else keeps its value.
    /// An unknown id is reported as not found before the fields are checked.
    pub fn update(&self, id: i64, update: AccountUpdate) -> ServiceResult<Account> {
        let conn = self.conn()?;
        let mut account = db::get_account(&conn, id)?.ok_or(ServiceError::NotFound(id))?;

        if let Err(errors) = schema::validate_update(&update) {
            tracing::warn!(id, ?errors, "rejected account update");
            return Err(ServiceError::Validation(errors));
        }

        if update.is_empty() {
            return Ok(account);
        }

        account.apply(&update);
        if !db::update_account(&conn, &account)? {
            return Err(ServiceError::NotFound(id));
        }

        tracing::info!(id, "account updated");
        Ok(account)
    }

    /// Hard delete, returning the record as it was
    pub fn delete(&self, id: i64) -> ServiceResult<Account> {
        let conn = self.conn()?;
        let account = db::get_account(&conn, id)?.ok_or(ServiceError::NotFound(id))?;

        if !db::delete_account(&conn, id)? {
            return Err(ServiceError::NotFound(id));
        }

        tracing::info!(id, "account deleted");
        Ok(account)
    }
}
