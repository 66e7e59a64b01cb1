use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::entities::{Account, NewAccount};

/// Path value that selects a throwaway in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// How many fresh account numbers to try before giving up on an insert
pub const MAX_ACCOUNT_NUMBER_ATTEMPTS: usize = 5;

const ACCOUNT_COLUMNS: &str =
    "id, name, account_number, currency, country, balance, status, created_at";

/// Open (or create) the database at `path` and make sure the schema exists
pub fn open_database(path: &str) -> Result<Connection> {
    let conn = if path == IN_MEMORY_PATH {
        Connection::open_in_memory().context("Failed to open in-memory database")?
    } else {
        Connection::open(path).with_context(|| format!("Failed to open database at {}", path))?
    };

    setup_database(&conn)?;
    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Accounts Table
    // AUTOINCREMENT keeps ids from being reused after a delete
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            account_number TEXT NOT NULL,
            currency TEXT NOT NULL,
            country TEXT NOT NULL,
            balance REAL NOT NULL DEFAULT 0.0,
            status TEXT NOT NULL DEFAULT 'Active',
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_account_number ON accounts(account_number)",
        [],
    )?;

    Ok(())
}

fn account_from_row(row: &Row) -> rusqlite::Result<Account> {
    let created_at_str: String = row.get(7)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        account_number: row.get(2)?,
        currency: row.get(3)?,
        country: row.get(4)?,
        balance: row.get(5)?,
        status: row.get(6)?,
        created_at,
    })
}

fn is_account_number_collision(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, msg) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && msg.as_deref().map_or(false, |m| m.contains("account_number"))
        }
        _ => false,
    }
}

/// Insert a new account, generating its account number and defaults.
///
/// A colliding account number is regenerated up to
/// `MAX_ACCOUNT_NUMBER_ATTEMPTS` times.
pub fn insert_account(conn: &Connection, new: &NewAccount) -> Result<Account> {
    let created_at = Utc::now();
    let created_at_str = created_at.to_rfc3339();

    for attempt in 1..=MAX_ACCOUNT_NUMBER_ATTEMPTS {
        let account_number = Account::generate_account_number();

        let result = conn.execute(
            "INSERT INTO accounts (name, account_number, currency, country, balance, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                new.name,
                account_number,
                new.currency,
                new.country,
                new.balance_or_default(),
                new.status_or_default(),
                created_at_str,
            ],
        );

        match result {
            Ok(_) => {
                return Ok(Account {
                    id: conn.last_insert_rowid(),
                    name: new.name.clone(),
                    account_number,
                    currency: new.currency.clone(),
                    country: new.country.clone(),
                    balance: new.balance_or_default(),
                    status: new.status_or_default().to_string(),
                    created_at,
                });
            }
            Err(e) if is_account_number_collision(&e) => {
                tracing::warn!(attempt, "account number collision, regenerating");
            }
            Err(e) => return Err(e).context("Failed to insert account"),
        }
    }

    Err(anyhow!(
        "Could not generate a unique account number after {} attempts",
        MAX_ACCOUNT_NUMBER_ATTEMPTS
    ))
}

/// All accounts in insertion order
pub fn get_all_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM accounts ORDER BY id ASC",
        ACCOUNT_COLUMNS
    ))?;

    let accounts = stmt
        .query_map([], account_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(accounts)
}

pub fn get_account(conn: &Connection, id: i64) -> Result<Option<Account>> {
    let account = conn
        .query_row(
            &format!("SELECT {} FROM accounts WHERE id = ?1", ACCOUNT_COLUMNS),
            params![id],
            account_from_row,
        )
        .optional()
        .with_context(|| format!("Failed to load account {}", id))?;

    Ok(account)
}

/// Write back the mutable fields of `account`. Returns false if the row is gone.
pub fn update_account(conn: &Connection, account: &Account) -> Result<bool> {
    let changed = conn
        .execute(
            "UPDATE accounts
             SET name = ?1,
                 currency = ?2,
                 country = ?3,
                 balance = ?4,
                 status = ?5
             WHERE id = ?6",
            params![
                account.name,
                account.currency,
                account.country,
                account.balance,
                account.status,
                account.id,
            ],
        )
        .with_context(|| format!("Failed to update account {}", account.id))?;

    Ok(changed > 0)
}

/// Hard delete. Returns false if no row had that id.
pub fn delete_account(conn: &Connection, id: i64) -> Result<bool> {
    let removed = conn
        .execute("DELETE FROM accounts WHERE id = ?1", params![id])
        .with_context(|| format!("Failed to delete account {}", id))?;

    Ok(removed > 0)
}

pub fn verify_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;

    Ok(count)
}
