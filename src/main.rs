use anyhow::{bail, Result};
use std::env;
use std::path::Path;

// Use library instead of local modules
use iebank::{import_accounts, open_database, telemetry, verify_count, AccountService, Config};

const USAGE: &str = "usage: iebank <init | list | import <file.csv>>";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format);

    match args.get(1).map(String::as_str) {
        Some("init") => run_init(&config),
        Some("list") => run_list(&config),
        Some("import") => match args.get(2) {
            Some(csv_path) => run_import(&config, Path::new(csv_path)),
            None => bail!("{}", USAGE),
        },
        _ => bail!("{}", USAGE),
    }
}

fn run_init(config: &Config) -> Result<()> {
    println!("🔧 Setting up database at {}...", config.db_path);
    let conn = open_database(&config.db_path)?;
    println!("✓ Schema ready ({} accounts)", verify_count(&conn)?);
    Ok(())
}

fn run_list(config: &Config) -> Result<()> {
    let service = AccountService::new(open_database(&config.db_path)?);
    let accounts = service.list()?;

    if accounts.is_empty() {
        println!("No accounts yet.");
        return Ok(());
    }

    println!(
        "{:>6}  {:<32}  {:<20}  {:>12}  {:<3}  {:<16}  {}",
        "ID", "NAME", "ACCOUNT NUMBER", "BALANCE", "CUR", "COUNTRY", "STATUS"
    );
    for account in &accounts {
        println!(
            "{:>6}  {:<32}  {:<20}  {:>12.2}  {:<3}  {:<16}  {}",
            account.id,
            account.name,
            account.account_number,
            account.balance,
            account.currency,
            account.country,
            account.status
        );
    }
    println!("\n{} accounts", accounts.len());

    Ok(())
}

fn run_import(config: &Config, csv_path: &Path) -> Result<()> {
    println!("📂 Importing accounts from {}...", csv_path.display());

    let service = AccountService::new(open_database(&config.db_path)?);
    let summary = import_accounts(&service, csv_path)?;

    println!("✓ Created {} accounts", summary.created.len());
    if !summary.rejected.is_empty() {
        println!("⚠️  Skipped {} rows:", summary.rejected.len());
        for row in &summary.rejected {
            println!("   line {}: {}", row.line, row.reason);
        }
    }

    Ok(())
}
