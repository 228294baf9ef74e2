//! CLI probe for `plume_core`.
//!
//! # Responsibility
//! - Open the configured store (or an in-memory one) and print the
//!   system-wide rule results.
//! - Keep output deterministic, one `key=value` pair per line.

use plume_core::db::{open_db, open_db_in_memory};
use plume_core::{init_logging, AccountRepository, CoreConfig, RuleEvaluator, SqliteStore};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("plume: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }

    println!("plume_core version={}", plume_core::core_version());

    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = SqliteStore::new(&conn);
    let rules = RuleEvaluator::new(&store);

    println!("accounts={}", store.list_accounts()?.len());
    println!(
        "privileged_account_exists={}",
        rules.system_has_privileged_account()?
    );
    println!(
        "important_content_exists={}",
        rules.system_has_important_content()?
    );
    Ok(())
}
