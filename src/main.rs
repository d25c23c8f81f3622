//! `students` entry point.
//!
//! 1. Parse arguments and load the optional TOML config
//! 2. Set up logging
//! 3. Open the store (fatal if the database is unavailable)
//! 4. Run one command, print its result, close the store
//! 5. Exit non-zero if the command failed

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use student_sqlite::cli::{run_command, Cli};
use student_sqlite::config::{load_config, AppConfig};
use student_sqlite::logging::setup_logging;
use student_sqlite::StudentStore;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.database.path = db.clone();
    }

    setup_logging(&config.logging).context("failed to initialise logging")?;

    let store = StudentStore::open(&config.store_config())
        .context("could not open the student database")?;

    let status = match run_command(&store, &cli.command) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    };

    store.close().context("failed to close the student database")?;
    Ok(status)
}
