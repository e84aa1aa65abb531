// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use moneyjar::config::Settings;
use moneyjar::controller::LedgerController;
use moneyjar::notify::ConsoleNotifier;
use moneyjar::store::SqliteStore;
use moneyjar::{cli, commands};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moneyjar=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let settings = Settings::from_matches(&matches)?;
    let store = SqliteStore::open(&settings.db_path, &settings.collection)
        .with_context(|| format!("Open DB at {}", settings.db_path.display()))?
        .with_poll_interval(settings.poll_interval);
    let mut ledger = LedgerController::new(store, ConsoleNotifier);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", settings.db_path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&mut ledger, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("watch", sub)) => commands::watch::handle(&mut ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
