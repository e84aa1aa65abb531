// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Local;

use super::summary::{summarize, summary_table};
use super::transactions::rows_table;
use crate::controller::LedgerController;
use crate::notify::Notifier;
use crate::store::SnapshotStore;

/// Re-render on every snapshot until the subscription ends (or the process is interrupted).
pub fn handle<S: SnapshotStore, N: Notifier>(
    ledger: &mut LedgerController<S, N>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied();
    let subscription = ledger
        .store()
        .subscribe()
        .with_context(|| format!("Subscribe to '{}'", ledger.store().path()))?;
    tracing::info!(path = ledger.store().path(), "watching for changes");

    while let Some(event) = subscription.next_event() {
        ledger.apply(event);
        let summary = summarize(ledger.view(), Local::now().date_naive());
        println!("── {} ──", summary.date);
        println!("{}", summary_table(&summary));
        let mut rows = ledger.view().rows();
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        if rows.is_empty() {
            println!("No transactions yet");
        } else {
            println!("{}", rows_table(&rows));
        }
    }
    Ok(())
}
