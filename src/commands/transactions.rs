// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow};
use comfy_table::Table;

use super::required;
use crate::controller::LedgerController;
use crate::ledger::DisplayRow;
use crate::models::{TransactionForm, TransactionType};
use crate::notify::{MSG_CONFIRM_CLEAR, Notifier};
use crate::store::SnapshotStore;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle<S: SnapshotStore, N: Notifier>(
    ledger: &mut LedgerController<S, N>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => remove(ledger, sub)?,
        Some(("clear", sub)) => clear(ledger, sub, confirm_on_stdin)?,
        _ => {}
    }
    Ok(())
}

fn add<S: SnapshotStore, N: Notifier>(
    ledger: &mut LedgerController<S, N>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let kind = match sub.get_one::<String>("type") {
        Some(t) => t.parse::<TransactionType>().map_err(|e| anyhow!(e))?,
        None => TransactionType::default(),
    };
    ledger.select_type(kind);
    let form = TransactionForm::new(
        required(sub, "description")?,
        required(sub, "amount")?,
        required(sub, "category")?,
    );
    let key = ledger.submit(&form)?;
    println!("Recorded {} '{}' (key: {})", kind, form.description.trim(), key);
    Ok(())
}

fn list<S: SnapshotStore, N: Notifier>(
    ledger: &mut LedgerController<S, N>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions yet");
        } else {
            println!("{}", rows_table(&data));
        }
    }
    Ok(())
}

/// Current rows in display order, truncated to `--limit` when given.
pub fn query_rows<S: SnapshotStore, N: Notifier>(
    ledger: &mut LedgerController<S, N>,
    sub: &clap::ArgMatches,
) -> Result<Vec<DisplayRow>> {
    ledger.refresh().context("Load transactions")?;
    let mut rows = ledger.view().rows();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

pub fn rows_table(rows: &[DisplayRow]) -> Table {
    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.date
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                format!("{} {}", r.icon, r.category),
                r.description.clone(),
                r.display_amount.clone(),
                r.key.clone().unwrap_or_default(),
            ]
        })
        .collect();
    pretty_table(&["Date", "Category", "Description", "Amount", "Key"], data)
}

fn remove<S: SnapshotStore, N: Notifier>(
    ledger: &mut LedgerController<S, N>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let key = required(sub, "key")?.trim();
    ledger.delete(key)?;
    println!("Removed transaction {}", key);
    Ok(())
}

pub fn clear<S: SnapshotStore, N: Notifier>(
    ledger: &mut LedgerController<S, N>,
    sub: &clap::ArgMatches,
    confirm: impl FnOnce() -> bool,
) -> Result<()> {
    ledger.refresh().context("Load transactions")?;
    if ledger.view().is_empty() {
        println!("No transactions to clear");
        return Ok(());
    }
    let skip_prompt = sub.get_flag("yes");
    let cleared = ledger.clear_all(|| skip_prompt || confirm())?;
    if !cleared {
        println!("Nothing was deleted");
    }
    Ok(())
}

fn confirm_on_stdin() -> bool {
    print!("{} [y/N] ", MSG_CONFIRM_CLEAR);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "ใช่"
    )
}
