// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use comfy_table::Table;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::controller::LedgerController;
use crate::format::{format_currency, format_thai_date};
use crate::ledger::LedgerView;
use crate::notify::Notifier;
use crate::store::SnapshotStore;
use crate::utils::{maybe_print_json, pretty_table};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub date: String,
    pub transactions: usize,
    pub balance: Decimal,
    pub income: Decimal,
    pub expense: Decimal,
}

pub fn summarize(view: &LedgerView, today: NaiveDate) -> Summary {
    let totals = view.totals();
    Summary {
        date: format_thai_date(today),
        transactions: view.len(),
        balance: totals.balance,
        income: totals.income,
        expense: totals.expense,
    }
}

pub fn summary_table(summary: &Summary) -> Table {
    pretty_table(
        &["Balance", "Income", "Expense"],
        vec![vec![
            format_currency(summary.balance),
            format_currency(summary.income),
            format_currency(summary.expense),
        ]],
    )
}

pub fn handle<S: SnapshotStore, N: Notifier>(
    ledger: &mut LedgerController<S, N>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    ledger.refresh().context("Load transactions")?;
    let summary = summarize(ledger.view(), Local::now().date_naive());
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        println!("{}", summary.date);
        println!("{}", summary_table(&summary));
    }
    Ok(())
}
