// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns a store snapshot into what the user sees: a newest-first list and
//! the income / expense / balance totals.
//!
//! Everything here is pure. A new snapshot always produces a brand new
//! [`LedgerView`]; nothing is patched in place.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::categories::format_category;
use crate::format::format_signed;
use crate::models::{Transaction, TransactionType};
use crate::store::Snapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Convert a snapshot into transactions, in snapshot order, keyed by the store key.
///
/// Stored data is trusted: malformed fields fall back to defaults rather than
/// dropping the record.
pub fn ingest_snapshot(snapshot: Option<&Snapshot>) -> Vec<Transaction> {
    let Some(snapshot) = snapshot else {
        return Vec::new();
    };
    let empty = Map::new();
    snapshot
        .entries()
        .iter()
        .map(|(key, payload)| {
            let fields = payload.as_object().unwrap_or(&empty);
            Transaction {
                id: str_field(fields, "id"),
                external_key: Some(key.clone()),
                description: str_field(fields, "description"),
                amount: amount_field(key, fields),
                category: str_field(fields, "category"),
                kind: fields
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(|s| TransactionType::from_str(s).ok()),
                date: fields
                    .get("date")
                    .and_then(Value::as_str)
                    .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                    .map(|d| d.with_timezone(&Utc)),
            }
        })
        .collect()
}

/// Newest first. Undated records go last; equal dates keep their input order.
pub fn order_for_display(records: &[Transaction]) -> Vec<Transaction> {
    let mut ordered = records.to_vec();
    // sort_by is stable
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    ordered
}

/// Sum incomes and expenses. Totals saturate at the `Decimal` range instead
/// of overflowing, so a snapshot always produces a view.
pub fn derive_totals(records: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for r in records {
        match r.kind {
            Some(TransactionType::Income) => {
                totals.income = saturating_sum(totals.income, r.amount, "income")
            }
            Some(TransactionType::Expense) => {
                totals.expense = saturating_sum(totals.expense, r.amount, "expense")
            }
            None => {}
        }
    }
    totals.balance = totals
        .income
        .checked_sub(totals.expense)
        .unwrap_or_else(|| {
            tracing::warn!("balance is out of range, clamping");
            clamp_toward(totals.income > totals.expense)
        });
    totals
}

fn saturating_sum(total: Decimal, amount: Decimal, which: &str) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!(which, "total is out of range, clamping");
        clamp_toward(amount.is_sign_positive())
    })
}

fn clamp_toward(positive: bool) -> Decimal {
    if positive { Decimal::MAX } else { Decimal::MIN }
}

/// One rendered list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub key: Option<String>,
    pub id: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub icon: &'static str,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub display_amount: String,
}

/// The current state of the ledger as derived from the latest snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerView {
    transactions: Vec<Transaction>,
    totals: Totals,
}

impl LedgerView {
    pub fn from_snapshot(snapshot: Option<&Snapshot>) -> Self {
        let records = ingest_snapshot(snapshot);
        Self {
            totals: derive_totals(&records),
            transactions: order_for_display(&records),
        }
    }

    /// Transactions in display order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn rows(&self) -> Vec<DisplayRow> {
        self.transactions
            .iter()
            .map(|t| {
                let category = format_category(&t.category);
                DisplayRow {
                    key: t.external_key.clone(),
                    id: t.id.clone(),
                    date: t.date,
                    kind: t.kind,
                    icon: category.icon,
                    category: category.label,
                    description: t.description.clone(),
                    amount: t.amount,
                    display_amount: format_signed(t.amount, t.kind),
                }
            })
            .collect()
    }
}

fn str_field(fields: &Map<String, Value>, name: &str) -> String {
    fields
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn amount_field(key: &str, fields: &Map<String, Value>) -> Decimal {
    let parsed = match fields.get("amount") {
        Some(Value::Number(n)) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        tracing::warn!(key, "stored record has no readable amount, treating it as zero");
        Decimal::ZERO
    })
}
