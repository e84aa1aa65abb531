// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use moneyjar::ledger::{LedgerView, Totals, derive_totals, ingest_snapshot, order_for_display};
use moneyjar::models::{Transaction, TransactionType};
use moneyjar::store::Snapshot;
use rust_decimal::Decimal;
use serde_json::json;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
}

fn tx(key: &str, amount: &str, kind: TransactionType, date: Option<DateTime<Utc>>) -> Transaction {
    Transaction {
        id: format!("id-{}", key),
        external_key: Some(key.to_string()),
        description: key.to_string(),
        amount: d(amount),
        category: "other-income".to_string(),
        kind: Some(kind),
        date,
    }
}

#[test]
fn ingest_empty_or_missing_snapshot() {
    assert!(ingest_snapshot(None).is_empty());
    assert!(ingest_snapshot(Some(&Snapshot::default())).is_empty());
    assert_eq!(Snapshot::from_value(json!(null)), None);
}

#[test]
fn ingest_sets_external_key_from_mapping() {
    let snapshot = Snapshot::from_value(json!({
        "k1": {"id": "a", "description": "Pay", "amount": 1000, "category": "salary",
               "type": "income", "date": "2025-03-01T08:00:00.000Z"},
        "k2": {"id": "b", "description": "Lunch", "amount": "85.50", "category": "food",
               "type": "expense", "date": "2025-03-01T12:30:00.000Z"}
    }))
    .unwrap();

    let records = ingest_snapshot(Some(&snapshot));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].external_key.as_deref(), Some("k1"));
    assert_eq!(records[1].external_key.as_deref(), Some("k2"));
    assert_eq!(records[0].amount, d("1000"));
    assert_eq!(records[1].amount, d("85.50"));
    assert_eq!(records[1].kind, Some(TransactionType::Expense));
    assert_eq!(records[1].date, Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap()));
}

#[test]
fn ingest_trusts_partial_payloads() {
    let snapshot = Snapshot::new(vec![
        ("k1".to_string(), json!({"description": "no amount", "type": "bogus"})),
        ("k2".to_string(), json!(42)),
        ("k3".to_string(), json!({"amount": 250.5, "type": "expense", "date": "yesterday"})),
    ]);
    let records = ingest_snapshot(Some(&snapshot));
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].description, "no amount");
    assert_eq!(records[0].amount, Decimal::ZERO);
    assert_eq!(records[0].kind, None);

    assert_eq!(records[1].external_key.as_deref(), Some("k2"));
    assert_eq!(records[1].description, "");
    assert_eq!(records[1].id, "");

    assert_eq!(records[2].amount, d("250.5"));
    assert_eq!(records[2].date, None);
}

#[test]
fn totals_example() {
    let records = vec![
        tx("a", "1000", TransactionType::Income, Some(at(1))),
        tx("b", "250.50", TransactionType::Expense, Some(at(2))),
    ];
    let totals = derive_totals(&records);
    assert_eq!(totals.income, d("1000.00"));
    assert_eq!(totals.expense, d("250.50"));
    assert_eq!(totals.balance, d("749.50"));

    let ordered = order_for_display(&records);
    assert_eq!(ordered[0].external_key.as_deref(), Some("b"));
    assert_eq!(ordered[1].external_key.as_deref(), Some("a"));
}

#[test]
fn totals_of_nothing_are_zero() {
    assert_eq!(
        derive_totals(&[]),
        Totals {
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            balance: Decimal::ZERO
        }
    );
}

#[test]
fn totals_have_no_float_drift() {
    // 0.1 + 0.2 style sums must stay exact
    let records: Vec<_> = (0..10)
        .map(|i| tx(&format!("k{}", i), "0.10", TransactionType::Income, Some(at(1))))
        .chain(std::iter::once(tx("e", "0.30", TransactionType::Expense, Some(at(1)))))
        .collect();
    let totals = derive_totals(&records);
    assert_eq!(totals.income, d("1.00"));
    assert_eq!(totals.balance, d("0.70"));
    assert_eq!(totals.balance, totals.income - totals.expense);
}

#[test]
fn totals_ignore_input_order() {
    let mut records = vec![
        tx("a", "19.99", TransactionType::Income, Some(at(1))),
        tx("b", "5.01", TransactionType::Expense, Some(at(2))),
        tx("c", "1234.56", TransactionType::Income, Some(at(3))),
        tx("d", "0.07", TransactionType::Expense, Some(at(4))),
    ];
    let forward = derive_totals(&records);
    records.reverse();
    assert_eq!(derive_totals(&records), forward);
    records.swap(0, 2);
    assert_eq!(derive_totals(&records), forward);
}

#[test]
fn records_without_type_count_toward_neither_total() {
    let mut odd = tx("x", "500", TransactionType::Income, Some(at(1)));
    odd.kind = None;
    let records = vec![odd, tx("y", "20", TransactionType::Expense, Some(at(2)))];
    let totals = derive_totals(&records);
    assert_eq!(totals.income, Decimal::ZERO);
    assert_eq!(totals.expense, d("20"));
    assert_eq!(totals.balance, d("-20"));
}

#[test]
fn display_order_is_newest_first_and_stable() {
    let records = vec![
        tx("first", "1", TransactionType::Income, Some(at(5))),
        tx("undated", "1", TransactionType::Income, None),
        tx("second", "1", TransactionType::Income, Some(at(5))),
        tx("newest", "1", TransactionType::Income, Some(at(9))),
        tx("oldest", "1", TransactionType::Income, Some(at(1))),
    ];
    let ordered = order_for_display(&records);
    let keys: Vec<_> = ordered
        .iter()
        .map(|t| t.external_key.clone().unwrap())
        .collect();
    assert_eq!(keys, vec!["newest", "first", "second", "oldest", "undated"]);
    // input untouched
    assert_eq!(records[0].external_key.as_deref(), Some("first"));

    for pair in ordered.windows(2) {
        if let (Some(a), Some(b)) = (pair[0].date, pair[1].date) {
            assert!(a >= b);
        }
    }
}

#[test]
fn view_rows_render_sign_icon_and_label() {
    let snapshot = Snapshot::from_value(json!({
        "k1": {"id": "a", "description": "Salary", "amount": "1000", "category": "salary",
               "type": "income", "date": "2025-03-01T08:00:00.000Z"},
        "k2": {"id": "b", "description": "Mystery", "amount": "250.5", "category": "crypto",
               "type": "expense", "date": "2025-03-02T08:00:00.000Z"}
    }))
    .unwrap();
    let view = LedgerView::from_snapshot(Some(&snapshot));
    assert_eq!(view.len(), 2);
    assert_eq!(view.totals().balance, d("749.5"));

    let rows = view.rows();
    assert_eq!(rows[0].key.as_deref(), Some("k2"));
    assert_eq!(rows[0].icon, "💰");
    assert_eq!(rows[0].category, "crypto");
    assert_eq!(rows[0].display_amount, "-฿250.50");
    assert_eq!(rows[1].icon, "💼");
    assert_eq!(rows[1].category, "เงินเดือน");
    assert_eq!(rows[1].display_amount, "+฿1,000.00");
}

#[test]
fn totals_saturate_instead_of_overflowing() {
    let huge = Decimal::MAX.to_string();
    let records = vec![
        tx("a", &huge, TransactionType::Income, Some(at(1))),
        tx("b", &huge, TransactionType::Income, Some(at(2))),
        tx("c", "-1", TransactionType::Expense, Some(at(3))),
    ];
    let totals = derive_totals(&records);
    assert_eq!(totals.income, Decimal::MAX);
    assert_eq!(totals.expense, d("-1"));
    assert_eq!(totals.balance, Decimal::MAX);

    let snapshot = Snapshot::from_value(json!({
        "k1": {"amount": huge, "type": "expense"},
        "k2": {"amount": huge, "type": "expense"}
    }))
    .unwrap();
    let view = LedgerView::from_snapshot(Some(&snapshot));
    assert_eq!(view.totals().expense, Decimal::MAX);
    assert_eq!(view.totals().balance, Decimal::MIN);
    assert_eq!(view.rows().len(), 2);
}
