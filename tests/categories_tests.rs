// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyjar::categories::{Category, FALLBACK_ICON, format_category};
use moneyjar::commands::categories::list_rows;
use moneyjar::models::TransactionType;

#[test]
fn every_key_round_trips() {
    for c in Category::ALL {
        assert_eq!(Category::from_key(c.key()), Some(c));
    }
}

#[test]
fn serde_uses_registry_keys() {
    for c in Category::ALL {
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, format!("\"{}\"", c.key()));
    }
}

#[test]
fn kinds_split_the_registry() {
    let income: Vec<_> = Category::for_kind(TransactionType::Income).collect();
    assert_eq!(
        income,
        vec![
            Category::Salary,
            Category::Bonus,
            Category::Investment,
            Category::OtherIncome
        ]
    );
    assert_eq!(Category::for_kind(TransactionType::Expense).count(), 7);
}

#[test]
fn known_key_shows_icon_and_label() {
    let shown = format_category("food");
    assert_eq!(shown.icon, "🍜");
    assert_eq!(shown.label, "อาหาร");
}

#[test]
fn unknown_key_falls_back_to_raw_key() {
    let shown = format_category("crypto");
    assert_eq!(shown.icon, FALLBACK_ICON);
    assert_eq!(shown.label, "crypto");

    let shown = format_category("");
    assert_eq!(shown.icon, FALLBACK_ICON);
    assert_eq!(shown.label, "");
}

#[test]
fn category_listing_filters_by_type() {
    assert_eq!(list_rows(None).len(), 11);
    let rows = list_rows(Some(TransactionType::Income));
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r[3] == "income"));
}
