// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The fixed category registry.
//!
//! Every category belongs to exactly one [`TransactionType`]. Keys are the
//! strings persisted in the store; unknown keys read back from a snapshot are
//! rendered through [`format_category`] with a generic glyph.

use serde::{Deserialize, Serialize};

use crate::models::TransactionType;

pub const FALLBACK_ICON: &str = "💰";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Salary,
    Bonus,
    Investment,
    OtherIncome,
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Health,
    OtherExpense,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Salary,
        Category::Bonus,
        Category::Investment,
        Category::OtherIncome,
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Health,
        Category::OtherExpense,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Bonus => "bonus",
            Category::Investment => "investment",
            Category::OtherIncome => "other-income",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Bills => "bills",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::OtherExpense => "other-expense",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Salary => "💼",
            Category::Bonus => "🎁",
            Category::Investment => "📊",
            Category::OtherIncome => "💵",
            Category::Food => "🍜",
            Category::Transport => "🚗",
            Category::Shopping => "🛍️",
            Category::Bills => "📄",
            Category::Entertainment => "🎮",
            Category::Health => "🏥",
            Category::OtherExpense => "💸",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Salary => "เงินเดือน",
            Category::Bonus => "โบนัส",
            Category::Investment => "ลงทุน",
            Category::OtherIncome => "รายรับอื่นๆ",
            Category::Food => "อาหาร",
            Category::Transport => "เดินทาง",
            Category::Shopping => "ช้อปปิ้ง",
            Category::Bills => "ค่าบริการ",
            Category::Entertainment => "ความบันเทิง",
            Category::Health => "สุขภาพ",
            Category::OtherExpense => "รายจ่ายอื่นๆ",
        }
    }

    pub fn kind(self) -> TransactionType {
        match self {
            Category::Salary | Category::Bonus | Category::Investment | Category::OtherIncome => {
                TransactionType::Income
            }
            _ => TransactionType::Expense,
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Categories offered for `kind`, in registry order.
    pub fn for_kind(kind: TransactionType) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| c.kind() == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDisplay {
    pub icon: &'static str,
    pub label: String,
}

pub fn format_category(key: &str) -> CategoryDisplay {
    match Category::from_key(key) {
        Some(c) => CategoryDisplay {
            icon: c.icon(),
            label: c.label().to_string(),
        },
        None => CategoryDisplay {
            icon: FALLBACK_ICON,
            label: key.to_string(),
        },
    }
}
