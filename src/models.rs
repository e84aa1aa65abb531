// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::categories::Category;
use crate::errors::ValidationError;

/// Largest amount a single form may carry (one trillion baht).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// A transaction as read back from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: String,
    pub external_key: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub date: Option<DateTime<Utc>>,
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTransaction {
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    pub kind: TransactionType,
}

impl TransactionForm {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
        }
    }

    pub fn validate(&self, kind: TransactionType) -> Result<ValidTransaction, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let amount_raw = self.amount.trim();
        let amount = amount_raw
            .parse::<Decimal>()
            .map_err(|_| ValidationError::InvalidAmount(amount_raw.to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount.to_string()));
        }
        if amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge {
                amount: amount.to_string(),
                max: MAX_AMOUNT.to_string(),
            });
        }

        let category_key = self.category.trim();
        if category_key.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let category = Category::from_key(category_key)
            .ok_or_else(|| ValidationError::UnknownCategory(category_key.to_string()))?;
        if category.kind() != kind {
            return Err(ValidationError::CategoryMismatch {
                category: category_key.to_string(),
                kind: kind.to_string(),
            });
        }

        Ok(ValidTransaction {
            description: description.to_string(),
            amount,
            category,
            kind,
        })
    }
}

/// A validated transaction stamped with its client id and creation time, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    pub kind: TransactionType,
    pub date: DateTime<Utc>,
}

impl NewTransaction {
    pub fn new(valid: ValidTransaction, id: String, date: DateTime<Utc>) -> Self {
        Self {
            id,
            description: valid.description,
            amount: valid.amount,
            category: valid.category,
            kind: valid.kind,
            date,
        }
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "id": self.id,
            "description": self.description,
            "amount": self.amount.to_string(),
            "category": self.category.key(),
            "type": self.kind.as_str(),
            "date": self.date.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}
