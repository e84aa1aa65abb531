// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Rejected form input. The store is never contacted when one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(String),
    #[error("amount must not exceed {max}, got {amount}")]
    AmountTooLarge { amount: String, max: String },
    #[error("category is required")]
    MissingCategory,
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("category '{category}' cannot be used for {kind} transactions")]
    CategoryMismatch { category: String, kind: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read snapshot: {0}")]
    Read(#[source] BoxError),
    #[error("failed to write record: {0}")]
    Write(#[source] BoxError),
    #[error("failed to delete {target}: {source}")]
    Delete {
        target: String,
        #[source]
        source: BoxError,
    },
    #[error("invalid store path '{0}'")]
    InvalidPath(String),
    #[error("invalid record key '{0}'")]
    InvalidKey(String),
    #[error("subscription closed before a snapshot arrived")]
    Closed,
}

impl StoreError {
    pub fn read(err: impl Into<BoxError>) -> Self {
        StoreError::Read(err.into())
    }

    pub fn write(err: impl Into<BoxError>) -> Self {
        StoreError::Write(err.into())
    }

    pub fn delete(target: impl Into<String>, err: impl Into<BoxError>) -> Self {
        StoreError::Delete {
            target: target.into(),
            source: err.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("cannot format non-finite amount {0}")]
    NonFinite(f64),
    #[error("amount {0} is out of range")]
    OutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
