// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, ensure};

use crate::db;
use crate::store::validate_path;

pub const DEFAULT_COLLECTION: &str = "transactions";
pub const DEFAULT_POLL_MS: &str = "500";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub collection: String,
    pub poll_interval: Duration,
}

impl Settings {
    /// Resolve settings from the global flags (each of which also reads its environment variable).
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let db_path = match m
            .get_one::<String>("db")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            Some(p) => PathBuf::from(p),
            None => db::db_path()?,
        };

        let collection = m
            .get_one::<String>("collection")
            .map(|s| s.trim().trim_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        validate_path(&collection)
            .with_context(|| format!("Invalid collection '{}'", collection))?;

        let poll_ms = m.get_one::<u64>("poll_ms").copied().unwrap_or(500);
        ensure!(poll_ms > 0, "--poll-ms must be greater than zero");

        Ok(Self {
            db_path,
            collection,
            poll_interval: Duration::from_millis(poll_ms),
        })
    }
}
