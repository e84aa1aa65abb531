// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::Category;
use crate::models::TransactionType;
use crate::utils::pretty_table;
use anyhow::{Result, anyhow};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let kind = sub
            .get_one::<String>("type")
            .map(|t| t.parse::<TransactionType>())
            .transpose()
            .map_err(|e| anyhow!(e))?;
        let data = list_rows(kind);
        println!("{}", pretty_table(&["Key", "Icon", "Name", "Type"], data));
    }
    Ok(())
}

pub fn list_rows(kind: Option<TransactionType>) -> Vec<Vec<String>> {
    Category::ALL
        .into_iter()
        .filter(|c| kind.is_none_or(|k| c.kind() == k))
        .map(|c| {
            vec![
                c.key().to_string(),
                c.icon().to_string(),
                c.label().to_string(),
                c.kind().to_string(),
            ]
        })
        .collect()
}
