// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::db::Database;
use crate::models::Outcome;
use crate::utils::pretty_table;
use crate::queries::{self, CostSource};
use crate::report;

pub const REQUIRED_TABLES: [&str; 3] = ["accounts", "costs_per_account", "costs_per_service"];

/// Issues found, as (kind, detail) pairs. Connection problems are returned
/// as errors, not issues.
pub fn check(db: &Database) -> Result<Vec<(String, String)>> {
    let mut issues = Vec::new();

    // 1) Tables the reports read
    let mut present = Vec::new();
    for name in REQUIRED_TABLES {
        if queries::table_exists(db, name)? {
            present.push(name);
        } else {
            issues.push(("missing_table".to_string(), format!("{}.{}", db.schema(), name)));
        }
    }

    // 2) Amounts that would fail coercion at report time
    for source in [CostSource::Accounts, CostSource::Services] {
        if !present.contains(&source.table()) {
            continue;
        }
        if let Outcome::Data(cells) = queries::fetch_amount_cells(db, source)? {
            for (id, start, amount) in cells {
                if let Err(e) = report::coerce_amount(&id, &amount) {
                    issues.push((
                        "bad_amount".to_string(),
                        format!("{} {} {}", source.table(), start, e),
                    ));
                }
            }
        }
    }
    Ok(issues)
}

pub fn handle(db: &Database) -> Result<()> {
    let issues = check(db)?;
    if issues.is_empty() {
        println!("doctor: {} ({}) looks good", db.dsn(), db.schema());
    } else {
        let rows = issues.into_iter().map(|(k, d)| vec![k, d]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
