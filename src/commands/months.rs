// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::db::Database;
use crate::models::Outcome;
use crate::queries;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(db: &Database, m: &clap::ArgMatches) -> Result<()> {
    let months = match queries::fetch_months(db).context("Listing billing months")? {
        Outcome::Data(months) => months,
        Outcome::NoData => {
            println!("No billing data");
            return Ok(());
        }
    };
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &months)? {
        let rows = months.into_iter().map(|m| vec![m]).collect();
        println!("{}", pretty_table(&["Month"], rows));
    }
    Ok(())
}
