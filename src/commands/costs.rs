// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::db::Database;
use crate::models::{CostTable, Outcome, Period, Sort};
use crate::utils::{company_from_args, maybe_print_json, period_from_args, sort_from_args};
use crate::{queries, render, report};

pub fn handle(db: &Database, cfg: &ReportConfig, m: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let period = period_from_args(m, today)?;
    let sort = sort_from_args(m, cfg.default_sort())?;
    let company = company_from_args(m);

    let table = match load(db, &period, company, sort)? {
        Outcome::Data(t) => t,
        Outcome::NoData => {
            println!("No data for {}", period);
            return Ok(());
        }
    };
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &table.records)? {
        return Ok(());
    }
    println!("AWS costs for {}", period);
    println!("{}", render::cost_table(&table, &cfg.currency));
    if !m.get_flag("no-chart") {
        println!();
        print!("{}", render::cost_chart(&table, cfg.bar_width));
    }
    Ok(())
}

/// Query and shape per-account costs for one period.
pub fn load(
    db: &Database,
    period: &Period,
    company: Option<&str>,
    sort: Sort,
) -> Result<Outcome<CostTable>> {
    let rows = queries::fetch_costs(db, period, company)
        .with_context(|| format!("Loading costs for {}", period))?;
    match rows {
        Outcome::Data(rows) => Ok(report::shape_costs(rows, sort)?),
        Outcome::NoData => Ok(Outcome::NoData),
    }
}
