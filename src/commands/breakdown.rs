// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::db::Database;
use crate::models::{Breakdown, Grouping, Outcome, Period, Sort};
use crate::utils::{company_from_args, fmt_money, maybe_print_json, period_from_args, sort_from_args};
use crate::{queries, render, report};

pub fn handle(db: &Database, cfg: &ReportConfig, m: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let period = period_from_args(m, today)?;
    let sort = sort_from_args(m, cfg.default_sort())?;
    let company = company_from_args(m);
    let grouping = grouping_from_args(m);

    let breakdown = match load(db, &period, company, grouping, sort)? {
        Outcome::Data(b) => b,
        Outcome::NoData => {
            println!("No data for {}", period);
            return Ok(());
        }
    };
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &breakdown.groups)? {
        return Ok(());
    }
    println!("AWS service shares for {}", period);
    for group in &breakdown.groups {
        println!();
        println!("{} ({})", group.name, fmt_money(&group.total, &cfg.currency));
        println!("{}", render::share_table(group, &cfg.currency, cfg.bar_width));
    }
    Ok(())
}

pub fn grouping_from_args(m: &clap::ArgMatches) -> Grouping {
    match m.get_one::<String>("by").map(String::as_str) {
        Some("total") => Grouping::Total,
        _ => Grouping::Account,
    }
}

/// Query and shape per-service shares for one period.
pub fn load(
    db: &Database,
    period: &Period,
    company: Option<&str>,
    grouping: Grouping,
    sort: Sort,
) -> Result<Outcome<Breakdown>> {
    let rows = queries::fetch_breakdown(db, period, company, grouping)
        .with_context(|| format!("Loading service breakdown for {}", period))?;
    match rows {
        Outcome::Data(rows) => Ok(report::shape_breakdown(rows, sort)?),
        Outcome::NoData => Ok(Outcome::NoData),
    }
}
