// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::{breakdown, costs};
use crate::config::ReportConfig;
use crate::db::Database;
use crate::models::{Breakdown, CostTable, Outcome};
use crate::utils::{company_from_args, period_from_args, sort_from_args};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
}

fn parse_format(s: &str) -> Result<Format> {
    match s.trim().to_lowercase().as_str() {
        "csv" => Ok(Format::Csv),
        "json" => Ok(Format::Json),
        other => Err(anyhow::anyhow!("Unknown format: {} (use csv|json)", other)),
    }
}

pub fn handle(db: &Database, cfg: &ReportConfig, m: &clap::ArgMatches) -> Result<()> {
    let (kind, sub) = m
        .subcommand()
        .context("export needs a report: costs | breakdown")?;
    let fmt = parse_format(sub.get_one::<String>("format").map(String::as_str).unwrap_or(""))?;
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim())
        .context("--out is required")?;
    let today = chrono::Local::now().date_naive();
    let period = period_from_args(sub, today)?;
    let sort = sort_from_args(sub, cfg.default_sort())?;
    let company = company_from_args(sub);

    let written = match kind {
        "costs" => match costs::load(db, &period, company, sort)? {
            Outcome::Data(t) => {
                write_costs(&t, fmt, Path::new(out))?;
                true
            }
            Outcome::NoData => false,
        },
        "breakdown" => {
            let grouping = breakdown::grouping_from_args(sub);
            match breakdown::load(db, &period, company, grouping, sort)? {
                Outcome::Data(b) => {
                    write_breakdown(&b, fmt, Path::new(out))?;
                    true
                }
                Outcome::NoData => false,
            }
        }
        other => return Err(anyhow::anyhow!("Unknown report: {}", other)),
    };
    if written {
        println!("Exported {} for {} to {}", kind, period, out);
    } else {
        println!("No data for {}; nothing exported", period);
    }
    Ok(())
}

fn write_costs(table: &CostTable, fmt: Format, out: &Path) -> Result<()> {
    match fmt {
        Format::Csv => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out.display()))?;
            wtr.write_record(["account_id", "company", "display_name", "amount"])?;
            for r in &table.records {
                let amount = r.amount.to_string();
                wtr.write_record([
                    r.account_id.as_str(),
                    r.company.as_deref().unwrap_or_default(),
                    r.display_name.as_str(),
                    amount.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            std::fs::write(out, serde_json::to_string_pretty(&table.records)?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
    }
    Ok(())
}

fn write_breakdown(b: &Breakdown, fmt: Format, out: &Path) -> Result<()> {
    match fmt {
        Format::Csv => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out.display()))?;
            wtr.write_record(["group_id", "group", "service", "total", "percentage", "label"])?;
            for g in &b.groups {
                for r in &g.records {
                    let total = r.total.to_string();
                    let pct = format!("{:.4}", r.percentage);
                    wtr.write_record([
                        g.group_id.as_str(),
                        g.name.as_str(),
                        r.category.as_str(),
                        total.as_str(),
                        pct.as_str(),
                        r.label.as_str(),
                    ])?;
                }
            }
            wtr.flush()?;
        }
        Format::Json => {
            std::fs::write(out, serde_json::to_string_pretty(&b.groups)?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
    }
    Ok(())
}
