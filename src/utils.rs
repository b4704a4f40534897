// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Period, Sort, SortKey, SortOrder};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// First day of the month named by `YYYY-MM`.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

/// Period from `--month` or `--from/--to`, defaulting to the previous month.
pub fn period_from_args(sub: &clap::ArgMatches, today: NaiveDate) -> Result<Period> {
    let month = sub.get_one::<String>("month");
    let from = sub.get_one::<String>("from");
    let to = sub.get_one::<String>("to");
    match (month, from, to) {
        (Some(m), None, None) => Ok(Period::month(parse_month(m)?)),
        (None, Some(f), Some(t)) => Ok(Period::Range {
            start: parse_date(f)?,
            end: parse_date(t)?,
        }),
        (None, Some(_), None) => Err(anyhow::anyhow!("--from requires --to")),
        (None, None, Some(_)) => Err(anyhow::anyhow!("--to requires --from")),
        (None, None, None) => Ok(Period::previous_month(today)),
        _ => Err(anyhow::anyhow!("Use either --month or --from/--to, not both")),
    }
}

/// Sort from `--sort/--order`, falling back to the configured default.
pub fn sort_from_args(sub: &clap::ArgMatches, default: Sort) -> Result<Sort> {
    let key = match sub.get_one::<String>("sort") {
        Some(s) => s.parse::<SortKey>()?,
        None => default.key,
    };
    let order = match sub.get_one::<String>("order") {
        Some(s) => s.parse::<SortOrder>()?,
        None => default.order,
    };
    Ok(Sort::new(key, order))
}

pub fn company_from_args(sub: &clap::ArgMatches) -> Option<&str> {
    sub.get_one::<String>("company")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{} {:.2}", ccy, rounded)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Right-align the given columns, e.g. amounts.
pub fn align_right(t: &mut Table, columns: &[usize]) {
    for &i in columns {
        if let Some(col) = t.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Horizontal bar proportional to `value / max`, at most `width` cells.
/// Non-positive values draw nothing.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if !(value > 0.0) || !(max > 0.0) || width == 0 {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
