// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use rusqlite::types::Value;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a query or shaping step that may legitimately find nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Data(T),
    NoData,
}

impl<T> Outcome<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Outcome::NoData)
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Outcome::Data(v) => Some(v),
            Outcome::NoData => None,
        }
    }
}

/// Raw row of `costs_per_account` joined with `accounts`; an account may
/// have several rows per period.
#[derive(Debug, Clone)]
pub struct CostRow {
    pub account_id: String,
    pub company: Option<String>,
    pub amount: Value,
}

/// Raw per-category amount cell inside one group; a category may repeat.
#[derive(Debug, Clone)]
pub struct AggregateRow {
    pub group_id: String,
    pub group_name: Option<String>,
    pub category: String,
    pub total: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRecord {
    pub account_id: String,
    pub company: Option<String>,
    pub display_name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostTable {
    pub records: Vec<CostRecord>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRecord {
    pub category: String,
    pub total: Decimal,
    pub percentage: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateGroup {
    pub group_id: String,
    pub name: String,
    pub total: Decimal,
    pub records: Vec<AggregateRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub groups: Vec<AggregateGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    #[default]
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "amount" => Ok(SortKey::Amount),
            other => Err(anyhow::anyhow!(
                "Unknown sort key '{}' (use name|amount)",
                other
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(anyhow::anyhow!("Unknown sort order '{}' (use asc|desc)", other)),
        }
    }
}

/// How breakdown rows are grouped before shares are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Account,
    Total,
}

/// User-selected reporting period.
///
/// A range's `end` is inclusive as typed by the user. Every period resolves
/// to a half-open `[lower, upper)` interval via [`Period::bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Range { start: NaiveDate, end: NaiveDate },
    Month(NaiveDate),
}

impl Period {
    /// `first` may be any day of the month.
    pub fn month(first: NaiveDate) -> Self {
        Period::Month(first.with_day0(0).unwrap_or(first))
    }

    pub fn previous_month(today: NaiveDate) -> Self {
        let this_month = today.with_day0(0).unwrap_or(today);
        let prev = this_month
            .checked_sub_months(Months::new(1))
            .unwrap_or(this_month);
        Period::Month(prev)
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            Period::Range { start, end } => {
                (start, end.checked_add_days(Days::new(1)).unwrap_or(end))
            }
            Period::Month(first) => (
                first,
                first.checked_add_months(Months::new(1)).unwrap_or(first),
            ),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Range { start, end } => write!(f, "{} to {}", start, end),
            Period::Month(first) => write!(f, "{}", first.format("%Y-%m")),
        }
    }
}
