// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rusqlite::types::Value;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::ShapeError;
use crate::models::{
    AggregateGroup, AggregateRecord, AggregateRow, Breakdown, CostRecord, CostRow, CostTable,
    Outcome, Sort, SortKey, SortOrder,
};

/// The name shown for a row: the company, or the identifier when the
/// company is absent or blank.
pub fn display_name(id: &str, name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => id.to_string(),
    }
}

/// Coerce one amount cell. Text must parse as a decimal; NULL, blobs and
/// non-finite reals are rejected.
pub fn coerce_amount(id: &str, v: &Value) -> Result<Decimal, ShapeError> {
    let parsed = match v {
        Value::Integer(i) => Some(Decimal::from(*i)),
        Value::Real(f) => Decimal::try_from(*f).ok(),
        Value::Text(s) => {
            let s = s.trim();
            s.parse::<Decimal>()
                .ok()
                .or_else(|| Decimal::from_scientific(s).ok())
        }
        Value::Null | Value::Blob(_) => None,
    };
    parsed.ok_or_else(|| ShapeError::InvalidAmount {
        id: id.to_string(),
        value: describe(v),
    })
}

fn describe(v: &Value) -> String {
    match v {
        Value::Null => "NULL".into(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => format!("'{}'", s),
        Value::Blob(b) => format!("<{} byte blob>", b.len()),
    }
}

pub fn normalize(row: CostRow) -> Result<CostRecord, ShapeError> {
    let amount = coerce_amount(&row.account_id, &row.amount)?;
    let display_name = display_name(&row.account_id, row.company.as_deref());
    let company = row.company.filter(|c| !c.trim().is_empty());
    Ok(CostRecord {
        account_id: row.account_id,
        company,
        display_name,
        amount,
    })
}

/// Case-insensitive first so "a" sorts before "Acme"; exact text breaks ties.
fn cmp_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn directed(ord: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

pub fn sort_records(records: &mut [CostRecord], sort: Sort) {
    records.sort_by(|a, b| {
        let ord = match sort.key {
            SortKey::Name => cmp_names(&a.display_name, &b.display_name),
            SortKey::Amount => a.amount.cmp(&b.amount),
        };
        directed(ord.then_with(|| a.account_id.cmp(&b.account_id)), sort.order)
    });
}

pub fn sort_aggregates(records: &mut [AggregateRecord], sort: Sort) {
    records.sort_by(|a, b| {
        let ord = match sort.key {
            SortKey::Name => cmp_names(&a.category, &b.category),
            SortKey::Amount => a
                .total
                .cmp(&b.total)
                .then_with(|| a.category.cmp(&b.category)),
        };
        directed(ord, sort.order)
    });
}

fn checked_add(id: &str, acc: Decimal, v: Decimal) -> Result<Decimal, ShapeError> {
    acc.checked_add(v)
        .ok_or_else(|| ShapeError::Overflow { id: id.to_string() })
}

/// Rows to a sorted cost table with one record per account; several billing
/// rows for the same account are added up. Nothing in, nothing out: an empty
/// input is `NoData` so the caller renders neither table nor chart.
pub fn shape_costs(rows: Vec<CostRow>, sort: Sort) -> Result<Outcome<CostTable>, ShapeError> {
    if rows.is_empty() {
        return Ok(Outcome::NoData);
    }
    let mut merged: BTreeMap<String, CostRecord> = BTreeMap::new();
    for row in rows {
        let rec = normalize(row)?;
        match merged.get_mut(&rec.account_id) {
            Some(existing) => {
                existing.amount = checked_add(&rec.account_id, existing.amount, rec.amount)?;
                if existing.company.is_none() && rec.company.is_some() {
                    existing.company = rec.company;
                    existing.display_name = rec.display_name;
                }
            }
            None => {
                merged.insert(rec.account_id.clone(), rec);
            }
        }
    }
    let mut records: Vec<CostRecord> = merged.into_values().collect();
    sort_records(&mut records, sort);
    let mut total = Decimal::ZERO;
    for r in &records {
        total = checked_add("total", total, r.amount)?;
    }
    Ok(Outcome::Data(CostTable { records, total }))
}

pub fn share_label(category: &str, percentage: f64) -> String {
    format!("{} ({:.1}%)", category, percentage)
}

/// Derive each category's share of the group total. A zero total, which
/// includes an empty group, yields `None` instead of dividing by zero.
pub fn derive_shares(
    group_id: &str,
    group_name: &str,
    items: Vec<(String, Decimal)>,
    sort: Sort,
) -> Result<Option<AggregateGroup>, ShapeError> {
    let mut total = Decimal::ZERO;
    for (_, t) in &items {
        total = checked_add(group_id, total, *t)?;
    }
    if total.is_zero() {
        return Ok(None);
    }
    let mut records = Vec::with_capacity(items.len());
    for (category, amount) in items {
        let share = amount
            .checked_div(total)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| ShapeError::Overflow {
                id: format!("{}/{}", group_id, category),
            })?;
        let percentage = share.to_f64().unwrap_or(0.0);
        records.push(AggregateRecord {
            label: share_label(&category, percentage),
            category,
            total: amount,
            percentage,
        });
    }
    sort_aggregates(&mut records, sort);
    Ok(Some(AggregateGroup {
        group_id: group_id.to_string(),
        name: group_name.to_string(),
        total,
        records,
    }))
}

/// Group aggregate rows, add up each category, derive shares, and order
/// groups by name. Groups with a zero total are dropped; if none remain the
/// result is `NoData`.
pub fn shape_breakdown(
    rows: Vec<AggregateRow>,
    sort: Sort,
) -> Result<Outcome<Breakdown>, ShapeError> {
    let mut grouped: BTreeMap<String, (String, BTreeMap<String, Decimal>)> = BTreeMap::new();
    for row in rows {
        let amount = coerce_amount(&row.group_id, &row.total)?;
        let name = display_name(&row.group_id, row.group_name.as_deref());
        let (_, categories) = grouped
            .entry(row.group_id.clone())
            .or_insert_with(|| (name, BTreeMap::new()));
        let slot = categories.entry(row.category).or_insert(Decimal::ZERO);
        *slot = checked_add(&row.group_id, *slot, amount)?;
    }
    let mut groups = Vec::new();
    for (id, (name, categories)) in grouped {
        match derive_shares(&id, &name, categories.into_iter().collect(), sort)? {
            Some(group) => groups.push(group),
            None => tracing::info!(group = %name, "group total is zero, no chart"),
        }
    }
    if groups.is_empty() {
        return Ok(Outcome::NoData);
    }
    groups.sort_by(|a, b| cmp_names(&a.name, &b.name).then_with(|| a.group_id.cmp(&b.group_id)));
    Ok(Outcome::Data(Breakdown { groups }))
}
