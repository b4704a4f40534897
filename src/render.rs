// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Terminal surface for shaped reports.

use comfy_table::Table;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{AggregateGroup, CostTable};
use crate::utils::{align_right, bar, fmt_money, pretty_table};

pub fn cost_rows(table: &CostTable, ccy: &str) -> Vec<Vec<String>> {
    table
        .records
        .iter()
        .map(|r| {
            vec![
                r.account_id.clone(),
                r.display_name.clone(),
                fmt_money(&r.amount, ccy),
            ]
        })
        .collect()
}

pub fn cost_table(table: &CostTable, ccy: &str) -> Table {
    let mut rows = cost_rows(table, ccy);
    rows.push(vec![
        "Total".into(),
        String::new(),
        fmt_money(&table.total, ccy),
    ]);
    let mut t = pretty_table(&["Account", "Company", "Amount"], rows);
    align_right(&mut t, &[2]);
    t
}

/// One line per record, bars scaled to the largest amount.
pub fn cost_chart(table: &CostTable, width: usize) -> String {
    let amounts: Vec<f64> = table
        .records
        .iter()
        .map(|r| r.amount.to_f64().unwrap_or(0.0))
        .collect();
    let max = amounts.iter().copied().fold(0.0_f64, f64::max);
    let label_w = table
        .records
        .iter()
        .map(|r| r.display_name.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (r, amt) in table.records.iter().zip(amounts) {
        out.push_str(&format!(
            "{:<label_w$} │{} {:.2}\n",
            r.display_name,
            bar(amt, max, width),
            r.amount
        ));
    }
    out
}

pub fn share_rows(group: &AggregateGroup, ccy: &str, width: usize) -> Vec<Vec<String>> {
    group
        .records
        .iter()
        .map(|r| {
            vec![
                r.category.clone(),
                fmt_money(&r.total, ccy),
                format!("{:.1}%", r.percentage),
                bar(r.percentage, 100.0, width),
            ]
        })
        .collect()
}

pub fn share_table(group: &AggregateGroup, ccy: &str, width: usize) -> Table {
    let mut t = pretty_table(
        &["Service", "Amount", "Share", ""],
        share_rows(group, ccy, width),
    );
    align_right(&mut t, &[1, 2]);
    t
}
