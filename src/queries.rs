// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Query templates and their column mappings. Every filter value is bound;
//! only the validated schema name is substituted into the text.

use rusqlite::named_params;
use rusqlite::types::Value;

use crate::db::Database;
use crate::error::DataError;
use crate::models::{AggregateRow, CostRow, Grouping, Outcome, Period};

/// Raw billing cells, one row per account and billing period. Amounts are
/// not summed here: SQLite's `SUM` reads non-numeric text as 0 and skips
/// NULLs, so adding up happens after each cell is coerced.
pub const COSTS_BY_ACCOUNT: &str = "
    SELECT c.account_uuid, a.company, c.amount
    FROM {schema}.costs_per_account c
    LEFT JOIN {schema}.accounts a ON a.account_uuid = c.account_uuid
    WHERE c.start_date >= :lower AND c.end_date <= :upper
      AND (:company IS NULL OR a.company = :company)
    ORDER BY c.account_uuid, c.start_date";

pub const SERVICES_BY_ACCOUNT: &str = "
    SELECT s.account_uuid, a.company, s.service, s.amount
    FROM {schema}.costs_per_service s
    LEFT JOIN {schema}.accounts a ON a.account_uuid = s.account_uuid
    WHERE s.start_date >= :lower AND s.end_date <= :upper
      AND (:company IS NULL OR a.company = :company)
    ORDER BY s.account_uuid, s.service, s.start_date";

pub const SERVICES_TOTAL: &str = "
    SELECT s.service, s.amount
    FROM {schema}.costs_per_service s
    LEFT JOIN {schema}.accounts a ON a.account_uuid = s.account_uuid
    WHERE s.start_date >= :lower AND s.end_date <= :upper
      AND (:company IS NULL OR a.company = :company)
    ORDER BY s.service, s.start_date";

pub const BILLING_MONTHS: &str = "
    SELECT DISTINCT substr(start_date, 1, 7) AS month
    FROM {schema}.costs_per_account
    ORDER BY month DESC";

pub const TABLE_EXISTS: &str = "
    SELECT count(*) FROM {schema}.sqlite_master
    WHERE type IN ('table', 'view') AND name = :name";

pub const ACCOUNT_AMOUNT_CELLS: &str = "
    SELECT account_uuid, start_date, amount FROM {schema}.costs_per_account
    ORDER BY start_date, account_uuid";

pub const SERVICE_AMOUNT_CELLS: &str = "
    SELECT account_uuid || '/' || service, start_date, amount FROM {schema}.costs_per_service
    ORDER BY start_date, account_uuid, service";

/// Group id and name used when all rows collapse into one group.
pub const TOTAL_GROUP_ID: &str = "*";
pub const TOTAL_GROUP_NAME: &str = "All accounts";

pub fn fetch_costs(
    db: &Database,
    period: &Period,
    company: Option<&str>,
) -> Result<Outcome<Vec<CostRow>>, DataError> {
    let (lower, upper) = period.bounds();
    db.query(
        COSTS_BY_ACCOUNT,
        named_params! { ":lower": lower, ":upper": upper, ":company": company },
        |r| {
            Ok(CostRow {
                account_id: r.get(0)?,
                company: r.get(1)?,
                amount: r.get(2)?,
            })
        },
    )
}

pub fn fetch_breakdown(
    db: &Database,
    period: &Period,
    company: Option<&str>,
    grouping: Grouping,
) -> Result<Outcome<Vec<AggregateRow>>, DataError> {
    let (lower, upper) = period.bounds();
    let params = named_params! { ":lower": lower, ":upper": upper, ":company": company };
    match grouping {
        Grouping::Account => db.query(SERVICES_BY_ACCOUNT, params, |r| {
            Ok(AggregateRow {
                group_id: r.get(0)?,
                group_name: r.get(1)?,
                category: r.get(2)?,
                total: r.get(3)?,
            })
        }),
        Grouping::Total => db.query(SERVICES_TOTAL, params, |r| {
            Ok(AggregateRow {
                group_id: TOTAL_GROUP_ID.to_string(),
                group_name: Some(TOTAL_GROUP_NAME.to_string()),
                category: r.get(0)?,
                total: r.get(1)?,
            })
        }),
    }
}

/// Billing months present in the data, newest first, as `YYYY-MM`.
pub fn fetch_months(db: &Database) -> Result<Outcome<Vec<String>>, DataError> {
    db.query(BILLING_MONTHS, &[], |r| r.get(0))
}

pub fn table_exists(db: &Database, name: &str) -> Result<bool, DataError> {
    db.with_connection(|conn| {
        let sql = db.render(TABLE_EXISTS)?;
        let n: i64 = conn.query_row(&sql, named_params! { ":name": name }, |r| r.get(0))?;
        Ok(n > 0)
    })
}

/// Cost tables whose amount cells can be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostSource {
    Accounts,
    Services,
}

impl CostSource {
    pub fn table(&self) -> &'static str {
        match self {
            CostSource::Accounts => "costs_per_account",
            CostSource::Services => "costs_per_service",
        }
    }
}

/// Raw amount cells with their row identity and start date, for data checks.
pub fn fetch_amount_cells(
    db: &Database,
    source: CostSource,
) -> Result<Outcome<Vec<(String, String, Value)>>, DataError> {
    let template = match source {
        CostSource::Accounts => ACCOUNT_AMOUNT_CELLS,
        CostSource::Services => SERVICE_AMOUNT_CELLS,
    };
    db.query(template, &[], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
}
