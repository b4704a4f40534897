// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OpenFlags, Row, ToSql};

use crate::config::ConnectionConfig;
use crate::error::DataError;
use crate::models::Outcome;

static IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Placeholder in query templates replaced by the configured schema name.
pub const SCHEMA_PLACEHOLDER: &str = "{schema}";

/// Named parameters bound to a query, e.g. `&[(":lower", &lower)]`.
pub type NamedParams<'a> = &'a [(&'a str, &'a dyn ToSql)];

/// Data access adapter. Holds connection parameters only; every call opens
/// its own connection and closes it before returning.
#[derive(Debug, Clone)]
pub struct Database {
    cfg: ConnectionConfig,
}

impl Database {
    pub fn new(cfg: ConnectionConfig) -> Self {
        Self { cfg }
    }

    pub fn schema(&self) -> &str {
        &self.cfg.schema
    }

    pub fn dsn(&self) -> &str {
        &self.cfg.dsn
    }

    fn checked_schema(&self) -> Result<&str, DataError> {
        if IDENT.is_match(&self.cfg.schema) {
            Ok(&self.cfg.schema)
        } else {
            Err(DataError::InvalidSchema(self.cfg.schema.clone()))
        }
    }

    /// Substitute the schema name into a query template.
    pub fn render(&self, template: &str) -> Result<String, DataError> {
        Ok(template.replace(SCHEMA_PLACEHOLDER, self.checked_schema()?))
    }

    /// Opens a session with the DSN attached read-only under the schema name.
    /// A missing database file is a connect error, never an empty new file.
    fn connect(&self) -> Result<Connection, DataError> {
        let schema = self.checked_schema()?;
        if self.cfg.dsn.trim().is_empty() {
            return Err(DataError::MissingDsn);
        }
        if self.cfg.password.is_some() {
            tracing::warn!("password is set but the embedded engine has no authentication; ignored");
        }
        let connect_err = |source| DataError::Connect {
            dsn: self.cfg.dsn.clone(),
            source,
        };
        let conn = Connection::open_in_memory_with_flags(
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(connect_err)?;
        conn.execute(
            &format!("ATTACH DATABASE ?1 AS {}", schema),
            [readonly_uri(&self.cfg.dsn)],
        )
        .map_err(connect_err)?;
        tracing::debug!(
            dsn = %self.cfg.dsn,
            schema,
            user = self.cfg.user.as_deref().unwrap_or("-"),
            "connected"
        );
        Ok(conn)
    }

    /// Run `f` on a fresh connection. The connection is released on every
    /// exit path; a panic inside `f` drops it during unwinding.
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, DataError>,
    ) -> Result<T, DataError> {
        let conn = self.connect().inspect_err(|e| {
            tracing::error!(error = %e, "connection failed");
        })?;
        let out = f(&conn);
        match conn.close() {
            Ok(()) => tracing::debug!("connection closed"),
            Err((_, e)) => tracing::warn!(error = %e, "closing connection failed"),
        }
        if let Err(e) = &out {
            tracing::error!(error = %e, "query failed");
        }
        out
    }

    /// Execute one parameterized query and map each row. An empty result is
    /// `Outcome::NoData`, not an error.
    pub fn query<T, F>(
        &self,
        template: &str,
        params: NamedParams<'_>,
        mut map: F,
    ) -> Result<Outcome<Vec<T>>, DataError>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let rows = self.with_connection(|conn| {
            let sql = self.render(template)?;
            let mut stmt = conn.prepare(&sql)?;
            let mapped = stmt.query_map(params, |r| map(r))?;
            let mut out = Vec::new();
            for row in mapped {
                out.push(row?);
            }
            Ok(out)
        })?;
        tracing::info!(rows = rows.len(), "query returned");
        if rows.is_empty() {
            Ok(Outcome::NoData)
        } else {
            Ok(Outcome::Data(rows))
        }
    }
}

/// `file:` URI opening `path` read-only without creating it.
fn readonly_uri(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '?' => escaped.push_str("%3f"),
            '#' => escaped.push_str("%23"),
            _ => escaped.push(c),
        }
    }
    format!("file:{}?mode=ro", escaped)
}
