// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures at the database boundary. "No rows" is not one of them; see
/// [`crate::models::Outcome`].
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No dsn configured in [connection]")]
    MissingDsn,

    #[error("Invalid schema name '{0}', expected a plain SQL identifier")]
    InvalidSchema(String),

    #[error("Could not connect to '{dsn}': {source}")]
    Connect {
        dsn: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum ShapeError {
    #[error("Invalid amount {value} for '{id}'")]
    InvalidAmount { id: String, value: String },

    #[error("Amount total out of range for '{id}'")]
    Overflow { id: String },
}
