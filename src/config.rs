// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::{Sort, SortKey, SortOrder};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Costboard", "costboard"));

pub const CONFIG_ENV: &str = "COSTBOARD_CONFIG";
const CONFIG_FILE: &str = "costboard.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub report: ReportConfig,
}

/// Connection parameters. Values are taken as written; problems surface
/// when a connection is attempted.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub dsn: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub schema: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            dsn: String::new(),
            user: None,
            password: None,
            schema: "billing".to_string(),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("dsn", &self.dsn)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("schema", &self.schema)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub sort: SortKey,
    pub order: SortOrder,
    pub currency: String,
    pub bar_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sort: SortKey::Amount,
            order: SortOrder::Asc,
            currency: "USD".to_string(),
            bar_width: 40,
        }
    }
}

impl ReportConfig {
    pub fn default_sort(&self) -> Sort {
        Sort::new(self.sort, self.order)
    }
}

/// Platform default location, e.g. `~/.config/costboard/costboard.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP.0, APP.1, APP.2).map(|p| p.config_dir().join(CONFIG_FILE))
}

/// `--config` wins over `$COSTBOARD_CONFIG`, which wins over the platform default.
pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Some(p) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = resolve_path(explicit) else {
        tracing::warn!("no config directory on this platform, using defaults");
        return Ok(Config::default());
    };
    if !path.exists() {
        tracing::warn!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::default());
    }
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = parse(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), connection = ?cfg.connection, "loaded config");
    Ok(cfg)
}

pub fn parse(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg = parse("[connection]\ndsn = \"/tmp/costs.sqlite\"\n").unwrap();
        assert_eq!(cfg.connection.dsn, "/tmp/costs.sqlite");
        assert_eq!(cfg.connection.schema, "billing");
        assert_eq!(cfg.report.sort, SortKey::Amount);
        assert_eq!(cfg.report.bar_width, 40);
    }

    #[test]
    fn debug_hides_password() {
        let cfg = parse("[connection]\npassword = \"hunter2\"\n").unwrap();
        let shown = format!("{:?}", cfg.connection);
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("***"));
    }
}
