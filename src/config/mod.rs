//! Configuration management for `ticketflow`.
//!
//! Configuration is read from `config.yaml` inside the data directory. Every
//! key is optional; command-line flags override whatever the file says.
//!
//! Data directory resolution: `--data-dir`, then `TICKETFLOW_DIR`, then
//! `./.ticketflow`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ticketflow_lib::{SortDirection, SortKey, TicketError, ViewMode};

pub const DATA_DIR_ENV: &str = "TICKETFLOW_DIR";
pub const DEFAULT_DATA_DIR: &str = ".ticketflow";
pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key} in config: {source}")]
    Value {
        key: &'static str,
        source: TicketError,
    },
}

/// Values from `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sort key for list/board/dashboard (`createdAt`, `dueDate`, ...).
    pub default_sort: Option<String>,
    /// `asc` or `desc`.
    pub default_order: Option<String>,
    /// `kanban` or `list`, used by `dashboard`.
    pub default_view: Option<String>,
    /// Where `export` writes when `--output-dir` is not given.
    pub export_dir: Option<PathBuf>,
}

impl Config {
    /// Load `config.yaml` from `data_dir`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(CONFIG_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// # Errors
    ///
    /// Returns an error if `default_sort` is not a known sort key.
    pub fn sort_key(&self) -> Result<SortKey, ConfigError> {
        parse_or_default(self.default_sort.as_deref(), "default_sort")
    }

    /// # Errors
    ///
    /// Returns an error if `default_order` is neither `asc` nor `desc`.
    pub fn sort_direction(&self) -> Result<SortDirection, ConfigError> {
        parse_or_default(self.default_order.as_deref(), "default_order")
    }

    /// # Errors
    ///
    /// Returns an error if `default_view` is neither `kanban` nor `list`.
    pub fn view_mode(&self) -> Result<ViewMode, ConfigError> {
        parse_or_default(self.default_view.as_deref(), "default_view")
    }
}

fn parse_or_default<T>(value: Option<&str>, key: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = TicketError> + Default,
{
    value.map_or_else(
        || Ok(T::default()),
        |v| v.parse().map_err(|source| ConfigError::Value { key, source }),
    )
}

/// Command-line values that take precedence over the environment and file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub sort: Option<SortKey>,
    pub order: Option<SortDirection>,
    pub view: Option<ViewMode>,
    pub export_dir: Option<PathBuf>,
}

/// Pick the data directory: flag, then `TICKETFLOW_DIR`, then `./.ticketflow`.
#[must_use]
pub fn resolve_data_dir(flag: Option<&Path>) -> PathBuf {
    resolve_data_dir_with(flag, std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
}

fn resolve_data_dir_with(flag: Option<&Path>, env: Option<PathBuf>) -> PathBuf {
    let dir = flag
        .map(Path::to_path_buf)
        .or_else(|| env.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    dunce::simplified(&dir).to_path_buf()
}

/// Effective settings after layering overrides on top of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub sort: SortKey,
    pub order: SortDirection,
    pub view: ViewMode,
    pub export_dir: PathBuf,
}

impl Settings {
    /// # Errors
    ///
    /// Returns an error if a value in the file is invalid and no flag
    /// overrides it.
    pub fn resolve(config: &Config, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        Ok(Self {
            sort: match overrides.sort {
                Some(sort) => sort,
                None => config.sort_key()?,
            },
            order: match overrides.order {
                Some(order) => order,
                None => config.sort_direction()?,
            },
            view: match overrides.view {
                Some(view) => view,
                None => config.view_mode()?,
            },
            export_dir: overrides
                .export_dir
                .clone()
                .or_else(|| config.export_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}
