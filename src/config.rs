//! # Configuration Module
//!
//! This module provides configuration support for license-header, allowing
//! users to replace the built-in header table and the directories skipped
//! during glob expansion.
//!
//! Configuration can be specified in a `.license-header.toml` file or via the
//! `LICENSE_HEADER_CONFIG` environment variable:
//!
//! ```toml
//! exclude-dirs = ["node_modules", "vendor"]
//!
//! [[headers]]
//! filename-pattern = "(?i)\\.rs$"
//! year = 2024
//! content = """
//! /* Copyright 2024 Example Corp.
//!  * SPDX-License-Identifier: MIT
//!  */"""
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::headers::{HeaderError, HeaderTable, LicenseHeader};
use crate::processor::DEFAULT_EXCLUDED_DIRS;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".license-header.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSE_HEADER_CONFIG";

/// A year written either as a TOML string or integer.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum YearValue {
  Text(String),
  Number(u32),
}

impl std::fmt::Display for YearValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      YearValue::Text(text) => write!(f, "{text}"),
      YearValue::Number(number) => write!(f, "{number}"),
    }
  }
}

/// User-defined license header.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HeaderConfig {
  /// Regular expression matched against the full file path
  #[serde(rename = "filename-pattern")]
  pub filename_pattern: String,

  /// Target year; must match the year written in `content`
  pub year: YearValue,

  /// Literal header text, surrounding whitespace is trimmed
  pub content: String,
}

/// Main configuration struct for license-header.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Directory names skipped during glob expansion. Replaces the default
  /// list when present.
  #[serde(default, rename = "exclude-dirs")]
  pub exclude_dirs: Option<Vec<String>>,

  /// Headers in lookup order. Replaces the built-in table when non-empty.
  #[serde(default)]
  pub headers: Vec<HeaderConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A header entry is invalid.
  #[error("Invalid header #{index}: {source}")]
  InvalidHeader { index: usize, source: HeaderError },

  /// An excluded directory entry is not a plain directory name.
  #[error("Invalid exclude-dirs entry '{entry}': expected a single directory name")]
  InvalidExcludeDir { entry: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read or
  /// parsed.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    verbose_log!("Loaded {} header overrides", config.headers.len());

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Every header builds (pattern compiles, four digit year, non-empty
  ///   content)
  /// - Excluded directories are single path components
  fn validate(&self) -> Result<(), ConfigError> {
    self.build_headers()?;

    if let Some(ref dirs) = self.exclude_dirs {
      for dir in dirs {
        if dir.is_empty() || dir.contains(['/', '\\']) || dir == "." || dir == ".." {
          return Err(ConfigError::InvalidExcludeDir { entry: dir.clone() });
        }
      }
    }

    Ok(())
  }

  fn build_headers(&self) -> Result<Vec<LicenseHeader>, ConfigError> {
    self
      .headers
      .iter()
      .enumerate()
      .map(|(index, header)| {
        LicenseHeader::new(&header.filename_pattern, header.year.to_string(), &header.content)
          .map_err(|source| ConfigError::InvalidHeader { index, source })
      })
      .collect()
  }

  /// The header table described by this configuration, or `None` when the
  /// built-in table should be used.
  pub fn header_table(&self) -> Result<Option<HeaderTable>, ConfigError> {
    if self.headers.is_empty() {
      return Ok(None);
    }
    Ok(Some(HeaderTable::new(self.build_headers()?)))
  }

  /// Directory names to skip during glob expansion.
  pub fn excluded_dirs(&self) -> Vec<String> {
    match self.exclude_dirs {
      Some(ref dirs) => dirs.clone(),
      None => DEFAULT_EXCLUDED_DIRS.iter().map(|d| (*d).to_string()).collect(),
    }
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `LICENSE_HEADER_CONFIG` environment variable
/// 3. `.license-header.toml` in `base_dir`
///
/// An explicit path is returned even when it does not exist, so that loading
/// it reports the problem.
pub fn discover_config_path(explicit_path: Option<&Path>, base_dir: &Path) -> Option<PathBuf> {
  let env_path = std::env::var(CONFIG_ENV_VAR).ok();
  resolve_config_path(explicit_path, env_path.as_deref(), base_dir)
}

fn resolve_config_path(explicit_path: Option<&Path>, env_path: Option<&str>, base_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Some(env_path) = env_path {
    let path = PathBuf::from(env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = base_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `base_dir` - Directory searched for the default config file
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if no config file applies.
pub fn load_config(explicit_path: Option<&Path>, base_dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, base_dir) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
