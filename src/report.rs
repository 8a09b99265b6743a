//! # Report Module
//!
//! This module records what happened to each processed file and can write
//! the collected results as a JSON report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Final status of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
  /// The file is a target and was left as it was
  Unchanged,
  /// A header was inserted
  Added,
  /// A header with the target year was replaced by the canonical text
  Updated,
  /// Reading, decoding or writing the file failed
  Failed,
  /// No header applies to this kind of file
  Untouched,
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// What happened to the file
  pub status: FileStatus,
  /// Error message when the status is [`FileStatus::Failed`]
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  pub const fn new(path: PathBuf, status: FileStatus) -> Self {
    Self {
      path,
      status,
      error: None,
    }
  }

  pub fn failed(path: PathBuf, error: &anyhow::Error) -> Self {
    Self {
      path,
      status: FileStatus::Failed,
      error: Some(format!("{error:#}")),
    }
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Counts per status for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSummary {
  pub total_files: usize,
  pub unchanged: usize,
  pub added: usize,
  pub updated: usize,
  pub failed: usize,
  pub untouched: usize,
  /// Wall time spent processing, in milliseconds
  pub processing_time_ms: u64,
}

impl ProcessingSummary {
  /// Builds a summary from the collected reports.
  pub fn from_reports(reports: &[FileReport], elapsed: Duration) -> Self {
    let mut summary = Self {
      total_files: reports.len(),
      processing_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
      ..Self::default()
    };

    for report in reports {
      match report.status {
        FileStatus::Unchanged => summary.unchanged += 1,
        FileStatus::Added => summary.added += 1,
        FileStatus::Updated => summary.updated += 1,
        FileStatus::Failed => summary.failed += 1,
        FileStatus::Untouched => summary.untouched += 1,
      }
    }

    summary
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Writes the reports and summary as pretty-printed JSON to `output_path`.
pub fn write_json_report(output_path: &Path, reports: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
  let report = JsonReport {
    generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    summary,
    files: reports,
  };

  let json = serde_json::to_string_pretty(&report).with_context(|| "Failed to serialize JSON report")?;

  if let Some(parent) = output_path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
  }

  fs::write(output_path, json).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
