//! # Output Module
//!
//! This module centralizes all user-facing output for license-header: one
//! colorized status line per processed file, printed to stdout in discovery
//! order.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::is_quiet;
use crate::report::{FileReport, FileStatus};

/// Renders the status line for one file, colored for stdout when supported.
///
/// | status    | color       | text               |
/// |-----------|-------------|--------------------|
/// | Unchanged | bright blue | `path`             |
/// | Added     | green       | `path - ADDED`     |
/// | Updated   | yellow      | `path - UPDATED`   |
/// | Failed    | red         | `path`             |
/// | Untouched | gray        | `path`             |
pub fn format_status_line(display_path: &str, status: FileStatus) -> String {
  match status {
    FileStatus::Unchanged => display_path
      .if_supports_color(Stream::Stdout, |s| s.bright_blue())
      .to_string(),
    FileStatus::Added => format!("{display_path} - ADDED")
      .if_supports_color(Stream::Stdout, |s| s.green())
      .to_string(),
    FileStatus::Updated => format!("{display_path} - UPDATED")
      .if_supports_color(Stream::Stdout, |s| s.yellow())
      .to_string(),
    FileStatus::Failed => display_path.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
    FileStatus::Untouched => display_path
      .if_supports_color(Stream::Stdout, |s| s.bright_black())
      .to_string(),
  }
}

/// Prints the status line for a processed file.
///
/// In quiet mode only files that changed or failed are printed.
pub fn print_file_status(report: &FileReport, current_dir: &Path) {
  if is_quiet() && matches!(report.status, FileStatus::Unchanged | FileStatus::Untouched) {
    return;
  }

  let display_path = make_relative_path(&report.path, current_dir);
  println!("{}", format_status_line(&display_path, report.status));
}

/// Make a path relative to the current directory for display.
///
/// Paths outside the current directory get `..` segments; paths that cannot
/// be expressed relatively are shown as given.
pub fn make_relative_path(path: &Path, current_dir: &Path) -> String {
  pathdiff::diff_paths(path, current_dir)
    .map(|p| p.to_string_lossy().to_string())
    .unwrap_or_else(|| path.to_string_lossy().to_string())
}
