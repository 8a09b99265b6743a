//! # Processor Module
//!
//! This module contains the core functionality for processing files: picking
//! the header that applies to a file, rewriting its content, and writing the
//! result back.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`rewriter`] - Header detection and content substitution
//! - [`file_collector`] - Glob expansion and git status lookups
//!
//! The [`Processor`] struct is the main entry point for all file operations,
//! orchestrating the submodules to provide a cohesive API.

mod file_collector;
mod file_io;
mod rewriter;

use std::path::{Path, PathBuf};

use anyhow::Result;
pub use file_collector::{DEFAULT_EXCLUDED_DIRS, FileCollector};
pub use file_io::FileIO;
pub use rewriter::{HeaderRewriter, RewriteMode, RewriteResult};
use tracing::{debug, trace, warn};

use crate::headers::HeaderTable;
use crate::report::{FileReport, FileStatus};

/// Processor for handling license header operations on files.
///
/// The `Processor` is responsible for:
/// - Selecting the header that applies to each file
/// - Adding or replacing license headers
/// - Writing changed files back
/// - Collecting a report for every file
///
/// Files are handled strictly one after another; a failure on one file never
/// stops the batch.
pub struct Processor {
  /// Canonical headers, already validated
  headers: HeaderTable,

  /// Content rewriter
  rewriter: HeaderRewriter,
}

impl Processor {
  /// Creates a new processor.
  ///
  /// # Parameters
  ///
  /// * `headers` - The header table; call [`HeaderTable::validate`] first
  /// * `add_missing` - Whether files without a header get one inserted
  pub const fn new(headers: HeaderTable, add_missing: bool) -> Self {
    Self {
      headers,
      rewriter: HeaderRewriter::new(add_missing),
    }
  }

  /// Processes files in order, invoking `on_file` as soon as each file is
  /// done.
  ///
  /// # Returns
  ///
  /// One report per input file, in input order.
  pub fn process<F>(&self, files: &[PathBuf], mut on_file: F) -> Vec<FileReport>
  where
    F: FnMut(&FileReport),
  {
    debug!("Processing {} files", files.len());
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
      let report = self.process_file(path);
      on_file(&report);
      reports.push(report);
    }
    reports
  }

  /// Processes a single file and reports what happened to it.
  pub fn process_file(&self, path: &Path) -> FileReport {
    match self.try_process_file(path) {
      Ok(status) => {
        trace!("{}: {:?}", path.display(), status);
        FileReport::new(path.to_path_buf(), status)
      }
      Err(e) => {
        warn!("{:#}", e);
        FileReport::failed(path.to_path_buf(), &e)
      }
    }
  }

  fn try_process_file(&self, path: &Path) -> Result<FileStatus> {
    // Unreadable files (for example deleted ones reported by git) fail even
    // when no header applies to them.
    let bytes = FileIO::read_bytes(path)?;

    let Some(header) = self.headers.header_for(path) else {
      return Ok(FileStatus::Untouched);
    };

    let content = FileIO::decode_utf8(path, bytes)?;
    let RewriteResult { mode, new_content } = self.rewriter.rewrite(&content, header);

    let status = match mode {
      RewriteMode::Unchanged => return Ok(FileStatus::Unchanged),
      RewriteMode::Added => FileStatus::Added,
      RewriteMode::Updated => FileStatus::Updated,
    };

    FileIO::write_file(path, &new_content)?;
    debug!("{:?}: {}", mode, path.display());
    Ok(status)
  }
}
