//! # license-header
//!
//! A tool that keeps a canonical copyright/license header at the top of
//! source files.
//!
//! For every file it either inserts the header (none present), replaces the
//! existing header with the canonical text (header present and carrying the
//! target year), or leaves the file alone (header with any other year, or a
//! file type no header applies to).
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use license_header::headers::HeaderTable;
//! use license_header::processor::{FileCollector, Processor};
//!
//! fn main() -> anyhow::Result<()> {
//!     let headers = HeaderTable::builtin()?;
//!     headers.validate()?;
//!
//!     let cwd = std::env::current_dir()?;
//!     let files = FileCollector::with_default_exclusions(cwd).collect(&["src/**/*.ts".to_string()])?;
//!
//!     let processor = Processor::new(headers, true);
//!     for report in processor.process(&files, |_| {}) {
//!         println!("{}: {:?}", report.path.display(), report.status);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`headers`] - Canonical headers, detection styles and the startup self-check
//! * [`processor`] - File collection, header rewriting and the per-file loop
//! * [`output`] - Colorized status lines
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`headers`]: crate::headers
//! [`processor`]: crate::processor
//! [`output`]: crate::output
//! [`logging`]: crate::logging

pub mod config;
pub mod git;
pub mod headers;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
