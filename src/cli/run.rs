//! # Run Command
//!
//! This module implements the add/update pass over the selected files.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Args};
use license_header::config::load_config;
use license_header::headers::HeaderTable;
use license_header::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use license_header::output::print_file_status;
use license_header::processor::{FileCollector, Processor};
use license_header::report::{ProcessingSummary, write_json_report};
use tracing::{debug, error, info};

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// If present, add/update license headers in the files matched from the
  /// current directory. Otherwise, process the files git reports as changed
  /// or untracked.
  #[arg(long, value_name = "PATTERN", num_args = 1.., action = ArgAction::Append)]
  pub glob: Vec<String>,

  /// Only update existing license headers, never insert new ones
  #[arg(long)]
  pub no_add: bool,

  /// Path to config file (default: .license-header.toml in the current
  /// directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,

  /// Only print files that were changed or failed
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Write a JSON report of every processed file to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

/// Run the add/update pass with the given arguments.
///
/// Per-file failures are printed and never change the result; only startup
/// problems (config, header self-check, file discovery) return an error.
pub fn run(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;

  let config = load_config(args.config.as_deref(), &current_dir, args.no_config)?;

  let headers = match config.as_ref() {
    Some(cfg) => cfg.header_table()?,
    None => None,
  };
  let headers = match headers {
    Some(table) => {
      debug!("Using {} headers from the config file", table.len());
      table
    }
    None => HeaderTable::builtin()?,
  };

  // Every canonical header must be recognizable by its own detection styles,
  // otherwise a second run would insert it again.
  headers.validate().with_context(|| "License header self-check failed")?;

  let collector = match config.as_ref() {
    Some(cfg) => FileCollector::new(current_dir.clone(), cfg.excluded_dirs()),
    None => FileCollector::with_default_exclusions(current_dir.clone()),
  };

  let files = collector.collect(&args.glob)?;
  debug!("Collected {} files", files.len());

  let processor = Processor::new(headers, !args.no_add);

  let start_time = Instant::now();
  let reports = processor.process(&files, |report| print_file_status(report, &current_dir));
  let summary = ProcessingSummary::from_reports(&reports, start_time.elapsed());

  info!(
    "Summary: {} unchanged, {} added, {} updated, {} failed, {} untouched ({}ms)",
    summary.unchanged, summary.added, summary.updated, summary.failed, summary.untouched, summary.processing_time_ms
  );

  if let Some(ref output_path) = args.report_json {
    if let Err(e) = write_json_report(output_path, &reports, &summary) {
      error!("Error generating JSON report: {:#}", e);
    } else {
      info!("Generated JSON report at {}", output_path.display());
    }
  }

  Ok(())
}
