//! # license-header
//!
//! A tool that keeps a canonical copyright/license header at the top of
//! source files.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.run_args)
}
