#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Whether a `git` executable can be run.
pub fn is_git_available() -> bool {
  Command::new("git")
    .arg("--version")
    .output()
    .is_ok_and(|output| output.status.success())
}

/// Runs `git <args>` inside `dir`, failing with git's stderr.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
  let output = Command::new("git")
    .args(args)
    .current_dir(dir)
    .output()
    .with_context(|| format!("Failed to execute git {:?}", args))?;

  if !output.status.success() {
    bail!("git {:?} failed: {}", args, String::from_utf8_lossy(&output.stderr));
  }
  Ok(())
}

/// Initializes a repository on branch `main` with a fixed identity and no
/// commit signing.
pub fn init_git_repo(dir: &Path) -> Result<()> {
  run_git(dir, &["init", "--quiet"])?;
  run_git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
  for (key, value) in [
    ("user.name", "Test User"),
    ("user.email", "test@example.com"),
    ("commit.gpgsign", "false"),
  ] {
    run_git(dir, &["config", key, value])?;
  }
  Ok(())
}

/// Stages `file` and commits it.
pub fn git_add_and_commit(dir: &Path, file: &str, message: &str) -> Result<()> {
  run_git(dir, &["add", file])?;
  run_git(dir, &["commit", "--quiet", "-m", message])
}

/// Writes `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}
