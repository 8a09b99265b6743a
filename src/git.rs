//! # Git Module
//!
//! This module contains functionality for interacting with git repositories,
//! such as listing the files that differ from `HEAD` in the working tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{ErrorCode, Repository, Status, StatusEntry, StatusOptions};
use tracing::{debug, trace};

/// Finds the work-tree root of the repository containing `dir`.
///
/// Returns `Ok(None)` when `dir` is not inside a git repository or the
/// repository is bare.
pub fn discover_repo_root(dir: &Path) -> Result<Option<PathBuf>> {
  match Repository::discover(dir) {
    Ok(repo) => Ok(repo.workdir().map(Path::to_path_buf)),
    Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
    Err(e) => Err(e).with_context(|| format!("Failed to open git repository at {}", dir.display())),
  }
}

/// Gets the files reported by `git status` for the repository containing
/// `dir`.
///
/// Every non-clean entry is returned: modified, staged, deleted, renamed and
/// untracked files, with untracked directories expanded to their files. A
/// staged rename is reported once, under its new path.
/// Ignored files are left out. Paths are absolute, joined onto the work-tree
/// root, and keep the order git reports them in.
///
/// # Errors
///
/// Returns an error if:
/// - `dir` is not inside a git repository
/// - The repository has no work tree
/// - Reading the status fails
pub fn get_working_tree_changes(dir: &Path) -> Result<Vec<PathBuf>> {
  let repo = Repository::discover(dir)
    .with_context(|| format!("Failed to find a git repository from {}", dir.display()))?;
  let root = repo
    .workdir()
    .map(Path::to_path_buf)
    .with_context(|| "Git repository has no working tree")?;
  debug!("Reading git status under {}", root.display());

  let mut status_opts = StatusOptions::new();
  status_opts
    .include_untracked(true)
    .recurse_untracked_dirs(true)
    .include_ignored(false)
    .renames_head_to_index(true);

  let statuses = repo
    .statuses(Some(&mut status_opts))
    .with_context(|| "Failed to get git status")?;

  let mut files = Vec::with_capacity(statuses.len());
  for entry in statuses.iter() {
    let Some(path) = entry_path(&entry) else {
      continue;
    };
    trace!("Status {:?}: {}", entry.status(), path.display());
    files.push(root.join(path));
  }

  debug!("Found {} changed files", files.len());
  Ok(files)
}

/// The path an entry is reported under: the new name for a staged rename,
/// otherwise the entry's own path.
fn entry_path(entry: &StatusEntry<'_>) -> Option<PathBuf> {
  if entry.status().contains(Status::INDEX_RENAMED)
    && let Some(path) = entry.head_to_index().and_then(|delta| delta.new_file().path().map(Path::to_path_buf))
  {
    return Some(path);
  }
  entry.path().map(PathBuf::from)
}
