//! # File Collector Module
//!
//! This module resolves the list of files to process, either by expanding
//! glob patterns against the current directory or by asking git which files
//! changed in the working tree.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::{MatchOptions, Pattern};
use tracing::{debug, trace, warn};

use crate::git;

/// Directories skipped during glob expansion unless configured otherwise.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules"];

/// Options matching the usual shell semantics: `*` stops at `/` and hidden
/// entries need an explicit leading dot.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: true,
};

/// File collector for glob expansion and git status lookups.
///
/// The `FileCollector` handles:
/// - Anchoring relative glob patterns at the current directory
/// - Skipping files inside excluded (dependency) directories
/// - Deduplicating and sorting glob results
/// - Listing changed files when no pattern is given
pub struct FileCollector {
  /// Directory that relative patterns and git discovery start from
  current_dir: PathBuf,
  /// Directory names whose contents are never collected by globs
  excluded_dirs: Vec<String>,
}

impl FileCollector {
  /// Creates a new FileCollector rooted at `current_dir`.
  ///
  /// # Parameters
  ///
  /// * `current_dir` - The directory patterns are resolved against
  /// * `excluded_dirs` - Directory names to skip during glob expansion
  pub const fn new(current_dir: PathBuf, excluded_dirs: Vec<String>) -> Self {
    Self {
      current_dir,
      excluded_dirs,
    }
  }

  /// Creates a collector with the default excluded directories.
  pub fn with_default_exclusions(current_dir: PathBuf) -> Self {
    let excluded_dirs = DEFAULT_EXCLUDED_DIRS.iter().map(|d| (*d).to_string()).collect();
    Self::new(current_dir, excluded_dirs)
  }

  /// Collects files from glob patterns when any are given, otherwise from the
  /// git working tree status.
  pub fn collect(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
    if patterns.is_empty() {
      self.collect_changed()
    } else {
      self.collect_globs(patterns)
    }
  }

  /// Expands glob patterns into a sorted, deduplicated list of absolute file
  /// paths.
  ///
  /// # Errors
  ///
  /// Returns an error if a pattern is not valid glob syntax.
  pub fn collect_globs(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
      let anchored = self.anchor_pattern(pattern);
      debug!("Expanding glob: {}", anchored);
      let entries =
        glob::glob_with(&anchored, GLOB_OPTIONS).with_context(|| format!("Invalid glob pattern: {}", pattern))?;

      for entry in entries {
        match entry {
          Ok(path) => {
            if !path.is_file() {
              trace!("Skipping: {} (not a file)", path.display());
              continue;
            }
            if self.is_excluded(&path) {
              trace!("Skipping: {} (excluded directory)", path.display());
              continue;
            }
            files.push(path);
          }
          Err(e) => {
            warn!("Error with glob pattern {}: {}", pattern, e);
          }
        }
      }
    }

    // Plain string order, so `a-b/x` sorts before `a/x`.
    files.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    files.dedup();

    debug!("Glob patterns matched {} files", files.len());
    Ok(files)
  }

  /// Lists the files git reports as changed or untracked.
  ///
  /// # Errors
  ///
  /// Returns an error if the current directory is not inside a git work tree.
  pub fn collect_changed(&self) -> Result<Vec<PathBuf>> {
    let Some(root) = git::discover_repo_root(&self.current_dir)? else {
      bail!(
        "{} is not inside a git working tree; pass --glob to select files",
        self.current_dir.display()
      );
    };
    debug!("Collecting changed files under {}", root.display());
    git::get_working_tree_changes(&root)
  }

  fn anchor_pattern(&self, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() {
      return pattern.to_string();
    }
    let base = Pattern::escape(&self.current_dir.to_string_lossy());
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    format!("{}/{}", base.trim_end_matches('/'), pattern)
  }

  fn is_excluded(&self, path: &Path) -> bool {
    let relative = path.strip_prefix(&self.current_dir).unwrap_or(path);
    relative.components().any(|component| match component {
      Component::Normal(name) => self.excluded_dirs.iter().any(|dir| name == dir.as_str()),
      _ => false,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "x").unwrap();
  }

  #[test]
  fn test_collect_globs_sorts_and_dedups() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    touch(&root, "src/b.ts");
    touch(&root, "src/a.ts");
    touch(&root, "src/a.c");

    let collector = FileCollector::with_default_exclusions(root.clone());
    let files = collector
      .collect_globs(&["src/*.ts".to_string(), "src/a.*".to_string()])
      .unwrap();

    assert_eq!(files, vec![root.join("src/a.c"), root.join("src/a.ts"), root.join("src/b.ts")]);
  }

  #[test]
  fn test_collect_globs_skips_node_modules() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    touch(&root, "lib/index.js");
    touch(&root, "node_modules/dep/index.js");
    touch(&root, "lib/node_modules/nested/index.js");

    let collector = FileCollector::with_default_exclusions(root.clone());
    let files = collector.collect_globs(&["**/*.js".to_string()]).unwrap();

    assert_eq!(files, vec![root.join("lib/index.js")]);
  }

  #[test]
  fn test_collect_globs_skips_directories() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    touch(&root, "src/main.c");

    let collector = FileCollector::with_default_exclusions(root.clone());
    let files = collector.collect_globs(&["*".to_string(), "src/*".to_string()]).unwrap();

    assert_eq!(files, vec![root.join("src/main.c")]);
  }

  #[test]
  fn test_collect_globs_orders_by_string() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    touch(&root, "a/x.ts");
    touch(&root, "a-b/x.ts");

    let collector = FileCollector::with_default_exclusions(root.clone());
    let files = collector.collect_globs(&["**/x.ts".to_string()]).unwrap();

    assert_eq!(files, vec![root.join("a-b/x.ts"), root.join("a/x.ts")]);
  }

  #[test]
  fn test_collect_globs_rejects_invalid_pattern() {
    let dir = tempdir().unwrap();
    let collector = FileCollector::with_default_exclusions(dir.path().to_path_buf());
    assert!(collector.collect_globs(&["src/[".to_string()]).is_err());
  }

  #[test]
  fn test_collect_without_patterns_outside_git_fails() {
    let dir = tempdir().unwrap();
    let collector = FileCollector::with_default_exclusions(dir.path().to_path_buf());
    let err = collector.collect(&[]).unwrap_err();
    assert!(err.to_string().contains("not inside a git working tree"));
  }

  #[test]
  fn test_custom_exclusions() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    touch(&root, "vendor/x.c");
    touch(&root, "node_modules/y.c");

    let collector = FileCollector::new(root.clone(), vec!["vendor".to_string()]);
    let files = collector.collect_globs(&["**/*.c".to_string()]).unwrap();

    assert_eq!(files, vec![root.join("node_modules/y.c")]);
  }
}
