//! # Header Rewriter Module
//!
//! This module decides, for one file's content and one canonical header,
//! whether the header has to be added, replaced, or left alone.

use crate::headers::{LicenseHeader, detect_header};

/// Outcome of a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
  /// Content is returned as-is
  Unchanged,
  /// A new header was prepended
  Added,
  /// An existing header with the target year was replaced by the canonical text
  Updated,
}

/// Rewritten content together with what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
  pub mode: RewriteMode,
  pub new_content: String,
}

/// Rewrites license headers in file content.
///
/// The `HeaderRewriter` handles:
/// - Detaching and reattaching an interpreter directive (`#!`) line
/// - Replacing an existing header whose year equals the target year
/// - Prepending the header when none is found, unless insertion is disabled
#[derive(Debug, Clone, Copy)]
pub struct HeaderRewriter {
  /// Whether files without any header get one prepended
  add_missing: bool,
}

impl Default for HeaderRewriter {
  fn default() -> Self {
    Self::new(true)
  }
}

impl HeaderRewriter {
  /// Creates a rewriter. With `add_missing` set to `false` only existing
  /// headers are touched.
  pub const fn new(add_missing: bool) -> Self {
    Self { add_missing }
  }

  /// Splits a leading `#!` line from the content.
  ///
  /// The directive needs at least one character after `#!` and a terminating
  /// newline. The newline belongs to neither part.
  pub fn split_shebang(content: &str) -> (Option<&str>, &str) {
    if !content.starts_with("#!") {
      return (None, content);
    }
    match content.find('\n') {
      Some(end) if end > 2 => (Some(&content[..end]), &content[end + 1..]),
      _ => (None, content),
    }
  }

  /// Applies `header` to `content`.
  pub fn rewrite(&self, content: &str, header: &LicenseHeader) -> RewriteResult {
    let (shebang, body) = Self::split_shebang(content);
    let finish = |mode: RewriteMode, text: String| RewriteResult {
      mode,
      new_content: match shebang {
        Some(line) => format!("{line}\n{text}"),
        None => text,
      },
    };

    if let Some((_, found)) = detect_header(body) {
      // An older or newer header is kept as the author wrote it.
      if found.year != header.year() {
        return finish(RewriteMode::Unchanged, body.to_string());
      }

      let mut replaced = String::with_capacity(body.len() + header.content().len());
      replaced.push_str(&body[..found.span.start]);
      replaced.push_str(header.content());
      replaced.push_str(&body[found.span.end..]);

      let mode = if replaced == body {
        RewriteMode::Unchanged
      } else {
        RewriteMode::Updated
      };
      return finish(mode, replaced);
    }

    if !self.add_missing {
      return finish(RewriteMode::Unchanged, body.to_string());
    }

    finish(RewriteMode::Added, format!("{}\n{}", header.content().trim(), body))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::headers::{C_FILENAME_PATTERN, C_HEADER, JS_FILENAME_PATTERN, JS_HEADER};

  fn js_header() -> LicenseHeader {
    LicenseHeader::new(JS_FILENAME_PATTERN, "2023", JS_HEADER).unwrap()
  }

  fn c_header() -> LicenseHeader {
    LicenseHeader::new(C_FILENAME_PATTERN, "2023", C_HEADER).unwrap()
  }

  // === Shebang splitting ===

  #[test]
  fn test_split_shebang() {
    let (shebang, rest) = HeaderRewriter::split_shebang("#!/usr/bin/env node\nconsole.log(1)");
    assert_eq!(shebang, Some("#!/usr/bin/env node"));
    assert_eq!(rest, "console.log(1)");
  }

  #[test]
  fn test_split_shebang_requires_newline_and_command() {
    assert_eq!(HeaderRewriter::split_shebang("#!/bin/sh"), (None, "#!/bin/sh"));
    assert_eq!(HeaderRewriter::split_shebang("#!\nx"), (None, "#!\nx"));
    assert_eq!(HeaderRewriter::split_shebang("// #!x\n"), (None, "// #!x\n"));
  }

  // === Insertion ===

  #[test]
  fn test_adds_header_after_shebang() {
    let header = LicenseHeader::new(r"\.js$", "2023", "/* H */").unwrap();
    let result = HeaderRewriter::default().rewrite("#!/usr/bin/env node\nconsole.log(1)", &header);
    assert_eq!(result.mode, RewriteMode::Added);
    assert_eq!(result.new_content, "#!/usr/bin/env node\n/* H */\nconsole.log(1)");
  }

  #[test]
  fn test_adds_header_to_plain_content() {
    let content = "export const x = 1;\n";
    let result = HeaderRewriter::default().rewrite(content, &js_header());
    assert_eq!(result.mode, RewriteMode::Added);
    assert_eq!(result.new_content, format!("{JS_HEADER}\n{content}"));
  }

  #[test]
  fn test_adds_header_to_empty_content() {
    let result = HeaderRewriter::default().rewrite("", &c_header());
    assert_eq!(result.mode, RewriteMode::Added);
    assert_eq!(result.new_content, format!("{C_HEADER}\n"));
  }

  #[test]
  fn test_no_add_leaves_headerless_content() {
    let content = "#!/usr/bin/env node\nconsole.log(1)";
    let result = HeaderRewriter::new(false).rewrite(content, &js_header());
    assert_eq!(result.mode, RewriteMode::Unchanged);
    assert_eq!(result.new_content, content);
  }

  // === Existing headers ===

  #[test]
  fn test_keeps_header_with_other_year() {
    let content = "/**\n * @license\n * Copyright 2022 Google LLC.\n */\nexport {};\n";
    let result = HeaderRewriter::default().rewrite(content, &js_header());
    assert_eq!(result.mode, RewriteMode::Unchanged);
    assert_eq!(result.new_content, content);
  }

  #[test]
  fn test_keeps_newer_header_too() {
    let content = "/* Copyright 2030 Someone */\nint main() {}\n";
    let result = HeaderRewriter::default().rewrite(content, &c_header());
    assert_eq!(result.mode, RewriteMode::Unchanged);
    assert_eq!(result.new_content, content);
  }

  #[test]
  fn test_replaces_header_with_same_year() {
    let content = "\n/* Copyright 2023 Google LLC.\n * Old wording\n */\nint main() {}\n";
    let result = HeaderRewriter::default().rewrite(content, &c_header());
    assert_eq!(result.mode, RewriteMode::Updated);
    assert_eq!(result.new_content, format!("{C_HEADER}\nint main() {{}}\n"));
  }

  #[test]
  fn test_replaces_across_styles() {
    // A C-style header in a JS file is swapped for the JSDoc header.
    let content = "/* Copyright 2023 Google LLC. */\nexport {};\n";
    let result = HeaderRewriter::default().rewrite(content, &js_header());
    assert_eq!(result.mode, RewriteMode::Updated);
    assert_eq!(result.new_content, format!("{JS_HEADER}\nexport {{}};\n"));
  }

  #[test]
  fn test_canonical_header_is_unchanged() {
    let content = format!("{JS_HEADER}\nexport {{}};\n");
    let result = HeaderRewriter::default().rewrite(&content, &js_header());
    assert_eq!(result.mode, RewriteMode::Unchanged);
    assert_eq!(result.new_content, content);
  }

  #[test]
  fn test_shebang_kept_when_header_replaced() {
    let content = "#!/usr/bin/env node\n/* Copyright 2023 x */\nrun();\n";
    let result = HeaderRewriter::default().rewrite(content, &js_header());
    assert_eq!(result.mode, RewriteMode::Updated);
    assert_eq!(result.new_content, format!("#!/usr/bin/env node\n{JS_HEADER}\nrun();\n"));
  }

  #[test]
  fn test_year_closing_comment_is_replaced() {
    let result = HeaderRewriter::default().rewrite("/* Copyright 2023*/\nint x;\n", &c_header());
    assert_eq!(result.mode, RewriteMode::Updated);
    assert_eq!(result.new_content, format!("{C_HEADER}\nint x;\n"));
  }

  #[test]
  fn test_other_year_closing_comment_is_kept() {
    let content = "/* Copyright 2020*/\nint x;\n";
    for rewriter in [HeaderRewriter::new(true), HeaderRewriter::new(false)] {
      let result = rewriter.rewrite(content, &c_header());
      assert_eq!(result.mode, RewriteMode::Unchanged);
      assert_eq!(result.new_content, content);
    }
  }

  // === Idempotence ===

  #[test]
  fn test_second_pass_is_unchanged() {
    let rewriter = HeaderRewriter::default();
    let inputs = [
      "console.log(1)\n",
      "#!/usr/bin/env node\nconsole.log(1)",
      "/* Copyright 2023 Old */\nint x;\n",
      "/* Copyright 2019 Old */\nint x;\n",
      "",
    ];
    for header in [js_header(), c_header()] {
      for input in inputs {
        let first = rewriter.rewrite(input, &header);
        let second = rewriter.rewrite(&first.new_content, &header);
        assert_eq!(second.mode, RewriteMode::Unchanged, "input: {input:?}");
        assert_eq!(second.new_content, first.new_content, "input: {input:?}");
      }
    }
  }
}
