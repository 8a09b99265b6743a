//! # Headers Module
//!
//! This module defines the canonical license headers and the comment styles
//! used to recognize an existing header at the top of a file.
//!
//! The module includes:
//! - [`LicenseHeader`] for a single canonical header bound to a family of file
//!   names
//! - [`HeaderTable`] for the ordered set of headers applied by the processor
//! - [`HeaderStyle`] for the ordered detection styles
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use license_header::headers::HeaderTable;
//!
//! # fn main() -> anyhow::Result<()> {
//! let table = HeaderTable::builtin()?;
//! table.validate()?;
//!
//! let header = table.header_for(Path::new("src/index.ts"));
//! assert!(header.is_some());
//! assert!(table.header_for(Path::new("README.md")).is_none());
//! # Ok(())
//! # }
//! ```

use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Year carried by the built-in headers.
pub const BUILTIN_YEAR: &str = "2023";

/// Built-in header for JavaScript and TypeScript sources.
pub const JS_HEADER: &str = r#"/**
 * @license
 * Copyright 2023 Google LLC.
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * =============================================================================
 */"#;

/// Built-in header for C and C++ sources.
pub const C_HEADER: &str = r#"/* Copyright 2023 Google LLC.
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * ===========================================================================*/"#;

/// File name pattern for the JavaScript/TypeScript family.
pub const JS_FILENAME_PATTERN: &str = r"(?i)(\.ts|\.js)$";

/// File name pattern for the C/C++ family.
pub const C_FILENAME_PATTERN: &str = r"(?i)(\.c|\.h|\.cc|\.cpp)$";

/// Error type for header construction and validation.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// The file name pattern is not a valid regular expression.
  #[error("Invalid filename pattern '{pattern}': {source}")]
  InvalidPattern { pattern: String, source: regex::Error },

  /// The header year is not a four digit number.
  #[error("Invalid year '{year}' for header '{pattern}': expected four digits")]
  InvalidYear { pattern: String, year: String },

  /// The header content is blank.
  #[error("Header content for '{pattern}' is empty")]
  EmptyContent { pattern: String },

  /// No detection style recognizes the canonical header text.
  #[error("License header for '{pattern}' cannot be caught by any header style:\n{content}")]
  Undetectable { pattern: String, content: String },

  /// The table has no headers, so no file would ever be a target.
  #[error("License header table is empty")]
  EmptyTable,

  /// The canonical header text carries a different year than declared.
  #[error("License header for '{pattern}' declares year {expected} but its text reads {found}")]
  YearMismatch {
    pattern: String,
    expected: String,
    found: String,
  },
}

/// A header detected at the top of some content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
  /// The year captured from the `Copyright <year>` line
  pub year: String,
  /// Byte range of the whole header, leading whitespace included
  pub span: Range<usize>,
}

/// Comment styles recognized as a license header, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
  /// `/** ... @license ... Copyright <year> ... */`
  JsDoc,
  /// `/* ... Copyright <year> ... */`
  Block,
}

/// Leading comment block: optional whitespace, `/*`, body up to the first `*/`.
static COMMENT_BLOCK: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?s)\A\s*/\*(?P<body>.*?)\*/").expect("comment block regex must compile"));

// The greedy `.+` before `copyright` captures the last qualifying year. The
// year may close the comment body but never runs into a fifth digit.
static JSDOC_BODY: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?is)\A\*.+@license.+copyright\s(?P<year>[0-9]{4})(?:[^0-9].*)?\z")
    .expect("jsdoc body regex must compile")
});

static BLOCK_BODY: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?is)\A.+copyright\s(?P<year>[0-9]{4})(?:[^0-9].*)?\z").expect("block body regex must compile")
});

impl HeaderStyle {
  /// All styles in the order they are tried.
  pub const ALL: [HeaderStyle; 2] = [HeaderStyle::JsDoc, HeaderStyle::Block];

  fn body_regex(self) -> &'static Regex {
    match self {
      HeaderStyle::JsDoc => &JSDOC_BODY,
      HeaderStyle::Block => &BLOCK_BODY,
    }
  }

  /// Tries to recognize a header of this style at the start of `content`.
  pub fn detect(self, content: &str) -> Option<HeaderMatch> {
    let block = COMMENT_BLOCK.captures(content)?;
    let whole = block.get(0)?;
    let body = block.name("body")?.as_str();
    let caps = self.body_regex().captures(body)?;
    Some(HeaderMatch {
      year: caps.name("year")?.as_str().to_string(),
      span: whole.range(),
    })
  }
}

/// Applies the detection styles in order and returns the first match.
pub fn detect_header(content: &str) -> Option<(HeaderStyle, HeaderMatch)> {
  HeaderStyle::ALL
    .into_iter()
    .find_map(|style| style.detect(content).map(|found| (style, found)))
}

/// A canonical license header for one family of files.
#[derive(Debug, Clone)]
pub struct LicenseHeader {
  filename_pattern: Regex,
  year: String,
  content: String,
}

impl LicenseHeader {
  /// Creates a header, compiling the file name pattern and trimming the
  /// content.
  ///
  /// # Errors
  ///
  /// Returns an error if the pattern does not compile, the year is not four
  /// digits, or the content is blank.
  pub fn new(filename_pattern: &str, year: impl Into<String>, content: &str) -> Result<Self, HeaderError> {
    let year = year.into();
    let regex = Regex::new(filename_pattern).map_err(|source| HeaderError::InvalidPattern {
      pattern: filename_pattern.to_string(),
      source,
    })?;

    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
      return Err(HeaderError::InvalidYear {
        pattern: filename_pattern.to_string(),
        year,
      });
    }

    let content = content.trim();
    if content.is_empty() {
      return Err(HeaderError::EmptyContent {
        pattern: filename_pattern.to_string(),
      });
    }

    Ok(Self {
      filename_pattern: regex,
      year,
      content: content.to_string(),
    })
  }

  /// The target year.
  pub fn year(&self) -> &str {
    &self.year
  }

  /// The canonical header text.
  pub fn content(&self) -> &str {
    &self.content
  }

  /// The source of the file name pattern.
  pub fn filename_pattern(&self) -> &str {
    self.filename_pattern.as_str()
  }

  /// Whether this header applies to `path`. The whole path is matched, not
  /// just the file name.
  pub fn matches_path(&self, path: &Path) -> bool {
    self.filename_pattern.is_match(&path.to_string_lossy())
  }
}

/// Ordered set of license headers.
#[derive(Debug, Clone)]
pub struct HeaderTable {
  headers: Vec<LicenseHeader>,
}

impl HeaderTable {
  /// Creates a table from an ordered list of headers.
  pub const fn new(headers: Vec<LicenseHeader>) -> Self {
    Self { headers }
  }

  /// The built-in table: JS/TS first, then C/C++.
  pub fn builtin() -> Result<Self, HeaderError> {
    Ok(Self::new(vec![
      LicenseHeader::new(JS_FILENAME_PATTERN, BUILTIN_YEAR, JS_HEADER)?,
      LicenseHeader::new(C_FILENAME_PATTERN, BUILTIN_YEAR, C_HEADER)?,
    ]))
  }

  /// Checks that the table is not empty and that every canonical header is
  /// recognized by its own detection styles and carries the year it declares.
  ///
  /// Must run once before any file is processed.
  pub fn validate(&self) -> Result<(), HeaderError> {
    if self.is_empty() {
      return Err(HeaderError::EmptyTable);
    }

    for header in &self.headers {
      let Some((style, found)) = detect_header(header.content()) else {
        return Err(HeaderError::Undetectable {
          pattern: header.filename_pattern().to_string(),
          content: header.content().to_string(),
        });
      };

      if found.year != header.year() {
        return Err(HeaderError::YearMismatch {
          pattern: header.filename_pattern().to_string(),
          expected: header.year().to_string(),
          found: found.year,
        });
      }

      debug!(
        "Header for '{}' is detected as {:?} with year {}",
        header.filename_pattern(),
        style,
        found.year
      );
    }
    Ok(())
  }

  /// The first header whose file name pattern matches `path`.
  pub fn header_for(&self, path: &Path) -> Option<&LicenseHeader> {
    self.headers.iter().find(|header| header.matches_path(path))
  }

  pub fn len(&self) -> usize {
    self.headers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.headers.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builtin_table_passes_self_check() {
    let table = HeaderTable::builtin().unwrap();
    assert_eq!(table.len(), 2);
    table.validate().unwrap();
  }

  #[test]
  fn test_builtin_headers_detected_with_expected_style() {
    let (style, found) = detect_header(JS_HEADER).unwrap();
    assert_eq!(style, HeaderStyle::JsDoc);
    assert_eq!(found.year, "2023");
    assert_eq!(found.span, 0..JS_HEADER.len());

    let (style, found) = detect_header(C_HEADER).unwrap();
    assert_eq!(style, HeaderStyle::Block);
    assert_eq!(found.year, "2023");
    assert_eq!(found.span, 0..C_HEADER.len());
  }

  #[test]
  fn test_header_for_picks_family_by_extension() {
    let table = HeaderTable::builtin().unwrap();
    assert_eq!(
      table.header_for(Path::new("/repo/src/app.JS")).unwrap().content(),
      JS_HEADER
    );
    assert_eq!(table.header_for(Path::new("lib/matmul.cc")).unwrap().content(), C_HEADER);
    assert_eq!(table.header_for(Path::new("lib/matmul.h")).unwrap().content(), C_HEADER);
    assert!(table.header_for(Path::new("lib/matmul.rs")).is_none());
    assert!(table.header_for(Path::new("package.json")).is_none());
  }

  #[test]
  fn test_detect_is_case_insensitive() {
    let content = "/*\n * COPYRIGHT 2021 someone\n */\nint x;";
    let (style, found) = detect_header(content).unwrap();
    assert_eq!(style, HeaderStyle::Block);
    assert_eq!(found.year, "2021");
  }

  #[test]
  fn test_detect_includes_leading_whitespace_in_span() {
    let content = "\n\n  /* Copyright 2020 A */\ncode";
    let found = HeaderStyle::Block.detect(content).unwrap();
    assert_eq!(found.span, 0..content.find("code").unwrap() - 1);
  }

  #[test]
  fn test_detect_requires_header_at_start() {
    let content = "int x;\n/* Copyright 2020 A */\n";
    assert!(detect_header(content).is_none());
  }

  #[test]
  fn test_detect_stops_at_first_comment_close() {
    // The year lives in a second comment, so the leading block has none.
    let content = "/* generated */\n/* Copyright 2020 A */\n";
    assert!(detect_header(content).is_none());
  }

  #[test]
  fn test_detect_requires_four_digit_year() {
    assert!(detect_header("/* Copyright 202 A */").is_none());
    assert!(detect_header("/* Copyright 20201 A */").is_none());
    assert!(detect_header("/* Copyright A */").is_none());
  }

  #[test]
  fn test_detect_year_directly_before_close() {
    let (style, found) = detect_header("/* Copyright 2023*/\nint x;").unwrap();
    assert_eq!(style, HeaderStyle::Block);
    assert_eq!(found.year, "2023");
    assert_eq!(found.span, 0..19);

    let (style, found) = detect_header("/**\n * @license\n * Copyright 2021*/").unwrap();
    assert_eq!(style, HeaderStyle::JsDoc);
    assert_eq!(found.year, "2021");

    assert!(detect_header("/* Copyright 20231*/").is_none());
  }

  #[test]
  fn test_jsdoc_requires_license_tag() {
    let content = "/**\n * Copyright 2022 A\n */\n";
    assert!(HeaderStyle::JsDoc.detect(content).is_none());
    let (style, found) = detect_header(content).unwrap();
    assert_eq!(style, HeaderStyle::Block);
    assert_eq!(found.year, "2022");
  }

  #[test]
  fn test_detect_captures_last_copyright_line() {
    let content = "/*\n * Copyright 2019 A\n * Copyright 2021 B\n */";
    assert_eq!(detect_header(content).unwrap().1.year, "2021");
  }

  #[test]
  fn test_new_rejects_bad_input() {
    assert!(matches!(
      LicenseHeader::new("(unclosed", "2023", "/* Copyright 2023 A */"),
      Err(HeaderError::InvalidPattern { .. })
    ));
    assert!(matches!(
      LicenseHeader::new(r"\.rs$", "23", "/* Copyright 2023 A */"),
      Err(HeaderError::InvalidYear { .. })
    ));
    assert!(matches!(
      LicenseHeader::new(r"\.rs$", "2023", "  \n "),
      Err(HeaderError::EmptyContent { .. })
    ));
  }

  #[test]
  fn test_validate_rejects_undetectable_header() {
    let header = LicenseHeader::new(r"\.rs$", "2023", "// Copyright 2023 A").unwrap();
    let table = HeaderTable::new(vec![header]);
    assert!(matches!(table.validate(), Err(HeaderError::Undetectable { .. })));
  }

  #[test]
  fn test_validate_rejects_empty_table() {
    let table = HeaderTable::new(Vec::new());
    assert!(table.is_empty());
    assert!(matches!(table.validate(), Err(HeaderError::EmptyTable)));
  }

  #[test]
  fn test_validate_rejects_year_drift() {
    let header = LicenseHeader::new(r"\.rs$", "2024", "/* Copyright 2023 A */").unwrap();
    let table = HeaderTable::new(vec![header]);
    let err = table.validate().unwrap_err();
    assert!(err.to_string().contains("declares year 2024"));
  }
}
