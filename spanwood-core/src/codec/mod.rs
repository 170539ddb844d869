//! Reading and writing the `.graph.mmd` text format.
//!
//! A document is a fenced metadata block followed by a Mermaid `graph`
//! body:
//!
//! ```text
//! ---
//! title: roads
//! zad: 3
//! src: 0
//! mst: Kruskal
//! ---
//! graph
//! 0("A")
//! 1("B")
//! 0 ---|2.5| 1
//! ```
//!
//! Parsing never fails on content. Lines that cannot be applied are
//! recorded in a [`LoadReport`] and skipped, so a partially damaged file
//! still yields every vertex and edge that could be read.

mod diagnostics;
mod encoding;
mod lines;
mod parser;
mod writer;

use std::path::Path;

use crate::error::CodecError;

pub use self::{
    diagnostics::{Diagnostic, DiagnosticKind, LoadReport, Severity},
    writer::RenderView,
};
pub(crate) use self::{
    encoding::decode_document,
    parser::{ParsedDocument, parse_document},
    writer::{DocumentHeader, render_body, render_document, validate_title},
};

/// Line opening and closing the metadata block.
pub const FENCE: &str = "---";
/// Prefix of Mermaid comment lines.
pub const COMMENT_MARKER: &str = "%%";
/// Suffix appended to titles to form file names.
pub const DEFAULT_FILE_SUFFIX: &str = ".graph.mmd";
/// Schema version written into the `zad` property.
pub const SCHEMA_VERSION: u32 = 3;

/// Settings shared by the parser and the writer.
///
/// # Examples
/// ```
/// use spanwood_core::CodecOptions;
///
/// let options = CodecOptions::default();
/// assert_eq!(options.expected_schema(), 3);
/// assert_eq!(options.file_suffix(), ".graph.mmd");
/// assert!(options.title_check());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodecOptions {
    expected_schema: u32,
    file_suffix: String,
    title_check: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            expected_schema: SCHEMA_VERSION,
            file_suffix: DEFAULT_FILE_SUFFIX.to_owned(),
            title_check: true,
        }
    }
}

impl CodecOptions {
    /// Returns a builder seeded with the defaults.
    #[must_use]
    pub fn builder() -> CodecOptionsBuilder {
        CodecOptionsBuilder::new()
    }

    /// Schema version the parser compares `zad` against and the writer emits.
    #[must_use]
    #[rustfmt::skip]
    pub fn expected_schema(&self) -> u32 { self.expected_schema }

    /// Suffix used to derive titles from file names and file names from titles.
    #[must_use]
    pub fn file_suffix(&self) -> &str {
        &self.file_suffix
    }

    /// Whether the `title` property is compared with the file name on load.
    #[must_use]
    #[rustfmt::skip]
    pub fn title_check(&self) -> bool { self.title_check }

    /// Derives the title a file at `path` is expected to carry.
    ///
    /// The configured suffix is stripped from the file name; when the name
    /// does not end with it, the file stem is used instead.
    #[must_use]
    pub fn title_for_path(&self, path: &Path) -> Option<String> {
        let file_name = path.file_name()?.to_str()?;
        match file_name.strip_suffix(self.file_suffix.as_str()) {
            Some(title) if !title.is_empty() => Some(title.to_owned()),
            _ => path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_owned),
        }
    }

    /// Joins `dir` with `title` plus the configured suffix.
    #[must_use]
    pub fn file_name_for(&self, dir: &Path, title: &str) -> std::path::PathBuf {
        dir.join(format!("{title}{}", self.file_suffix))
    }
}

/// Configures and validates [`CodecOptions`].
///
/// # Examples
/// ```
/// use spanwood_core::CodecOptionsBuilder;
///
/// let options = CodecOptionsBuilder::new()
///     .with_expected_schema(4)
///     .with_title_check(false)
///     .build()
///     .expect("options are valid");
/// assert_eq!(options.expected_schema(), 4);
/// assert!(!options.title_check());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CodecOptionsBuilder {
    options: CodecOptions,
}

impl CodecOptionsBuilder {
    /// Creates a builder populated with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the schema version.
    #[must_use]
    pub fn with_expected_schema(mut self, version: u32) -> Self {
        self.options.expected_schema = version;
        self
    }

    /// Overrides the file suffix.
    #[must_use]
    pub fn with_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.options.file_suffix = suffix.into();
        self
    }

    /// Enables or disables the title check.
    #[must_use]
    pub fn with_title_check(mut self, enabled: bool) -> Self {
        self.options.title_check = enabled;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`CodecError::InvalidOptions`] when the schema version is zero
    /// or the suffix is empty or contains a path separator or line break.
    pub fn build(self) -> Result<CodecOptions, CodecError> {
        if self.options.expected_schema == 0 {
            return Err(CodecError::InvalidOptions {
                reason: "schema version must be at least 1",
            });
        }
        let suffix = &self.options.file_suffix;
        if suffix.is_empty() {
            return Err(CodecError::InvalidOptions {
                reason: "file suffix must not be empty",
            });
        }
        if suffix.contains(['/', '\\', '\n', '\r']) {
            return Err(CodecError::InvalidOptions {
                reason: "file suffix must not contain path separators or line breaks",
            });
        }
        Ok(self.options)
    }
}
