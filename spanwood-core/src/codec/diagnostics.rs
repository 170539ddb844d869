//! Non-fatal problems found while loading a document.

use std::fmt;

use tracing::{error, info, warn};

use crate::error::GraphError;
use crate::graph::VertexId;

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    /// Informational; the line was ignored on purpose.
    Info,
    /// The line was applied or skipped, but the document drifts from the
    /// expected shape.
    Warning,
    /// The line could not be applied.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// The problem a [`Diagnostic`] describes.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticKind {
    /// A line that is not valid in the current section.
    UnrecognizedLine,
    /// A vertex or edge line that does not match its pattern.
    MalformedLine,
    /// A known metadata key with an unusable value.
    MalformedProperty {
        /// The metadata key.
        key: String,
    },
    /// A metadata key the loader does not understand.
    UnknownProperty {
        /// The metadata key.
        key: String,
    },
    /// The document declares an older schema version.
    OutdatedSchema {
        /// Version found in the document.
        found: u32,
        /// Version the loader expects.
        expected: u32,
    },
    /// The document declares a newer schema version.
    NewerSchema {
        /// Version found in the document.
        found: u32,
        /// Version the loader expects.
        expected: u32,
    },
    /// The `title` property does not match the file name.
    TitleMismatch {
        /// Title found in the document.
        found: String,
        /// Title derived from the file name.
        expected: String,
    },
    /// A vertex line appeared after the first edge line. It was applied.
    VertexAfterEdges,
    /// The graph refused the vertex or edge on this line.
    Rejected(GraphError),
    /// The `src` property names a vertex that does not exist.
    UnknownSource {
        /// The requested source.
        id: VertexId,
    },
}

impl DiagnosticKind {
    /// Returns the severity used for logging and reporting.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnknownProperty { .. } => Severity::Info,
            Self::OutdatedSchema { .. }
            | Self::NewerSchema { .. }
            | Self::TitleMismatch { .. }
            | Self::VertexAfterEdges
            | Self::Rejected(_)
            | Self::UnknownSource { .. } => Severity::Warning,
            Self::UnrecognizedLine | Self::MalformedLine | Self::MalformedProperty { .. } => {
                Severity::Error
            }
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedLine => f.write_str("line not valid in this section"),
            Self::MalformedLine => f.write_str("malformed vertex or edge line"),
            Self::MalformedProperty { key } => write!(f, "malformed value for `{key}`"),
            Self::UnknownProperty { key } => write!(f, "unknown property `{key}` ignored"),
            Self::OutdatedSchema { found, expected } => {
                write!(f, "format outdated: schema {found}, expected {expected}")
            }
            Self::NewerSchema { found, expected } => {
                write!(f, "newer format detected: schema {found}, expected {expected}")
            }
            Self::TitleMismatch { found, expected } => {
                write!(f, "title `{found}` does not match file name `{expected}`")
            }
            Self::VertexAfterEdges => f.write_str("vertex declared after edges"),
            Self::Rejected(error) => write!(f, "line rejected: {error}"),
            Self::UnknownSource { id } => write!(f, "source vertex {id} does not exist"),
        }
    }
}

/// One problem found while loading, tied to the line that caused it.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    line_number: Option<usize>,
    kind: DiagnosticKind,
    line: String,
}

impl Diagnostic {
    /// One-based line number, or `None` for problems found after parsing.
    #[must_use]
    #[rustfmt::skip]
    pub fn line_number(&self) -> Option<usize> { self.line_number }

    /// What went wrong.
    #[must_use]
    #[rustfmt::skip]
    pub fn kind(&self) -> &DiagnosticKind { &self.kind }

    /// The offending line after trimming, or an empty string.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Shorthand for `self.kind().severity()`.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_number {
            Some(number) => write!(f, "line {number}: {}: {}", self.severity(), self.kind)?,
            None => write!(f, "{}: {}", self.severity(), self.kind)?,
        }
        if !self.line.is_empty() {
            write!(f, " (`{}`)", self.line)?;
        }
        Ok(())
    }
}

/// Every diagnostic produced by one load, in the order found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    /// Returns all diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` when nothing was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns `true` when at least one line could not be applied.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity() == Severity::Error)
    }

    /// Iterates over diagnostics at `severity`.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.severity() == severity)
    }

    /// Records and logs a diagnostic.
    pub(crate) fn record(&mut self, line_number: Option<usize>, kind: DiagnosticKind, line: &str) {
        match kind.severity() {
            Severity::Info => info!(line = line_number, %kind, "graph file note"),
            Severity::Warning => warn!(line = line_number, %kind, "graph file warning"),
            Severity::Error => error!(line = line_number, %kind, text = line, "graph file error"),
        }
        self.diagnostics.push(Diagnostic {
            line_number,
            kind,
            line: line.to_owned(),
        });
    }
}
