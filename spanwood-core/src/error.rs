//! Error types for the spanwood core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.
//! Line-level problems found while reading a graph file are not errors; they
//! are collected as [`crate::Diagnostic`] values instead.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::graph::VertexId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( ( $($tuple:tt)* ) )? $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( ( $($tuple)* ) )? $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::Graph`] mutations and lookups.
///
/// A failed operation never leaves the graph partially modified.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// The operation referenced a vertex that does not exist.
    #[error("vertex {id} does not exist")]
    UnknownVertex {
        /// The missing vertex id.
        id: VertexId,
    },
    /// A vertex with the requested id already exists.
    #[error("vertex {id} already exists")]
    DuplicateVertex {
        /// The id that is already taken.
        id: VertexId,
    },
    /// An edge already connects the two vertices.
    #[error("an edge between {left} and {right} already exists")]
    DuplicateEdge {
        /// Smaller endpoint of the existing edge.
        left: VertexId,
        /// Larger endpoint of the existing edge.
        right: VertexId,
    },
    /// No edge connects the two vertices.
    #[error("no edge between {left} and {right}")]
    MissingEdge {
        /// Smaller endpoint of the requested edge.
        left: VertexId,
        /// Larger endpoint of the requested edge.
        right: VertexId,
    },
    /// Both endpoints of the edge are the same vertex.
    #[error("self-loop on vertex {id} is not allowed")]
    SelfLoop {
        /// The vertex used as both endpoints.
        id: VertexId,
    },
    /// The weight is negative, NaN or infinite.
    #[error("edge ({left}, {right}) has invalid weight {weight}")]
    InvalidWeight {
        /// Smaller endpoint of the edge.
        left: VertexId,
        /// Larger endpoint of the edge.
        right: VertexId,
        /// The rejected weight.
        weight: f64,
    },
    /// Every representable vertex id is already in use.
    #[error("vertex id space exhausted")]
    IdSpaceExhausted,
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The operation referenced a vertex that does not exist.
        UnknownVertex => UnknownVertex { .. } => "GRAPH_UNKNOWN_VERTEX",
        /// A vertex with the requested id already exists.
        DuplicateVertex => DuplicateVertex { .. } => "GRAPH_DUPLICATE_VERTEX",
        /// An edge already connects the two vertices.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
        /// No edge connects the two vertices.
        MissingEdge => MissingEdge { .. } => "GRAPH_MISSING_EDGE",
        /// Both endpoints of the edge are the same vertex.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// The weight is negative, NaN or infinite.
        InvalidWeight => InvalidWeight { .. } => "GRAPH_INVALID_WEIGHT",
        /// Every representable vertex id is already in use.
        IdSpaceExhausted => IdSpaceExhausted => "GRAPH_ID_SPACE_EXHAUSTED",
    }
}

/// An error produced while reading or writing the `.graph.mmd` format.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CodecError {
    /// Opening, reading or writing a file failed.
    #[error("i/o failure on `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The file is neither UTF-8 nor UTF-16 with a byte order mark.
    #[error("`{path}` is not valid {encoding} text")]
    Encoding {
        /// File that was read.
        path: PathBuf,
        /// Encoding selected from the byte order mark, or UTF-8 without one.
        encoding: &'static str,
    },
    /// Formatting the document text failed.
    #[error("failed to format graph document")]
    Write {
        /// Underlying formatter error.
        #[source]
        source: fmt::Error,
    },
    /// A vertex name contains a line break and cannot be written on one line.
    #[error("vertex {id} has a name containing a line break")]
    MultilineName {
        /// The vertex whose name cannot be represented.
        id: VertexId,
    },
    /// The title is empty, spans several lines, or cannot name a file.
    #[error("title `{title}` cannot be written: {reason}")]
    InvalidTitle {
        /// The rejected title.
        title: String,
        /// Why the title was rejected.
        reason: &'static str,
    },
    /// The codec options failed validation.
    #[error("invalid codec options: {reason}")]
    InvalidOptions {
        /// Human readable reason for the rejection.
        reason: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`CodecError`] variants.
    enum CodecErrorCode for CodecError {
        /// Opening, reading or writing a file failed.
        Io => Io { .. } => "CODEC_IO",
        /// The file could not be decoded.
        Encoding => Encoding { .. } => "CODEC_ENCODING",
        /// Formatting the document text failed.
        Write => Write { .. } => "CODEC_WRITE",
        /// A vertex name contains a line break.
        MultilineName => MultilineName { .. } => "CODEC_MULTILINE_NAME",
        /// The title cannot be written.
        InvalidTitle => InvalidTitle { .. } => "CODEC_INVALID_TITLE",
        /// The codec options failed validation.
        InvalidOptions => InvalidOptions { .. } => "CODEC_INVALID_OPTIONS",
    }
}

/// Error type produced by [`crate::MstGraph`] operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SpanwoodError {
    /// A graph mutation or lookup failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Loading or saving a document failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// An MST rendering was requested before any MST was computed.
    #[error("minimum spanning tree not computed; call compute_mst first")]
    MstNotComputed,
    /// A shortest-path rendering was requested without a source vertex.
    #[error("no shortest-path source set; call set_source first")]
    SourceNotSet,
}

define_error_codes! {
    /// Stable codes describing [`SpanwoodError`] variants.
    enum SpanwoodErrorCode for SpanwoodError {
        /// A graph mutation or lookup failed.
        Graph => Graph(..) => "SPANWOOD_GRAPH",
        /// Loading or saving a document failed.
        Codec => Codec(..) => "SPANWOOD_CODEC",
        /// An MST rendering was requested before any MST was computed.
        MstNotComputed => MstNotComputed => "SPANWOOD_MST_NOT_COMPUTED",
        /// A shortest-path rendering was requested without a source vertex.
        SourceNotSet => SourceNotSet => "SPANWOOD_SOURCE_NOT_SET",
    }
}

impl SpanwoodError {
    /// Retrieve the inner [`GraphErrorCode`] when the error originated in the graph.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`CodecErrorCode`] when the error originated in the codec.
    #[must_use]
    pub const fn codec_code(&self) -> Option<CodecErrorCode> {
        match self {
            Self::Codec(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SpanwoodError>;
