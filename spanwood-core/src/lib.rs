//! Spanwood core library.
//!
//! Minimum spanning trees over weighted undirected graphs, computed with
//! Kruskal's or Prim's algorithm, plus a line-oriented `.graph.mmd` text
//! format for saving and restoring graphs together with their cached
//! results.
//!
//! [`MstGraph`] is the main entry point. It wraps a [`Graph`], caches the
//! last spanning forest and shortest-path result, and drops both whenever
//! the graph changes.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
mod error;
mod graph;
mod mst;
mod mst_graph;

#[cfg(test)]
mod test_utils;

pub use crate::{
    codec::{
        COMMENT_MARKER, CodecOptions, CodecOptionsBuilder, DEFAULT_FILE_SUFFIX, Diagnostic,
        DiagnosticKind, FENCE, LoadReport, RenderView, SCHEMA_VERSION, Severity,
    },
    error::{
        CodecError, CodecErrorCode, GraphError, GraphErrorCode, Result, SpanwoodError,
        SpanwoodErrorCode,
    },
    graph::{
        Edge, Graph, Vertex, VertexId,
        shortest_path::{ShortestPaths, shortest_paths},
    },
    mst::{
        MinimumSpanningForest, MstCache, MstMethod, MstState, ParseMethodError, kruskal, prim,
        solve,
    },
    mst_graph::MstGraph,
};
