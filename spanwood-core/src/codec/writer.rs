//! Rendering graphs as `.graph.mmd` text.

use std::fmt::Write as _;

use super::{CodecOptions, FENCE};
use crate::error::CodecError;
use crate::graph::{Edge, Graph, VertexId};
use crate::mst::MstState;

/// Selects which part of the graph a rendering shows.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RenderView {
    /// Every vertex followed by every edge.
    #[default]
    Graph,
    /// Vertex lines only.
    Vertices,
    /// Edge lines only.
    Edges,
    /// Every vertex followed by the cached spanning forest edges.
    Mst,
    /// Every vertex followed by the shortest-path tree of the current source.
    ShortestPaths,
}

/// Metadata written above the graph body.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DocumentHeader<'a> {
    pub title: &'a str,
    pub source: Option<VertexId>,
    pub state: MstState,
}

/// Renders the `graph` line plus the lines `view` selects.
///
/// `edges` supplies the edge lines for views that show edges; vertex lines
/// always come from `graph` in ascending id order.
pub(crate) fn render_body(
    graph: &Graph,
    view: RenderView,
    edges: &[Edge],
) -> Result<String, CodecError> {
    let mut out = String::new();
    write_body(&mut out, graph, view, edges)?;
    Ok(out)
}

/// Renders a complete document: metadata block then body.
pub(crate) fn render_document(
    header: &DocumentHeader<'_>,
    options: &CodecOptions,
    graph: &Graph,
) -> Result<String, CodecError> {
    validate_title(header.title)?;
    let mut out = String::new();
    let source = header.source.map_or(0, VertexId::get);
    writeln!(out, "{FENCE}").map_err(write_error)?;
    writeln!(out, "title: {}", header.title).map_err(write_error)?;
    writeln!(out, "zad: {}", options.expected_schema()).map_err(write_error)?;
    writeln!(out, "src: {source}").map_err(write_error)?;
    writeln!(out, "mst: {}", header.state).map_err(write_error)?;
    writeln!(out, "{FENCE}").map_err(write_error)?;
    write_body(&mut out, graph, RenderView::Graph, graph.edges())?;
    Ok(out)
}

/// Rejects titles that cannot round-trip through the `title` property.
pub(crate) fn validate_title(title: &str) -> Result<(), CodecError> {
    let reason = if title.trim().is_empty() {
        "title must not be blank"
    } else if title.contains(['\n', '\r']) {
        "title must fit on one line"
    } else if title.trim() != title {
        "title must not start or end with whitespace"
    } else {
        return Ok(());
    };
    Err(CodecError::InvalidTitle {
        title: title.to_owned(),
        reason,
    })
}

fn write_body(
    out: &mut String,
    graph: &Graph,
    view: RenderView,
    edges: &[Edge],
) -> Result<(), CodecError> {
    writeln!(out, "graph").map_err(write_error)?;
    if view != RenderView::Edges {
        for vertex in graph.vertices() {
            if vertex.name().contains(['\n', '\r']) {
                return Err(CodecError::MultilineName { id: vertex.id() });
            }
            writeln!(out, "{}(\"{}\")", vertex.id(), vertex.name()).map_err(write_error)?;
        }
    }
    if view != RenderView::Vertices {
        for edge in edges {
            writeln!(
                out,
                "{} ---|{}| {}",
                edge.source(),
                edge.weight(),
                edge.target()
            )
            .map_err(write_error)?;
        }
    }
    Ok(())
}

fn write_error(source: std::fmt::Error) -> CodecError {
    CodecError::Write { source }
}
