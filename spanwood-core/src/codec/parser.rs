//! Line-oriented state machine that turns document text into a [`Graph`].

use tracing::{debug, instrument};

use super::diagnostics::{DiagnosticKind, LoadReport};
use super::lines::{
    EdgeLine, VertexLine, looks_like_edge, looks_like_vertex, match_edge, match_property,
    match_vertex,
};
use super::{COMMENT_MARKER, CodecOptions, FENCE};
use crate::graph::{Graph, VertexId};
use crate::mst::{MstMethod, MstState};

/// Section of the document the parser is currently in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stage {
    Start,
    Metadata,
    GraphHeader,
    Vertices,
    Edges,
}

/// Everything read from one document.
///
/// The source and method are deferred: they are applied only after the
/// whole graph has been populated.
#[derive(Debug, Default)]
pub(crate) struct ParsedDocument {
    pub graph: Graph,
    pub title: Option<String>,
    pub source: Option<VertexId>,
    pub method: Option<MstMethod>,
    pub report: LoadReport,
}

/// Parses `text`.
///
/// `expected_title` is compared with the `title` property when present.
/// Parsing never fails; end of input in any section ends it successfully.
#[instrument(name = "codec.parse", skip_all, fields(bytes = text.len()))]
pub(crate) fn parse_document(
    text: &str,
    expected_title: Option<&str>,
    options: &CodecOptions,
) -> ParsedDocument {
    let mut parser = Parser {
        stage: Stage::Start,
        expected_title,
        options,
        document: ParsedDocument::default(),
    };

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        parser.dispatch(index + 1, line);
    }

    let document = parser.document;
    debug!(
        vertices = document.graph.vertex_count(),
        edges = document.graph.edge_count(),
        diagnostics = document.report.diagnostics().len(),
        "document parsed"
    );
    document
}

struct Parser<'a> {
    stage: Stage,
    expected_title: Option<&'a str>,
    options: &'a CodecOptions,
    document: ParsedDocument,
}

impl Parser<'_> {
    fn dispatch(&mut self, number: usize, line: &str) {
        match self.stage {
            Stage::Start => self.start(number, line),
            Stage::Metadata => self.metadata(number, line),
            Stage::GraphHeader => self.graph_header(number, line),
            Stage::Vertices => self.vertices(number, line),
            Stage::Edges => self.edges(number, line),
        }
    }

    fn report(&mut self, number: usize, kind: DiagnosticKind, line: &str) {
        self.document.report.record(Some(number), kind, line);
    }

    fn start(&mut self, number: usize, line: &str) {
        if is_comment(line) {
            return;
        }
        if line == FENCE {
            self.stage = Stage::Metadata;
        } else {
            self.report(number, DiagnosticKind::UnrecognizedLine, line);
        }
    }

    fn metadata(&mut self, number: usize, line: &str) {
        if line.starts_with('#') {
            return;
        }
        if line == FENCE {
            self.stage = Stage::GraphHeader;
            return;
        }
        let Some(property) = match_property(line) else {
            self.report(number, DiagnosticKind::MalformedLine, line);
            return;
        };
        let value = property.value.trim();
        match property.key {
            "title" => self.title(number, line, value),
            "zad" | "schemaVersion" => self.schema(number, line, property.key, value),
            "src" => match value.parse::<u32>() {
                Ok(0) => self.document.source = None,
                Ok(raw) => self.document.source = Some(VertexId::new(raw)),
                Err(_) => self.malformed_property(number, line, property.key),
            },
            "mst" => match value.parse::<MstState>() {
                Ok(state) => self.document.method = state.method(),
                Err(_) => self.malformed_property(number, line, property.key),
            },
            other => {
                let kind = DiagnosticKind::UnknownProperty {
                    key: other.to_owned(),
                };
                self.report(number, kind, line);
            }
        }
    }

    fn title(&mut self, number: usize, line: &str, value: &str) {
        self.document.title = Some(value.to_owned());
        if !self.options.title_check() {
            return;
        }
        if let Some(expected) = self.expected_title
            && expected != value
        {
            let kind = DiagnosticKind::TitleMismatch {
                found: value.to_owned(),
                expected: expected.to_owned(),
            };
            self.report(number, kind, line);
        }
    }

    fn schema(&mut self, number: usize, line: &str, key: &str, value: &str) {
        let Ok(found) = value.parse::<u32>() else {
            self.malformed_property(number, line, key);
            return;
        };
        let expected = self.options.expected_schema();
        if found < expected {
            self.report(number, DiagnosticKind::OutdatedSchema { found, expected }, line);
        } else if found > expected {
            self.report(number, DiagnosticKind::NewerSchema { found, expected }, line);
        }
    }

    fn malformed_property(&mut self, number: usize, line: &str, key: &str) {
        let kind = DiagnosticKind::MalformedProperty {
            key: key.to_owned(),
        };
        self.report(number, kind, line);
    }

    fn graph_header(&mut self, number: usize, line: &str) {
        if is_comment(line) {
            return;
        }
        if line.starts_with("graph") {
            self.stage = Stage::Vertices;
        } else {
            self.report(number, DiagnosticKind::UnrecognizedLine, line);
        }
    }

    fn vertices(&mut self, number: usize, line: &str) {
        if is_comment(line) {
            return;
        }
        if looks_like_edge(line) {
            self.stage = Stage::Edges;
            self.edges(number, line);
            return;
        }
        match match_vertex(line) {
            Some(vertex) => self.apply_vertex(number, line, &vertex),
            None => self.report(number, DiagnosticKind::MalformedLine, line),
        }
    }

    fn edges(&mut self, number: usize, line: &str) {
        if is_comment(line) {
            return;
        }
        if looks_like_vertex(line) {
            self.report(number, DiagnosticKind::VertexAfterEdges, line);
            match match_vertex(line) {
                Some(vertex) => self.apply_vertex(number, line, &vertex),
                None => self.report(number, DiagnosticKind::MalformedLine, line),
            }
            return;
        }
        match match_edge(line) {
            Some(edge) => self.apply_edge(number, line, &edge),
            None => self.report(number, DiagnosticKind::MalformedLine, line),
        }
    }

    fn apply_vertex(&mut self, number: usize, line: &str, vertex: &VertexLine<'_>) {
        if let Err(error) = self.document.graph.insert_vertex(vertex.id, vertex.name) {
            self.report(number, DiagnosticKind::Rejected(error), line);
        }
    }

    fn apply_edge(&mut self, number: usize, line: &str, edge: &EdgeLine) {
        if let Err(error) = self
            .document
            .graph
            .add_edge(edge.left, edge.right, edge.weight)
        {
            self.report(number, DiagnosticKind::Rejected(error), line);
        }
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER)
}
