//! Graph facade that keeps spanning forest and shortest-path results in
//! step with the graph they were computed from.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::codec::{
    self, CodecOptions, DiagnosticKind, DocumentHeader, LoadReport, ParsedDocument, RenderView,
};
use crate::error::{CodecError, GraphError, Result, SpanwoodError};
use crate::graph::shortest_path::{ShortestPaths, shortest_paths};
use crate::graph::{Edge, Graph, Vertex, VertexId};
use crate::mst::{MinimumSpanningForest, MstCache, MstMethod, MstState};

/// A weighted undirected graph with cached spanning forest and shortest
/// paths.
///
/// Every mutation goes through one routing function that applies it to the
/// underlying [`Graph`] and, only if it succeeds, drops the cached forest
/// and shortest paths. A rejected mutation leaves graph and caches intact.
///
/// # Examples
/// ```
/// use spanwood_core::{MstGraph, MstMethod, MstState};
///
/// let mut graph = MstGraph::new();
/// let a = graph.add_vertex("A")?;
/// let b = graph.add_vertex("B")?;
/// let c = graph.add_vertex("C")?;
/// graph.add_edge(a, b, 1.0)?;
/// graph.add_edge(b, c, 2.0)?;
/// graph.add_edge(a, c, 3.0)?;
///
/// assert_eq!(graph.compute_mst(MstMethod::Kruskal).total_weight(), 3.0);
/// assert_eq!(graph.state(), MstState::Kruskal);
///
/// graph.set_edge_weight(a, c, 0.5)?;
/// assert_eq!(graph.state(), MstState::NotComputed);
/// # Ok::<(), spanwood_core::SpanwoodError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MstGraph {
    graph: Graph,
    cache: MstCache,
    source: Option<VertexId>,
    paths: Option<ShortestPaths>,
    title: Option<String>,
    options: CodecOptions,
}

impl MstGraph {
    /// Creates an empty graph with default codec options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing graph. Nothing is cached yet.
    #[must_use]
    pub fn from_graph(graph: Graph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    /// Replaces the codec options used by [`Self::save_named`] and
    /// [`Self::to_document`].
    #[must_use]
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the codec options.
    #[must_use]
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Returns the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the facade, returning the underlying graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Returns the `title` property read by the loader, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Adds a vertex with the lowest free id.
    ///
    /// # Errors
    /// Returns [`GraphError::IdSpaceExhausted`] wrapped in [`SpanwoodError`].
    pub fn add_vertex(&mut self, name: impl Into<String>) -> Result<VertexId> {
        let name = name.into();
        self.mutate(|graph| graph.add_vertex(name))
    }

    /// Adds a vertex with an explicit id.
    ///
    /// # Errors
    /// Fails when `id` is already in use.
    pub fn insert_vertex(&mut self, id: VertexId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.mutate(|graph| graph.insert_vertex(id, name))
    }

    /// Removes a vertex and its incident edges. Removing the shortest-path
    /// source also clears the source.
    ///
    /// # Errors
    /// Fails when `id` does not exist.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex> {
        let vertex = self.mutate(|graph| graph.remove_vertex(id))?;
        if self.source == Some(id) {
            warn!(source = %id, "shortest-path source removed");
            self.source = None;
        }
        Ok(vertex)
    }

    /// Removes every edge touching `id`, returning how many were removed.
    ///
    /// # Errors
    /// Fails when `id` does not exist.
    pub fn remove_incident_edges(&mut self, id: VertexId) -> Result<usize> {
        self.mutate(|graph| graph.remove_incident_edges(id))
    }

    /// Connects two vertices.
    ///
    /// # Errors
    /// Fails on unknown endpoints, self-loops, duplicate pairs and negative
    /// or non-finite weights.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, weight: f64) -> Result<()> {
        self.mutate(|graph| graph.add_edge(a, b, weight))
    }

    /// Disconnects two vertices, returning the removed edge.
    ///
    /// # Errors
    /// Fails when the pair is not connected.
    pub fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<Edge> {
        self.mutate(|graph| graph.remove_edge(a, b))
    }

    /// Changes the weight of an existing edge.
    ///
    /// # Errors
    /// Fails when the pair is not connected or the weight is invalid.
    pub fn set_edge_weight(&mut self, a: VertexId, b: VertexId, weight: f64) -> Result<()> {
        self.mutate(|graph| graph.set_edge_weight(a, b, weight))
    }

    fn mutate<T>(
        &mut self,
        operation: impl FnOnce(&mut Graph) -> core::result::Result<T, GraphError>,
    ) -> Result<T> {
        let value = operation(&mut self.graph)?;
        self.cache.invalidate();
        self.paths = None;
        Ok(value)
    }

    // ── Spanning forest ─────────────────────────────────────────────────

    /// Computes the spanning forest with `method`, reusing the cached result
    /// when it was produced by the same method since the last mutation.
    pub fn compute_mst(&mut self, method: MstMethod) -> &MinimumSpanningForest {
        self.cache.compute(method, &self.graph)
    }

    /// Returns the cached forest, if any.
    #[must_use]
    pub fn mst(&self) -> Option<&MinimumSpanningForest> {
        self.cache.forest()
    }

    /// Returns which method produced the cached forest.
    #[must_use]
    pub fn state(&self) -> MstState {
        self.cache.state()
    }

    /// Renders every vertex plus the cached forest edges.
    ///
    /// # Errors
    /// Returns [`SpanwoodError::MstNotComputed`] when nothing is cached, or a
    /// codec error when a vertex name cannot be written.
    pub fn render_mst(&self) -> Result<String> {
        let forest = self.cache.forest().ok_or(SpanwoodError::MstNotComputed)?;
        Ok(codec::render_body(
            &self.graph,
            RenderView::Mst,
            forest.edges(),
        )?)
    }

    /// Computes the forest with `method` if needed, then renders it.
    ///
    /// # Errors
    /// Fails when a vertex name cannot be written.
    pub fn render_mst_with(&mut self, method: MstMethod) -> Result<String> {
        self.compute_mst(method);
        self.render_mst()
    }

    /// Renders the body selected by `view`.
    ///
    /// # Errors
    /// [`RenderView::Mst`] fails like [`Self::render_mst`];
    /// [`RenderView::ShortestPaths`] fails with
    /// [`SpanwoodError::SourceNotSet`] when no source is set.
    pub fn render(&self, view: RenderView) -> Result<String> {
        match view {
            RenderView::Mst => self.render_mst(),
            RenderView::ShortestPaths => {
                let source = self.source.ok_or(SpanwoodError::SourceNotSet)?;
                let paths = match &self.paths {
                    Some(paths) => Cow::Borrowed(paths),
                    None => Cow::Owned(shortest_paths(&self.graph, source)?),
                };
                let edges = paths.tree_edges(&self.graph);
                Ok(codec::render_body(&self.graph, view, &edges)?)
            }
            RenderView::Graph | RenderView::Vertices | RenderView::Edges => Ok(
                codec::render_body(&self.graph, view, self.graph.edges())?,
            ),
        }
    }

    // ── Shortest paths ──────────────────────────────────────────────────

    /// Returns the shortest-path source, if one is set.
    #[must_use]
    pub fn source(&self) -> Option<VertexId> {
        self.source
    }

    /// Sets the shortest-path source and computes distances from it.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] and keeps the previous source
    /// when `source` does not exist.
    pub fn set_source(&mut self, source: VertexId) -> Result<&ShortestPaths> {
        let computed = shortest_paths(&self.graph, source)?;
        self.source = Some(source);
        Ok(self.paths.insert(computed))
    }

    /// Clears the shortest-path source and its results.
    pub fn clear_source(&mut self) {
        self.source = None;
        self.paths = None;
    }

    /// Returns shortest paths from the current source, recomputing them when
    /// a mutation has invalidated the previous result.
    ///
    /// # Errors
    /// Returns [`SpanwoodError::SourceNotSet`] when no source is set.
    pub fn shortest_paths(&mut self) -> Result<&ShortestPaths> {
        let source = self.source.ok_or(SpanwoodError::SourceNotSet)?;
        let paths = match self.paths.take() {
            Some(paths) => paths,
            None => shortest_paths(&self.graph, source)?,
        };
        Ok(self.paths.insert(paths))
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Loads a `.graph.mmd` file with default options.
    ///
    /// # Errors
    /// Returns [`CodecError::Io`] when the file cannot be read. Problems in
    /// the file's content are reported in the [`LoadReport`] instead.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, LoadReport)> {
        Self::load_with(path, CodecOptions::default())
    }

    /// Loads a `.graph.mmd` file with explicit options.
    ///
    /// # Errors
    /// Returns [`CodecError::Io`] when the file cannot be read and
    /// [`CodecError::Encoding`] when it is neither UTF-8 nor UTF-16 with a
    /// byte order mark.
    #[instrument(name = "codec.load", err, skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_with(path: impl AsRef<Path>, options: CodecOptions) -> Result<(Self, LoadReport)> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = codec::decode_document(&bytes).map_err(|encoding| CodecError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?;
        let expected_title = options.title_for_path(path);
        let document = codec::parse_document(&text, expected_title.as_deref(), &options);
        Ok(Self::from_document(document, options))
    }

    /// Parses document text. The title is not checked because there is no
    /// file name to compare it with.
    #[must_use]
    pub fn parse_str(text: &str, options: CodecOptions) -> (Self, LoadReport) {
        let document = codec::parse_document(text, None, &options);
        Self::from_document(document, options)
    }

    fn from_document(document: ParsedDocument, options: CodecOptions) -> (Self, LoadReport) {
        let ParsedDocument {
            graph,
            title,
            source,
            method,
            mut report,
        } = document;
        let mut loaded = Self {
            graph,
            title,
            options,
            ..Self::default()
        };

        if let Some(id) = source {
            if let Err(error) = loaded.set_source(id) {
                debug!(%error, "deferred source not applied");
                report.record(None, DiagnosticKind::UnknownSource { id }, "");
            }
        }
        if let Some(method) = method {
            loaded.compute_mst(method);
        }

        info!(
            vertices = loaded.graph.vertex_count(),
            edges = loaded.graph.edge_count(),
            state = %loaded.state(),
            diagnostics = report.diagnostics().len(),
            "graph loaded"
        );
        (loaded, report)
    }

    /// Renders the whole graph as a document titled `title`.
    ///
    /// # Errors
    /// Fails when the title or a vertex name cannot be written.
    pub fn to_document(&self, title: &str) -> Result<String> {
        let header = DocumentHeader {
            title,
            source: self.source,
            state: self.state(),
        };
        Ok(codec::render_document(&header, &self.options, &self.graph)?)
    }

    /// Writes the document to `path`, replacing any existing file.
    ///
    /// # Errors
    /// Fails when rendering fails or the file cannot be written.
    #[instrument(name = "codec.save", err, skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>, title: &str) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_document(title)?;
        fs::write(path, text).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("graph saved");
        Ok(())
    }

    /// Writes the document to `dir/<title><suffix>` and returns that path.
    ///
    /// # Errors
    /// Fails when `title` contains a path separator, or as [`Self::save`].
    pub fn save_named(&self, dir: impl AsRef<Path>, title: &str) -> Result<PathBuf> {
        codec::validate_title(title)?;
        if title.contains(['/', '\\']) || title == "." || title == ".." {
            return Err(CodecError::InvalidTitle {
                title: title.to_owned(),
                reason: "title must be usable as a file name",
            }
            .into());
        }
        let path = self.options.file_name_for(dir.as_ref(), title);
        self.save(&path, title)?;
        Ok(path)
    }
}
