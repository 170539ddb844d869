//! Command implementations and argument parsing for the spanwood CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use spanwood_core::{
    CodecOptions, DEFAULT_FILE_SUFFIX, Diagnostic, Graph, LoadReport, MstGraph, MstMethod,
    MstState, Severity, SpanwoodError, VertexId,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

const FALLBACK_TITLE: &str = "graph";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "spanwood",
    about = "Compute minimum spanning trees over .graph.mmd files."
)]
pub struct Cli {
    /// Options shared by every command.
    #[command(flatten)]
    pub codec: CodecArgs,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Document format options accepted by every command.
#[derive(Debug, Args, Clone)]
pub struct CodecArgs {
    /// File name suffix of graph documents.
    #[arg(long, global = true, default_value = DEFAULT_FILE_SUFFIX)]
    pub suffix: String,

    /// Do not compare the `title` property with the file name.
    #[arg(long, global = true)]
    pub no_title_check: bool,
}

impl Default for CodecArgs {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_FILE_SUFFIX.to_owned(),
            no_title_check: false,
        }
    }
}

impl CodecArgs {
    fn options(&self) -> Result<CodecOptions, CliError> {
        CodecOptions::builder()
            .with_file_suffix(self.suffix.as_str())
            .with_title_check(!self.no_title_check)
            .build()
            .map_err(|err| CliError::Core(err.into()))
    }
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute and print the minimum spanning tree of a graph file.
    Mst(MstArgs),
    /// Report what a graph file contains and every problem found reading it.
    Inspect(InspectArgs),
    /// Save a graph file under a new title, optionally reduced to its
    /// spanning forest.
    Convert(ConvertArgs),
}

/// Options accepted by the `mst` command.
#[derive(Debug, Args, Clone)]
pub struct MstArgs {
    /// Graph document to read.
    pub path: PathBuf,

    /// Solver to use. Defaults to the file's `mst` property, then Kruskal.
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// Fail when the file contains malformed lines.
    #[arg(long)]
    pub strict: bool,
}

/// Options accepted by the `inspect` command.
#[derive(Debug, Args, Clone)]
pub struct InspectArgs {
    /// Graph document to read.
    pub path: PathBuf,
}

/// Options accepted by the `convert` command.
#[derive(Debug, Args, Clone)]
pub struct ConvertArgs {
    /// Graph document to read.
    pub path: PathBuf,

    /// Directory receiving `<title><suffix>`.
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Title of the written document. Defaults to the source title.
    #[arg(long)]
    pub title: Option<String>,

    /// Compute the spanning forest with this solver before saving.
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// Keep only the spanning forest edges.
    #[arg(long)]
    pub mst_only: bool,

    /// Fail when the file contains malformed lines.
    #[arg(long)]
    pub strict: bool,
}

/// Solver names accepted on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum MethodArg {
    /// Kruskal's edge-sorting algorithm.
    Kruskal,
    /// Prim's vertex-growth algorithm.
    Prim,
}

impl From<MethodArg> for MstMethod {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Kruskal => Self::Kruskal,
            MethodArg::Prim => Self::Prim,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// `--strict` was given and the file contained malformed lines.
    #[error("`{path}` contains {errors} malformed line(s)")]
    Rejected {
        /// File that was read.
        path: PathBuf,
        /// Number of error-severity diagnostics.
        errors: usize,
    },
    /// A graph, codec or cache operation failed.
    #[error(transparent)]
    Core(#[from] SpanwoodError),
}

/// Outcome of a CLI command, ready for [`render_summary`].
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Result of `mst`.
    Mst(MstSummary),
    /// Result of `inspect`.
    Inspect(InspectSummary),
    /// Result of `convert`.
    Convert(ConvertSummary),
}

/// Spanning forest computed by `mst`.
#[derive(Debug, Clone)]
pub struct MstSummary {
    /// Title of the graph.
    pub title: String,
    /// Solver that produced the forest.
    pub method: MstMethod,
    /// Sum of the forest's edge weights.
    pub total_weight: f64,
    /// Number of forest edges.
    pub edge_count: usize,
    /// Number of trees in the forest.
    pub component_count: usize,
    /// Vertex lines followed by the forest's edge lines.
    pub rendering: String,
}

/// Contents of a graph file as reported by `inspect`.
#[derive(Debug, Clone)]
pub struct InspectSummary {
    /// `title` property, if the file had one.
    pub title: Option<String>,
    /// Number of vertices loaded.
    pub vertices: usize,
    /// Number of edges loaded.
    pub edges: usize,
    /// Cache state after applying the file's `mst` property.
    pub state: MstState,
    /// Shortest-path source, if one was applied.
    pub source: Option<VertexId>,
    /// Every problem found while reading.
    pub diagnostics: Vec<Diagnostic>,
}

/// File written by `convert`.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    /// Path of the new document.
    pub path: PathBuf,
    /// Title written into the document.
    pub title: String,
    /// Number of vertices written.
    pub vertices: usize,
    /// Number of edges written.
    pub edges: usize,
    /// `mst` property written into the document.
    pub state: MstState,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the options are invalid, the file cannot be
/// read or written, or `--strict` rejects it.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use spanwood_cli::cli::{Cli, CodecArgs, Command, ExecutionSummary, MstArgs, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let path = dir.path().join("pair.graph.mmd");
/// std::fs::write(&path, "---\ntitle: pair\n---\ngraph\n0(\"A\")\n1(\"B\")\n0 ---|2.5| 1\n")?;
/// let cli = Cli {
///     codec: CodecArgs::default(),
///     command: Command::Mst(MstArgs { path, method: None, strict: true }),
/// };
/// let ExecutionSummary::Mst(summary) = run_cli(cli)? else {
///     unreachable!("mst yields an mst summary");
/// };
/// assert_eq!(summary.total_weight, 2.5);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let options = cli.codec.options()?;
    let span = Span::current();
    match cli.command {
        Command::Mst(args) => {
            span.record("command", field::display("mst"));
            run_mst(args, options).map(ExecutionSummary::Mst)
        }
        Command::Inspect(args) => {
            span.record("command", field::display("inspect"));
            run_inspect(&args, options).map(ExecutionSummary::Inspect)
        }
        Command::Convert(args) => {
            span.record("command", field::display("convert"));
            run_convert(args, options).map(ExecutionSummary::Convert)
        }
    }
}

#[instrument(
    name = "cli.mst",
    err,
    skip_all,
    fields(path = %args.path.display(), method = field::Empty),
)]
pub(super) fn run_mst(args: MstArgs, options: CodecOptions) -> Result<MstSummary, CliError> {
    let MstArgs {
        path,
        method,
        strict,
    } = args;
    let (mut graph, _report) = load_graph(&path, options, strict)?;
    let method = resolve_method(method, &graph);
    Span::current().record("method", field::display(method));

    let rendering = graph.render_mst_with(method)?;
    let forest = graph.mst().ok_or(SpanwoodError::MstNotComputed)?;
    let summary = MstSummary {
        title: document_title(&graph, &path, None),
        method,
        total_weight: forest.total_weight(),
        edge_count: forest.edges().len(),
        component_count: forest.component_count(),
        rendering,
    };

    if summary.component_count > 1 {
        warn!(
            components = summary.component_count,
            "graph is disconnected; printing a spanning forest"
        );
    }
    info!(
        title = summary.title.as_str(),
        edges = summary.edge_count,
        total_weight = summary.total_weight,
        "mst computed"
    );
    Ok(summary)
}

#[instrument(name = "cli.inspect", err, skip_all, fields(path = %args.path.display()))]
pub(super) fn run_inspect(
    args: &InspectArgs,
    options: CodecOptions,
) -> Result<InspectSummary, CliError> {
    let (graph, report) = load_graph(&args.path, options, false)?;
    Ok(InspectSummary {
        title: graph.title().map(str::to_owned),
        vertices: graph.graph().vertex_count(),
        edges: graph.graph().edge_count(),
        state: graph.state(),
        source: graph.source(),
        diagnostics: report.diagnostics().to_vec(),
    })
}

#[instrument(
    name = "cli.convert",
    err,
    skip_all,
    fields(path = %args.path.display(), mst_only = args.mst_only, written = field::Empty),
)]
pub(super) fn run_convert(
    args: ConvertArgs,
    options: CodecOptions,
) -> Result<ConvertSummary, CliError> {
    let ConvertArgs {
        path,
        out_dir,
        title,
        method,
        mst_only,
        strict,
    } = args;
    let (mut graph, _report) = load_graph(&path, options, strict)?;
    let title = document_title(&graph, &path, title);

    let output = if mst_only {
        let method = resolve_method(method, &graph);
        forest_only(&mut graph, method)?
    } else {
        if let Some(method) = method {
            graph.compute_mst(method.into());
        }
        graph
    };

    let written = output.save_named(&out_dir, &title)?;
    Span::current().record("written", field::display(written.display()));
    info!(title = title.as_str(), "graph converted");
    Ok(ConvertSummary {
        path: written,
        title,
        vertices: output.graph().vertex_count(),
        edges: output.graph().edge_count(),
        state: output.state(),
    })
}

#[instrument(
    name = "cli.load",
    err,
    skip(path, options),
    fields(path = %path.display(), diagnostics = field::Empty),
)]
pub(super) fn load_graph(
    path: &Path,
    options: CodecOptions,
    strict: bool,
) -> Result<(MstGraph, LoadReport), CliError> {
    let (graph, report) = MstGraph::load_with(path, options)?;
    Span::current().record("diagnostics", report.diagnostics().len());
    if strict && report.has_errors() {
        return Err(CliError::Rejected {
            path: path.to_path_buf(),
            errors: report.with_severity(Severity::Error).count(),
        });
    }
    Ok((graph, report))
}

/// Picks the solver: explicit flag, then the file's `mst` property, then
/// Kruskal.
pub(super) fn resolve_method(flag: Option<MethodArg>, graph: &MstGraph) -> MstMethod {
    flag.map(MstMethod::from)
        .or_else(|| graph.state().method())
        .unwrap_or(MstMethod::Kruskal)
}

/// Picks the title: explicit override, then the `title` property, then the
/// file name.
pub(super) fn document_title(graph: &MstGraph, path: &Path, override_title: Option<String>) -> String {
    override_title
        .or_else(|| graph.title().map(str::to_owned))
        .or_else(|| graph.options().title_for_path(path))
        .unwrap_or_else(|| FALLBACK_TITLE.to_owned())
}

/// Builds a graph holding every vertex of `graph` but only its spanning
/// forest edges. The source and method carry over.
fn forest_only(graph: &mut MstGraph, method: MstMethod) -> spanwood_core::Result<MstGraph> {
    let forest = graph.compute_mst(method).clone();
    let mut reduced = Graph::new();
    for vertex in graph.graph().vertices() {
        reduced.insert_vertex(vertex.id(), vertex.name())?;
    }
    for edge in forest.edges() {
        reduced.add_edge(edge.source(), edge.target(), edge.weight())?;
    }

    let mut output = MstGraph::from_graph(reduced).with_options(graph.options().clone());
    if let Some(source) = graph.source() {
        output.set_source(source)?;
    }
    output.compute_mst(method);
    Ok(output)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Mst(mst) => {
            writeln!(writer, "title: {}", mst.title)?;
            writeln!(writer, "method: {}", mst.method)?;
            writeln!(writer, "total weight: {}", mst.total_weight)?;
            writeln!(writer, "edges: {}", mst.edge_count)?;
            writeln!(writer, "components: {}", mst.component_count)?;
            writer.write_all(mst.rendering.as_bytes())?;
        }
        ExecutionSummary::Inspect(inspect) => {
            writeln!(
                writer,
                "title: {}",
                inspect.title.as_deref().unwrap_or("<none>")
            )?;
            writeln!(writer, "vertices: {}", inspect.vertices)?;
            writeln!(writer, "edges: {}", inspect.edges)?;
            writeln!(writer, "mst: {}", inspect.state)?;
            match inspect.source {
                Some(source) => writeln!(writer, "source: {source}")?,
                None => writeln!(writer, "source: <none>")?,
            }
            writeln!(writer, "diagnostics: {}", inspect.diagnostics.len())?;
            for diagnostic in &inspect.diagnostics {
                writeln!(writer, "  {diagnostic}")?;
            }
        }
        ExecutionSummary::Convert(convert) => {
            writeln!(writer, "wrote: {}", convert.path.display())?;
            writeln!(writer, "title: {}", convert.title)?;
            writeln!(writer, "vertices: {}", convert.vertices)?;
            writeln!(writer, "edges: {}", convert.edges)?;
            writeln!(writer, "mst: {}", convert.state)?;
        }
    }
    Ok(())
}
