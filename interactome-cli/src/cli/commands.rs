//! Command implementations and argument parsing for the interactome CLI.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use interactome_core::{
    AnalysisBuilder, AnalysisError, CentralityKind, DegreeConvention, EmpiricalReference, Graph,
    RewireConfig, SelfDistance, SmallWorldError, SmallWorldGenerator, SweepPlan, run_sweep,
};
use interactome_providers_mitab::{GeneSubset, InteractionSource, MitabError};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

use super::report;

const DEFAULT_SEED: u64 = 88;
const DEFAULT_LATTICE_VERTICES: usize = 20;
const DEFAULT_LATTICE_DEGREE: usize = 6;
const DEFAULT_REWIRE_PROPORTION: f64 = 0.2;
const DEFAULT_SWEEP_STEP: f64 = 0.1;
const DEFAULT_MAX_ATTEMPTS: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(bound) => bound,
    None => NonZeroUsize::MIN,
};

const DISTANCES_FILE: &str = "distances.txt";
const COMPONENTS_FILE: &str = "components.txt";
const GRAPHML_FILE: &str = "network.graphml";
const SUMMARY_FILE: &str = "summary.json";
const PATH_LENGTH_CSV: &str = "l_v_p.csv";
const SCALED_CSV: &str = "cln_v_ncp.csv";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "interactome",
    about = "Analyse gene interaction networks and compare them with small-world models."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Analyse a MITAB interaction network restricted to a gene subset.
    Analyze(AnalyzeCommand),
    /// Write one ring lattice, optionally rewired, as GraphML.
    Lattice(LatticeCommand),
    /// Sweep rewired lattices and tabulate path lengths.
    Sweep(SweepCommand),
}

/// Options accepted by the `analyze` command.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeCommand {
    /// PSI-MITAB interaction file.
    pub interactions: PathBuf,

    /// Gene subset, one identifier per line.
    pub genes: PathBuf,

    /// Directory receiving the reports.
    #[arg(long = "out-dir")]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Whether degree centrality is a raw count or normalised.
    #[arg(long = "degree", value_enum, default_value_t = DegreeArg::Raw)]
    pub degree: DegreeArg,

    /// Centralities to compute and export; repeat the flag for several.
    #[arg(long = "centrality", value_enum)]
    pub centralities: Vec<CentralityArg>,
}

/// Options accepted by the `lattice` command.
#[derive(Debug, Args, Clone)]
pub struct LatticeCommand {
    /// Number of lattice vertices.
    #[arg(long, default_value_t = DEFAULT_LATTICE_VERTICES)]
    pub vertices: usize,

    /// Lattice mean degree.
    #[arg(long = "mean-degree", default_value_t = DEFAULT_LATTICE_DEGREE)]
    pub mean_degree: usize,

    /// Proportion of `n`, in `[0, 1]`, used as the number of rewiring steps.
    #[arg(long, default_value_t = DEFAULT_REWIRE_PROPORTION)]
    pub rewire: f64,

    /// Seed for the rewiring generator.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    #[command(flatten)]
    pub retry: RetryArgs,

    /// GraphML destination.
    #[arg(long)]
    pub output: PathBuf,
}

/// Options accepted by the `sweep` command.
#[derive(Debug, Args, Clone)]
pub struct SweepCommand {
    /// Lattice size; defaults to the reference's largest component.
    #[arg(long)]
    pub vertices: Option<usize>,

    /// Smallest mean degree; defaults to the floor of the reference's.
    #[arg(long = "min-degree")]
    pub min_degree: Option<usize>,

    /// Largest mean degree; defaults to the ceiling of the reference's.
    #[arg(long = "max-degree")]
    pub max_degree: Option<usize>,

    /// Spacing of rewiring proportions in `[0, 1)`.
    #[arg(long, default_value_t = DEFAULT_SWEEP_STEP)]
    pub step: f64,

    /// Base seed from which every instance seed is derived.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// MITAB file of the observed network placed in the tables.
    #[arg(long = "reference-interactions", requires = "reference_genes")]
    pub reference_interactions: Option<PathBuf>,

    /// Gene subset restricting the observed network.
    #[arg(long = "reference-genes", requires = "reference_interactions")]
    pub reference_genes: Option<PathBuf>,

    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub retry: RetryArgs,

    /// Directory receiving the CSV tables.
    #[arg(long = "out-dir")]
    pub out_dir: PathBuf,
}

/// Average-path-length policy shared by `analyze` and `sweep`.
#[derive(Debug, Args, Clone, Copy)]
pub struct PolicyArgs {
    /// Whether each vertex's zero self-distance counts towards averages.
    #[arg(long = "self-distance", value_enum, default_value_t = SelfDistanceArg::Include)]
    pub self_distance: SelfDistanceArg,
}

/// Rewiring retry bound shared by `lattice` and `sweep`.
#[derive(Debug, Args, Clone, Copy)]
pub struct RetryArgs {
    /// Samples tried per rewiring step before giving up.
    #[arg(long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: NonZeroUsize,
}

/// CLI spelling of [`SelfDistance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SelfDistanceArg {
    /// Count the zero self-distance of each member.
    Include,
    /// Average over distinct pairs only.
    Exclude,
}

impl From<SelfDistanceArg> for SelfDistance {
    fn from(value: SelfDistanceArg) -> Self {
        match value {
            SelfDistanceArg::Include => Self::Include,
            SelfDistanceArg::Exclude => Self::Exclude,
        }
    }
}

/// CLI spelling of [`DegreeConvention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DegreeArg {
    /// Distinct neighbour count.
    Raw,
    /// Count divided by the number of other analysed vertices.
    Normalized,
}

impl From<DegreeArg> for DegreeConvention {
    fn from(value: DegreeArg) -> Self {
        match value {
            DegreeArg::Raw => Self::Raw,
            DegreeArg::Normalized => Self::Normalized,
        }
    }
}

/// Centrality selection accepted by `--centrality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CentralityArg {
    /// Neighbour count, raw or normalised per `--degree`.
    Degree,
    /// Sum of reciprocal distances to reachable genes.
    Closeness,
    /// Single-canonical-path betweenness.
    Betweenness,
    /// Distinct neighbour count, independent of `--degree`.
    NeighborCount,
    /// Principal eigenvector of the adjacency matrix.
    Eigenvector,
    /// Katz centrality with alpha 0.03 and beta 1.
    Katz,
    /// PageRank with damping 0.85.
    Pagerank,
    /// Degree, closeness, betweenness and neighbour count.
    PathBased,
    /// Every metric.
    All,
}

impl CentralityArg {
    fn kinds(self) -> &'static [CentralityKind] {
        match self {
            Self::Degree => &[CentralityKind::Degree],
            Self::Closeness => &[CentralityKind::Closeness],
            Self::Betweenness => &[CentralityKind::Betweenness],
            Self::NeighborCount => &[CentralityKind::NeighborCount],
            Self::Eigenvector => &[CentralityKind::Eigenvector],
            Self::Katz => &[CentralityKind::Katz],
            Self::Pagerank => &[CentralityKind::PageRank],
            Self::PathBased => &CentralityKind::PATH_BASED,
            Self::All => &CentralityKind::ALL,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading an input or writing an artifact.
    #[error("i/o failure on `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Interaction or gene-subset ingestion failed.
    #[error("failed to read `{path}`: {source}")]
    Mitab {
        /// Input that could not be parsed.
        path: PathBuf,
        /// Provider failure.
        #[source]
        source: MitabError,
    },
    /// Network analysis failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    /// Lattice generation, rewiring or the sweep failed.
    #[error(transparent)]
    SmallWorld(#[from] SmallWorldError),
    /// The restricted reference network has no vertices.
    #[error("reference network has no interaction inside the gene subset")]
    EmptyReference,
    /// The sweep shape is neither fully explicit nor derivable from a
    /// reference network.
    #[error(
        "sweep needs --vertices, --min-degree and --max-degree, or a reference network"
    )]
    IncompleteSweep,
    /// The explicit mean-degree range is empty.
    #[error("--min-degree {min} exceeds --max-degree {max}")]
    InvertedDegreeRange {
        /// Lower bound supplied.
        min: usize,
        /// Upper bound supplied.
        max: usize,
    },
}

impl CliError {
    /// Stable machine-readable code of the underlying core failure, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Analysis(err) => Some(err.code().as_str()),
            Self::SmallWorld(err) => Some(err.code().as_str()),
            _ => None,
        }
    }
}

/// Outcome of the `analyze` command.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeSummary {
    /// Name of the interaction source.
    pub data_source: String,
    /// Vertices in the restricted network.
    pub vertices: usize,
    /// Edges in the restricted network.
    pub edges: usize,
    /// Number of connected components.
    pub components: usize,
    /// Largest-component figures, when the network is non-empty.
    pub reference: Option<EmpiricalReference>,
    /// Files written, in write order.
    pub artifacts: Vec<PathBuf>,
}

/// Outcome of the `lattice` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeSummary {
    /// Vertices in the written model.
    pub vertices: usize,
    /// Edges in the written model.
    pub edges: usize,
    /// Rewiring steps applied.
    pub swaps: usize,
    /// GraphML destination.
    pub output: PathBuf,
}

/// Outcome of the `sweep` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    /// Models generated.
    pub instances: usize,
    /// Models that rewiring split into several components.
    pub disconnected: usize,
    /// Reference row placed in the tables, if any.
    pub reference: Option<EmpiricalReference>,
    /// Files written, in write order.
    pub artifacts: Vec<PathBuf>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// Result of `analyze`.
    Analyze(AnalyzeSummary),
    /// Result of `lattice`.
    Lattice(LatticeSummary),
    /// Result of `sweep`.
    Sweep(SweepSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when ingestion, analysis, generation or writing an
/// artifact fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use interactome_cli::cli::{
/// #     Cli, Command, ExecutionSummary, LatticeCommand, RetryArgs, run_cli,
/// # };
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     command: Command::Lattice(LatticeCommand {
///         vertices: 20,
///         mean_degree: 6,
///         rewire: 0.2,
///         seed: 88,
///         retry: RetryArgs { max_attempts: std::num::NonZeroUsize::new(100).unwrap() },
///         output: dir.path().join("pcircle.graphml"),
///     }),
/// };
/// let ExecutionSummary::Lattice(summary) = run_cli(cli)? else { unreachable!() };
/// assert_eq!(summary.edges, 60);
/// assert_eq!(summary.swaps, 4);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Analyze(command) => {
            span.record("command", field::display("analyze"));
            run_analyze(command).map(ExecutionSummary::Analyze)
        }
        Command::Lattice(command) => {
            span.record("command", field::display("lattice"));
            run_lattice(command).map(ExecutionSummary::Lattice)
        }
        Command::Sweep(command) => {
            span.record("command", field::display("sweep"));
            run_sweep_command(command).map(ExecutionSummary::Sweep)
        }
    }
}

#[instrument(
    name = "cli.analyze",
    err,
    skip(command),
    fields(interactions = field::Empty, genes = field::Empty, centralities = field::Empty),
)]
pub(super) fn run_analyze(command: AnalyzeCommand) -> Result<AnalyzeSummary, CliError> {
    let span = Span::current();
    span.record("interactions", field::display(command.interactions.display()));
    span.record("genes", field::display(command.genes.display()));

    let centralities: BTreeSet<CentralityKind> = command
        .centralities
        .iter()
        .flat_map(|arg| arg.kinds().iter().copied())
        .collect();
    span.record("centralities", centralities.len());

    let analyzer = AnalysisBuilder::new()
        .with_self_distance(command.policy.self_distance.into())
        .with_degree_convention(command.degree.into())
        .with_centralities(centralities)
        .build()?;

    let (source, subset, graph) = load_network(&command.interactions, &command.genes)?;
    let analysis = analyzer.run(&graph, Some(subset.as_set()))?;

    fs::create_dir_all(&command.out_dir).map_err(|source| CliError::Io {
        path: command.out_dir.clone(),
        source,
    })?;
    let mut artifacts = Vec::new();
    let out = |name: &str| command.out_dir.join(name);

    let path = out(DISTANCES_FILE);
    write_artifact(&path, |writer| {
        report::write_distances(&graph, analysis.distances(), writer)
    })?;
    artifacts.push(path);

    let path = out(COMPONENTS_FILE);
    write_artifact(&path, |writer| report::write_components(&analysis, writer))?;
    artifacts.push(path);

    let path = out(GRAPHML_FILE);
    write_artifact(&path, |writer| report::write_graphml(&graph, writer))?;
    artifacts.push(path);

    for (kind, scores) in analysis.centralities() {
        let path = out(&format!("{}.json", kind.file_stem()));
        write_artifact(&path, |writer| report::write_centrality(scores, writer))?;
        artifacts.push(path);
    }

    let path = out(SUMMARY_FILE);
    write_artifact(&path, |writer| report::write_digest(&analysis, writer))?;
    artifacts.push(path);

    info!(
        data_source = source.name(),
        vertices = analysis.vertex_count(),
        components = analysis.components().len(),
        "analysis written"
    );
    Ok(AnalyzeSummary {
        data_source: source.name().to_owned(),
        vertices: analysis.vertex_count(),
        edges: analysis.edge_count(),
        components: analysis.components().len(),
        reference: analysis.reference(),
        artifacts,
    })
}

#[instrument(
    name = "cli.lattice",
    err,
    skip(command),
    fields(vertices = command.vertices, mean_degree = command.mean_degree, seed = command.seed),
)]
pub(super) fn run_lattice(command: LatticeCommand) -> Result<LatticeSummary, CliError> {
    let generator = SmallWorldGenerator::new(command.vertices, command.mean_degree)?
        .with_rewire_config(RewireConfig::new(command.retry.max_attempts));
    let model = generator.generate(command.rewire, command.seed)?;
    write_artifact(&command.output, |writer| {
        report::write_graphml(model.graph(), writer)
    })?;
    info!(
        swaps = model.swaps().len(),
        output = %command.output.display(),
        "lattice written"
    );
    Ok(LatticeSummary {
        vertices: model.graph().vertex_count(),
        edges: model.graph().edge_count(),
        swaps: model.swaps().len(),
        output: command.output,
    })
}

#[instrument(
    name = "cli.sweep",
    err,
    skip(command),
    fields(step = command.step, seed = command.seed, reference = field::Empty),
)]
pub(super) fn run_sweep_command(command: SweepCommand) -> Result<SweepSummary, CliError> {
    let policy: SelfDistance = command.policy.self_distance.into();
    let reference = match (&command.reference_interactions, &command.reference_genes) {
        (Some(interactions), Some(genes)) => {
            Span::current().record("reference", field::display(interactions.display()));
            Some(load_reference(interactions, genes, policy)?)
        }
        _ => None,
    };

    let proportions = SweepPlan::stepped_proportions(command.step)?;
    let plan = match (
        command.vertices,
        command.min_degree,
        command.max_degree,
        reference.as_ref(),
    ) {
        (Some(_), Some(min), Some(max), _) if min > max => {
            return Err(CliError::InvertedDegreeRange { min, max });
        }
        (Some(vertices), Some(min), Some(max), _) => {
            SweepPlan::new(vertices, min..=max, proportions, command.seed)
        }
        (None, None, None, Some(reference)) => {
            SweepPlan::bounding(reference, proportions, command.seed)
        }
        _ => return Err(CliError::IncompleteSweep),
    }
    .with_self_distance(policy);

    let mut result = run_sweep(&plan, RewireConfig::new(command.retry.max_attempts))?;
    if let Some(reference) = reference {
        result = result.with_reference(reference);
    }
    if result.disconnected_count() > 0 {
        warn!(
            disconnected = result.disconnected_count(),
            "some rewired models were disconnected; their largest component was measured"
        );
    }

    fs::create_dir_all(&command.out_dir).map_err(|source| CliError::Io {
        path: command.out_dir.clone(),
        source,
    })?;
    let path_lengths = command.out_dir.join(PATH_LENGTH_CSV);
    write_artifact(&path_lengths, |writer| {
        report::write_path_length_table(&result, writer)
    })?;
    let scaled = command.out_dir.join(SCALED_CSV);
    write_artifact(&scaled, |writer| report::write_scaled_table(&result, writer))?;

    info!(
        instances = result.records().len(),
        rows = result.rows().len(),
        "sweep written"
    );
    Ok(SweepSummary {
        instances: result.records().len(),
        disconnected: result.disconnected_count(),
        reference: result.reference().copied(),
        artifacts: vec![path_lengths, scaled],
    })
}

/// Reads the interaction and gene files and restricts the interactions to
/// the gene subset. The subset is returned too: genes without interactions
/// are still analysed.
#[instrument(
    name = "cli.load_network",
    err,
    skip_all,
    fields(path = %interactions.display()),
)]
pub(super) fn load_network(
    interactions: &Path,
    genes: &Path,
) -> Result<(InteractionSource, GeneSubset, Graph<String>), CliError> {
    let source =
        InteractionSource::try_from_path(interactions).map_err(|source| CliError::Mitab {
            path: interactions.to_path_buf(),
            source,
        })?;
    let subset = GeneSubset::try_from_path(genes).map_err(|source| CliError::Mitab {
        path: genes.to_path_buf(),
        source,
    })?;
    let graph = source.restrict_to(&subset);
    info!(
        pairs = source.len(),
        skipped = source.skipped_lines(),
        genes = subset.len(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "network loaded"
    );
    Ok((source, subset, graph))
}

fn load_reference(
    interactions: &Path,
    genes: &Path,
    policy: SelfDistance,
) -> Result<EmpiricalReference, CliError> {
    let (_, _, graph) = load_network(interactions, genes)?;
    let analysis = AnalysisBuilder::new()
        .with_self_distance(policy)
        .build()?
        .run(&graph, None)?;
    analysis.reference().ok_or(CliError::EmptyReference)
}

fn write_artifact<F>(path: &Path, render: F) -> Result<(), CliError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let io_error = |source: io::Error| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    render(&mut writer).map_err(io_error)?;
    writer.flush().map_err(io_error)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::path::PathBuf;
/// # use interactome_cli::cli::{ExecutionSummary, LatticeSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Lattice(LatticeSummary {
///     vertices: 20,
///     edges: 60,
///     swaps: 4,
///     output: PathBuf::from("pcircle.graphml"),
/// });
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.contains("swaps: 4"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Analyze(analyze) => {
            writeln!(writer, "data source: {}", analyze.data_source)?;
            writeln!(writer, "vertices: {}", analyze.vertices)?;
            writeln!(writer, "edges: {}", analyze.edges)?;
            writeln!(writer, "components: {}", analyze.components)?;
            if let Some(reference) = &analyze.reference {
                render_reference(reference, &mut writer)?;
            }
            render_artifacts(&analyze.artifacts, &mut writer)
        }
        ExecutionSummary::Lattice(lattice) => {
            writeln!(writer, "vertices: {}", lattice.vertices)?;
            writeln!(writer, "edges: {}", lattice.edges)?;
            writeln!(writer, "swaps: {}", lattice.swaps)?;
            writeln!(writer, "wrote {}", lattice.output.display())
        }
        ExecutionSummary::Sweep(sweep) => {
            writeln!(writer, "instances: {}", sweep.instances)?;
            writeln!(writer, "disconnected: {}", sweep.disconnected)?;
            if let Some(reference) = &sweep.reference {
                render_reference(reference, &mut writer)?;
            }
            render_artifacts(&sweep.artifacts, &mut writer)
        }
    }
}

fn render_reference(reference: &EmpiricalReference, writer: &mut impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "largest component: n = {}, c = {}, l = {}",
        reference.vertex_count, reference.mean_degree, reference.average_path_length
    )
}

fn render_artifacts(artifacts: &[PathBuf], writer: &mut impl Write) -> io::Result<()> {
    for path in artifacts {
        writeln!(writer, "wrote {}", path.display())?;
    }
    Ok(())
}
