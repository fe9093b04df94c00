//! Command-line interface orchestration for interactome.
//!
//! `analyze` reads a MITAB export and a gene subset and writes the distance,
//! component, GraphML and centrality reports. `lattice` writes one ring
//! lattice model. `sweep` tabulates path lengths of rewired lattices next to
//! an optional observed network.

mod commands;
mod report;

pub use commands::{
    AnalyzeCommand, AnalyzeSummary, CentralityArg, Cli, CliError, Command, DegreeArg,
    ExecutionSummary, LatticeCommand, LatticeSummary, PolicyArgs, RetryArgs, SelfDistanceArg,
    SweepCommand, SweepSummary, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
