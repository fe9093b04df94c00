//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark networks
//! so setup functions can propagate failures with `?`.

use crate::source::SyntheticError;
use interactome_core::{AnalysisError, SmallWorldError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic network generation failed.
    #[error("synthetic network generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Lattice construction, rewiring or a sweep failed.
    #[error("small-world operation failed: {0}")]
    SmallWorld(#[from] SmallWorldError),
    /// A centrality computation or analysis run failed.
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}
