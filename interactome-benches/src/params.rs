//! Benchmark parameter types.
//!
//! Groups related benchmark parameters so that Criterion IDs render
//! consistently across bench files.

use std::fmt;

/// Shape of a synthetic network benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct NetworkBenchParams {
    /// Number of vertices in the network.
    pub vertex_count: usize,
    /// Target mean degree.
    pub mean_degree: usize,
}

impl fmt::Display for NetworkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},c={}", self.vertex_count, self.mean_degree)
    }
}

/// Parameters for a sweep benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct SweepBenchParams {
    /// Lattice size shared by every instance.
    pub vertex_count: usize,
    /// Number of rewiring proportions per mean degree.
    pub proportion_count: usize,
}

impl fmt::Display for SweepBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},p={}", self.vertex_count, self.proportion_count)
    }
}
