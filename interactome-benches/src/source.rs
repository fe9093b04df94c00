//! Seeded synthetic networks for benchmarking.
//!
//! Two families are offered: uniform random graphs with a target mean
//! degree, and rewired ring lattices produced by the core generator. Both
//! are reproducible from a seed so Criterion comparisons stay stable across
//! runs.

use interactome_core::{Graph, SmallWorldError, SmallWorldGenerator};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur during synthetic network generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested vertex count was zero.
    #[error("vertex count must be greater than zero")]
    ZeroVertices,
    /// The mean degree cannot be reached without parallel edges.
    #[error("mean degree {mean_degree} needs more than {vertex_count} vertices")]
    DegreeTooLarge {
        /// Requested mean degree.
        mean_degree: usize,
        /// Requested vertex count.
        vertex_count: usize,
    },
}

/// Configuration for synthetic network generation.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticConfig {
    /// Number of vertices to generate.
    pub vertex_count: usize,
    /// Target mean degree.
    pub mean_degree: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a uniform random graph with `vertex_count * mean_degree / 2`
/// distinct edges. Every vertex is present even when it draws no edge.
///
/// # Errors
/// Returns [`SyntheticError::ZeroVertices`] for an empty request and
/// [`SyntheticError::DegreeTooLarge`] when `mean_degree >= vertex_count`.
///
/// # Examples
///
/// ```
/// use interactome_benches::source::{SyntheticConfig, uniform_network};
///
/// let graph = uniform_network(&SyntheticConfig {
///     vertex_count: 50,
///     mean_degree: 4,
///     seed: 7,
/// })?;
/// assert_eq!(graph.vertex_count(), 50);
/// assert_eq!(graph.edge_count(), 100);
/// # Ok::<(), interactome_benches::source::SyntheticError>(())
/// ```
pub fn uniform_network(config: &SyntheticConfig) -> Result<Graph<usize>, SyntheticError> {
    let SyntheticConfig {
        vertex_count,
        mean_degree,
        seed,
    } = *config;
    if vertex_count == 0 {
        return Err(SyntheticError::ZeroVertices);
    }
    if mean_degree >= vertex_count {
        return Err(SyntheticError::DegreeTooLarge {
            mean_degree,
            vertex_count,
        });
    }

    let target = vertex_count
        .saturating_mul(mean_degree)
        .checked_div(2)
        .unwrap_or_default();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    for vertex in 0..vertex_count {
        graph.add_vertex(vertex);
    }
    while graph.edge_count() < target {
        let left = rng.gen_range(0..vertex_count);
        let right = rng.gen_range(0..vertex_count);
        if left != right {
            graph.add_edge(left, right);
        }
    }
    Ok(graph)
}

/// Builds a ring lattice of the configured shape and rewires
/// `floor(vertex_count * proportion)` edges with the configured seed.
///
/// # Errors
/// Propagates [`SmallWorldError`] from lattice validation or rewiring.
pub fn small_world_network(
    config: &SyntheticConfig,
    proportion: f64,
) -> Result<Graph<usize>, SmallWorldError> {
    let generator = SmallWorldGenerator::new(config.vertex_count, config.mean_degree)?;
    Ok(generator.generate(proportion, config.seed)?.into_graph())
}

/// Relabels integer vertices as `G<index>` identifiers, matching the string
/// vertices produced by interaction-file loaders.
#[must_use]
pub fn labelled(graph: &Graph<usize>) -> Graph<String> {
    let mut labelled = Graph::from_edges(
        graph
            .edges()
            .map(|(left, right)| (format!("G{left}"), format!("G{right}"))),
    );
    for vertex in graph.vertices() {
        labelled.add_vertex(format!("G{vertex}"));
    }
    labelled
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn config(vertex_count: usize, mean_degree: usize) -> SyntheticConfig {
        SyntheticConfig {
            vertex_count,
            mean_degree,
            seed: 42,
        }
    }

    #[rstest]
    #[case(10, 2, 10)]
    #[case(100, 6, 300)]
    #[case(7, 3, 10)]
    fn uniform_network_hits_the_edge_target(
        #[case] vertex_count: usize,
        #[case] mean_degree: usize,
        #[case] edges: usize,
    ) {
        let graph = uniform_network(&config(vertex_count, mean_degree)).expect("valid config");
        assert_eq!(graph.vertex_count(), vertex_count);
        assert_eq!(graph.edge_count(), edges);
    }

    #[rstest]
    fn uniform_network_is_reproducible() {
        let first = uniform_network(&config(60, 4)).expect("valid config");
        let second = uniform_network(&config(60, 4)).expect("valid config");
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(0, 0, SyntheticError::ZeroVertices)]
    #[case(5, 5, SyntheticError::DegreeTooLarge { mean_degree: 5, vertex_count: 5 })]
    fn uniform_network_rejects_bad_shapes(
        #[case] vertex_count: usize,
        #[case] mean_degree: usize,
        #[case] expected: SyntheticError,
    ) {
        let err = uniform_network(&config(vertex_count, mean_degree)).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn small_world_network_keeps_the_edge_count() {
        let graph = small_world_network(&config(40, 4), 0.25).expect("valid lattice");
        assert_eq!(graph.vertex_count(), 40);
        assert_eq!(graph.edge_count(), 80);
    }

    #[rstest]
    fn labelled_preserves_structure() {
        let mut graph = Graph::from_edges([(0, 1), (1, 2)]);
        graph.add_vertex(3);
        let relabelled = labelled(&graph);
        assert_eq!(relabelled.vertex_count(), 4);
        assert_eq!(relabelled.edge_count(), 2);
        assert!(relabelled.has_edge(&"G0".to_owned(), &"G1".to_owned()));
        assert!(relabelled.contains(&"G3".to_owned()));
    }
}
