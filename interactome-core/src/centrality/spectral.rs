//! Power-iteration centralities: eigenvector, Katz and PageRank.
//!
//! Vertices are mapped to dense indices once so each sweep works on plain
//! vectors. Convergence is declared when the L1 change between sweeps drops
//! below `vertex_count * tolerance`.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::{
    error::{AnalysisError, Result},
    graph::{Graph, Vertex},
};

use super::CentralityScores;

/// Iteration budget and convergence tolerance for power iteration.
///
/// # Examples
/// ```
/// use interactome_core::PowerIteration;
///
/// let params = PowerIteration::default();
/// assert_eq!(params.max_iterations(), 100);
/// assert_eq!(params.tolerance(), 1.0e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerIteration {
    max_iterations: usize,
    tolerance: f64,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1.0e-6,
        }
    }
}

impl PowerIteration {
    /// Creates validated iteration parameters.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidParameter`] when `max_iterations` is
    /// zero or `tolerance` is not a positive finite number.
    pub fn new(max_iterations: usize, tolerance: f64) -> Result<Self> {
        if max_iterations == 0 {
            return Err(AnalysisError::InvalidParameter {
                name: "max_iterations",
                reason: "must be at least 1",
            });
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(AnalysisError::InvalidParameter {
                name: "tolerance",
                reason: "must be positive and finite",
            });
        }
        Ok(Self {
            max_iterations,
            tolerance,
        })
    }

    /// Maximum number of sweeps.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_iterations(&self) -> usize { self.max_iterations }

    /// Per-vertex convergence tolerance.
    #[must_use]
    #[rustfmt::skip]
    pub fn tolerance(&self) -> f64 { self.tolerance }
}

struct DenseAdjacency<'a, V: Vertex> {
    vertices: Vec<&'a V>,
    neighbours: Vec<Vec<usize>>,
}

impl<'a, V: Vertex> DenseAdjacency<'a, V> {
    fn new(graph: &'a Graph<V>) -> Self {
        let vertices: Vec<&V> = graph.vertices().collect();
        let index: BTreeMap<&V, usize> = vertices
            .iter()
            .enumerate()
            .map(|(position, vertex)| (*vertex, position))
            .collect();
        let neighbours = vertices
            .iter()
            .map(|vertex| {
                graph
                    .neighbors(vertex)
                    .map(|set| {
                        set.iter()
                            .filter_map(|n| index.get(n).copied())
                            .collect::<Vec<usize>>()
                    })
                    .unwrap_or_default()
            })
            .collect();
        Self {
            vertices,
            neighbours,
        }
    }

    fn len(&self) -> usize {
        self.vertices.len()
    }

    fn into_scores(self, values: &[f64]) -> CentralityScores<V> {
        self.vertices
            .into_iter()
            .zip(values)
            .map(|(vertex, value)| (vertex.clone(), *value))
            .collect()
    }
}

fn l1_change(previous: &[f64], next: &[f64]) -> f64 {
    previous
        .iter()
        .zip(next)
        .map(|(old, new)| (old - new).abs())
        .sum()
}

fn normalise_l2(values: &mut [f64]) {
    let norm = values.iter().map(|value| value * value).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in values {
            *value /= norm;
        }
    }
}

/// Principal-eigenvector centrality of the adjacency matrix, L2-normalised.
///
/// Iterates `x ← x + A·x` so bipartite graphs still converge.
///
/// # Errors
/// Returns [`AnalysisError::NotConverged`] when the budget is exhausted.
///
/// # Examples
/// ```
/// use interactome_core::{Graph, PowerIteration, eigenvector_centrality};
///
/// let star = Graph::from_edges([(0, 1), (0, 2), (0, 3)]);
/// let scores = eigenvector_centrality(&star, PowerIteration::default())?;
/// assert!(scores.get(&0) > scores.get(&1));
/// # Ok::<(), interactome_core::AnalysisError>(())
/// ```
#[instrument(
    name = "core.centrality.eigenvector",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count()),
)]
pub fn eigenvector_centrality<V: Vertex>(
    graph: &Graph<V>,
    params: PowerIteration,
) -> Result<CentralityScores<V>> {
    let adjacency = DenseAdjacency::new(graph);
    let n = adjacency.len();
    if n == 0 {
        return Ok(CentralityScores::default());
    }
    let mut scores = vec![1.0 / n as f64; n];
    for iteration in 1..=params.max_iterations {
        let mut next = scores.clone();
        for (vertex, neighbours) in adjacency.neighbours.iter().enumerate() {
            for &neighbour in neighbours {
                next[vertex] += scores[neighbour];
            }
        }
        normalise_l2(&mut next);
        let change = l1_change(&scores, &next);
        scores = next;
        if change < n as f64 * params.tolerance {
            debug!(iteration, "eigenvector centrality converged");
            return Ok(adjacency.into_scores(&scores));
        }
    }
    Err(AnalysisError::NotConverged {
        metric: "eigenvector centrality",
        iterations: params.max_iterations,
    })
}

/// Katz centrality `x = α·A·x + β`, L2-normalised.
///
/// `alpha` must be below the reciprocal of the adjacency spectral radius for
/// the iteration to converge.
///
/// # Errors
/// Returns [`AnalysisError::InvalidParameter`] for a non-positive or
/// non-finite `alpha`, and [`AnalysisError::NotConverged`] when the budget is
/// exhausted.
#[instrument(
    name = "core.centrality.katz",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count()),
)]
pub fn katz_centrality<V: Vertex>(
    graph: &Graph<V>,
    alpha: f64,
    beta: f64,
    params: PowerIteration,
) -> Result<CentralityScores<V>> {
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(AnalysisError::InvalidParameter {
            name: "alpha",
            reason: "must be positive and finite",
        });
    }
    let adjacency = DenseAdjacency::new(graph);
    let n = adjacency.len();
    if n == 0 {
        return Ok(CentralityScores::default());
    }
    let mut scores = vec![0.0; n];
    for iteration in 1..=params.max_iterations {
        let next: Vec<f64> = adjacency
            .neighbours
            .iter()
            .map(|neighbours| {
                alpha * neighbours.iter().map(|&neighbour| scores[neighbour]).sum::<f64>() + beta
            })
            .collect();
        let change = l1_change(&scores, &next);
        scores = next;
        if change < n as f64 * params.tolerance {
            debug!(iteration, "katz centrality converged");
            normalise_l2(&mut scores);
            return Ok(adjacency.into_scores(&scores));
        }
    }
    Err(AnalysisError::NotConverged {
        metric: "katz centrality",
        iterations: params.max_iterations,
    })
}

/// PageRank with uniform teleportation; isolated vertices spread their mass
/// uniformly. Scores sum to one.
///
/// # Errors
/// Returns [`AnalysisError::InvalidParameter`] when `damping` is outside
/// `[0, 1)`, and [`AnalysisError::NotConverged`] when the budget is
/// exhausted.
///
/// # Examples
/// ```
/// use interactome_core::{Graph, PowerIteration, pagerank};
///
/// let cycle = Graph::from_edges([(0, 1), (1, 2), (2, 0)]);
/// let scores = pagerank(&cycle, 0.85, PowerIteration::default())?;
/// assert!((scores.total() - 1.0).abs() < 1e-9);
/// # Ok::<(), interactome_core::AnalysisError>(())
/// ```
#[instrument(
    name = "core.centrality.pagerank",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count()),
)]
pub fn pagerank<V: Vertex>(
    graph: &Graph<V>,
    damping: f64,
    params: PowerIteration,
) -> Result<CentralityScores<V>> {
    if !(0.0..1.0).contains(&damping) {
        return Err(AnalysisError::InvalidParameter {
            name: "damping",
            reason: "must lie in [0, 1)",
        });
    }
    let adjacency = DenseAdjacency::new(graph);
    let n = adjacency.len();
    if n == 0 {
        return Ok(CentralityScores::default());
    }
    let uniform = 1.0 / n as f64;
    let mut scores = vec![uniform; n];
    for iteration in 1..=params.max_iterations {
        let dangling: f64 = adjacency
            .neighbours
            .iter()
            .zip(&scores)
            .filter(|(neighbours, _)| neighbours.is_empty())
            .map(|(_, score)| score)
            .sum();
        let base = (1.0 - damping) * uniform + damping * dangling * uniform;
        let mut next = vec![base; n];
        for (vertex, neighbours) in adjacency.neighbours.iter().enumerate() {
            if neighbours.is_empty() {
                continue;
            }
            let share = damping * scores[vertex] / neighbours.len() as f64;
            for &neighbour in neighbours {
                next[neighbour] += share;
            }
        }
        let change = l1_change(&scores, &next);
        scores = next;
        if change < n as f64 * params.tolerance {
            debug!(iteration, "pagerank converged");
            return Ok(adjacency.into_scores(&scores));
        }
    }
    Err(AnalysisError::NotConverged {
        metric: "pagerank",
        iterations: params.max_iterations,
    })
}
