//! Vertex centrality over an analysed vertex subset.
//!
//! Four path- and degree-based metrics share one calculator:
//!
//! - degree: distinct neighbours, raw or divided by `|analysed| - 1`;
//! - closeness: the sum of reciprocal distances to the other analysed
//!   vertices, with unreachable pairs contributing nothing;
//! - betweenness: the share of finite analysed pairs whose canonical shortest
//!   path passes through the vertex (see [`CentralityCalculator::betweenness`]);
//! - neighbour count: distinct non-self neighbours. The source tooling calls
//!   this "eigenvector" centrality; it is not the principal eigenvector of the
//!   adjacency matrix. Use [`eigenvector_centrality`] for that.
//!
//! Analysed vertices missing from the graph are treated as isolated.

mod betweenness;
mod spectral;

use std::collections::{BTreeMap, BTreeSet};

use tracing::instrument;

use crate::{
    error::Result,
    graph::{Graph, Vertex},
    traversal::AllPairsDistances,
};

pub use self::spectral::{
    PowerIteration, eigenvector_centrality, katz_centrality, pagerank,
};

/// How raw degree counts are scaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DegreeConvention {
    /// Count of distinct neighbours.
    #[default]
    Raw,
    /// Count divided by `|analysed| - 1` (zero when fewer than two vertices
    /// are analysed).
    Normalized,
}

/// Per-vertex scores for one centrality metric.
#[derive(Clone, Debug, PartialEq)]
pub struct CentralityScores<V: Vertex> {
    scores: BTreeMap<V, f64>,
}

impl<V: Vertex> Default for CentralityScores<V> {
    fn default() -> Self {
        Self {
            scores: BTreeMap::new(),
        }
    }
}

impl<V: Vertex> CentralityScores<V> {
    /// Returns the score of `vertex`, if it was scored.
    #[must_use]
    pub fn get(&self, vertex: &V) -> Option<f64> {
        self.scores.get(vertex).copied()
    }

    /// Iterates over `(vertex, score)` in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, f64)> + '_ {
        self.scores.iter().map(|(vertex, score)| (vertex, *score))
    }

    /// Number of scored vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.scores.len() }

    /// Returns `true` when nothing was scored.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.scores.is_empty() }

    /// Largest score, or `None` when empty.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.scores.values().copied().reduce(f64::max)
    }

    /// Sum of all scores.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Graph-level heterogeneity `Σ (max - xᵢ)`; zero when empty.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::{CentralityCalculator, Graph, all_pairs_distances};
    ///
    /// let star = Graph::from_edges([(0, 1), (0, 2), (0, 3)]);
    /// let all = all_pairs_distances(&star);
    /// let degree = CentralityCalculator::new(&star, &all).neighbor_count();
    /// assert_eq!(degree.centralization(), 6.0);
    /// ```
    #[must_use]
    pub fn centralization(&self) -> f64 {
        self.max().map_or(0.0, |peak| {
            self.scores.values().map(|score| peak - score).sum()
        })
    }

    /// Borrows the underlying map.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_map(&self) -> &BTreeMap<V, f64> { &self.scores }

    /// Consumes the scores, returning the underlying map.
    #[must_use]
    #[rustfmt::skip]
    pub fn into_map(self) -> BTreeMap<V, f64> { self.scores }
}

impl<V: Vertex> FromIterator<(V, f64)> for CentralityScores<V> {
    fn from_iter<I: IntoIterator<Item = (V, f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// Computes centrality scores for a fixed graph and its all-pairs distances.
///
/// # Examples
/// ```
/// use interactome_core::{CentralityCalculator, DegreeConvention, Graph, all_pairs_distances};
///
/// let graph = Graph::from_edges([("A", "B"), ("B", "C")]);
/// let all = all_pairs_distances(&graph);
/// let calculator = CentralityCalculator::new(&graph, &all);
///
/// let degree = calculator.degree(DegreeConvention::Normalized);
/// assert_eq!(degree.get(&"B"), Some(1.0));
///
/// let closeness = calculator.closeness();
/// assert_eq!(closeness.get(&"A"), Some(1.5));
///
/// let betweenness = calculator.betweenness()?;
/// assert_eq!(betweenness.get(&"B"), Some(1.0));
/// # Ok::<(), interactome_core::AnalysisError>(())
/// ```
#[derive(Clone, Debug)]
pub struct CentralityCalculator<'a, V: Vertex> {
    graph: &'a Graph<V>,
    distances: &'a AllPairsDistances<V>,
    analysed: BTreeSet<V>,
}

impl<'a, V: Vertex> CentralityCalculator<'a, V> {
    /// Analyses every vertex of `graph`.
    #[must_use]
    pub fn new(graph: &'a Graph<V>, distances: &'a AllPairsDistances<V>) -> Self {
        Self {
            graph,
            distances,
            analysed: graph.vertices().cloned().collect(),
        }
    }

    /// Restricts scoring and pair enumeration to `subset`.
    #[must_use]
    pub fn with_subset(mut self, subset: BTreeSet<V>) -> Self {
        self.analysed = subset;
        self
    }

    /// The analysed vertex set.
    #[must_use]
    #[rustfmt::skip]
    pub fn analysed(&self) -> &BTreeSet<V> { &self.analysed }

    /// Degree centrality under `convention`. Isolated vertices score zero.
    #[must_use]
    #[instrument(
        name = "core.centrality.degree",
        skip(self),
        fields(analysed = self.analysed.len()),
    )]
    pub fn degree(&self, convention: DegreeConvention) -> CentralityScores<V> {
        let scale = match convention {
            DegreeConvention::Raw => 1.0,
            DegreeConvention::Normalized if self.analysed.len() > 1 => {
                1.0 / (self.analysed.len() - 1) as f64
            }
            DegreeConvention::Normalized => 0.0,
        };
        self.analysed
            .iter()
            .map(|vertex| (vertex.clone(), self.distinct_neighbours(vertex) as f64 * scale))
            .collect()
    }

    /// Sum of `1 / d(v, u)` over the other analysed vertices `u` reachable
    /// from `v`. Returns an empty map when fewer than two vertices are
    /// analysed.
    #[must_use]
    #[instrument(
        name = "core.centrality.closeness",
        skip(self),
        fields(analysed = self.analysed.len()),
    )]
    pub fn closeness(&self) -> CentralityScores<V> {
        if self.analysed.len() < 2 {
            return CentralityScores::default();
        }
        self.analysed
            .iter()
            .map(|vertex| {
                let score = self
                    .distances
                    .from_source(vertex)
                    .map_or(0.0, |map| {
                        map.iter()
                            .filter(|(target, hops)| {
                                *hops > 0 && self.analysed.contains(*target)
                            })
                            .map(|(_, hops)| 1.0 / hops as f64)
                            .sum()
                    });
                (vertex.clone(), score)
            })
            .collect()
    }

    /// Distinct non-self neighbours, as a score.
    #[must_use]
    #[instrument(
        name = "core.centrality.neighbor_count",
        skip(self),
        fields(analysed = self.analysed.len()),
    )]
    pub fn neighbor_count(&self) -> CentralityScores<V> {
        self.analysed
            .iter()
            .map(|vertex| (vertex.clone(), self.distinct_neighbours(vertex) as f64))
            .collect()
    }

    /// Single-canonical-path betweenness.
    ///
    /// For each analysed vertex `v` this is the fraction of ordered analysed
    /// pairs `(s, t)` with `s != t`, `v ∉ {s, t}` and finite distance whose
    /// canonical shortest path (see [`crate::shortest_path`]) passes through
    /// `v`. Only one shortest path per pair is considered, so vertices on
    /// equally short alternative routes are not credited; this approximates
    /// rather than reproduces Brandes betweenness. Scores lie in `[0, 1]`; a
    /// vertex with no qualifying pairs scores zero.
    ///
    /// Returns an empty map when fewer than two vertices are analysed.
    ///
    /// # Errors
    /// Propagates [`crate::AnalysisError::Graph`] if the graph and distance
    /// maps disagree about the vertex set.
    #[instrument(
        name = "core.centrality.betweenness",
        err,
        skip(self),
        fields(analysed = self.analysed.len()),
    )]
    pub fn betweenness(&self) -> Result<CentralityScores<V>> {
        if self.analysed.len() < 2 {
            return Ok(CentralityScores::default());
        }
        betweenness::canonical_path_betweenness(self.graph, self.distances, &self.analysed)
    }

    fn distinct_neighbours(&self, vertex: &V) -> usize {
        self.graph
            .neighbors(vertex)
            .map_or(0, |neighbours| {
                neighbours.iter().filter(|neighbour| *neighbour != vertex).count()
            })
    }
}

#[cfg(test)]
mod tests;
