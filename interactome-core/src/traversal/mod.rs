//! Breadth-first distance computation.
//!
//! Every edge has unit weight, so the first time a breadth-first traversal
//! reaches a vertex it has found a shortest hop count. Distances from one
//! source are collected into a [`DistanceMap`]; running the traversal from
//! every vertex yields [`AllPairsDistances`].
//!
//! With the `parallel` feature the all-sources sweep fans out across the
//! Rayon pool. Each traversal only reads the graph, so the result is identical
//! to the sequential sweep.

mod path;

use std::collections::{BTreeMap, VecDeque};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    error::GraphError,
    graph::{Graph, Vertex},
};

pub use self::path::{ParentTrace, shortest_path};

/// Hop distances from one source to every vertex it can reach.
///
/// Unreachable vertices are absent, which callers interpret as an infinite
/// distance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMap<V: Vertex> {
    source: V,
    distances: BTreeMap<V, usize>,
}

impl<V: Vertex> DistanceMap<V> {
    /// Returns the vertex the traversal started from.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> &V { &self.source }

    /// Returns the hop distance to `target`, or `None` when unreachable.
    #[must_use]
    pub fn get(&self, target: &V) -> Option<usize> {
        self.distances.get(target).copied()
    }

    /// Returns whether `target` was reached.
    #[must_use]
    pub fn contains(&self, target: &V) -> bool {
        self.distances.contains_key(target)
    }

    /// Iterates over reached vertices and their distances in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, usize)> + '_ {
        self.distances.iter().map(|(vertex, hops)| (vertex, *hops))
    }

    /// Iterates over the reached vertices, including the source itself.
    pub fn reachable(&self) -> impl Iterator<Item = &V> + '_ {
        self.distances.keys()
    }

    /// Number of reached vertices, including the source itself.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.distances.len() }

    /// Always `false`: the source is reachable from itself.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.distances.is_empty() }

    /// Largest distance in the map (the source's eccentricity).
    #[must_use]
    pub fn eccentricity(&self) -> usize {
        self.distances.values().copied().max().unwrap_or(0)
    }
}

/// One [`DistanceMap`] per graph vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllPairsDistances<V: Vertex> {
    maps: BTreeMap<V, DistanceMap<V>>,
}

impl<V: Vertex> AllPairsDistances<V> {
    /// Returns the distance map rooted at `source`.
    #[must_use]
    pub fn from_source(&self, source: &V) -> Option<&DistanceMap<V>> {
        self.maps.get(source)
    }

    /// Returns the hop distance between `source` and `target`, or `None` when
    /// either is unknown or the pair is disconnected.
    #[must_use]
    pub fn distance(&self, source: &V, target: &V) -> Option<usize> {
        self.maps.get(source).and_then(|map| map.get(target))
    }

    /// Iterates over `(source, map)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, &DistanceMap<V>)> + '_ {
        self.maps.iter()
    }

    /// Iterates over the sources.
    pub fn sources(&self) -> impl Iterator<Item = &V> + '_ {
        self.maps.keys()
    }

    /// Number of sources.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.maps.len() }

    /// Returns `true` when no sources were traversed.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.maps.is_empty() }
}

impl<V: Vertex> FromIterator<DistanceMap<V>> for AllPairsDistances<V> {
    fn from_iter<I: IntoIterator<Item = DistanceMap<V>>>(iter: I) -> Self {
        Self {
            maps: iter
                .into_iter()
                .map(|map| (map.source.clone(), map))
                .collect(),
        }
    }
}

/// Computes hop distances from `source` to every reachable vertex.
///
/// # Errors
/// Returns [`GraphError::VertexNotFound`] when `source` is not in `graph`.
///
/// # Examples
/// ```
/// use interactome_core::{Graph, distances_from};
///
/// let graph = Graph::from_edges([("A", "B"), ("B", "C"), ("A", "C"), ("D", "E")]);
/// let map = distances_from(&graph, &"A")?;
/// assert_eq!(map.get(&"A"), Some(0));
/// assert_eq!(map.get(&"C"), Some(1));
/// assert_eq!(map.get(&"D"), None);
/// # Ok::<(), interactome_core::GraphError>(())
/// ```
pub fn distances_from<V: Vertex>(
    graph: &Graph<V>,
    source: &V,
) -> Result<DistanceMap<V>, GraphError> {
    if !graph.contains(source) {
        return Err(GraphError::not_found(source));
    }
    Ok(breadth_first(graph, source))
}

/// Runs [`distances_from`] once per vertex of `graph`.
///
/// # Examples
/// ```
/// use interactome_core::{Graph, all_pairs_distances};
///
/// let graph = Graph::from_edges([(0, 1), (1, 2)]);
/// let all = all_pairs_distances(&graph);
/// assert_eq!(all.distance(&0, &2), Some(2));
/// assert_eq!(all.distance(&2, &0), Some(2));
/// ```
#[must_use]
#[instrument(
    name = "core.all_pairs_distances",
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn all_pairs_distances<V: Vertex>(graph: &Graph<V>) -> AllPairsDistances<V> {
    let sources: Vec<&V> = graph.vertices().collect();

    #[cfg(feature = "parallel")]
    let maps: Vec<DistanceMap<V>> = sources
        .par_iter()
        .map(|source| breadth_first(graph, source))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let maps: Vec<DistanceMap<V>> = sources
        .iter()
        .map(|source| breadth_first(graph, source))
        .collect();

    debug!(sources = maps.len(), "all-pairs traversal completed");
    maps.into_iter().collect()
}

fn breadth_first<V: Vertex>(graph: &Graph<V>, source: &V) -> DistanceMap<V> {
    #[cfg(feature = "metrics")]
    metrics::counter!("interactome_bfs_runs_total").increment(1);

    let mut distances = BTreeMap::new();
    distances.insert(source.clone(), 0_usize);
    let mut frontier = VecDeque::from([source]);

    while let Some(parent) = frontier.pop_front() {
        let depth = distances.get(parent).copied().unwrap_or_default();
        let Ok(children) = graph.neighbors(parent) else {
            continue;
        };
        for child in children {
            if !distances.contains_key(child) {
                distances.insert(child.clone(), depth + 1);
                frontier.push_back(child);
            }
        }
    }

    DistanceMap {
        source: source.clone(),
        distances,
    }
}
