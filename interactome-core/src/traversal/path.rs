//! Destination-directed traversal and canonical shortest-path reconstruction.
//!
//! The traversal records, per frontier layer, which frontier vertex first
//! discovered each new child. Expansion stops at the layer in which the
//! destination appears; the path is then read back by consuming one layer per
//! step from the destination towards the source.
//!
//! When several shortest paths exist only one is produced: the parent
//! recorded first in each layer wins. Frontier vertices are expanded in
//! discovery order and neighbours in ascending vertex order, so the choice is
//! stable across runs. Because a vertex's parent is fixed when it is first
//! discovered, stopping early never changes the recorded parents, and a
//! single [`ParentTrace::full`] yields the same canonical path to every
//! destination as one directed trace per destination.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    error::GraphError,
    graph::{Graph, Vertex},
};

/// Per-layer `child -> parent` maps produced by a breadth-first traversal.
///
/// Layer `i` holds the vertices at distance `i + 1` from the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentTrace<V: Vertex> {
    source: V,
    layers: Vec<BTreeMap<V, V>>,
}

impl<V: Vertex> ParentTrace<V> {
    /// Traces layers from `source` until `destination` is first discovered.
    ///
    /// Returns `None` when `destination` is unreachable. When `source ==
    /// destination` the trace has no layers.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexNotFound`] when either endpoint is absent.
    pub fn trace(
        graph: &Graph<V>,
        source: &V,
        destination: &V,
    ) -> Result<Option<Self>, GraphError> {
        if !graph.contains(destination) {
            return Err(GraphError::not_found(destination));
        }
        let (trace, found) = Self::layered(graph, source, Some(destination))?;
        Ok(found.then_some(trace))
    }

    /// Traces every layer reachable from `source`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexNotFound`] when `source` is absent.
    pub fn full(graph: &Graph<V>, source: &V) -> Result<Self, GraphError> {
        Self::layered(graph, source, None).map(|(trace, _)| trace)
    }

    fn layered(
        graph: &Graph<V>,
        source: &V,
        destination: Option<&V>,
    ) -> Result<(Self, bool), GraphError> {
        if !graph.contains(source) {
            return Err(GraphError::not_found(source));
        }
        let mut visited: BTreeSet<&V> = BTreeSet::from([source]);
        let mut frontier: Vec<&V> = vec![source];
        let mut layers = Vec::new();
        let mut found = destination == Some(source);

        while !found && !frontier.is_empty() {
            let mut parents = BTreeMap::new();
            let mut next = Vec::new();
            for &parent in &frontier {
                for child in graph.neighbors(parent)? {
                    if visited.insert(child) {
                        parents.insert(child.clone(), parent.clone());
                        next.push(child);
                        found |= destination == Some(child);
                    }
                }
            }
            if !parents.is_empty() {
                layers.push(parents);
            }
            frontier = next;
        }

        let trace = Self {
            source: source.clone(),
            layers,
        };
        Ok((trace, found))
    }

    /// Returns the vertex the trace started from.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> &V { &self.source }

    /// Number of recorded layers. For a directed trace this equals the hop
    /// distance to its destination.
    #[must_use]
    #[rustfmt::skip]
    pub fn depth(&self) -> usize { self.layers.len() }

    /// Walks the layers back from `destination`, returning the path in
    /// source-to-destination order, endpoints included.
    ///
    /// Returns `None` when `destination` was not discovered by the trace.
    #[must_use]
    pub fn reconstruct(&self, destination: &V) -> Option<Vec<V>> {
        if *destination == self.source {
            return Some(vec![destination.clone()]);
        }
        let layer_index = self
            .layers
            .iter()
            .position(|layer| layer.contains_key(destination))?;
        let mut path = vec![destination.clone()];
        let mut current = destination;
        for layer in self.layers.iter().take(layer_index + 1).rev() {
            current = layer.get(current)?;
            path.push(current.clone());
        }
        if *current != self.source {
            return None;
        }
        path.reverse();
        Some(path)
    }
}

/// Returns one canonical shortest path from `source` to `destination`,
/// endpoints included, or `None` when they are disconnected.
///
/// # Errors
/// Returns [`GraphError::VertexNotFound`] when either endpoint is absent.
///
/// # Examples
/// ```
/// use interactome_core::{Graph, shortest_path};
///
/// let graph = Graph::from_edges([(0, 1), (1, 2), (0, 3), (3, 2)]);
/// let path = shortest_path(&graph, &0, &2)?;
/// assert_eq!(path, Some(vec![0, 1, 2]));
/// # Ok::<(), interactome_core::GraphError>(())
/// ```
pub fn shortest_path<V: Vertex>(
    graph: &Graph<V>,
    source: &V,
    destination: &V,
) -> Result<Option<Vec<V>>, GraphError> {
    Ok(ParentTrace::trace(graph, source, destination)?
        .and_then(|trace| trace.reconstruct(destination)))
}
