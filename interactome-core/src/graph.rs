//! Undirected simple graph over ordered vertex identifiers.
//!
//! Adjacency is kept in ordered maps so every traversal, edge listing and
//! report visits vertices in the same order across runs. That ordering is what
//! makes canonical shortest paths (and therefore betweenness) reproducible.

use std::{
    collections::{BTreeMap, BTreeSet, btree_map::Entry},
    fmt,
};

use crate::error::GraphError;

/// Bound satisfied by every vertex identifier the engine accepts.
///
/// Gene symbols (`String`) and lattice indices (`usize`) both qualify.
pub trait Vertex: Clone + Ord + fmt::Display + Send + Sync {}

impl<T> Vertex for T where T: Clone + Ord + fmt::Display + Send + Sync {}

/// An undirected graph without self-loops or parallel edges.
///
/// # Examples
/// ```
/// use interactome_core::Graph;
///
/// let mut graph = Graph::new();
/// assert!(graph.add_edge("A", "B"));
/// assert!(!graph.add_edge("B", "A"));
/// assert!(!graph.add_edge("C", "C"));
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.vertex_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph<V: Vertex> {
    adjacency: BTreeMap<V, BTreeSet<V>>,
    edge_count: usize,
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self {
            adjacency: BTreeMap::new(),
            edge_count: 0,
        }
    }
}

impl<V: Vertex> Graph<V> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an edge list, skipping self-pairs.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::Graph;
    ///
    /// let graph = Graph::from_edges([(1, 2), (2, 3), (3, 3)]);
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    #[must_use]
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Self::new();
        for (left, right) in edges {
            graph.add_edge(left, right);
        }
        graph
    }

    /// Builds a graph from the edges whose endpoints both belong to `subset`.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeSet;
    /// use interactome_core::Graph;
    ///
    /// let subset: BTreeSet<_> = ["A", "B", "C"].into_iter().collect();
    /// let graph = Graph::from_filtered_edges([("A", "B"), ("B", "Z")], &subset);
    /// assert_eq!(graph.edge_count(), 1);
    /// assert!(!graph.contains(&"Z"));
    /// ```
    #[must_use]
    pub fn from_filtered_edges<I>(edges: I, subset: &BTreeSet<V>) -> Self
    where
        I: IntoIterator<Item = (V, V)>,
    {
        Self::from_edges(
            edges
                .into_iter()
                .filter(|(left, right)| subset.contains(left) && subset.contains(right)),
        )
    }

    /// Inserts `vertex` without any incident edges. Returns `false` when it
    /// was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        match self.adjacency.entry(vertex) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(BTreeSet::new());
                true
            }
        }
    }

    /// Inserts the undirected edge `{left, right}` and both endpoints.
    ///
    /// Returns `false` without touching the graph when `left == right`, and
    /// `false` (after ensuring both endpoints exist) when the edge is already
    /// present.
    pub fn add_edge(&mut self, left: V, right: V) -> bool {
        if left == right {
            return false;
        }
        let inserted = self
            .adjacency
            .entry(left.clone())
            .or_default()
            .insert(right.clone());
        self.adjacency.entry(right).or_default().insert(left);
        if inserted {
            self.edge_count += 1;
        }
        inserted
    }

    /// Removes the undirected edge `{left, right}`. Endpoints stay in the
    /// vertex set. Returns whether an edge was removed.
    pub fn remove_edge(&mut self, left: &V, right: &V) -> bool {
        let removed = self
            .adjacency
            .get_mut(left)
            .is_some_and(|neighbours| neighbours.remove(right));
        if removed {
            if let Some(neighbours) = self.adjacency.get_mut(right) {
                neighbours.remove(left);
            }
            self.edge_count -= 1;
        }
        removed
    }

    /// Removes `vertex` and every incident edge.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexNotFound`] when `vertex` is absent.
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<(), GraphError> {
        let neighbours = self
            .adjacency
            .remove(vertex)
            .ok_or_else(|| GraphError::not_found(vertex))?;
        for neighbour in &neighbours {
            if let Some(back) = self.adjacency.get_mut(neighbour) {
                back.remove(vertex);
            }
        }
        self.edge_count -= neighbours.len();
        Ok(())
    }

    /// Returns whether `vertex` is in the vertex set.
    #[must_use]
    pub fn contains(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Returns whether the undirected edge `{left, right}` exists.
    #[must_use]
    pub fn has_edge(&self, left: &V, right: &V) -> bool {
        self.adjacency
            .get(left)
            .is_some_and(|neighbours| neighbours.contains(right))
    }

    /// Returns the vertices adjacent to `vertex` in ascending order.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexNotFound`] when `vertex` is absent. An
    /// isolated vertex yields an empty set.
    pub fn neighbors(&self, vertex: &V) -> Result<&BTreeSet<V>, GraphError> {
        self.adjacency
            .get(vertex)
            .ok_or_else(|| GraphError::not_found(vertex))
    }

    /// Returns the number of distinct neighbours of `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexNotFound`] when `vertex` is absent.
    pub fn degree(&self, vertex: &V) -> Result<usize, GraphError> {
        self.neighbors(vertex).map(BTreeSet::len)
    }

    /// Iterates over vertices in ascending order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.adjacency.keys()
    }

    /// Iterates over each undirected edge once as `(smaller, larger)`.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.adjacency.iter().flat_map(|(vertex, neighbours)| {
            neighbours
                .range((
                    std::ops::Bound::Excluded(vertex),
                    std::ops::Bound::Unbounded,
                ))
                .map(move |neighbour| (vertex, neighbour))
        })
    }

    /// Number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.adjacency.len() }

    /// Number of undirected edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns `true` when the graph has no vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.adjacency.is_empty() }

    /// Returns the induced subgraph on `members`, keeping isolated members.
    #[must_use]
    pub fn induced_subgraph<'a, I>(&self, members: I) -> Self
    where
        I: IntoIterator<Item = &'a V>,
        V: 'a,
    {
        let keep: BTreeSet<&V> = members
            .into_iter()
            .filter(|vertex| self.contains(vertex))
            .collect();
        let mut subgraph = Self::new();
        for vertex in &keep {
            subgraph.add_vertex((*vertex).clone());
            if let Some(neighbours) = self.adjacency.get(*vertex) {
                for neighbour in neighbours.iter().filter(|n| keep.contains(n)) {
                    subgraph.add_edge((*vertex).clone(), neighbour.clone());
                }
            }
        }
        subgraph
    }
}
