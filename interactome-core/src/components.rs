//! Connected-component discovery from all-pairs distance maps.
//!
//! Reachability is symmetric in an undirected graph, so the key set of any
//! vertex's distance map is exactly that vertex's component. Components are
//! therefore read straight off the maps without a second traversal.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{graph::Vertex, traversal::AllPairsDistances};

/// A maximal set of mutually reachable vertices.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Component<V: Vertex> {
    members: BTreeSet<V>,
}

impl<V: Vertex> Component<V> {
    /// Wraps an explicit member set.
    #[must_use]
    pub fn new(members: BTreeSet<V>) -> Self {
        Self { members }
    }

    /// Members in ascending order.
    #[must_use]
    #[rustfmt::skip]
    pub fn members(&self) -> &BTreeSet<V> { &self.members }

    /// Returns whether `vertex` belongs to the component.
    #[must_use]
    pub fn contains(&self, vertex: &V) -> bool {
        self.members.contains(vertex)
    }

    /// Number of members.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.members.len() }

    /// Returns `true` when the component has no members.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    /// Iterates over members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.members.iter()
    }
}

impl<V: Vertex> FromIterator<V> for Component<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Partitions the traversed vertices into connected components.
///
/// Components are returned in the order their first source is visited, which
/// is ascending vertex order for maps built by
/// [`crate::all_pairs_distances`].
///
/// # Examples
/// ```
/// use interactome_core::{Graph, all_pairs_distances, components};
///
/// let graph = Graph::from_edges([("A", "B"), ("B", "C"), ("A", "C"), ("D", "E")]);
/// let found = components(&all_pairs_distances(&graph));
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].len(), 3);
/// assert_eq!(found[1].len(), 2);
/// ```
#[must_use]
pub fn components<V: Vertex>(distances: &AllPairsDistances<V>) -> Vec<Component<V>> {
    let mut seen: BTreeSet<&V> = BTreeSet::new();
    let mut found = Vec::new();
    for (source, map) in distances.iter() {
        if seen.contains(source) {
            continue;
        }
        let component: Component<V> = map.reachable().cloned().collect();
        seen.extend(map.reachable());
        found.push(component);
    }
    debug!(components = found.len(), "component discovery completed");
    found
}

/// Returns the component with the most members, preferring the earliest on
/// ties.
#[must_use]
pub fn largest_component<V: Vertex>(found: &[Component<V>]) -> Option<&Component<V>> {
    found
        .iter()
        .rev()
        .max_by_key(|component| component.len())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::{graph::Graph, traversal::all_pairs_distances};

    use super::*;

    #[test]
    fn components_partition_the_vertex_set() {
        let mut graph = Graph::from_edges([(0, 1), (1, 2), (3, 4), (5, 6), (6, 7)]);
        graph.add_vertex(9);
        let found = components(&all_pairs_distances(&graph));
        assert_eq!(found.len(), 4);

        let mut union = BTreeSet::new();
        for component in &found {
            for member in component.iter() {
                assert!(union.insert(*member), "{member} appears twice");
            }
        }
        let vertices: BTreeSet<_> = graph.vertices().copied().collect();
        assert_eq!(union, vertices);
    }

    #[test]
    fn largest_component_prefers_first_on_ties() {
        let graph = Graph::from_edges([(0, 1), (2, 3), (4, 5), (5, 6)]);
        let found = components(&all_pairs_distances(&graph));
        let largest = largest_component(&found).expect("graph is not empty");
        assert_eq!(largest.len(), 3);

        let tied = Graph::from_edges([(0, 1), (2, 3)]);
        let found = components(&all_pairs_distances(&tied));
        let first = largest_component(&found).expect("graph is not empty");
        assert!(first.contains(&0));
    }

    #[test]
    fn empty_distances_yield_no_components() {
        let graph: Graph<u32> = Graph::new();
        assert!(components(&all_pairs_distances(&graph)).is_empty());
    }
}
