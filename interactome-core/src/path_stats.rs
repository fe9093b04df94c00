//! Diameter, average shortest-path length and mean degree of a component.

use crate::{
    components::Component,
    error::{AnalysisError, Result},
    graph::{Graph, Vertex},
    traversal::AllPairsDistances,
};

/// Whether each member's zero distance to itself counts towards the average
/// shortest-path length.
///
/// # Examples
/// ```
/// use interactome_core::SelfDistance;
///
/// assert_eq!(SelfDistance::default(), SelfDistance::Include);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelfDistance {
    /// Average over every entry of each member's distance map, self included.
    /// A triangle averages `6 / 9`.
    #[default]
    Include,
    /// Average over ordered pairs of distinct members. A triangle averages
    /// `6 / 6`.
    Exclude,
}

/// Maximum pairwise distance between members of `component`.
///
/// Members without a distance map are skipped, and distances to vertices
/// outside the component are ignored.
///
/// # Errors
/// Returns [`AnalysisError::EmptyComponent`] when no member has a distance
/// map.
///
/// # Examples
/// ```
/// use interactome_core::{Graph, all_pairs_distances, components, diameter};
///
/// let graph = Graph::from_edges([(0, 1), (1, 2), (2, 3)]);
/// let all = all_pairs_distances(&graph);
/// let found = components(&all);
/// assert_eq!(diameter(&found[0], &all)?, 3);
/// # Ok::<(), interactome_core::AnalysisError>(())
/// ```
pub fn diameter<V: Vertex>(
    component: &Component<V>,
    distances: &AllPairsDistances<V>,
) -> Result<usize> {
    let mut rows = 0_usize;
    let mut widest = 0_usize;
    for member in component.iter() {
        let Some(map) = distances.from_source(member) else {
            continue;
        };
        rows += 1;
        let eccentricity = map
            .iter()
            .filter(|(target, _)| component.contains(target))
            .map(|(_, hops)| hops)
            .max()
            .unwrap_or(0);
        widest = widest.max(eccentricity);
    }
    if rows == 0 {
        return Err(AnalysisError::EmptyComponent);
    }
    Ok(widest)
}

/// Arithmetic mean of the pairwise distances between members of `component`.
///
/// # Errors
/// Returns [`AnalysisError::EmptyComponent`] when no member has a distance
/// map, and [`AnalysisError::NoPairs`] when the policy leaves nothing to
/// average (a single member under [`SelfDistance::Exclude`]).
///
/// # Examples
/// ```
/// use interactome_core::{
///     Graph, SelfDistance, all_pairs_distances, average_path_length, components,
/// };
///
/// let graph = Graph::from_edges([("A", "B"), ("B", "C"), ("A", "C")]);
/// let all = all_pairs_distances(&graph);
/// let triangle = &components(&all)[0];
/// let included = average_path_length(triangle, &all, SelfDistance::Include)?;
/// let excluded = average_path_length(triangle, &all, SelfDistance::Exclude)?;
/// assert!((included - 6.0 / 9.0).abs() < 1e-12);
/// assert!((excluded - 1.0).abs() < 1e-12);
/// # Ok::<(), interactome_core::AnalysisError>(())
/// ```
pub fn average_path_length<V: Vertex>(
    component: &Component<V>,
    distances: &AllPairsDistances<V>,
    policy: SelfDistance,
) -> Result<f64> {
    let mut rows = 0_usize;
    let mut total = 0_usize;
    let mut pairs = 0_usize;
    for member in component.iter() {
        let Some(map) = distances.from_source(member) else {
            continue;
        };
        rows += 1;
        for (target, hops) in map.iter() {
            if !component.contains(target) {
                continue;
            }
            if policy == SelfDistance::Exclude && target == member {
                continue;
            }
            total += hops;
            pairs += 1;
        }
    }
    if rows == 0 {
        return Err(AnalysisError::EmptyComponent);
    }
    if pairs == 0 {
        return Err(AnalysisError::NoPairs {
            quantity: "average path length",
        });
    }
    Ok(total as f64 / pairs as f64)
}

/// Mean full-graph degree of the members of `component`.
///
/// # Errors
/// Returns [`AnalysisError::EmptyComponent`] when `component` is empty and
/// [`AnalysisError::Graph`] when a member is not in `graph`.
pub fn mean_degree<V: Vertex>(component: &Component<V>, graph: &Graph<V>) -> Result<f64> {
    if component.is_empty() {
        return Err(AnalysisError::EmptyComponent);
    }
    let mut total = 0_usize;
    for member in component.iter() {
        total += graph.degree(member)?;
    }
    Ok(total as f64 / component.len() as f64)
}
