//! Canonical-path betweenness.
//!
//! One full [`ParentTrace`] per analysed source reconstructs the canonical
//! shortest path to every analysed destination. Interior vertices of each path
//! are credited once per ordered pair. The per-vertex denominator is the
//! number of finite ordered pairs that do not involve the vertex, which for an
//! undirected graph is `finite_pairs - 2 * reachable(v)`.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    error::Result,
    graph::{Graph, Vertex},
    traversal::{AllPairsDistances, ParentTrace},
};

use super::CentralityScores;

struct SourceTally<V> {
    reachable: usize,
    interior: Vec<V>,
}

pub(super) fn canonical_path_betweenness<V: Vertex>(
    graph: &Graph<V>,
    distances: &AllPairsDistances<V>,
    analysed: &BTreeSet<V>,
) -> Result<CentralityScores<V>> {
    let sources: Vec<&V> = analysed.iter().collect();

    #[cfg(feature = "parallel")]
    let tallies: Vec<SourceTally<V>> = sources
        .par_iter()
        .map(|source| tally_source(graph, distances, analysed, source))
        .collect::<Result<_>>()?;
    #[cfg(not(feature = "parallel"))]
    let tallies: Vec<SourceTally<V>> = sources
        .iter()
        .map(|source| tally_source(graph, distances, analysed, source))
        .collect::<Result<_>>()?;

    let mut finite_pairs = 0_usize;
    let mut through: BTreeMap<&V, usize> = BTreeMap::new();
    let mut reachable: BTreeMap<&V, usize> = BTreeMap::new();
    for (source, tally) in sources.iter().zip(&tallies) {
        finite_pairs += tally.reachable;
        reachable.insert(*source, tally.reachable);
        for vertex in &tally.interior {
            *through.entry(vertex).or_default() += 1;
        }
    }

    Ok(analysed
        .iter()
        .map(|vertex| {
            let involving = 2 * reachable.get(vertex).copied().unwrap_or(0);
            let denominator = finite_pairs.saturating_sub(involving);
            let hits = through.get(vertex).copied().unwrap_or(0);
            let score = if denominator == 0 {
                0.0
            } else {
                hits as f64 / denominator as f64
            };
            (vertex.clone(), score)
        })
        .collect())
}

fn tally_source<V: Vertex>(
    graph: &Graph<V>,
    distances: &AllPairsDistances<V>,
    analysed: &BTreeSet<V>,
    source: &V,
) -> Result<SourceTally<V>> {
    let mut tally = SourceTally {
        reachable: 0,
        interior: Vec::new(),
    };
    let Some(map) = distances.from_source(source) else {
        return Ok(tally);
    };
    let trace = ParentTrace::full(graph, source)?;
    for destination in map.reachable() {
        if destination == source || !analysed.contains(destination) {
            continue;
        }
        tally.reachable += 1;
        let Some(path) = trace.reconstruct(destination) else {
            continue;
        };
        let interior = path
            .iter()
            .skip(1)
            .take(path.len().saturating_sub(2))
            .filter(|vertex| analysed.contains(*vertex))
            .cloned();
        tally.interior.extend(interior);
    }
    Ok(tally)
}
