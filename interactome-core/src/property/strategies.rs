//! Random graph fixtures for the property suites.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use test_strategy::Arbitrary;

use crate::{
    graph::Graph,
    small_world::{RewireConfig, rewire, ring_lattice},
};

/// Family a random fixture graph is drawn from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum GraphShape {
    /// Few edges; usually several components and isolated vertices.
    #[weight(3)]
    Sparse,
    /// Roughly half of all vertex pairs connected.
    #[weight(2)]
    Dense,
    /// Two dense blocks with no edges between them.
    #[weight(2)]
    Disconnected,
    /// A ring lattice after random rewiring.
    #[weight(2)]
    RewiredLattice,
}

/// A generated graph with the parameters that produced it.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    pub(super) shape: GraphShape,
    pub(super) seed: u64,
    pub(super) graph: Graph<u32>,
}

pub(super) fn graph_fixture_strategy() -> impl Strategy<Value = GraphFixture> {
    (any::<GraphShape>(), any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        GraphFixture {
            shape,
            seed,
            graph: generate_graph(shape, &mut rng),
        }
    })
}

pub(super) fn generate_graph(shape: GraphShape, rng: &mut SmallRng) -> Graph<u32> {
    match shape {
        GraphShape::Sparse => {
            let order = rng.gen_range(1..=24);
            random_graph(0..order, 0.08, rng)
        }
        GraphShape::Dense => {
            let order = rng.gen_range(2..=14);
            random_graph(0..order, 0.5, rng)
        }
        GraphShape::Disconnected => {
            let split = rng.gen_range(1..=8);
            let order = split + rng.gen_range(1..=8);
            let mut graph = random_graph(0..split, 0.6, rng);
            for (left, right) in random_graph(split..order, 0.6, rng).edges() {
                graph.add_edge(*left, *right);
            }
            for vertex in 0..order {
                graph.add_vertex(vertex);
            }
            graph
        }
        GraphShape::RewiredLattice => {
            let order = rng.gen_range(6..=30_usize);
            let mean_degree = rng.gen_range(2..=4);
            let proportion = rng.gen_range(0.0..0.8);
            match ring_lattice(order, mean_degree)
                .and_then(|lattice| rewire(lattice, proportion, RewireConfig::default(), rng))
            {
                Ok(model) => relabel(model.graph()),
                Err(_) => Graph::new(),
            }
        }
    }
}

fn relabel(graph: &Graph<usize>) -> Graph<u32> {
    let narrow = |vertex: &usize| u32::try_from(*vertex).unwrap_or(u32::MAX);
    let mut relabelled = Graph::new();
    for vertex in graph.vertices() {
        relabelled.add_vertex(narrow(vertex));
    }
    for (left, right) in graph.edges() {
        relabelled.add_edge(narrow(left), narrow(right));
    }
    relabelled
}

fn random_graph(vertices: std::ops::Range<u32>, density: f64, rng: &mut SmallRng) -> Graph<u32> {
    let mut graph = Graph::new();
    for left in vertices.clone() {
        graph.add_vertex(left);
        for right in (left + 1)..vertices.end {
            if rng.gen_bool(density) {
                graph.add_edge(left, right);
            }
        }
    }
    graph
}
