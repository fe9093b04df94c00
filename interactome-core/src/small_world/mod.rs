//! Watts–Strogatz style small-world models.
//!
//! A model starts as a ring lattice over vertices `0..n` and is then
//! perturbed by edge-preserving rewiring: each step removes a uniformly
//! chosen edge and inserts a uniformly chosen absent one. The sweep driver in
//! [`run_sweep`] walks a grid of mean degrees and rewiring proportions.

mod rng;
mod sweep;

use std::num::NonZeroUsize;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::{
    error::SmallWorldError,
    graph::{Graph, Vertex},
};

pub use self::sweep::{
    EMPIRICAL_REFERENCE_PROPORTION, EmpiricalReference, MIN_PROPORTION_STEP, SweepPlan,
    SweepRecord, SweepResult, SweepRow, run_sweep,
};

const DEFAULT_MAX_ATTEMPTS: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(bound) => bound,
    None => NonZeroUsize::MIN,
};

/// Bounds the search for a free vertex pair during each rewiring step.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use interactome_core::RewireConfig;
///
/// let config = RewireConfig::default();
/// assert_eq!(config.max_attempts().get(), 10_000);
///
/// let tight = RewireConfig::new(NonZeroUsize::MIN);
/// assert_eq!(tight.max_attempts().get(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewireConfig {
    max_attempts: NonZeroUsize,
}

impl Default for RewireConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RewireConfig {
    /// Creates a configuration allowing `max_attempts` samples per step.
    #[must_use]
    pub const fn new(max_attempts: NonZeroUsize) -> Self {
        Self { max_attempts }
    }

    /// Maximum vertex-pair samples per rewiring step.
    #[must_use]
    #[rustfmt::skip]
    pub const fn max_attempts(&self) -> NonZeroUsize { self.max_attempts }
}

/// One rewiring step: the edge taken out and the edge put in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeSwap<V: Vertex> {
    /// Edge removed from the graph.
    pub removed: (V, V),
    /// Edge inserted in its place.
    pub added: (V, V),
}

/// A graph after rewiring, with the swaps that produced it in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rewired<V: Vertex> {
    graph: Graph<V>,
    swaps: Vec<EdgeSwap<V>>,
}

impl<V: Vertex> Rewired<V> {
    /// The rewired graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph<V> { &self.graph }

    /// Swaps applied, in order.
    #[must_use]
    #[rustfmt::skip]
    pub fn swaps(&self) -> &[EdgeSwap<V>] { &self.swaps }

    /// Consumes the result, returning the graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn into_graph(self) -> Graph<V> { self.graph }
}

/// Builds the ring lattice on `vertex_count` vertices where each vertex links
/// to its `mean_degree` nearest neighbours by index, wrapping modulo
/// `vertex_count`.
///
/// Offsets alternate `+1, -1, +2, -2, …` for `mean_degree - 1` links. A
/// vertex `i` with `i mod (c + 1) >= (c + 1) / 2` also links forward by
/// `(c + 1) / 2`, which supplies the last link when `mean_degree` is odd and
/// coincides with an existing link when it is even. The result is fully
/// determined by the two parameters.
///
/// # Errors
/// Returns [`SmallWorldError::InvalidLattice`] unless
/// `0 < mean_degree < vertex_count`.
///
/// # Examples
/// ```
/// use interactome_core::ring_lattice;
///
/// let cycle = ring_lattice(6, 2)?;
/// assert_eq!(cycle.edge_count(), 6);
/// assert!(cycle.has_edge(&5, &0));
/// # Ok::<(), interactome_core::SmallWorldError>(())
/// ```
#[instrument(name = "core.small_world.ring_lattice", err)]
pub fn ring_lattice(
    vertex_count: usize,
    mean_degree: usize,
) -> Result<Graph<usize>, SmallWorldError> {
    if mean_degree == 0 || mean_degree >= vertex_count {
        return Err(SmallWorldError::InvalidLattice {
            vertex_count,
            mean_degree,
        });
    }
    let span = mean_degree + 1;
    let half = span / 2;
    let mut graph = Graph::new();
    for vertex in 0..vertex_count {
        graph.add_vertex(vertex);
    }
    for vertex in 0..vertex_count {
        if vertex % span >= half {
            graph.add_edge(vertex, (vertex + half) % vertex_count);
        }
        for link in 0..mean_degree - 1 {
            let offset = link / 2 + 1;
            let neighbour = if link % 2 == 0 {
                (vertex + offset) % vertex_count
            } else {
                (vertex + vertex_count - offset) % vertex_count
            };
            graph.add_edge(vertex, neighbour);
        }
    }
    debug!(edges = graph.edge_count(), "ring lattice built");
    Ok(graph)
}

/// Number of swaps `rewire` performs: `floor(vertex_count * proportion)`.
/// `proportion` is in `[0, 1]`, so the result never exceeds `vertex_count`.
fn rewire_steps(vertex_count: usize, proportion: f64) -> usize {
    (vertex_count as f64 * proportion).floor() as usize
}

/// Rewires `graph` in `floor(n * proportion)` edge-preserving steps.
///
/// Each step removes a uniformly chosen edge, then samples vertex pairs
/// `(j, k)` until `j != k` and `{j, k}` is absent, and inserts that edge. The
/// edge count is unchanged by every step. Connectivity is not preserved;
/// callers check it themselves.
///
/// A proportion yielding zero steps returns the input unchanged.
///
/// # Errors
/// - [`SmallWorldError::InvalidProportion`] when `proportion` lies outside
///   `[0, 1]` or is not finite.
/// - [`SmallWorldError::NoEdgesToRewire`] when steps are due but the graph
///   has no edges.
/// - [`SmallWorldError::RewireExhausted`] when a step draws
///   `config.max_attempts()` pairs without finding a free one.
///
/// # Examples
/// ```
/// use interactome_core::{RewireConfig, rewire, ring_lattice};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let lattice = ring_lattice(6, 2)?;
/// let mut rng = SmallRng::seed_from_u64(88);
/// let rewired = rewire(lattice, 1.0, RewireConfig::default(), &mut rng)?;
/// assert_eq!(rewired.swaps().len(), 6);
/// assert_eq!(rewired.graph().edge_count(), 6);
/// # Ok::<(), interactome_core::SmallWorldError>(())
/// ```
#[instrument(
    name = "core.small_world.rewire",
    err,
    skip(graph, config, rng),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn rewire<V, R>(
    mut graph: Graph<V>,
    proportion: f64,
    config: RewireConfig,
    rng: &mut R,
) -> Result<Rewired<V>, SmallWorldError>
where
    V: Vertex,
    R: Rng + ?Sized,
{
    if !(0.0..=1.0).contains(&proportion) {
        return Err(SmallWorldError::InvalidProportion { proportion });
    }
    let steps = rewire_steps(graph.vertex_count(), proportion);
    if steps == 0 {
        return Ok(Rewired {
            graph,
            swaps: Vec::new(),
        });
    }
    if graph.edge_count() == 0 {
        return Err(SmallWorldError::NoEdgesToRewire);
    }

    let vertices: Vec<V> = graph.vertices().cloned().collect();
    let mut edges: Vec<(V, V)> = graph
        .edges()
        .map(|(left, right)| (left.clone(), right.clone()))
        .collect();
    let mut swaps = Vec::with_capacity(steps);

    for step in 0..steps {
        #[cfg(feature = "metrics")]
        metrics::counter!("interactome_rewire_steps_total").increment(1);

        let removed = edges.swap_remove(rng.gen_range(0..edges.len()));
        graph.remove_edge(&removed.0, &removed.1);
        let added = sample_free_pair(&graph, &vertices, config, rng).ok_or(
            SmallWorldError::RewireExhausted {
                step,
                attempts: config.max_attempts.get(),
            },
        )?;
        graph.add_edge(added.0.clone(), added.1.clone());
        edges.push(added.clone());
        swaps.push(EdgeSwap { removed, added });
    }

    debug!(swaps = swaps.len(), "rewiring completed");
    Ok(Rewired { graph, swaps })
}

fn sample_free_pair<V, R>(
    graph: &Graph<V>,
    vertices: &[V],
    config: RewireConfig,
    rng: &mut R,
) -> Option<(V, V)>
where
    V: Vertex,
    R: Rng + ?Sized,
{
    for _ in 0..config.max_attempts.get() {
        #[cfg(feature = "metrics")]
        metrics::counter!("interactome_rewire_attempts_total").increment(1);

        let left = vertices.get(rng.gen_range(0..vertices.len()))?;
        let right = vertices.get(rng.gen_range(0..vertices.len()))?;
        if left != right && !graph.has_edge(left, right) {
            let pair = if left < right {
                (left.clone(), right.clone())
            } else {
                (right.clone(), left.clone())
            };
            return Some(pair);
        }
    }
    None
}

/// Validated `(n, c)` lattice shape that yields seeded small-world models.
///
/// # Examples
/// ```
/// use interactome_core::SmallWorldGenerator;
///
/// let generator = SmallWorldGenerator::new(20, 6)?;
/// let model = generator.generate(0.2, 88)?;
/// assert_eq!(model.swaps().len(), 4);
/// assert_eq!(model.graph().edge_count(), 60);
/// # Ok::<(), interactome_core::SmallWorldError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SmallWorldGenerator {
    vertex_count: usize,
    mean_degree: usize,
    config: RewireConfig,
}

impl SmallWorldGenerator {
    /// Validates the lattice shape.
    ///
    /// # Errors
    /// Returns [`SmallWorldError::InvalidLattice`] unless
    /// `0 < mean_degree < vertex_count`.
    pub const fn new(vertex_count: usize, mean_degree: usize) -> Result<Self, SmallWorldError> {
        if mean_degree == 0 || mean_degree >= vertex_count {
            return Err(SmallWorldError::InvalidLattice {
                vertex_count,
                mean_degree,
            });
        }
        Ok(Self {
            vertex_count,
            mean_degree,
            config: RewireConfig::new(DEFAULT_MAX_ATTEMPTS),
        })
    }

    /// Overrides the rewiring retry bound.
    #[must_use]
    pub const fn with_rewire_config(mut self, config: RewireConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of lattice vertices.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertex_count }

    /// Lattice mean degree.
    #[must_use]
    #[rustfmt::skip]
    pub const fn mean_degree(&self) -> usize { self.mean_degree }

    /// The unperturbed ring lattice.
    ///
    /// # Errors
    /// Never fails for a validated generator; the signature mirrors
    /// [`ring_lattice`].
    pub fn lattice(&self) -> Result<Graph<usize>, SmallWorldError> {
        ring_lattice(self.vertex_count, self.mean_degree)
    }

    /// Builds the lattice and rewires it with a generator seeded by `seed`.
    ///
    /// # Errors
    /// As for [`rewire`].
    pub fn generate(&self, proportion: f64, seed: u64) -> Result<Rewired<usize>, SmallWorldError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        rewire(self.lattice()?, proportion, self.config, &mut rng)
    }
}

#[cfg(test)]
mod tests;
