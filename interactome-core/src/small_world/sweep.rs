//! Grid sweep over lattice mean degree and rewiring proportion.
//!
//! Each `(mean_degree, proportion)` cell gets its own generator derived from
//! the plan seed and the cell's position in the grid, so results do not
//! depend on the order in which cells are evaluated.

use std::ops::RangeInclusive;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::{
    components::{components, largest_component},
    error::{AnalysisError, SmallWorldError},
    graph::Graph,
    path_stats::{SelfDistance, average_path_length},
    traversal::all_pairs_distances,
};

use super::{RewireConfig, rewire, ring_lattice, rng::stream_rng};

/// Proportion assigned to the empirical reference row so it sits mid-plot.
pub const EMPIRICAL_REFERENCE_PROPORTION: f64 = 0.5;

/// Smallest step [`SweepPlan::stepped_proportions`] accepts; caps the grid at
/// one million proportions.
pub const MIN_PROPORTION_STEP: f64 = 1.0e-6;

/// Largest-component figures of an observed network, used to place a
/// comparison sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmpiricalReference {
    /// Number of vertices in the largest component.
    pub vertex_count: usize,
    /// Mean full-graph degree of those vertices.
    pub mean_degree: f64,
    /// Average shortest-path length within the component.
    pub average_path_length: f64,
}

/// The grid a sweep evaluates.
///
/// # Examples
/// ```
/// use interactome_core::SweepPlan;
///
/// let proportions = SweepPlan::stepped_proportions(0.25)?;
/// assert_eq!(proportions, vec![0.0, 0.25, 0.5, 0.75]);
///
/// let plan = SweepPlan::new(30, 4..=5, proportions, 88);
/// assert_eq!(plan.instance_count(), 8);
/// # Ok::<(), interactome_core::SmallWorldError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SweepPlan {
    vertex_count: usize,
    mean_degrees: RangeInclusive<usize>,
    proportions: Vec<f64>,
    seed: u64,
    self_distance: SelfDistance,
}

impl SweepPlan {
    /// Creates a plan over every mean degree in `mean_degrees` crossed with
    /// every proportion.
    #[must_use]
    pub fn new(
        vertex_count: usize,
        mean_degrees: RangeInclusive<usize>,
        proportions: Vec<f64>,
        seed: u64,
    ) -> Self {
        Self {
            vertex_count,
            mean_degrees,
            proportions,
            seed,
            self_distance: SelfDistance::default(),
        }
    }

    /// Brackets an observed network: `n` is the reference component size and
    /// the mean degrees run from `floor(c)` to `ceil(c)`.
    ///
    /// # Examples
    /// ```
    /// use interactome_core::{EmpiricalReference, SweepPlan};
    ///
    /// let reference = EmpiricalReference {
    ///     vertex_count: 76,
    ///     mean_degree: 5.39,
    ///     average_path_length: 3.51,
    /// };
    /// let plan = SweepPlan::bounding(&reference, vec![0.0], 88);
    /// assert_eq!(plan.vertex_count(), 76);
    /// assert_eq!(plan.mean_degrees(), &(5..=6));
    /// ```
    #[must_use]
    pub fn bounding(reference: &EmpiricalReference, proportions: Vec<f64>, seed: u64) -> Self {
        let low = reference.mean_degree.floor() as usize;
        let high = reference.mean_degree.ceil() as usize;
        Self::new(reference.vertex_count, low..=high, proportions, seed)
    }

    /// Proportions `0, step, 2·step, …` strictly below one.
    ///
    /// # Errors
    /// Returns [`SmallWorldError::InvalidProportion`] unless `step` lies in
    /// `[MIN_PROPORTION_STEP, 1]`.
    pub fn stepped_proportions(step: f64) -> Result<Vec<f64>, SmallWorldError> {
        if !(MIN_PROPORTION_STEP..=1.0).contains(&step) {
            return Err(SmallWorldError::InvalidProportion { proportion: step });
        }
        Ok((0_u32..)
            .map(|index| f64::from(index) * step)
            .take_while(|proportion| *proportion < 1.0 - 1.0e-9)
            .collect())
    }

    /// Selects the self-distance policy for the average path length.
    #[must_use]
    pub fn with_self_distance(mut self, policy: SelfDistance) -> Self {
        self.self_distance = policy;
        self
    }

    /// Lattice size.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Mean degrees swept.
    #[must_use]
    #[rustfmt::skip]
    pub fn mean_degrees(&self) -> &RangeInclusive<usize> { &self.mean_degrees }

    /// Rewiring proportions swept.
    #[must_use]
    #[rustfmt::skip]
    pub fn proportions(&self) -> &[f64] { &self.proportions }

    /// Base seed.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// Number of models the plan generates.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.mean_degrees.clone().count() * self.proportions.len()
    }
}

/// Measurements of one generated model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepRecord {
    /// Lattice mean degree.
    pub mean_degree: usize,
    /// Average shortest-path length of the largest component.
    pub average_path_length: f64,
    /// Rewiring proportion applied to the lattice.
    pub rewire_proportion: f64,
    /// Number of connected components after rewiring.
    pub component_count: usize,
}

impl SweepRecord {
    /// Returns `true` when rewiring split the model.
    #[must_use]
    pub const fn is_disconnected(&self) -> bool {
        self.component_count > 1
    }
}

/// A `(c, l, p)` row ready for tabulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepRow {
    /// Mean degree `c`.
    pub mean_degree: f64,
    /// Average path length `l`.
    pub average_path_length: f64,
    /// Rewiring proportion `p`.
    pub rewire_proportion: f64,
}

impl SweepRow {
    /// `c · l / n`.
    #[must_use]
    pub fn scaled_path_length(&self, vertex_count: usize) -> f64 {
        self.mean_degree * self.average_path_length / vertex_count as f64
    }

    /// `n · c · p`, the expected number of shortcuts.
    #[must_use]
    pub fn scaled_proportion(&self, vertex_count: usize) -> f64 {
        vertex_count as f64 * self.mean_degree * self.rewire_proportion
    }
}

/// Records from a sweep plus the optional empirical row.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepResult {
    vertex_count: usize,
    reference: Option<EmpiricalReference>,
    records: Vec<SweepRecord>,
}

impl SweepResult {
    /// Attaches the empirical reference row.
    #[must_use]
    pub fn with_reference(mut self, reference: EmpiricalReference) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Lattice size of every record.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// The empirical reference, if attached.
    #[must_use]
    #[rustfmt::skip]
    pub fn reference(&self) -> Option<&EmpiricalReference> { self.reference.as_ref() }

    /// Generated-model records in plan order.
    #[must_use]
    #[rustfmt::skip]
    pub fn records(&self) -> &[SweepRecord] { &self.records }

    /// Number of records whose model was disconnected.
    #[must_use]
    pub fn disconnected_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.is_disconnected())
            .count()
    }

    /// Rows for tabulation: the reference first (at
    /// [`EMPIRICAL_REFERENCE_PROPORTION`]), then every record.
    #[must_use]
    pub fn rows(&self) -> Vec<SweepRow> {
        let reference = self.reference.iter().map(|reference| SweepRow {
            mean_degree: reference.mean_degree,
            average_path_length: reference.average_path_length,
            rewire_proportion: EMPIRICAL_REFERENCE_PROPORTION,
        });
        let generated = self.records.iter().map(|record| SweepRow {
            mean_degree: record.mean_degree as f64,
            average_path_length: record.average_path_length,
            rewire_proportion: record.rewire_proportion,
        });
        reference.chain(generated).collect()
    }
}

struct Instance<'a> {
    stream: usize,
    mean_degree: usize,
    proportion: f64,
    lattice: &'a Graph<usize>,
}

/// Generates and measures every model in `plan`.
///
/// A model that rewiring splits into several components is measured on its
/// largest component, logged at `warn` and kept.
///
/// # Errors
/// Returns [`SmallWorldError::InvalidLattice`] for an unusable mean degree,
/// any rewiring error, and [`SmallWorldError::Analysis`] when a model has no
/// measurable component.
///
/// # Examples
/// ```
/// use interactome_core::{RewireConfig, SweepPlan, run_sweep};
///
/// let plan = SweepPlan::new(20, 4..=4, vec![0.0, 0.5], 88);
/// let result = run_sweep(&plan, RewireConfig::default())?;
/// assert_eq!(result.records().len(), 2);
/// assert_eq!(result.records()[0].component_count, 1);
/// # Ok::<(), interactome_core::SmallWorldError>(())
/// ```
#[instrument(
    name = "core.small_world.sweep",
    err,
    skip(plan, config),
    fields(
        vertices = plan.vertex_count,
        instances = plan.instance_count(),
        seed = plan.seed,
    ),
)]
pub fn run_sweep(plan: &SweepPlan, config: RewireConfig) -> Result<SweepResult, SmallWorldError> {
    let lattices = plan
        .mean_degrees
        .clone()
        .map(|mean_degree| {
            ring_lattice(plan.vertex_count, mean_degree).map(|graph| (mean_degree, graph))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let instances: Vec<Instance<'_>> = lattices
        .iter()
        .flat_map(|(mean_degree, lattice)| {
            plan.proportions
                .iter()
                .map(move |proportion| (*mean_degree, *proportion, lattice))
        })
        .enumerate()
        .map(|(stream, (mean_degree, proportion, lattice))| Instance {
            stream,
            mean_degree,
            proportion,
            lattice,
        })
        .collect();

    #[cfg(feature = "parallel")]
    let records = instances
        .par_iter()
        .map(|instance| measure(plan, config, instance))
        .collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let records = instances
        .iter()
        .map(|instance| measure(plan, config, instance))
        .collect::<Result<Vec<_>, _>>()?;

    let result = SweepResult {
        vertex_count: plan.vertex_count,
        reference: None,
        records,
    };
    info!(
        records = result.records.len(),
        disconnected = result.disconnected_count(),
        "sweep completed"
    );
    Ok(result)
}

fn measure(
    plan: &SweepPlan,
    config: RewireConfig,
    instance: &Instance<'_>,
) -> Result<SweepRecord, SmallWorldError> {
    let mut rng = stream_rng(plan.seed, instance.stream);
    let model = rewire(instance.lattice.clone(), instance.proportion, config, &mut rng)?;
    let distances = all_pairs_distances(model.graph());
    let found = components(&distances);
    let largest = largest_component(&found).ok_or(AnalysisError::EmptyComponent)?;
    let average = average_path_length(largest, &distances, plan.self_distance)?;
    if found.len() > 1 {
        warn!(
            mean_degree = instance.mean_degree,
            proportion = instance.proportion,
            components = found.len(),
            "rewired model is disconnected; measuring its largest component"
        );
    }
    Ok(SweepRecord {
        mean_degree: instance.mean_degree,
        average_path_length: average,
        rewire_proportion: instance.proportion,
        component_count: found.len(),
    })
}
