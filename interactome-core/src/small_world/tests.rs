//! Unit tests for lattice construction, rewiring and sweeps.

use std::num::NonZeroUsize;

use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use crate::{
    components::components,
    error::{AnalysisError, SmallWorldError},
    graph::Graph,
    traversal::all_pairs_distances,
};

use super::{
    EMPIRICAL_REFERENCE_PROPORTION, EmpiricalReference, MIN_PROPORTION_STEP, RewireConfig,
    SmallWorldGenerator, SweepPlan, rewire, ring_lattice, run_sweep,
};

fn seeded() -> SmallRng {
    SmallRng::seed_from_u64(88)
}

#[test]
fn ring_lattice_twenty_by_six_is_regular_and_connected() {
    let lattice = ring_lattice(20, 6).expect("valid lattice");
    assert_eq!(lattice.vertex_count(), 20);
    assert_eq!(lattice.edge_count(), 60);
    for vertex in lattice.vertices() {
        assert_eq!(lattice.degree(vertex).expect("vertex exists"), 6);
    }
    assert_eq!(components(&all_pairs_distances(&lattice)).len(), 1);
}

#[test]
fn ring_lattice_six_by_two_is_a_cycle() {
    let lattice = ring_lattice(6, 2).expect("valid lattice");
    let expected = Graph::from_edges((0..6).map(|vertex| (vertex, (vertex + 1) % 6)));
    assert_eq!(lattice, expected);
}

#[rstest]
#[case::odd_divisible(12, 5)]
#[case::odd_ragged(76, 5)]
#[case::even(76, 6)]
fn ring_lattice_degrees_stay_within_one_of_mean(
    #[case] vertex_count: usize,
    #[case] mean_degree: usize,
) {
    let lattice = ring_lattice(vertex_count, mean_degree).expect("valid lattice");
    for vertex in lattice.vertices() {
        let degree = lattice.degree(vertex).expect("vertex exists");
        assert!(degree.abs_diff(mean_degree) <= 1, "vertex {vertex} has degree {degree}");
    }
    assert_eq!(components(&all_pairs_distances(&lattice)).len(), 1);
}

#[test]
fn odd_lattice_on_multiple_of_span_is_exactly_regular() {
    let lattice = ring_lattice(12, 5).expect("valid lattice");
    assert!(
        lattice
            .vertices()
            .all(|vertex| lattice.degree(vertex).ok() == Some(5))
    );
}

#[rstest]
#[case::zero_degree(10, 0)]
#[case::degree_equals_size(6, 6)]
#[case::degree_exceeds_size(3, 8)]
#[case::empty(0, 1)]
fn ring_lattice_rejects_impossible_shapes(#[case] vertex_count: usize, #[case] mean_degree: usize) {
    let err = ring_lattice(vertex_count, mean_degree).expect_err("shape is invalid");
    assert_eq!(
        err,
        SmallWorldError::InvalidLattice {
            vertex_count,
            mean_degree,
        }
    );
    assert_eq!(err.code().as_str(), "SMALL_WORLD_INVALID_LATTICE");
}

#[test]
fn rewire_with_zero_proportion_is_identity() {
    let lattice = ring_lattice(20, 6).expect("valid lattice");
    let rewired =
        rewire(lattice.clone(), 0.0, RewireConfig::default(), &mut seeded()).expect("rewire runs");
    assert!(rewired.swaps().is_empty());
    assert_eq!(rewired.graph(), &lattice);
}

#[test]
fn rewire_below_one_step_is_identity() {
    let lattice = ring_lattice(6, 2).expect("valid lattice");
    let rewired = rewire(lattice.clone(), 0.1, RewireConfig::default(), &mut seeded())
        .expect("rewire runs");
    assert_eq!(rewired.into_graph(), lattice);
}

#[test]
fn rewiring_a_cycle_fully_swaps_six_times() {
    let lattice = ring_lattice(6, 2).expect("valid lattice");
    let rewired =
        rewire(lattice, 1.0, RewireConfig::default(), &mut seeded()).expect("rewire runs");
    assert_eq!(rewired.swaps().len(), 6);
    assert_eq!(rewired.graph().edge_count(), 6);
    for swap in rewired.swaps() {
        assert_ne!(swap.added.0, swap.added.1);
    }
}

#[test]
fn swaps_replay_onto_the_lattice() {
    let lattice = ring_lattice(20, 4).expect("valid lattice");
    let rewired =
        rewire(lattice.clone(), 0.5, RewireConfig::default(), &mut seeded()).expect("rewire runs");
    let mut replay = lattice;
    for swap in rewired.swaps() {
        assert!(replay.remove_edge(&swap.removed.0, &swap.removed.1));
        assert!(replay.add_edge(swap.added.0, swap.added.1));
        assert_eq!(replay.edge_count(), 40);
    }
    assert_eq!(&replay, rewired.graph());
}

#[test]
fn rewiring_is_reproducible_for_a_seed() {
    let generator = SmallWorldGenerator::new(30, 4).expect("valid shape");
    let first = generator.generate(0.4, 7).expect("rewire runs");
    let second = generator.generate(0.4, 7).expect("rewire runs");
    assert_eq!(first, second);
}

#[rstest]
#[case::negative(-0.1)]
#[case::nan(f64::NAN)]
#[case::infinite(f64::INFINITY)]
#[case::above_one(1.5)]
#[case::huge(1.0e300)]
fn rewire_rejects_bad_proportions(#[case] proportion: f64) {
    let lattice = ring_lattice(6, 2).expect("valid lattice");
    let err = rewire(lattice, proportion, RewireConfig::default(), &mut seeded())
        .expect_err("proportion is invalid");
    assert!(matches!(err, SmallWorldError::InvalidProportion { .. }));
}

#[test]
fn rewire_without_edges_is_rejected() {
    let mut graph = Graph::new();
    for vertex in 0..4 {
        graph.add_vertex(vertex);
    }
    let err = rewire(graph, 1.0, RewireConfig::default(), &mut seeded())
        .expect_err("nothing to rewire");
    assert_eq!(err, SmallWorldError::NoEdgesToRewire);
}

#[test]
fn saturated_graph_exhausts_tight_retry_bound() {
    // In K8 only the removed edge is free, so a single sample rarely finds it;
    // across eight steps one of them must miss.
    let complete = Graph::from_edges(
        (0..8).flat_map(|left| ((left + 1)..8).map(move |right| (left, right))),
    );
    let config = RewireConfig::new(NonZeroUsize::MIN);
    let err = rewire(complete, 1.0, config, &mut seeded()).expect_err("sampling must miss");
    assert!(matches!(err, SmallWorldError::RewireExhausted { attempts: 1, .. }));
}

#[test]
fn stepped_proportions_stop_below_one() {
    let proportions = SweepPlan::stepped_proportions(0.1).expect("valid step");
    assert_eq!(proportions.len(), 10);
    assert_eq!(proportions.first().copied(), Some(0.0));
    assert!(proportions.iter().all(|proportion| *proportion < 1.0));
}

#[rstest]
#[case(0.0)]
#[case(-0.5)]
#[case(1.5)]
#[case(f64::NAN)]
#[case(1.0e-12)]
fn stepped_proportions_reject_bad_steps(#[case] step: f64) {
    assert!(SweepPlan::stepped_proportions(step).is_err());
}

#[test]
fn smallest_step_is_accepted() {
    let proportions =
        SweepPlan::stepped_proportions(MIN_PROPORTION_STEP).expect("boundary step is valid");
    assert_eq!(proportions.len(), 1_000_000);
}

#[test]
fn sweep_yields_one_record_per_cell_in_plan_order() {
    let plan = SweepPlan::new(24, 4..=5, vec![0.0, 0.2, 0.4], 88);
    let result = run_sweep(&plan, RewireConfig::default()).expect("sweep runs");
    let cells: Vec<(usize, f64)> = result
        .records()
        .iter()
        .map(|record| (record.mean_degree, record.rewire_proportion))
        .collect();
    assert_eq!(
        cells,
        vec![(4, 0.0), (4, 0.2), (4, 0.4), (5, 0.0), (5, 0.2), (5, 0.4)]
    );
    assert!(
        result
            .records()
            .iter()
            .all(|record| record.average_path_length > 0.0)
    );
}

#[test]
fn sweep_is_reproducible_for_a_seed() {
    let plan = SweepPlan::new(24, 4..=4, vec![0.3, 0.6], 5);
    let first = run_sweep(&plan, RewireConfig::default()).expect("sweep runs");
    let second = run_sweep(&plan, RewireConfig::default()).expect("sweep runs");
    assert_eq!(first, second);
}

#[test]
fn unrewired_lattice_path_length_shrinks_with_degree() {
    let plan = SweepPlan::new(30, 2..=6, vec![0.0], 1);
    let result = run_sweep(&plan, RewireConfig::default()).expect("sweep runs");
    let lengths: Vec<f64> = result
        .records()
        .iter()
        .map(|record| record.average_path_length)
        .collect();
    assert!(lengths.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(result.disconnected_count(), 0);
}

#[test]
fn sweep_propagates_invalid_lattices() {
    let plan = SweepPlan::new(5, 4..=5, vec![0.0], 1);
    let err = run_sweep(&plan, RewireConfig::default()).expect_err("degree 5 is too large");
    assert_eq!(
        err,
        SmallWorldError::InvalidLattice {
            vertex_count: 5,
            mean_degree: 5,
        }
    );
}

#[test]
fn rows_lead_with_the_reference() {
    let reference = EmpiricalReference {
        vertex_count: 76,
        mean_degree: 5.4,
        average_path_length: 3.5,
    };
    let plan = SweepPlan::bounding(&reference, vec![0.0], 88);
    let result = run_sweep(&plan, RewireConfig::default())
        .expect("sweep runs")
        .with_reference(reference);
    let rows = result.rows();
    assert_eq!(rows.len(), 3);
    let first = rows.first().expect("reference row");
    assert_eq!(first.rewire_proportion, EMPIRICAL_REFERENCE_PROPORTION);
    assert!((first.scaled_path_length(76) - 5.4 * 3.5 / 76.0).abs() < 1e-12);
    assert!((first.scaled_proportion(76) - 76.0 * 5.4 * 0.5).abs() < 1e-9);
}

#[test]
fn analysis_failures_keep_their_code() {
    let err = SmallWorldError::from(AnalysisError::EmptyComponent);
    assert_eq!(err.code().as_str(), "SMALL_WORLD_ANALYSIS_FAILURE");
    assert_eq!(
        err.analysis_code().map(|code| code.as_str()),
        Some("ANALYSIS_EMPTY_COMPONENT")
    );
}
