//! Unit tests for the centrality calculator and power-iteration metrics.

use std::collections::BTreeSet;

use rstest::{fixture, rstest};

use crate::{
    error::AnalysisError,
    graph::Graph,
    traversal::{AllPairsDistances, all_pairs_distances},
};

use super::{
    CentralityCalculator, CentralityScores, DegreeConvention, PowerIteration,
    eigenvector_centrality, katz_centrality, pagerank,
};

struct Analysed<V: crate::graph::Vertex> {
    graph: Graph<V>,
    distances: AllPairsDistances<V>,
}

impl<V: crate::graph::Vertex> Analysed<V> {
    fn new(graph: Graph<V>) -> Self {
        let distances = all_pairs_distances(&graph);
        Self { graph, distances }
    }

    fn calculator(&self) -> CentralityCalculator<'_, V> {
        CentralityCalculator::new(&self.graph, &self.distances)
    }
}

#[fixture]
fn scenario() -> Analysed<&'static str> {
    let mut graph = Graph::from_edges([("A", "B"), ("B", "C"), ("A", "C"), ("D", "E")]);
    graph.add_vertex("F");
    Analysed::new(graph)
}

#[fixture]
fn diamond() -> Analysed<u32> {
    Analysed::new(Graph::from_edges([(0, 1), (0, 2), (1, 3), (2, 3)]))
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let value = actual.expect("vertex must be scored");
    assert!(
        (value - expected).abs() < 1e-12,
        "expected {expected}, got {value}"
    );
}

#[rstest]
#[case::raw(DegreeConvention::Raw, 2.0, 1.0)]
#[case::normalized(DegreeConvention::Normalized, 2.0 / 5.0, 1.0 / 5.0)]
fn degree_counts_distinct_neighbours(
    scenario: Analysed<&'static str>,
    #[case] convention: DegreeConvention,
    #[case] triangle: f64,
    #[case] pair: f64,
) {
    let scores = scenario.calculator().degree(convention);
    assert_eq!(scores.len(), 6);
    assert_close(scores.get(&"A"), triangle);
    assert_close(scores.get(&"D"), pair);
    assert_close(scores.get(&"F"), 0.0);
}

#[rstest]
fn neighbor_count_matches_raw_degree(scenario: Analysed<&'static str>) {
    let calculator = scenario.calculator();
    assert_eq!(
        calculator.neighbor_count(),
        calculator.degree(DegreeConvention::Raw)
    );
}

#[rstest]
fn closeness_ignores_unreachable_pairs(scenario: Analysed<&'static str>) {
    let scores = scenario.calculator().closeness();
    assert_close(scores.get(&"A"), 2.0);
    assert_close(scores.get(&"D"), 1.0);
    assert_close(scores.get(&"F"), 0.0);
}

#[rstest]
fn betweenness_of_isolated_and_clique_vertices_is_zero(scenario: Analysed<&'static str>) {
    let scores = scenario.calculator().betweenness().expect("betweenness runs");
    for vertex in ["A", "B", "C", "D", "E", "F"] {
        assert_close(scores.get(&vertex), 0.0);
    }
}

#[test]
fn betweenness_credits_path_midpoint() {
    let path = Analysed::new(Graph::from_edges([("A", "B"), ("B", "C")]));
    let scores = path.calculator().betweenness().expect("betweenness runs");
    assert_close(scores.get(&"B"), 1.0);
    assert_close(scores.get(&"A"), 0.0);
    assert_close(scores.get(&"C"), 0.0);
}

#[rstest]
fn betweenness_follows_one_canonical_path(diamond: Analysed<u32>) {
    // Both 1 and 2 sit on a shortest 0-3 route, but only the canonical route
    // through 1 is credited.
    let scores = diamond.calculator().betweenness().expect("betweenness runs");
    assert_close(scores.get(&1), 2.0 / 6.0);
    assert_close(scores.get(&2), 0.0);
}

#[rstest]
fn betweenness_stays_within_unit_interval(diamond: Analysed<u32>) {
    let scores = diamond.calculator().betweenness().expect("betweenness runs");
    assert!(scores.iter().all(|(_, score)| (0.0..=1.0).contains(&score)));
}

#[rstest]
#[case::empty(&[])]
#[case::single(&["A"])]
fn trivial_subsets_yield_empty_scores(
    scenario: Analysed<&'static str>,
    #[case] members: &[&'static str],
) {
    let subset: BTreeSet<_> = members.iter().copied().collect();
    let calculator = scenario.calculator().with_subset(subset);
    assert!(calculator.closeness().is_empty());
    assert!(calculator.betweenness().expect("betweenness runs").is_empty());
}

#[rstest]
fn subset_members_outside_the_graph_score_zero(scenario: Analysed<&'static str>) {
    let subset: BTreeSet<_> = ["A", "B", "GHOST"].into_iter().collect();
    let calculator = scenario.calculator().with_subset(subset);
    let closeness = calculator.closeness();
    assert_eq!(closeness.len(), 3);
    assert_close(closeness.get(&"GHOST"), 0.0);
    assert_close(closeness.get(&"A"), 1.0);
    let degree = calculator.degree(DegreeConvention::Normalized);
    assert_close(degree.get(&"A"), 1.0);
    assert_close(degree.get(&"GHOST"), 0.0);
}

#[test]
fn centralization_sums_gaps_to_peak() {
    let scores: CentralityScores<u8> = [(1, 3.0), (2, 1.0), (3, 2.0)].into_iter().collect();
    assert_close(Some(scores.centralization()), 3.0);
    assert_close(Some(scores.total()), 6.0);
    assert_eq!(scores.max(), Some(3.0));
    assert_eq!(CentralityScores::<u8>::default().centralization(), 0.0);
}

#[test]
fn pagerank_is_uniform_on_a_cycle() {
    let cycle = Graph::from_edges((0..5).map(|index| (index, (index + 1) % 5)));
    let scores = pagerank(&cycle, 0.85, PowerIteration::default()).expect("pagerank converges");
    for vertex in 0..5 {
        let value = scores.get(&vertex).expect("vertex scored");
        assert!((value - 0.2).abs() < 1e-6);
    }
}

#[test]
fn eigenvector_ranks_star_centre_first() {
    let star = Graph::from_edges([(0, 1), (0, 2), (0, 3), (0, 4)]);
    let scores = eigenvector_centrality(&star, PowerIteration::default()).expect("converges");
    let centre = scores.get(&0).expect("centre scored");
    let leaf = scores.get(&1).expect("leaf scored");
    assert!(centre > leaf);
    let norm: f64 = scores.iter().map(|(_, score)| score * score).sum();
    assert!((norm - 1.0).abs() < 1e-9);
}

#[test]
fn katz_rejects_non_positive_alpha() {
    let graph = Graph::from_edges([(0, 1)]);
    let err = katz_centrality(&graph, 0.0, 1.0, PowerIteration::default())
        .expect_err("alpha must be positive");
    assert!(matches!(err, AnalysisError::InvalidParameter { name: "alpha", .. }));
}

#[test]
fn katz_scores_hubs_higher() {
    let star = Graph::from_edges([(0, 1), (0, 2), (0, 3)]);
    let scores =
        katz_centrality(&star, 0.03, 1.0, PowerIteration::default()).expect("katz converges");
    assert!(scores.get(&0) > scores.get(&1));
}

#[test]
fn exhausted_budget_reports_non_convergence() {
    let path = Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 4)]);
    let params = PowerIteration::new(1, 1.0e-12).expect("parameters are valid");
    let err = eigenvector_centrality(&path, params).expect_err("one sweep cannot converge");
    assert_eq!(
        err,
        AnalysisError::NotConverged {
            metric: "eigenvector centrality",
            iterations: 1,
        }
    );
}

#[rstest]
#[case(0, 1.0e-6, "max_iterations")]
#[case(10, 0.0, "tolerance")]
#[case(10, f64::NAN, "tolerance")]
fn power_iteration_rejects_bad_parameters(
    #[case] max_iterations: usize,
    #[case] tolerance: f64,
    #[case] expected: &str,
) {
    let err = PowerIteration::new(max_iterations, tolerance).expect_err("parameters invalid");
    assert!(matches!(err, AnalysisError::InvalidParameter { name, .. } if name == expected));
}
