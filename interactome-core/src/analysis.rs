//! Whole-network analysis pipeline.
//!
//! [`NetworkAnalyzer::run`] threads one graph through every stage and hands
//! back an owned [`AnalysisReport`]: all-pairs distances, components with
//! their path statistics, and the selected centralities.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, instrument};

use crate::{
    Result,
    builder::CentralityKind,
    centrality::{
        CentralityCalculator, CentralityScores, DegreeConvention, PowerIteration,
        eigenvector_centrality, katz_centrality, pagerank,
    },
    components::{Component, components},
    error::AnalysisError,
    graph::{Graph, Vertex},
    path_stats::{SelfDistance, average_path_length, diameter, mean_degree},
    small_world::EmpiricalReference,
    traversal::{AllPairsDistances, all_pairs_distances},
};

/// Size, diameter, mean degree and average path length of one component.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentSummary<V: Vertex> {
    members: Vec<V>,
    diameter: usize,
    mean_degree: f64,
    average_path_length: Option<f64>,
}

impl<V: Vertex> ComponentSummary<V> {
    fn summarise(
        component: &Component<V>,
        graph: &Graph<V>,
        distances: &AllPairsDistances<V>,
        policy: SelfDistance,
    ) -> Result<Self> {
        let average = match average_path_length(component, distances, policy) {
            Ok(value) => Some(value),
            Err(AnalysisError::NoPairs { .. }) => None,
            Err(other) => return Err(other),
        };
        Ok(Self {
            members: component.iter().cloned().collect(),
            diameter: diameter(component, distances)?,
            mean_degree: mean_degree(component, graph)?,
            average_path_length: average,
        })
    }

    /// Members in ascending order.
    #[must_use]
    #[rustfmt::skip]
    pub fn members(&self) -> &[V] { &self.members }

    /// Number of members.
    #[must_use]
    #[rustfmt::skip]
    pub fn size(&self) -> usize { self.members.len() }

    /// Longest shortest path inside the component.
    #[must_use]
    #[rustfmt::skip]
    pub fn diameter(&self) -> usize { self.diameter }

    /// Mean full-graph degree of the members.
    #[must_use]
    #[rustfmt::skip]
    pub fn mean_degree(&self) -> f64 { self.mean_degree }

    /// Average shortest-path length, or `None` for a singleton when self
    /// distances are excluded.
    #[must_use]
    #[rustfmt::skip]
    pub fn average_path_length(&self) -> Option<f64> { self.average_path_length }
}

/// Everything [`NetworkAnalyzer::run`] learned about one graph.
#[derive(Clone, Debug)]
pub struct AnalysisReport<V: Vertex> {
    vertex_count: usize,
    edge_count: usize,
    distances: AllPairsDistances<V>,
    components: Vec<ComponentSummary<V>>,
    centralities: BTreeMap<CentralityKind, CentralityScores<V>>,
}

impl<V: Vertex> AnalysisReport<V> {
    /// Vertices in the analysed graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Edges in the analysed graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Distance map of every vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn distances(&self) -> &AllPairsDistances<V> { &self.distances }

    /// Component summaries by ascending size, ties by first member.
    #[must_use]
    #[rustfmt::skip]
    pub fn components(&self) -> &[ComponentSummary<V>] { &self.components }

    /// Scores for every computed centrality.
    #[must_use]
    pub fn centralities(&self) -> &BTreeMap<CentralityKind, CentralityScores<V>> {
        &self.centralities
    }

    /// Scores for one centrality, if it was selected.
    #[must_use]
    pub fn centrality(&self, kind: CentralityKind) -> Option<&CentralityScores<V>> {
        self.centralities.get(&kind)
    }

    /// The largest component; the first in summary order on ties.
    #[must_use]
    pub fn largest_component(&self) -> Option<&ComponentSummary<V>> {
        self.components
            .iter()
            .rev()
            .max_by_key(|summary| summary.size())
    }

    /// `(n, c, l)` of the largest component, for parameterising a
    /// comparison sweep. `None` for an empty graph or when the largest
    /// component has no average path length.
    #[must_use]
    pub fn reference(&self) -> Option<EmpiricalReference> {
        let largest = self.largest_component()?;
        Some(EmpiricalReference {
            vertex_count: largest.size(),
            mean_degree: largest.mean_degree(),
            average_path_length: largest.average_path_length()?,
        })
    }
}

/// Runs the analysis pipeline with a fixed configuration.
///
/// Built by [`crate::AnalysisBuilder`].
///
/// # Examples
/// ```
/// use interactome_core::{AnalysisBuilder, CentralityKind, Graph};
///
/// let graph = Graph::from_edges([("A", "B"), ("B", "C"), ("A", "C"), ("D", "E")]);
/// let analyzer = AnalysisBuilder::new()
///     .with_centralities([CentralityKind::Closeness])
///     .build()?;
/// let report = analyzer.run(&graph, None)?;
///
/// let sizes: Vec<_> = report.components().iter().map(|c| c.size()).collect();
/// assert_eq!(sizes, vec![2, 3]);
/// assert_eq!(report.largest_component().map(|c| c.diameter()), Some(1));
/// assert!(report.centrality(CentralityKind::Closeness).is_some());
/// # Ok::<(), interactome_core::AnalysisError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NetworkAnalyzer {
    self_distance: SelfDistance,
    degree_convention: DegreeConvention,
    centralities: BTreeSet<CentralityKind>,
    power_iteration: PowerIteration,
    katz: (f64, f64),
    damping: f64,
}

impl NetworkAnalyzer {
    pub(crate) fn new(
        self_distance: SelfDistance,
        degree_convention: DegreeConvention,
        centralities: BTreeSet<CentralityKind>,
        power_iteration: PowerIteration,
        katz: (f64, f64),
        damping: f64,
    ) -> Self {
        Self {
            self_distance,
            degree_convention,
            centralities,
            power_iteration,
            katz,
            damping,
        }
    }

    /// Returns the self-distance policy.
    #[must_use]
    pub fn self_distance(&self) -> SelfDistance {
        self.self_distance
    }

    /// Returns the degree convention.
    #[must_use]
    pub fn degree_convention(&self) -> DegreeConvention {
        self.degree_convention
    }

    /// Returns the selected centralities.
    #[must_use]
    pub fn centralities(&self) -> &BTreeSet<CentralityKind> {
        &self.centralities
    }

    /// Analyses `graph`. Centralities are scored over `analysed` when given,
    /// otherwise over every vertex; components always cover the whole graph.
    /// Analysed vertices absent from `graph` score zero on every metric.
    ///
    /// # Errors
    /// Propagates [`AnalysisError`] from the path statistics and centrality
    /// stages.
    #[instrument(
        name = "core.analyze",
        err,
        skip(self, graph, analysed),
        fields(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            centralities = self.centralities.len(),
        ),
    )]
    pub fn run<V: Vertex>(
        &self,
        graph: &Graph<V>,
        analysed: Option<&BTreeSet<V>>,
    ) -> Result<AnalysisReport<V>> {
        let distances = all_pairs_distances(graph);
        let mut summaries = components(&distances)
            .iter()
            .map(|component| {
                ComponentSummary::summarise(component, graph, &distances, self.self_distance)
            })
            .collect::<Result<Vec<_>>>()?;
        summaries.sort_by(|left, right| {
            left.size()
                .cmp(&right.size())
                .then_with(|| left.members.first().cmp(&right.members.first()))
        });

        let mut calculator = CentralityCalculator::new(graph, &distances);
        if let Some(subset) = analysed {
            calculator = calculator.with_subset(subset.clone());
        }
        let centralities = self
            .centralities
            .iter()
            .map(|kind| {
                self.score(*kind, graph, &calculator)
                    .map(|scores| (*kind, scores))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        info!(
            components = summaries.len(),
            largest = summaries.last().map_or(0, ComponentSummary::size),
            "analysis completed"
        );
        Ok(AnalysisReport {
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            distances,
            components: summaries,
            centralities,
        })
    }

    fn score<V: Vertex>(
        &self,
        kind: CentralityKind,
        graph: &Graph<V>,
        calculator: &CentralityCalculator<'_, V>,
    ) -> Result<CentralityScores<V>> {
        // Analysed vertices the graph lacks score zero, like the path metrics.
        let restrict = |scores: CentralityScores<V>| -> CentralityScores<V> {
            calculator
                .analysed()
                .iter()
                .map(|vertex| (vertex.clone(), scores.get(vertex).unwrap_or(0.0)))
                .collect()
        };
        match kind {
            CentralityKind::Degree => Ok(calculator.degree(self.degree_convention)),
            CentralityKind::Closeness => Ok(calculator.closeness()),
            CentralityKind::Betweenness => calculator.betweenness(),
            CentralityKind::NeighborCount => Ok(calculator.neighbor_count()),
            CentralityKind::Eigenvector => {
                eigenvector_centrality(graph, self.power_iteration).map(restrict)
            }
            CentralityKind::Katz => {
                let (alpha, beta) = self.katz;
                katz_centrality(graph, alpha, beta, self.power_iteration).map(restrict)
            }
            CentralityKind::PageRank => {
                pagerank(graph, self.damping, self.power_iteration).map(restrict)
            }
        }
    }
}
