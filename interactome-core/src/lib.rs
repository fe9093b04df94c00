//! Interactome core library.
//!
//! Breadth-first distance analysis of undirected interaction networks:
//! connected components, diameters and average path lengths, vertex
//! centralities, and ring-lattice small-world models for comparison.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analysis;
mod builder;
mod centrality;
mod components;
mod error;
mod graph;
mod path_stats;
#[cfg(test)]
mod property;
mod small_world;
#[cfg(test)]
mod test_utils;
mod traversal;

pub use crate::{
    analysis::{AnalysisReport, ComponentSummary, NetworkAnalyzer},
    builder::{AnalysisBuilder, CentralityKind},
    centrality::{
        CentralityCalculator, CentralityScores, DegreeConvention, PowerIteration,
        eigenvector_centrality, katz_centrality, pagerank,
    },
    components::{Component, components, largest_component},
    error::{
        AnalysisError, AnalysisErrorCode, GraphError, GraphErrorCode, Result, SmallWorldError,
        SmallWorldErrorCode,
    },
    graph::{Graph, Vertex},
    path_stats::{SelfDistance, average_path_length, diameter, mean_degree},
    small_world::{
        EMPIRICAL_REFERENCE_PROPORTION, EdgeSwap, EmpiricalReference, MIN_PROPORTION_STEP,
        RewireConfig, Rewired, SmallWorldGenerator, SweepPlan, SweepRecord, SweepResult, SweepRow,
        rewire, ring_lattice, run_sweep,
    },
    traversal::{
        AllPairsDistances, DistanceMap, ParentTrace, all_pairs_distances, distances_from,
        shortest_path,
    },
};
