use std::sync::Arc;

use interactome_core::{
    AnalysisError, AnalysisErrorCode, GraphError, GraphErrorCode, SmallWorldError,
    SmallWorldErrorCode,
};
use rstest::rstest;

#[rstest]
fn returns_expected_graph_code() {
    let error = GraphError::VertexNotFound {
        vertex: Arc::from("TP53"),
    };
    assert_eq!(error.code(), GraphErrorCode::VertexNotFound);
    assert_eq!(error.code().as_str(), "GRAPH_VERTEX_NOT_FOUND");
    assert_eq!(error.to_string(), "vertex `TP53` is not in the graph");
}

#[rstest]
#[case(AnalysisError::EmptyComponent, AnalysisErrorCode::EmptyComponent, None)]
#[case(
    AnalysisError::NoPairs { quantity: "average path length" },
    AnalysisErrorCode::NoPairs,
    None,
)]
#[case(
    AnalysisError::NotConverged { metric: "pagerank", iterations: 100 },
    AnalysisErrorCode::NotConverged,
    None,
)]
#[case(
    AnalysisError::InvalidParameter { name: "damping", reason: "must lie in [0, 1)" },
    AnalysisErrorCode::InvalidParameter,
    None,
)]
#[case(
    AnalysisError::Graph(GraphError::VertexNotFound { vertex: Arc::from("X") }),
    AnalysisErrorCode::GraphFailure,
    Some(GraphErrorCode::VertexNotFound),
)]
fn returns_expected_analysis_code(
    #[case] error: AnalysisError,
    #[case] expected: AnalysisErrorCode,
    #[case] graph: Option<GraphErrorCode>,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.graph_code(), graph);
}

#[rstest]
#[case(
    SmallWorldError::InvalidLattice { vertex_count: 4, mean_degree: 4 },
    SmallWorldErrorCode::InvalidLattice,
)]
#[case(
    SmallWorldError::InvalidProportion { proportion: -1.0 },
    SmallWorldErrorCode::InvalidProportion,
)]
#[case(SmallWorldError::NoEdgesToRewire, SmallWorldErrorCode::NoEdgesToRewire)]
#[case(
    SmallWorldError::RewireExhausted { step: 3, attempts: 10_000 },
    SmallWorldErrorCode::RewireExhausted,
)]
#[case(
    SmallWorldError::Analysis(AnalysisError::EmptyComponent),
    SmallWorldErrorCode::AnalysisFailure,
)]
fn returns_expected_small_world_code(
    #[case] error: SmallWorldError,
    #[case] expected: SmallWorldErrorCode,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().to_string(), expected.as_str());
}

#[rstest]
fn error_codes_are_unique() {
    let codes = [
        GraphErrorCode::VertexNotFound.as_str(),
        AnalysisErrorCode::EmptyComponent.as_str(),
        AnalysisErrorCode::NoPairs.as_str(),
        AnalysisErrorCode::NotConverged.as_str(),
        AnalysisErrorCode::InvalidParameter.as_str(),
        AnalysisErrorCode::GraphFailure.as_str(),
        SmallWorldErrorCode::InvalidLattice.as_str(),
        SmallWorldErrorCode::InvalidProportion.as_str(),
        SmallWorldErrorCode::NoEdgesToRewire.as_str(),
        SmallWorldErrorCode::RewireExhausted.as_str(),
        SmallWorldErrorCode::AnalysisFailure.as_str(),
    ];
    let unique: std::collections::BTreeSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), codes.len());
}

#[rstest]
fn rewire_exhaustion_message_names_the_step() {
    let error = SmallWorldError::RewireExhausted {
        step: 7,
        attempts: 50,
    };
    assert_eq!(
        error.to_string(),
        "rewire step 7 found no free vertex pair after 50 attempts"
    );
}
