use interactome_core::Graph;
use interactome_test_support::fixtures::SCENARIO_EDGES;

/// The triangle-plus-pair scenario graph.
#[must_use]
pub fn scenario_graph() -> Graph<String> {
    Graph::from_edges(
        SCENARIO_EDGES
            .iter()
            .map(|(left, right)| ((*left).to_owned(), (*right).to_owned())),
    )
}

/// A path `0 - 1 - ... - (len - 1)`.
#[must_use]
pub fn path_graph(len: usize) -> Graph<usize> {
    Graph::from_edges((1..len).map(|index| (index - 1, index)))
}
