use crate::{algorithms::migration::flow::FlowTable, graph::WeightedGraph};

/// Directed graph with one edge per flow row, weighted by the transition count.
pub fn migration_graph(flow: &FlowTable) -> WeightedGraph {
    let mut graph = WeightedGraph::directed();
    for (from_sub, to_sub, count) in flow.iter() {
        graph.add_edge(from_sub, to_sub, count as f64);
    }
    graph
}

#[cfg(test)]
mod network_test {
    use super::migration_graph;
    use crate::algorithms::migration::{extract::MigrationEdge, flow::FlowTable};

    #[test]
    fn flow_rows_become_weighted_edges() {
        let migrations = vec![
            MigrationEdge::new("MachineLearning", "learnmachinelearning"),
            MigrationEdge::new("MachineLearning", "learnmachinelearning"),
            MigrationEdge::new("learnmachinelearning", "ArtificialInteligence"),
        ];
        let g = migration_graph(&FlowTable::from_migrations(&migrations));
        assert!(g.is_directed());
        assert_eq!(g.count_nodes(), 3);
        assert_eq!(g.count_edges(), 2);
        assert_eq!(
            g.edge_weight("MachineLearning", "learnmachinelearning"),
            Some(2.0)
        );
        assert_eq!(
            g.edge_weight("learnmachinelearning", "MachineLearning"),
            None
        );
    }
}
