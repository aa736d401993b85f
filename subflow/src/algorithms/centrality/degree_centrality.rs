use crate::graph::WeightedGraph;

/// Computes the degree centrality of all nodes in the graph. Each degree is divided by
/// `n - 1`, the largest degree possible in a simple graph. Graphs with self-loops can
/// have values greater than 1. A single-node graph gives its node a centrality of 1.
///
/// # Arguments
///
/// - `g`: A reference to the graph.
///
/// # Returns
///
/// A vector indexed by node id containing the degree centrality of each node.
pub fn degree_centrality(g: &WeightedGraph) -> Vec<f64> {
    let n = g.count_nodes();
    if n <= 1 {
        return vec![1.0; n];
    }
    let norm = (n - 1) as f64;
    g.nodes().map(|v| g.degree(v) as f64 / norm).collect()
}

#[cfg(test)]
mod degree_centrality_test {
    use super::degree_centrality;
    use crate::graph::WeightedGraph;
    use std::collections::HashMap;

    #[test]
    fn test_degree_centrality() {
        let mut graph = WeightedGraph::undirected();
        let vs = vec![("1", "2"), ("1", "3"), ("1", "4"), ("2", "3"), ("2", "4")];
        for (src, dst) in &vs {
            graph.add_edge(src, dst, 1.0);
        }
        let mut expected: HashMap<String, f64> = HashMap::new();
        expected.insert("1".to_string(), 1.0);
        expected.insert("2".to_string(), 1.0);
        expected.insert("3".to_string(), 2.0 / 3.0);
        expected.insert("4".to_string(), 2.0 / 3.0);

        let res = degree_centrality(&graph);
        assert_eq!(graph.by_name(&res), expected);
    }

    #[test]
    fn isolated_nodes_score_zero() {
        let mut graph = WeightedGraph::undirected();
        graph.add_edge("a", "b", 5.0);
        graph.add_node("c");
        assert_eq!(degree_centrality(&graph), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn trivial_graphs() {
        assert!(degree_centrality(&WeightedGraph::undirected()).is_empty());
        let mut graph = WeightedGraph::undirected();
        graph.add_node("only");
        assert_eq!(degree_centrality(&graph), vec![1.0]);
    }
}
