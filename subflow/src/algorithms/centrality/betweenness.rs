use crate::graph::{WeightedGraph, VID};
use ordered_float::OrderedFloat;
use std::{cmp::Reverse, collections::BinaryHeap};

/// Shortest-path DAG from one source: nodes in order of settled distance, the
/// predecessors of each node and the number of shortest paths reaching it.
struct ShortestPaths {
    stack: Vec<VID>,
    predecessors: Vec<Vec<VID>>,
    sigma: Vec<f64>,
}

/// Edge length used for path finding. Weights are connection strengths, so a heavier
/// edge is a shorter hop. Non-positive weights never lie on a path.
fn distance(weight: f64) -> Option<f64> {
    (weight > 0.0 && weight.is_finite()).then(|| 1.0 / weight)
}

/// Relative tolerance under which two path lengths count as equal. Reciprocal weights
/// rarely sum exactly, e.g. `1/2 + 1/12` and `1/3 + 1/4` differ in the last bit.
const TIE_TOLERANCE: f64 = 1e-12;

fn same_length(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

fn single_source_dijkstra(g: &WeightedGraph, source: VID) -> ShortestPaths {
    let n = g.count_nodes();
    let mut stack = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<VID>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0; n];
    let mut dist: Vec<Option<f64>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    sigma[source.index()] = 1.0;
    dist[source.index()] = Some(0.0);
    heap.push(Reverse((OrderedFloat(0.0), source)));

    while let Some(Reverse((OrderedFloat(d), v))) = heap.pop() {
        if settled[v.index()] {
            continue;
        }
        settled[v.index()] = true;
        stack.push(v);

        for (w, weight) in g.neighbours(v) {
            let Some(length) = distance(weight) else {
                continue;
            };
            if settled[w.index()] {
                continue;
            }
            let candidate = d + length;
            match dist[w.index()] {
                Some(current) if same_length(candidate, current) => {
                    // Path counting
                    sigma[w.index()] += sigma[v.index()];
                    predecessors[w.index()].push(v);
                }
                Some(current) if candidate > current => {}
                _ => {
                    // Path discovery
                    dist[w.index()] = Some(candidate);
                    sigma[w.index()] = sigma[v.index()];
                    predecessors[w.index()] = vec![v];
                    heap.push(Reverse((OrderedFloat(candidate), w)));
                }
            }
        }
    }

    ShortestPaths {
        stack,
        predecessors,
        sigma,
    }
}

/// Computes the betweenness centrality for nodes in a weighted graph.
///
/// Shortest paths are found with Dijkstra over edge length `1 / weight`, so paths
/// prefer strongly connected pairs. Disconnected graphs are fine: pairs without a path
/// simply contribute nothing.
///
/// # Arguments
///
/// - `g`: A reference to the graph.
/// - `normalized`: If `true` scale by `1 / ((n - 1)(n - 2))` (for `n > 2`).
///
/// # Returns
///
/// A vector indexed by node id containing the betweenness centrality of each node.
pub fn betweenness_centrality(g: &WeightedGraph, normalized: bool) -> Vec<f64> {
    let n = g.count_nodes();
    let mut betweenness: Vec<f64> = vec![0.0; n];

    for source in g.nodes() {
        let ShortestPaths {
            mut stack,
            predecessors,
            sigma,
        } = single_source_dijkstra(g, source);

        let mut delta = vec![0.0; n];

        // Accumulation
        while let Some(w) = stack.pop() {
            for v in &predecessors[w.index()] {
                let coeff = (sigma[v.index()] / sigma[w.index()]) * (1.0 + delta[w.index()]);
                delta[v.index()] += coeff;
            }
            if w != source {
                betweenness[w.index()] += delta[w.index()];
            }
        }
    }

    // Normalization. On undirected graphs each pair was counted from both ends, which the
    // normalized factor already accounts for.
    let divisor = if normalized {
        (n > 2).then(|| (n as f64 - 1.0) * (n as f64 - 2.0))
    } else if g.is_directed() {
        None
    } else {
        Some(2.0)
    };
    if let Some(divisor) = divisor {
        for value in betweenness.iter_mut() {
            *value /= divisor;
        }
    }
    betweenness
}

#[cfg(test)]
mod betweenness_test {
    use super::betweenness_centrality;
    use crate::graph::WeightedGraph;
    use std::collections::HashMap;

    fn graph(edges: &[(&str, &str, f64)]) -> WeightedGraph {
        let mut g = WeightedGraph::undirected();
        for (src, dst, weight) in edges {
            g.add_edge(src, dst, *weight);
        }
        g
    }

    #[test]
    fn path_graph_middle_node() {
        let g = graph(&[("a", "b", 1.0), ("b", "c", 1.0)]);
        assert_eq!(betweenness_centrality(&g, false), vec![0.0, 1.0, 0.0]);
        assert_eq!(betweenness_centrality(&g, true), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn star_graph() {
        let g = graph(&[
            ("hub", "a", 1.0),
            ("hub", "b", 1.0),
            ("hub", "c", 1.0),
            ("hub", "d", 1.0),
        ]);
        let mut expected: HashMap<String, f64> = HashMap::new();
        expected.insert("hub".to_string(), 1.0);
        for leaf in ["a", "b", "c", "d"] {
            expected.insert(leaf.to_string(), 0.0);
        }
        assert_eq!(g.by_name(&betweenness_centrality(&g, true)), expected);
    }

    #[test]
    fn heavy_edges_are_preferred() {
        // a-c is a direct but weak link, a-b-c is two strong hops (0.1 + 0.1 < 1.0)
        let g = graph(&[("a", "b", 10.0), ("b", "c", 10.0), ("a", "c", 1.0)]);
        let res = g.by_name(&betweenness_centrality(&g, false));
        assert_eq!(res["b"], 1.0);
        assert_eq!(res["a"], 0.0);
        assert_eq!(res["c"], 0.0);
    }

    #[test]
    fn equal_paths_share_credit() {
        // two shortest routes between a and d
        let g = graph(&[
            ("a", "b", 1.0),
            ("a", "c", 1.0),
            ("b", "d", 1.0),
            ("c", "d", 1.0),
        ]);
        let res = g.by_name(&betweenness_centrality(&g, false));
        assert_eq!(res["b"], 0.5);
        assert_eq!(res["c"], 0.5);
    }

    #[test]
    fn reciprocal_ties_share_credit() {
        // 1/2 + 1/12 and 1/3 + 1/4 are both 7/12 but round differently
        let g = graph(&[
            ("a", "b", 2.0),
            ("b", "d", 12.0),
            ("a", "c", 3.0),
            ("c", "d", 4.0),
        ]);
        let res = g.by_name(&betweenness_centrality(&g, false));
        assert_eq!(res["b"], 0.5);
        assert_eq!(res["c"], 0.5);
        assert_eq!(res["d"], 1.0);
        assert_eq!(res["a"], 0.0);

        let mut reordered = WeightedGraph::undirected();
        for (src, dst, weight) in [
            ("c", "d", 4.0),
            ("b", "d", 12.0),
            ("a", "c", 3.0),
            ("a", "b", 2.0),
        ] {
            reordered.add_edge(src, dst, weight);
        }
        assert_eq!(reordered.by_name(&betweenness_centrality(&reordered, false)), res);
    }

    #[test]
    fn disconnected_components() {
        let mut g = graph(&[("a", "b", 1.0), ("b", "c", 1.0), ("x", "y", 3.0)]);
        g.add_node("lonely");
        let res = g.by_name(&betweenness_centrality(&g, true));
        // n = 6, one pair (a, c) routed through b
        assert_eq!(res["b"], 2.0 / 20.0);
        assert_eq!(res["x"], 0.0);
        assert_eq!(res["lonely"], 0.0);
    }

    #[test]
    fn directed_paths() {
        let mut g = WeightedGraph::directed();
        g.add_edge("a", "b", 1.0);
        g.add_edge("b", "c", 1.0);
        assert_eq!(betweenness_centrality(&g, false), vec![0.0, 1.0, 0.0]);
    }
}
