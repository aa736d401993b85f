use crate::{errors::GraphError, graph::WeightedGraph};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_MAX_ITER: usize = 100;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorConfig {
    pub max_iter: usize,
    pub tol: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOLERANCE,
        }
    }
}

/// Eigenvector centrality by power iteration, using edge weights.
///
/// Each round computes `x <- (A + I) x` and rescales to unit L2 norm; the identity shift
/// keeps bipartite-like structures from oscillating. Iteration stops once the summed
/// absolute change drops below `n * tol`.
///
/// # Arguments
///
/// - `g`: A reference to the graph.
/// - `config`: iteration budget and tolerance.
///
/// # Returns
///
/// A vector indexed by node id, or [`GraphError::Convergence`] if the budget runs out.
pub fn eigenvector_centrality(
    g: &WeightedGraph,
    config: EigenvectorConfig,
) -> Result<Vec<f64>, GraphError> {
    let n = g.count_nodes();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut x = vec![1.0 / n as f64; n];
    for iteration in 1..=config.max_iter {
        let last = x.clone();
        for v in g.nodes() {
            for (nbr, weight) in g.neighbours(v) {
                x[nbr.index()] += last[v.index()] * weight;
            }
        }

        let norm = x.iter().map(|value| value * value).sum::<f64>().sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        for value in x.iter_mut() {
            *value /= norm;
        }

        let diff: f64 = x.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
        if diff < n as f64 * config.tol {
            debug!(iteration, "eigenvector centrality converged");
            return Ok(x);
        }
    }

    Err(GraphError::Convergence {
        metric: "eigenvector",
        iterations: config.max_iter,
    })
}
