//! Node importance scores over a weighted community graph.

pub mod betweenness;
pub mod degree_centrality;
pub mod eigenvector;

use crate::{errors::GraphError, graph::WeightedGraph};
use eigenvector::EigenvectorConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One row of the community metrics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityRow {
    pub subreddit: String,
    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub eigenvector_centrality: f64,
}

/// The three centrality measures the metrics table is built from. Results are indexed
/// by node id. Implementations are free to use any algorithm library.
pub trait CentralityEngine {
    fn degree_centrality(&self, g: &WeightedGraph) -> Vec<f64>;

    fn betweenness_centrality(&self, g: &WeightedGraph) -> Vec<f64>;

    fn eigenvector_centrality(&self, g: &WeightedGraph) -> Result<Vec<f64>, GraphError>;
}

/// Built-in engine: normalized degree, weighted Brandes betweenness and
/// power-iteration eigenvector centrality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardCentrality {
    pub normalized: bool,
    pub eigenvector: EigenvectorConfig,
}

impl Default for StandardCentrality {
    fn default() -> Self {
        Self {
            normalized: true,
            eigenvector: EigenvectorConfig::default(),
        }
    }
}

impl StandardCentrality {
    pub fn new(eigenvector: EigenvectorConfig) -> Self {
        Self {
            eigenvector,
            ..Self::default()
        }
    }
}

impl CentralityEngine for StandardCentrality {
    fn degree_centrality(&self, g: &WeightedGraph) -> Vec<f64> {
        degree_centrality::degree_centrality(g)
    }

    fn betweenness_centrality(&self, g: &WeightedGraph) -> Vec<f64> {
        betweenness::betweenness_centrality(g, self.normalized)
    }

    fn eigenvector_centrality(&self, g: &WeightedGraph) -> Result<Vec<f64>, GraphError> {
        eigenvector::eigenvector_centrality(g, self.eigenvector)
    }
}

/// Computes every metric for every node of `g`, rows in node order.
///
/// A convergence failure of the eigenvector computation is returned as an error rather
/// than filling the column with placeholder values.
pub fn centrality_table<C: CentralityEngine + ?Sized>(
    engine: &C,
    g: &WeightedGraph,
) -> Result<Vec<CentralityRow>, GraphError> {
    let degree = engine.degree_centrality(g);
    let betweenness = engine.betweenness_centrality(g);
    let eigenvector = engine.eigenvector_centrality(g)?;
    info!(nodes = g.count_nodes(), "computed centrality metrics");

    Ok(g.nodes()
        .map(|v| CentralityRow {
            subreddit: g.name(v).to_owned(),
            degree_centrality: degree[v.index()],
            betweenness_centrality: betweenness[v.index()],
            eigenvector_centrality: eigenvector[v.index()],
        })
        .collect())
}
