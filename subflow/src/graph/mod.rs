//! In-memory graph types used by the analysis stages.

pub mod bipartite;
pub mod weighted_graph;

pub use bipartite::BipartiteGraph;
pub use weighted_graph::{GraphKind, WeightedGraph, VID};
