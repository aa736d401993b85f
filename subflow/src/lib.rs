//! # subflow
//!
//! subflow studies how users move between topical communities over time. It reads a
//! flat post log with `author`, `subreddit` and `created_utc` columns and derives:
//!
//! - per-user timelines and the community-to-community migrations they imply,
//! - an aggregated, directed migration flow graph,
//! - a user ↔ community bipartite graph projected onto communities, with degree,
//!   betweenness and eigenvector centrality for every community,
//! - post counts per community and year (or month).
//!
//! The stages are plain functions over in-memory tables, wired together by
//! [`pipeline::Pipeline`], which also writes every result to disk.
//!
//! # Example
//!
//! ```
//! use subflow::prelude::*;
//!
//! let table = EventTable::from_rows([
//!     ("alice", "MachineLearning", 100.0),
//!     ("alice", "learnmachinelearning", 300.0),
//!     ("bob", "MachineLearning", 200.0),
//! ])
//! .unwrap();
//!
//! let timeline = build_timeline(table);
//! let flow = FlowTable::from_migrations(&extract_migrations(&timeline));
//! assert_eq!(flow.get("MachineLearning", "learnmachinelearning"), Some(1));
//! ```

pub mod algorithms;
pub mod core;
pub mod errors;
pub mod graph;
pub mod graph_loader;
pub mod io;
pub mod pipeline;

pub mod prelude {
    pub use crate::{
        algorithms::{
            centrality::{
                centrality_table, eigenvector::EigenvectorConfig, CentralityEngine,
                CentralityRow, StandardCentrality,
            },
            migration::{
                extract::{extract_migrations, MigrationEdge},
                flow::{FlowRow, FlowTable},
                network::migration_graph,
                timeline::{build_timeline, Timeline, UserTimeline},
            },
            trends::{subreddit_trends, TrendPeriod, TrendRow},
        },
        core::{Event, EventTable},
        errors::{FormatError, GraphError},
        graph::{BipartiteGraph, WeightedGraph, VID},
        graph_loader::source::csv_loader::CsvLoader,
        pipeline::{Pipeline, PipelineConfig, RunSummary},
    };
}
