//! Community-to-community migration analysis.
//!
//! The stages run in order: [`timeline::build_timeline`] sorts the raw events per user,
//! [`extract::extract_migrations`] turns each user's timeline into transitions,
//! [`flow::FlowTable`] counts them and [`network::migration_graph`] turns the counts
//! into a directed weighted graph.

pub mod extract;
pub mod flow;
pub mod network;
pub mod timeline;
