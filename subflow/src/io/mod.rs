//! Writers for the derived tables and graph exports.

pub mod gexf;
pub mod tables;
