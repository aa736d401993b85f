//! Analysis stages: migration extraction, centrality and activity trends.

pub mod centrality;
pub mod migration;
pub mod trends;
