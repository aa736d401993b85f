use crate::algorithms::migration::extract::MigrationEdge;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the migration flow table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRow {
    pub from_sub: String,
    pub to_sub: String,
    pub count: usize,
}

/// Transition counts keyed by `(from_sub, to_sub)`, iterated in lexicographic key order.
/// Every stored count is at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowTable {
    flows: BTreeMap<(String, String), usize>,
}

impl FlowTable {
    pub fn from_migrations<'a, I>(migrations: I) -> Self
    where
        I: IntoIterator<Item = &'a MigrationEdge>,
    {
        let mut flows = BTreeMap::new();
        for edge in migrations {
            *flows
                .entry((edge.from_sub.clone(), edge.to_sub.clone()))
                .or_insert(0) += 1;
        }
        Self { flows }
    }

    pub fn get(&self, from_sub: &str, to_sub: &str) -> Option<usize> {
        self.flows
            .get(&(from_sub.to_owned(), to_sub.to_owned()))
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, usize)> + '_ {
        self.flows
            .iter()
            .map(|((from, to), count)| (from.as_str(), to.as_str(), *count))
    }

    pub fn rows(&self) -> Vec<FlowRow> {
        self.iter()
            .map(|(from_sub, to_sub, count)| FlowRow {
                from_sub: from_sub.to_owned(),
                to_sub: to_sub.to_owned(),
                count,
            })
            .collect()
    }

    /// Number of distinct `(from, to)` pairs.
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Sum of all counts, equal to the number of migration edges aggregated.
    pub fn total(&self) -> usize {
        self.flows.values().sum()
    }
}
