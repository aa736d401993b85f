use crate::{algorithms::migration::timeline::Timeline, core::Event};
use indexmap::IndexSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A recorded move of one user from one community to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MigrationEdge {
    pub from_sub: String,
    pub to_sub: String,
}

impl MigrationEdge {
    pub fn new(from_sub: impl Into<String>, to_sub: impl Into<String>) -> Self {
        Self {
            from_sub: from_sub.into(),
            to_sub: to_sub.into(),
        }
    }
}

/// Communities a user visited, each listed once at the position of its first visit.
pub fn community_sequence(events: &[Event]) -> Vec<&str> {
    events
        .iter()
        .map(|event| event.subreddit.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Transitions for one user: one edge between each adjacent pair of
/// [`community_sequence`]. Returning to an already visited community adds nothing,
/// so `k` distinct communities always yield `k - 1` edges.
pub fn user_migrations(events: &[Event]) -> Vec<MigrationEdge> {
    community_sequence(events)
        .into_iter()
        .tuple_windows()
        .map(|(from, to)| MigrationEdge::new(from, to))
        .collect()
}

/// Migration edges for every user in the timeline, users in ascending author order.
pub fn extract_migrations(timeline: &Timeline) -> Vec<MigrationEdge> {
    let mut migrations = Vec::new();
    let mut single_community_users = 0usize;
    for user in timeline.users() {
        let edges = user_migrations(user.events);
        if edges.is_empty() {
            single_community_users += 1;
        }
        migrations.extend(edges);
    }
    debug!(
        single_community_users,
        migrations = migrations.len(),
        "extracted user migrations"
    );
    migrations
}
