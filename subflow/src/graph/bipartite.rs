//! User ↔ community bipartite graph and its weighted projection onto communities.

use crate::{core::EventTable, graph::WeightedGraph};
use indexmap::{IndexMap, IndexSet};

/// Two disjoint node sets, users and communities, with an edge wherever a user posted at
/// least once in a community. Repeated posts collapse into one edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BipartiteGraph {
    users: IndexSet<String>,
    communities: IndexSet<String>,
    /// per community: indices of its users
    members: Vec<IndexSet<usize>>,
    /// per user: indices of the communities they posted in
    memberships: Vec<IndexSet<usize>>,
    num_edges: usize,
}

impl BipartiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from every post that has an author. Communities are added in
    /// first-appearance order, including ones only anonymous posts touched.
    pub fn from_events(table: &EventTable) -> Self {
        let mut graph = Self::new();
        for event in table {
            if event.author.is_empty() {
                graph.add_community(&event.subreddit);
            } else {
                graph.add_edge(&event.author, &event.subreddit);
            }
        }
        graph
    }

    pub fn add_user(&mut self, user: &str) -> usize {
        if let Some(index) = self.users.get_index_of(user) {
            return index;
        }
        self.memberships.push(IndexSet::new());
        self.users.insert_full(user.to_owned()).0
    }

    pub fn add_community(&mut self, community: &str) -> usize {
        if let Some(index) = self.communities.get_index_of(community) {
            return index;
        }
        self.members.push(IndexSet::new());
        self.communities.insert_full(community.to_owned()).0
    }

    /// Connects a user to a community. Returns `false` if the edge was already there.
    pub fn add_edge(&mut self, user: &str, community: &str) -> bool {
        let u = self.add_user(user);
        let c = self.add_community(community);
        let is_new = self.members[c].insert(u);
        if is_new {
            self.memberships[u].insert(c);
            self.num_edges += 1;
        }
        is_new
    }

    pub fn users(&self) -> impl Iterator<Item = &str> + '_ {
        self.users.iter().map(|u| u.as_str())
    }

    pub fn communities(&self) -> impl Iterator<Item = &str> + '_ {
        self.communities.iter().map(|c| c.as_str())
    }

    pub fn count_users(&self) -> usize {
        self.users.len()
    }

    pub fn count_communities(&self) -> usize {
        self.communities.len()
    }

    pub fn count_edges(&self) -> usize {
        self.num_edges
    }

    pub fn has_edge(&self, user: &str, community: &str) -> bool {
        match (
            self.users.get_index_of(user),
            self.communities.get_index_of(community),
        ) {
            (Some(u), Some(c)) => self.members[c].contains(&u),
            _ => false,
        }
    }

    /// Number of distinct users that posted in `community`.
    pub fn community_size(&self, community: &str) -> Option<usize> {
        self.communities
            .get_index_of(community)
            .map(|c| self.members[c].len())
    }

    /// Projects the graph onto the community partition.
    ///
    /// Every community becomes a node, in first-appearance order, and two communities
    /// are joined with weight equal to the number of users they share. Communities
    /// sharing no user with any other community stay in the graph as isolated nodes.
    pub fn weighted_projection(&self) -> WeightedGraph {
        let mut shared: IndexMap<(usize, usize), usize> = IndexMap::new();
        for (c, users) in self.members.iter().enumerate() {
            for &u in users {
                for &d in &self.memberships[u] {
                    if d > c {
                        *shared.entry((c, d)).or_insert(0) += 1;
                    }
                }
            }
        }

        let mut projected = WeightedGraph::undirected();
        for community in &self.communities {
            projected.add_node(community);
        }
        for ((c, d), weight) in shared {
            projected.add_edge(&self.communities[c], &self.communities[d], weight as f64);
        }
        projected
    }
}
