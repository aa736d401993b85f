use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense node index into a [`WeightedGraph`].
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct VID(pub usize);

impl VID {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for VID {
    fn from(value: usize) -> Self {
        VID(value)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphKind {
    Directed,
    Undirected,
}

/// A simple graph over named nodes with one `f64` weight per edge.
///
/// Nodes keep their insertion order, which is also the order every algorithm reports
/// results in. Adding an edge that already exists replaces its weight.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedGraph {
    kind: GraphKind,
    names: IndexSet<String>,
    out_adj: Vec<IndexMap<VID, f64>>,
    in_degree: Vec<usize>,
    num_edges: usize,
}

impl WeightedGraph {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            names: IndexSet::new(),
            out_adj: Vec::new(),
            in_degree: Vec::new(),
            num_edges: 0,
        }
    }

    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    /// Adds a node if it is not present yet and returns its id.
    pub fn add_node(&mut self, name: &str) -> VID {
        if let Some(index) = self.names.get_index_of(name) {
            return VID(index);
        }
        let (index, _) = self.names.insert_full(name.to_owned());
        self.out_adj.push(IndexMap::new());
        self.in_degree.push(0);
        VID(index)
    }

    pub fn add_edge(&mut self, src: &str, dst: &str, weight: f64) -> (VID, VID) {
        let src = self.add_node(src);
        let dst = self.add_node(dst);
        let is_new = self.out_adj[src.index()].insert(dst, weight).is_none();
        match self.kind {
            GraphKind::Directed => {
                if is_new {
                    self.in_degree[dst.index()] += 1;
                }
            }
            GraphKind::Undirected => {
                if src != dst {
                    self.out_adj[dst.index()].insert(src, weight);
                }
            }
        }
        if is_new {
            self.num_edges += 1;
        }
        (src, dst)
    }

    pub fn node(&self, name: &str) -> Option<VID> {
        self.names.get_index_of(name).map(VID)
    }

    /// Name of the node with the given id. Panics if the id is not from this graph.
    pub fn name(&self, v: VID) -> &str {
        &self.names[v.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = VID> + '_ {
        (0..self.names.len()).map(VID)
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(|name| name.as_str())
    }

    pub fn count_nodes(&self) -> usize {
        self.names.len()
    }

    pub fn count_edges(&self) -> usize {
        self.num_edges
    }

    /// Neighbours reachable from `v` along with the connecting edge weight.
    /// For directed graphs these are the out-neighbours.
    pub fn neighbours(&self, v: VID) -> impl Iterator<Item = (VID, f64)> + '_ {
        self.out_adj[v.index()]
            .iter()
            .map(|(nbr, weight)| (*nbr, *weight))
    }

    /// Number of incident edges. Self-loops count twice on undirected graphs.
    pub fn degree(&self, v: VID) -> usize {
        let out = self.out_adj[v.index()].len();
        match self.kind {
            GraphKind::Directed => out + self.in_degree[v.index()],
            GraphKind::Undirected => {
                if self.out_adj[v.index()].contains_key(&v) {
                    out + 1
                } else {
                    out
                }
            }
        }
    }

    pub fn edge_weight(&self, src: &str, dst: &str) -> Option<f64> {
        let src = self.node(src)?;
        let dst = self.node(dst)?;
        self.out_adj[src.index()].get(&dst).copied()
    }

    pub fn has_edge(&self, src: &str, dst: &str) -> bool {
        self.edge_weight(src, dst).is_some()
    }

    /// Every edge once, as `(src, dst, weight)`. Undirected edges are reported with
    /// `src <= dst`.
    pub fn edges(&self) -> impl Iterator<Item = (VID, VID, f64)> + '_ {
        let undirected = self.kind == GraphKind::Undirected;
        self.out_adj.iter().enumerate().flat_map(move |(src, nbrs)| {
            nbrs.iter()
                .filter(move |(dst, _)| !undirected || src <= dst.index())
                .map(move |(dst, weight)| (VID(src), *dst, *weight))
        })
    }

    /// Attaches node names to a per-node result vector indexed by [`VID`].
    pub fn by_name<T: Clone>(&self, values: &[T]) -> HashMap<String, T> {
        self.names
            .iter()
            .zip(values.iter())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}
