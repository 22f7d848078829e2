//! Undirected, unweighted graph guarded by a single reader/writer lock.

use std::collections::{BTreeMap, BTreeSet};
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::debug;

use crate::types::{GraphDescription, VertexId};

/// Error type for graph construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge endpoint is not a vertex of the graph.
    #[error("Edge {from} -> {to} references a vertex that is not in the graph")]
    UnknownVertex {
        /// Declared start of the edge.
        from: VertexId,
        /// Declared end of the edge.
        to: VertexId,
    },
}

#[derive(Debug, Default)]
struct GraphInner {
    /// Vertices in insertion order.
    vertices: Vec<VertexId>,
    /// Vertex -> neighbors. Symmetric.
    adjacency: BTreeMap<VertexId, BTreeSet<VertexId>>,
    /// Membership index over `vertices`.
    members: BTreeSet<VertexId>,
    /// Number of undirected edges.
    edge_count: usize,
}

/// Undirected graph over integer vertices.
///
/// Every mutation takes the exclusive lock; every lookup takes the shared
/// lock, so concurrent path queries never observe a half-built adjacency.
/// Neighbor sets are keyed by vertex value and iterate in ascending order.
#[derive(Debug, Default)]
pub struct Graph {
    inner: RwLock<GraphInner>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a submitted description.
    ///
    /// All vertices are added first, then every declared edge. Fails on the
    /// first edge whose endpoint is not among the vertices.
    pub fn from_description(desc: &GraphDescription) -> Result<Self, GraphError> {
        let graph = Self::new();
        for &v in &desc.vertices {
            graph.add_vertex(v);
        }
        for (from, to) in desc.declared_edges() {
            graph.add_edge(from, to)?;
        }
        // A key with an empty neighbor list still names a vertex.
        if let Some(&from) = desc.edges.keys().find(|k| !graph.contains_vertex(**k)) {
            return Err(GraphError::UnknownVertex { from, to: from });
        }
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "graph built"
        );
        Ok(graph)
    }

    /// Append a vertex. Returns `false` if it was already present.
    pub fn add_vertex(&self, v: VertexId) -> bool {
        let mut inner = self.inner.write();
        if !inner.members.insert(v) {
            return false;
        }
        inner.vertices.push(v);
        true
    }

    /// Add the undirected edge `u - v`.
    ///
    /// Both endpoints must already be vertices. Returns `Ok(false)` when the
    /// edge already existed.
    pub fn add_edge(&self, u: VertexId, v: VertexId) -> Result<bool, GraphError> {
        let mut inner = self.inner.write();
        if !inner.members.contains(&u) || !inner.members.contains(&v) {
            return Err(GraphError::UnknownVertex { from: u, to: v });
        }

        let inserted = inner.adjacency.entry(u).or_default().insert(v);
        inner.adjacency.entry(v).or_default().insert(u);

        if inserted {
            inner.edge_count += 1;
        }
        Ok(inserted)
    }

    /// Look up a vertex by value.
    pub fn find_vertex(&self, value: i32) -> Option<VertexId> {
        let v = VertexId::new(value);
        self.contains_vertex(v).then_some(v)
    }

    /// Check whether `v` is a vertex of this graph.
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.inner.read().members.contains(&v)
    }

    /// Check whether `u - v` is an edge.
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.inner
            .read()
            .adjacency
            .get(&u)
            .map_or(false, |n| n.contains(&v))
    }

    /// Neighbors of `v` in ascending order. Empty for unknown vertices.
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.inner
            .read()
            .adjacency
            .get(&v)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> Vec<VertexId> {
        self.inner.read().vertices.clone()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.inner.read().vertices.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.inner.read().edge_count
    }

    /// Take the shared lock for the duration of a query.
    pub fn read(&self) -> GraphView<'_> {
        GraphView {
            guard: self.inner.read(),
        }
    }

    /// Block until every outstanding reader has released the shared lock.
    pub(crate) fn drain_readers(&self) {
        drop(self.inner.write());
    }
}

/// Read-only view of a graph, holding its shared lock.
pub struct GraphView<'a> {
    guard: RwLockReadGuard<'a, GraphInner>,
}

impl GraphView<'_> {
    /// Check whether `v` is a vertex.
    pub fn contains(&self, v: VertexId) -> bool {
        self.guard.members.contains(&v)
    }

    /// Recorded neighbors of `v`, or `None` if `v` has no edges.
    pub fn neighbors(&self, v: VertexId) -> Option<&BTreeSet<VertexId>> {
        self.guard.adjacency.get(&v)
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.guard.vertices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.guard.vertices.len()
    }
}
