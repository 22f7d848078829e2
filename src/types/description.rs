//! Graph submission payloads.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use super::vertex::VertexId;

/// Full description of a graph as submitted by a client.
///
/// `edges` maps a vertex to the neighbors it connects to. Edges are
/// undirected, so `1 -> [2]` and `2 -> [1]` describe the same edge and may
/// both appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    /// Vertex identifiers, expected distinct.
    pub vertices: Vec<VertexId>,
    /// Adjacency as declared by the client.
    #[serde(default)]
    pub edges: BTreeMap<VertexId, Vec<VertexId>>,
}

impl GraphDescription {
    /// Create a description from raw integers.
    pub fn new<V, E, N>(vertices: V, edges: E) -> Self
    where
        V: IntoIterator<Item = i32>,
        E: IntoIterator<Item = (i32, N)>,
        N: IntoIterator<Item = i32>,
    {
        Self {
            vertices: vertices.into_iter().map(VertexId::new).collect(),
            edges: edges
                .into_iter()
                .map(|(from, to)| {
                    (VertexId::new(from), to.into_iter().map(VertexId::new).collect())
                })
                .collect(),
        }
    }

    /// Build a description from an undirected edge list.
    pub fn from_edge_list(vertices: &[i32], edges: &[(i32, i32)]) -> Self {
        let mut adjacency: BTreeMap<VertexId, Vec<VertexId>> = BTreeMap::new();
        for &(u, v) in edges {
            adjacency.entry(VertexId::new(u)).or_default().push(VertexId::new(v));
        }
        Self {
            vertices: vertices.iter().copied().map(VertexId::new).collect(),
            edges: adjacency,
        }
    }

    /// Declared edges as `(from, to)` pairs, in map order.
    pub fn declared_edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.edges
            .iter()
            .flat_map(|(from, to)| to.iter().map(move |t| (*from, *t)))
    }

    /// Number of declared `(from, to)` pairs, counting both directions.
    pub fn declared_edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}
