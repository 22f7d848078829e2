//! Handle-indexed registry of graphs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RegistryConfig;
use crate::pathfind::{find_path, PathError, PathStrategy, SearchControl};
use crate::types::{GraphDescription, GraphHandle, Path, VertexId};

use super::graph::{Graph, GraphError};

/// Broad error classes, used by the transport to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The submission was rejected; nothing was stored.
    Validation,
    /// Handle or vertex does not exist.
    NotFound,
    /// Both vertices exist but are not connected.
    Unreachable,
    /// The query was abandoned.
    Cancelled,
    /// No more handles can be issued.
    Exhausted,
}

/// Error type for registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// An edge references a vertex missing from the vertex list.
    #[error("Found edge between non-existent vertices: {from} -> {to}")]
    InvalidEdgeEndpoint {
        /// Declared start of the edge.
        from: VertexId,
        /// Declared end of the edge.
        to: VertexId,
    },
    /// The vertex list contains the same value twice.
    #[error("Duplicate vertex in submission: {0}")]
    DuplicateVertex(VertexId),
    /// The submission exceeds the configured limits.
    #[error("Graph too large: {what} {actual} exceeds limit {limit}")]
    TooLarge {
        /// Which limit was hit ("vertices" or "edges").
        what: &'static str,
        /// Submitted size.
        actual: usize,
        /// Configured limit.
        limit: usize,
    },
    /// The handle was never issued.
    #[error("Graph not found: {0}")]
    UnknownGraph(GraphHandle),
    /// The handle was issued and its graph has been deleted.
    #[error("Graph {0} has been deleted")]
    GraphDeleted(GraphHandle),
    /// Source or target is not a vertex of the addressed graph.
    #[error("Vertex {vertex} not found in graph {handle}")]
    UnknownVertex {
        /// Graph that was queried.
        handle: GraphHandle,
        /// Missing vertex.
        vertex: VertexId,
    },
    /// Source and target exist but no path connects them.
    #[error("No path from {from} to {to} in graph {handle}")]
    Unreachable {
        /// Graph that was queried.
        handle: GraphHandle,
        /// Search origin.
        from: VertexId,
        /// Requested destination.
        to: VertexId,
    },
    /// The query was cancelled or ran past its deadline.
    #[error("Query on graph {0} was cancelled")]
    Cancelled(GraphHandle),
    /// Every handle value has been issued.
    #[error("Handle space exhausted")]
    HandlesExhausted,
}

impl RegistryError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEdgeEndpoint { .. } | Self::DuplicateVertex(_) | Self::TooLarge { .. } => {
                ErrorKind::Validation
            }
            Self::UnknownGraph(_) | Self::GraphDeleted(_) | Self::UnknownVertex { .. } => {
                ErrorKind::NotFound
            }
            Self::Unreachable { .. } => ErrorKind::Unreachable,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            Self::HandlesExhausted => ErrorKind::Exhausted,
        }
    }

    fn from_path(handle: GraphHandle, target: VertexId, e: PathError) -> Self {
        match e {
            PathError::UnknownVertex(vertex) => Self::UnknownVertex { handle, vertex },
            PathError::Unreachable { from, to } => Self::Unreachable { handle, from, to },
            // The exhaustive search reports an edgeless source separately; to
            // a caller it is just another disconnected pair.
            PathError::IsolatedSource(from) => Self::Unreachable {
                handle,
                from,
                to: target,
            },
            PathError::Cancelled => Self::Cancelled(handle),
        }
    }
}

impl From<GraphError> for RegistryError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::UnknownVertex { from, to } => Self::InvalidEdgeEndpoint { from, to },
        }
    }
}

/// Summary of a stored graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    /// Handle the graph is stored under.
    pub handle: GraphHandle,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// When the graph was stored.
    pub created_at: DateTime<Utc>,
}

/// Registry-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Graphs currently stored.
    pub live_graphs: usize,
    /// Handles whose graphs were deleted.
    pub deleted_graphs: usize,
    /// The handle the next successful submit will receive, if any remain.
    pub next_handle: Option<GraphHandle>,
}

#[derive(Debug)]
struct StoredGraph {
    graph: Arc<Graph>,
    created_at: DateTime<Utc>,
}

#[derive(Debug)]
enum Entry {
    Live(StoredGraph),
    Tombstone,
}

#[derive(Debug)]
struct RegistryState {
    next_handle: Option<GraphHandle>,
    entries: BTreeMap<GraphHandle, Entry>,
}

/// Registry of graphs indexed by monotonically increasing handles.
///
/// The handle counter and the handle map share one mutex. Graph construction
/// and path queries run outside it, so only the map update is serialized.
/// Create one per service and share it behind an `Arc`.
#[derive(Debug)]
pub struct GraphRegistry {
    config: RegistryConfig,
    state: Mutex<RegistryState>,
}

impl Default for GraphRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphRegistry {
    /// Create an empty registry with default limits.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit limits.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            state: Mutex::new(RegistryState {
                next_handle: Some(GraphHandle::FIRST),
                entries: BTreeMap::new(),
            }),
        }
    }

    /// Registry limits.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Build and store a graph, returning its handle.
    ///
    /// The submission is checked and built before the registry lock is taken.
    /// A rejected submission consumes no handle and stores nothing.
    pub fn submit(&self, desc: &GraphDescription) -> Result<GraphHandle, RegistryError> {
        let graph = match self.build(desc) {
            Ok(graph) => graph,
            Err(e) => {
                warn!(error = %e, "graph submission rejected");
                return Err(e);
            }
        };
        let vertex_count = graph.vertex_count();
        let edge_count = graph.edge_count();

        let handle = {
            let mut state = self.state.lock();
            let handle = state.next_handle.ok_or(RegistryError::HandlesExhausted)?;
            state.entries.insert(
                handle,
                Entry::Live(StoredGraph {
                    graph: Arc::new(graph),
                    created_at: Utc::now(),
                }),
            );
            state.next_handle = handle.next();
            handle
        };

        info!(
            handle = handle.get(),
            vertices = vertex_count,
            edges = edge_count,
            "graph stored"
        );
        Ok(handle)
    }

    fn build(&self, desc: &GraphDescription) -> Result<Graph, RegistryError> {
        if desc.vertices.len() > self.config.max_vertices {
            return Err(RegistryError::TooLarge {
                what: "vertices",
                actual: desc.vertices.len(),
                limit: self.config.max_vertices,
            });
        }
        let declared = desc.declared_edge_count();
        if declared > self.config.max_edges {
            return Err(RegistryError::TooLarge {
                what: "edges",
                actual: declared,
                limit: self.config.max_edges,
            });
        }

        let mut seen = BTreeSet::new();
        if let Some(dup) = desc.vertices.iter().find(|v| !seen.insert(**v)) {
            return Err(RegistryError::DuplicateVertex(*dup));
        }

        Ok(Graph::from_description(desc)?)
    }

    /// Resolve a handle to its graph.
    pub fn get(&self, handle: GraphHandle) -> Result<Arc<Graph>, RegistryError> {
        let state = self.state.lock();
        match state.entries.get(&handle) {
            Some(Entry::Live(stored)) => Ok(Arc::clone(&stored.graph)),
            Some(Entry::Tombstone) => Err(RegistryError::GraphDeleted(handle)),
            None => Err(RegistryError::UnknownGraph(handle)),
        }
    }

    /// Describe a stored graph.
    pub fn summary(&self, handle: GraphHandle) -> Result<GraphSummary, RegistryError> {
        let (graph, created_at) = {
            let state = self.state.lock();
            match state.entries.get(&handle) {
                Some(Entry::Live(stored)) => (Arc::clone(&stored.graph), stored.created_at),
                Some(Entry::Tombstone) => return Err(RegistryError::GraphDeleted(handle)),
                None => return Err(RegistryError::UnknownGraph(handle)),
            }
        };
        Ok(GraphSummary {
            handle,
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            created_at,
        })
    }

    /// Shortest path between two vertices of a stored graph.
    pub fn shortest_path(
        &self,
        handle: GraphHandle,
        source: VertexId,
        target: VertexId,
    ) -> Result<Path, RegistryError> {
        self.shortest_path_with(
            handle,
            source,
            target,
            PathStrategy::PriorityQueue,
            &SearchControl::new(),
        )
    }

    /// Shortest path with an explicit strategy and cancellation control.
    pub fn shortest_path_with(
        &self,
        handle: GraphHandle,
        source: VertexId,
        target: VertexId,
        strategy: PathStrategy,
        control: &SearchControl,
    ) -> Result<Path, RegistryError> {
        let graph = self.get(handle)?;
        let view = graph.read();
        find_path(&view, source, target, strategy, control)
            .map_err(|e| RegistryError::from_path(handle, target, e))
    }

    /// Delete a stored graph.
    ///
    /// Deleting a handle twice fails with [`RegistryError::GraphDeleted`];
    /// deleting a handle that was never issued fails with
    /// [`RegistryError::UnknownGraph`]. Returns once in-flight queries on the
    /// graph have finished.
    pub fn delete(&self, handle: GraphHandle) -> Result<(), RegistryError> {
        let graph = {
            let mut state = self.state.lock();
            let entry = state
                .entries
                .get_mut(&handle)
                .ok_or(RegistryError::UnknownGraph(handle))?;
            match std::mem::replace(entry, Entry::Tombstone) {
                Entry::Live(stored) => stored.graph,
                Entry::Tombstone => return Err(RegistryError::GraphDeleted(handle)),
            }
        };

        graph.drain_readers();
        info!(handle = handle.get(), "graph deleted");
        Ok(())
    }

    /// Number of live graphs.
    pub fn len(&self) -> usize {
        self.stats().live_graphs
    }

    /// Whether no graphs are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registry-wide counters.
    pub fn stats(&self) -> RegistryStats {
        let state = self.state.lock();
        let live_graphs = state
            .entries
            .values()
            .filter(|e| matches!(e, Entry::Live(_)))
            .count();
        RegistryStats {
            live_graphs,
            deleted_graphs: state.entries.len() - live_graphs,
            next_handle: state.next_handle,
        }
    }

    #[cfg(test)]
    fn force_next_handle(&self, next: Option<GraphHandle>) {
        self.state.lock().next_handle = next;
    }
}
