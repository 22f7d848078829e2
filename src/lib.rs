//! # graph-registry
//!
//! In-memory registry of small undirected graphs with shortest-path queries.
//!
//! Clients submit a graph (vertices + adjacency) and receive a handle. They
//! can then ask for a shortest path between two vertices of that graph, and
//! delete the graph when done.
//!
//! ## Core Contract
//!
//! 1. `submit` stores a graph atomically: either every edge is valid and a new
//!    handle is issued, or nothing is stored and no handle is consumed
//! 2. `shortest_path` returns a minimum-hop vertex sequence, or a typed error
//!    when the graph, a vertex, or a connecting path does not exist
//! 3. `delete` tombstones a handle; handles are never reissued
//!
//! ## Architecture
//!
//! ```text
//! Transport → GraphRegistry ─submit──→ Graph (RwLock adjacency)
//!                  │
//!                  └─shortest_path──→ pathfind (priority queue | exhaustive)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Neighbor sets iterate in ascending vertex order
//! - Priority-queue ties are broken by vertex id
//! - Same graph + same (source, target) → identical path

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod store;
pub mod pathfind;
pub mod config;

#[cfg(feature = "service")]
pub mod service;

// Re-exports
pub use types::{VertexId, GraphHandle, Path, GraphDescription, EmptyPath, ZeroHandle};
pub use store::{
    Graph, GraphError, GraphView,
    GraphRegistry, GraphSummary, RegistryStats, RegistryError, ErrorKind,
};
pub use pathfind::{
    find_path, exhaustive_path, priority_queue_path, shortest_path_tree,
    PathError, PathStrategy, SearchControl, ShortestPathTree,
};
pub use config::{ConfigError, LogFormat, RegistryConfig, ServiceConfig};

// Service re-exports (when service feature is enabled)
#[cfg(feature = "service")]
pub use service::{create_router, ServiceState};
