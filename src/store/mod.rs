//! Graph storage: the graph structure itself and the handle registry.

pub mod graph;
pub mod registry;

pub use graph::{Graph, GraphError, GraphView};
pub use registry::{ErrorKind, GraphRegistry, GraphSummary, RegistryError, RegistryStats};
