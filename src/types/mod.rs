//! Core types for the graph registry.

pub mod vertex;
pub mod handle;
pub mod path;
pub mod description;

pub use vertex::VertexId;
pub use handle::{GraphHandle, ZeroHandle};
pub use path::{EmptyPath, Path};
pub use description::GraphDescription;
