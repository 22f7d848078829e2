//! Vertex identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a vertex within a single graph.
///
/// Vertices are plain values: two `VertexId`s with the same integer are the
/// same vertex. Implements `Ord` so adjacency sets iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(i32);

impl VertexId {
    /// Create a vertex identifier from its integer value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the integer value.
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for VertexId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<VertexId> for i32 {
    fn from(id: VertexId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_ordering_follows_value() {
        assert!(VertexId::new(-3) < VertexId::new(0));
        assert!(VertexId::new(2) < VertexId::new(10));
    }

    #[test]
    fn test_vertex_serializes_as_integer() {
        let json = serde_json::to_string(&VertexId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: VertexId = serde_json::from_str("7").unwrap();
        assert_eq!(back, VertexId::new(7));
    }
}
