//! Shortest-path results.

use serde::{Deserialize, Serialize};

use super::vertex::VertexId;

/// An ordered vertex sequence from source to target, both inclusive.
///
/// A path always holds at least one vertex. A single-vertex path means the
/// source and target are the same vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<VertexId>", into = "Vec<VertexId>")]
pub struct Path {
    vertices: Vec<VertexId>,
}

/// A path was built from an empty vertex sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Path must contain at least one vertex")]
pub struct EmptyPath;

impl Path {
    /// Create a path from a non-empty vertex sequence.
    ///
    /// Returns `None` if `vertices` is empty.
    pub fn new(vertices: Vec<VertexId>) -> Option<Self> {
        if vertices.is_empty() {
            None
        } else {
            Some(Self { vertices })
        }
    }

    /// The one-vertex path from `v` to itself.
    pub fn single(v: VertexId) -> Self {
        Self { vertices: vec![v] }
    }

    /// First vertex.
    pub fn source(&self) -> VertexId {
        self.vertices[0]
    }

    /// Last vertex.
    pub fn target(&self) -> VertexId {
        self.vertices[self.vertices.len() - 1]
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Number of vertices on the path.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Vertices in order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Consecutive vertex pairs, i.e. the edges walked.
    pub fn steps(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }

    /// Consume into the raw vertex sequence.
    pub fn into_vertices(self) -> Vec<VertexId> {
        self.vertices
    }
}

impl TryFrom<Vec<VertexId>> for Path {
    type Error = EmptyPath;

    fn try_from(vertices: Vec<VertexId>) -> Result<Self, Self::Error> {
        Self::new(vertices).ok_or(EmptyPath)
    }
}

impl From<Path> for Vec<VertexId> {
    fn from(path: Path) -> Self {
        path.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i32]) -> Vec<VertexId> {
        values.iter().copied().map(VertexId::new).collect()
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(Path::new(Vec::new()).is_none());
    }

    #[test]
    fn test_endpoints_and_hops() {
        let path = Path::new(ids(&[2, 1, 3])).unwrap();
        assert_eq!(path.source(), VertexId::new(2));
        assert_eq!(path.target(), VertexId::new(3));
        assert_eq!(path.hops(), 2);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_single_vertex_path() {
        let path = Path::single(VertexId::new(4));
        assert_eq!(path.source(), path.target());
        assert_eq!(path.hops(), 0);
        assert_eq!(path.steps().count(), 0);
    }

    #[test]
    fn test_steps() {
        let path = Path::new(ids(&[1, 2, 3])).unwrap();
        let steps: Vec<_> = path.steps().collect();
        assert_eq!(
            steps,
            vec![
                (VertexId::new(1), VertexId::new(2)),
                (VertexId::new(2), VertexId::new(3)),
            ]
        );
    }

    #[test]
    fn test_serde_keeps_non_empty_rule() {
        let path: Path = serde_json::from_str("[4,1,2]").unwrap();
        assert_eq!(path.hops(), 2);
        assert_eq!(serde_json::to_string(&path).unwrap(), "[4,1,2]");

        assert!(serde_json::from_str::<Path>("[]").is_err());
    }
}
