//! Registry handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle identifying a stored graph.
///
/// Handles are positive and assigned monotonically by the registry, starting
/// at 1. A handle is never reissued, even after its graph is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct GraphHandle(u32);

/// Zero was offered as a graph handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Graph handle must be a positive integer")]
pub struct ZeroHandle;

impl GraphHandle {
    /// The first handle a fresh registry hands out.
    pub const FIRST: GraphHandle = GraphHandle(1);

    /// Create a handle from a raw value.
    ///
    /// Returns `None` for zero, which is never a valid handle.
    pub const fn new(raw: u32) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Get the raw value.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The handle that follows this one, or `None` when the space is used up.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Parse a handle from its decimal representation.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<u32>().ok().and_then(Self::new)
    }
}

impl fmt::Display for GraphHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for GraphHandle {
    type Error = ZeroHandle;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(ZeroHandle)
    }
}

impl From<GraphHandle> for u32 {
    fn from(handle: GraphHandle) -> Self {
        handle.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_a_handle() {
        assert!(GraphHandle::new(0).is_none());
        assert_eq!(GraphHandle::new(1), Some(GraphHandle::FIRST));
    }

    #[test]
    fn test_next_stops_at_max() {
        let last = GraphHandle::new(u32::MAX).unwrap();
        assert!(last.next().is_none());
        assert_eq!(GraphHandle::FIRST.next().unwrap().get(), 2);
    }

    #[test]
    fn test_parse() {
        assert_eq!(GraphHandle::parse("42").unwrap().get(), 42);
        assert!(GraphHandle::parse("0").is_none());
        assert!(GraphHandle::parse("-1").is_none());
        assert!(GraphHandle::parse("abc").is_none());
    }

    #[test]
    fn test_serde_rejects_zero() {
        let handle: GraphHandle = serde_json::from_str("7").unwrap();
        assert_eq!(handle.get(), 7);
        assert_eq!(serde_json::to_string(&handle).unwrap(), "7");

        assert!(serde_json::from_str::<GraphHandle>("0").is_err());
    }
}
