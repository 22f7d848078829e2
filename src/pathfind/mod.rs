//! Shortest-path search over a [`GraphView`].
//!
//! Two strategies are available:
//!
//! - [`PathStrategy::PriorityQueue`]: single-source expansion with a min-heap
//!   keyed by hop distance. This is the strategy the registry uses.
//! - [`PathStrategy::Exhaustive`]: enumerates every simple path with a DFS.
//!   Exponential; meant for small graphs and as a reference for testing.
//!
//! Both check a [`SearchControl`] at every step so a caller can abandon a
//! search that has run past its deadline.

pub mod exhaustive;
pub mod priority_queue;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};

use crate::store::GraphView;
use crate::types::{Path, VertexId};

pub use exhaustive::exhaustive_path;
pub use priority_queue::{priority_queue_path, shortest_path_tree, ShortestPathTree};

/// Error type for path searches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Source or target is not a vertex of the graph.
    #[error("Vertex not found: {0}")]
    UnknownVertex(VertexId),
    /// Both vertices exist but no path connects them.
    #[error("No path from {from} to {to}")]
    Unreachable {
        /// Search origin.
        from: VertexId,
        /// Requested destination.
        to: VertexId,
    },
    /// The source has no edges at all (exhaustive strategy only).
    #[error("Source vertex {0} has no edges")]
    IsolatedSource(VertexId),
    /// The search was cancelled or ran past its deadline.
    #[error("Search cancelled")]
    Cancelled,
}

/// Which algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStrategy {
    /// Min-priority-queue expansion (BFS-equivalent for unit weights).
    #[default]
    PriorityQueue,
    /// DFS over all simple paths.
    Exhaustive,
}

impl PathStrategy {
    /// Parse strategy from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "priority_queue" | "dijkstra" | "" => Some(Self::PriorityQueue),
            "exhaustive" | "dfs" => Some(Self::Exhaustive),
            _ => None,
        }
    }
}

impl std::fmt::Display for PathStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PriorityQueue => write!(f, "priority_queue"),
            Self::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

/// Cooperative cancellation for a running search.
///
/// Clones share the same flag, so one clone can be handed to the search and
/// another kept by whoever enforces the deadline.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl SearchControl {
    /// A control that never fires unless [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A control that also fires once `timeout` has elapsed from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether the search should stop.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.map_or(false, |d| Instant::now() >= d)
    }

    pub(crate) fn check(&self) -> Result<(), PathError> {
        if self.is_cancelled() {
            Err(PathError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Find a shortest path from `source` to `target` with the given strategy.
pub fn find_path(
    view: &GraphView<'_>,
    source: VertexId,
    target: VertexId,
    strategy: PathStrategy,
    control: &SearchControl,
) -> Result<Path, PathError> {
    match strategy {
        PathStrategy::PriorityQueue => priority_queue_path(view, source, target, control),
        PathStrategy::Exhaustive => exhaustive_path(view, source, target, control),
    }
}

pub(crate) fn ensure_vertices(
    view: &GraphView<'_>,
    source: VertexId,
    target: VertexId,
) -> Result<(), PathError> {
    for v in [source, target] {
        if !view.contains(v) {
            return Err(PathError::UnknownVertex(v));
        }
    }
    Ok(())
}
