//! Dijkstra-style expansion with unit edge weights.

use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use super::{ensure_vertices, PathError, SearchControl};
use crate::store::GraphView;
use crate::types::{Path, VertexId};

const INFINITE: usize = usize::MAX;

/// Frontier entry: a vertex and the tentative distance it was pushed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    distance: usize,
    vertex: VertexId,
}

// BinaryHeap is a max-heap, so the comparison is reversed to pop the smallest
// distance first. Ties go to the smaller vertex id.
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match other.distance.cmp(&self.distance) {
            std::cmp::Ordering::Equal => other.vertex.cmp(&self.vertex),
            ord => ord,
        }
    }
}

/// Result of a single-source expansion: hop distances and one predecessor per
/// reached vertex.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: VertexId,
    distances: BTreeMap<VertexId, usize>,
    predecessors: BTreeMap<VertexId, VertexId>,
}

impl ShortestPathTree {
    /// The vertex the expansion started from.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Hop distance to `v`, or `None` if `v` was not reached.
    pub fn distance(&self, v: VertexId) -> Option<usize> {
        self.distances.get(&v).copied().filter(|d| *d != INFINITE)
    }

    /// Whether `v` was reached from the source.
    pub fn reaches(&self, v: VertexId) -> bool {
        self.distance(v).is_some()
    }

    /// Number of vertices reached, the source included.
    pub fn reached_count(&self) -> usize {
        self.distances.values().filter(|d| **d != INFINITE).count()
    }

    /// Reconstruct the path to `target` by walking predecessor links.
    ///
    /// Reachability is checked before walking, and the walk is bounded by the
    /// target's hop distance, so a broken chain reports `Unreachable` instead
    /// of looping.
    pub fn path_to(&self, target: VertexId) -> Result<Path, PathError> {
        let unreachable = PathError::Unreachable {
            from: self.source,
            to: target,
        };
        let hops = self.distance(target).ok_or_else(|| unreachable.clone())?;

        let mut vertices = Vec::with_capacity(hops + 1);
        let mut current = target;
        vertices.push(current);
        for _ in 0..hops {
            current = *self
                .predecessors
                .get(&current)
                .ok_or_else(|| unreachable.clone())?;
            vertices.push(current);
        }
        if current != self.source {
            return Err(unreachable);
        }

        vertices.reverse();
        Path::new(vertices).ok_or(unreachable)
    }
}

/// Expand from `source` over the whole component.
///
/// Checks `control` at every queue extraction.
pub fn shortest_path_tree(
    view: &GraphView<'_>,
    source: VertexId,
    control: &SearchControl,
) -> Result<ShortestPathTree, PathError> {
    if !view.contains(source) {
        return Err(PathError::UnknownVertex(source));
    }
    expand(view, source, None, control)
}

/// Shortest path from `source` to `target` using the priority-queue
/// expansion. Stops as soon as `target` is settled.
pub fn priority_queue_path(
    view: &GraphView<'_>,
    source: VertexId,
    target: VertexId,
    control: &SearchControl,
) -> Result<Path, PathError> {
    ensure_vertices(view, source, target)?;
    if source == target {
        return Ok(Path::single(source));
    }
    expand(view, source, Some(target), control)?.path_to(target)
}

fn expand(
    view: &GraphView<'_>,
    source: VertexId,
    stop_at: Option<VertexId>,
    control: &SearchControl,
) -> Result<ShortestPathTree, PathError> {
    let mut distances: BTreeMap<VertexId, usize> =
        view.vertices().iter().map(|v| (*v, INFINITE)).collect();
    let mut predecessors: BTreeMap<VertexId, VertexId> = BTreeMap::new();
    let mut visited: BTreeSet<VertexId> = BTreeSet::new();
    let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();

    distances.insert(source, 0);
    queue.push(QueueEntry {
        distance: 0,
        vertex: source,
    });

    while let Some(QueueEntry { vertex, .. }) = queue.pop() {
        control.check()?;

        // Stale entry left behind by a later improvement.
        if !visited.insert(vertex) {
            continue;
        }
        if stop_at == Some(vertex) {
            break;
        }

        let Some(neighbors) = view.neighbors(vertex) else {
            continue;
        };
        let relaxed = distances[&vertex] + 1;

        for &next in neighbors {
            if visited.contains(&next) {
                continue;
            }
            let best = distances.entry(next).or_insert(INFINITE);
            if relaxed < *best {
                *best = relaxed;
                predecessors.insert(next, vertex);
                queue.push(QueueEntry {
                    distance: relaxed,
                    vertex: next,
                });
            }
        }
    }

    Ok(ShortestPathTree {
        source,
        distances,
        predecessors,
    })
}
