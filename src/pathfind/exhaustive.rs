//! Exhaustive simple-path search.
//!
//! Walks every simple path out of the source depth-first and keeps the
//! shortest one that ends at the target. Worst case is exponential in the
//! size of the graph, so this is only suitable for small graphs. It serves as
//! an independent reference for the priority-queue search and is not exposed
//! over the service API.
//!
//! The walk keeps its own frame stack on the heap, so path length is bounded
//! by memory rather than by the calling thread's stack.

use std::collections::{btree_set, BTreeSet};

use super::{ensure_vertices, PathError, SearchControl};
use crate::store::GraphView;
use crate::types::{Path, VertexId};

/// Remaining neighbors of one vertex on the current path. `None` when the
/// vertex is not worth expanding.
type Frame<'g> = Option<btree_set::Iter<'g, VertexId>>;

struct Search<'g, 'v> {
    view: &'g GraphView<'v>,
    target: VertexId,
    control: &'g SearchControl,
    current: Vec<VertexId>,
    on_path: BTreeSet<VertexId>,
    best: Option<Vec<VertexId>>,
}

impl<'g> Search<'g, '_> {
    fn run(&mut self, source: VertexId) -> Result<(), PathError> {
        self.control.check()?;
        let mut frames: Vec<Frame<'g>> = vec![self.enter(source)];

        while let Some(frame) = frames.last_mut() {
            let on_path = &self.on_path;
            let next = frame
                .as_mut()
                .and_then(|children| children.find(|n| !on_path.contains(n)).copied());

            match next {
                Some(next) if self.improves(self.current.len() + 1) => {
                    self.control.check()?;
                    let frame = self.enter(next);
                    frames.push(frame);
                }
                _ => {
                    frames.pop();
                    self.leave();
                }
            }
        }
        Ok(())
    }

    /// Push `vertex` onto the current path and return its expansion frame.
    fn enter(&mut self, vertex: VertexId) -> Frame<'g> {
        self.current.push(vertex);
        self.on_path.insert(vertex);

        if vertex == self.target {
            if self.improves(self.current.len()) {
                self.best = Some(self.current.clone());
            }
            return None;
        }

        let view: &'g GraphView<'_> = self.view;
        view.neighbors(vertex).map(|n| n.iter())
    }

    fn leave(&mut self) {
        if let Some(vertex) = self.current.pop() {
            self.on_path.remove(&vertex);
        }
    }

    /// A candidate of `len` vertices would beat the best found so far.
    fn improves(&self, len: usize) -> bool {
        self.best.as_ref().map_or(true, |b| len < b.len())
    }
}

/// Shortest path from `source` to `target` by exhaustive enumeration.
///
/// A source with no recorded edges yields [`PathError::IsolatedSource`],
/// even when `source == target`. A source that has edges but never reaches
/// the target yields [`PathError::Unreachable`]. Among equally short paths
/// the first one found in ascending-neighbor DFS order wins.
pub fn exhaustive_path(
    view: &GraphView<'_>,
    source: VertexId,
    target: VertexId,
    control: &SearchControl,
) -> Result<Path, PathError> {
    ensure_vertices(view, source, target)?;
    if view.neighbors(source).is_none() {
        return Err(PathError::IsolatedSource(source));
    }

    let mut search = Search {
        view,
        target,
        control,
        current: Vec::new(),
        on_path: BTreeSet::new(),
        best: None,
    };
    search.run(source)?;

    search
        .best
        .and_then(Path::new)
        .ok_or(PathError::Unreachable {
            from: source,
            to: target,
        })
}
