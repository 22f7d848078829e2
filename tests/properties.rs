//! Property tests for path finding and registry atomicity.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use proptest::prelude::*;

use graph_registry::{
    exhaustive_path, priority_queue_path, Graph, GraphDescription, GraphRegistry, PathError,
    SearchControl, VertexId,
};

/// Independent BFS distance used as the reference.
fn bfs_distance(n: i32, edges: &[(i32, i32)], s: i32, t: i32) -> Option<usize> {
    let mut adj: BTreeMap<i32, BTreeSet<i32>> = BTreeMap::new();
    for &(a, b) in edges {
        adj.entry(a).or_default().insert(b);
        adj.entry(b).or_default().insert(a);
    }
    let mut dist: BTreeMap<i32, usize> = BTreeMap::new();
    let mut queue = VecDeque::new();
    dist.insert(s, 0);
    queue.push_back(s);
    while let Some(x) = queue.pop_front() {
        if x == t {
            return dist.get(&t).copied();
        }
        for &y in adj.get(&x).into_iter().flatten() {
            if y < n && !dist.contains_key(&y) {
                dist.insert(y, dist[&x] + 1);
                queue.push_back(y);
            }
        }
    }
    None
}

/// Random small graph: vertex count plus an edge list over `0..n`.
fn small_graph() -> impl Strategy<Value = (i32, Vec<(i32, i32)>)> {
    (2i32..9).prop_flat_map(|n| {
        let edge = (0..n, 0..n);
        (Just(n), prop::collection::vec(edge, 0..16))
    })
}

fn build(n: i32, edges: &[(i32, i32)]) -> Graph {
    let vertices: Vec<i32> = (0..n).collect();
    Graph::from_description(&GraphDescription::from_edge_list(&vertices, edges)).unwrap()
}

proptest! {
    #[test]
    fn prop_path_is_valid_and_shortest((n, edges) in small_graph(), s in 0i32..9, t in 0i32..9) {
        prop_assume!(s < n && t < n);
        let g = build(n, &edges);
        let result = priority_queue_path(&g.read(), VertexId::new(s), VertexId::new(t), &SearchControl::new());

        match bfs_distance(n, &edges, s, t) {
            Some(expected) => {
                let path = result.unwrap();
                prop_assert_eq!(path.source(), VertexId::new(s));
                prop_assert_eq!(path.target(), VertexId::new(t));
                prop_assert_eq!(path.hops(), expected);
                for (a, b) in path.steps() {
                    prop_assert!(g.has_edge(a, b), "{} - {} is not an edge", a, b);
                }
            }
            None => {
                let is_unreachable = matches!(result, Err(PathError::Unreachable { .. }));
                prop_assert!(is_unreachable);
            }
        }
    }

    #[test]
    fn prop_exhaustive_matches_priority_queue((n, edges) in small_graph(), s in 0i32..9, t in 0i32..9) {
        prop_assume!(s < n && t < n);
        let g = build(n, &edges);
        let view = g.read();
        let control = SearchControl::new();
        let (s, t) = (VertexId::new(s), VertexId::new(t));

        let pq = priority_queue_path(&view, s, t, &control);
        match exhaustive_path(&view, s, t, &control) {
            Ok(ex) => prop_assert_eq!(ex.hops(), pq.unwrap().hops()),
            Err(PathError::IsolatedSource(_)) => prop_assert!(view.neighbors(s).is_none()),
            Err(PathError::Unreachable { .. }) => {
                let is_unreachable = matches!(pq, Err(PathError::Unreachable { .. }));
                prop_assert!(is_unreachable);
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    #[test]
    fn prop_edges_are_symmetric_and_deduplicated((n, edges) in small_graph()) {
        let g = build(n, &edges);
        for v in g.vertices() {
            let neighbors = g.neighbors(v);
            let unique: BTreeSet<_> = neighbors.iter().copied().collect();
            prop_assert_eq!(unique.len(), neighbors.len());
            for u in neighbors {
                prop_assert!(g.neighbors(u).contains(&v));
            }
        }
    }

    #[test]
    fn prop_invalid_submit_leaves_registry_unchanged(
        (n, edges) in small_graph(),
        good_submits in 0usize..4,
        missing in 100i32..200,
    ) {
        let registry = GraphRegistry::new();
        let vertices: Vec<i32> = (0..n).collect();
        for _ in 0..good_submits {
            registry.submit(&GraphDescription::from_edge_list(&vertices, &edges)).unwrap();
        }
        let before = registry.stats();

        let mut bad_edges = edges.clone();
        bad_edges.push((0, missing));
        let result = registry.submit(&GraphDescription::from_edge_list(&vertices, &bad_edges));

        prop_assert!(result.is_err());
        prop_assert_eq!(registry.stats(), before);
    }

    #[test]
    fn prop_handles_strictly_increase(ops in prop::collection::vec(any::<bool>(), 1..20)) {
        let registry = GraphRegistry::new();
        let desc = GraphDescription::from_edge_list(&[1, 2], &[(1, 2)]);
        let mut last = 0u32;
        for delete_after in ops {
            let h = registry.submit(&desc).unwrap();
            prop_assert!(h.get() > last);
            last = h.get();
            if delete_after {
                registry.delete(h).unwrap();
            }
        }
    }
}
