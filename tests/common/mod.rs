//! Shared helpers for the integration suites.

#![allow(dead_code)]

use ctp_routing::models::{path_edges, EdgeSet, Node, Path, WeightedGraph};

/// Exact TSP by brute-force enumeration, for cross-checking approximation
/// ratios on small instances. Returns a closed tour anchored at node 0.
pub fn optimal_tsp(graph: &WeightedGraph) -> (Path, f64) {
    let n = graph.num_nodes();
    assert!((2..=10).contains(&n), "brute force is for small n only");

    let mut rest: Vec<Node> = (1..n).collect();
    let mut best_path = Vec::new();
    let mut best_weight = f64::INFINITY;
    permute(&mut rest, 0, graph, &mut best_path, &mut best_weight);
    (best_path, best_weight)
}

fn permute(
    rest: &mut Vec<Node>,
    depth: usize,
    graph: &WeightedGraph,
    best_path: &mut Path,
    best_weight: &mut f64,
) {
    if depth == rest.len() {
        let mut path = Vec::with_capacity(rest.len() + 2);
        path.push(0);
        path.extend_from_slice(rest);
        path.push(0);
        let weight = graph.path_weight(&path);
        if weight < *best_weight {
            *best_weight = weight;
            *best_path = path;
        }
        return;
    }
    for i in depth..rest.len() {
        rest.swap(depth, i);
        permute(rest, depth + 1, graph, best_path, best_weight);
        rest.swap(depth, i);
    }
}

/// Asserts that a repair output is a valid CCTP solution: closed at `start`,
/// covering all `n` nodes, and free of blocked edges.
pub fn assert_valid_cover(path: &[Node], n: usize, start: Node, blocked: &EdgeSet) {
    assert_eq!(path.first(), Some(&start), "path must start at {start}: {path:?}");
    assert_eq!(path.last(), Some(&start), "path must end at {start}: {path:?}");
    for node in 0..n {
        assert!(path.contains(&node), "node {node} missing from {path:?}");
    }
    for edge in path_edges(path) {
        assert!(!blocked.contains(&edge), "blocked edge {edge} in {path:?}");
    }
}
