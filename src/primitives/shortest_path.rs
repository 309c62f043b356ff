//! Single-pair shortest path (Dijkstra).

use crate::error::{CtpError, Result};
use crate::models::{AdjacencyGraph, Node, Path};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry ordered so the cheapest (then lowest-id) node pops first.
#[derive(Debug, Clone, Copy)]
struct State {
    cost: f64,
    node: Node,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap; node id breaks cost ties.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds a minimum-weight path from `source` to `target`, returned as the
/// node sequence including both endpoints.
///
/// # Errors
///
/// Returns [`CtpError::NoSafePath`] if `target` is unreachable from
/// `source`. The CNN repair treats that as an invariant violation: its
/// knowledge graph keeps every explored node connected by construction.
///
/// # Examples
///
/// ```
/// use ctp_routing::models::AdjacencyGraph;
/// use ctp_routing::primitives::shortest_path;
///
/// let mut g = AdjacencyGraph::new(3);
/// g.add_edge(0, 1, 1.0);
/// g.add_edge(1, 2, 1.0);
/// g.add_edge(0, 2, 5.0);
/// assert_eq!(shortest_path(&g, 0, 2).unwrap(), vec![0, 1, 2]);
/// ```
pub fn shortest_path(graph: &AdjacencyGraph, source: Node, target: Node) -> Result<Path> {
    let n = graph.num_nodes();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<Node>> = vec![None; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            break;
        }
        if cost > dist[node] {
            continue;
        }
        for &(next, weight) in graph.neighbors(node) {
            let candidate = cost + weight;
            if candidate < dist[next] {
                dist[next] = candidate;
                prev[next] = Some(node);
                heap.push(State {
                    cost: candidate,
                    node: next,
                });
            }
        }
    }

    if !dist[target].is_finite() {
        return Err(CtpError::NoSafePath {
            u: source,
            v: target,
        });
    }

    let mut path = vec![target];
    let mut node = target;
    while let Some(p) = prev[node] {
        path.push(p);
        node = p;
    }
    path.reverse();
    Ok(path)
}
