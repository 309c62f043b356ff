//! Minimum spanning tree (Prim's algorithm).

use crate::error::{CtpError, Result};
use crate::models::{AdjacencyGraph, Node, WeightedGraph};
use tracing::debug;

/// Computes a minimum spanning tree of the graph.
///
/// Runs Prim's algorithm in O(n²), which is optimal for the dense complete
/// graphs this crate works on. Ties between equal-weight candidate edges are
/// broken toward the lower node id so the tree is deterministic.
///
/// # Errors
///
/// Returns [`CtpError::DisconnectedGraph`] if some node cannot be reached,
/// which for a complete graph only happens through non-finite weights.
///
/// # Examples
///
/// ```
/// use ctp_routing::models::WeightedGraph;
/// use ctp_routing::primitives::minimum_spanning_tree;
///
/// let g = WeightedGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// let mst = minimum_spanning_tree(&g).unwrap();
/// assert!(mst.has_edge(0, 1));
/// assert!(mst.has_edge(1, 2));
/// assert!(!mst.has_edge(0, 2));
/// ```
pub fn minimum_spanning_tree(graph: &WeightedGraph) -> Result<AdjacencyGraph> {
    let n = graph.num_nodes();
    let mut tree = AdjacencyGraph::new(n);
    if n <= 1 {
        return Ok(tree);
    }

    let mut in_tree = vec![false; n];
    let mut best_cost = vec![f64::INFINITY; n];
    let mut best_parent: Vec<Option<Node>> = vec![None; n];

    in_tree[0] = true;
    for v in 1..n {
        best_cost[v] = graph.weight(0, v);
        best_parent[v] = Some(0);
    }

    for _ in 1..n {
        // Cheapest fringe node; ascending scan keeps ties deterministic.
        let mut next: Option<Node> = None;
        for v in 0..n {
            if in_tree[v] || !best_cost[v].is_finite() {
                continue;
            }
            if next.is_none_or(|u| best_cost[v] < best_cost[u]) {
                next = Some(v);
            }
        }

        let Some(v) = next else {
            return Err(CtpError::DisconnectedGraph);
        };
        let parent = best_parent[v].ok_or(CtpError::DisconnectedGraph)?;
        tree.add_edge(parent, v, graph.weight(parent, v));
        in_tree[v] = true;

        for u in 0..n {
            if !in_tree[u] && graph.weight(v, u) < best_cost[u] {
                best_cost[u] = graph.weight(v, u);
                best_parent[u] = Some(v);
            }
        }
    }

    debug!(nodes = n, "minimum spanning tree built");
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mst_line() {
        let g = WeightedGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let mst = minimum_spanning_tree(&g).unwrap();
        let total: f64 = mst.edges().map(|(_, w)| w).sum();
        assert!((total - 3.0).abs() < 1e-10);
        assert_eq!(mst.edges().count(), 3);
    }

    #[test]
    fn test_mst_spans_all_nodes() {
        let g = WeightedGraph::from_points(&[(0.0, 0.0), (5.0, 1.0), (2.0, 7.0), (4.0, 4.0), (9.0, 0.0)]);
        let mst = minimum_spanning_tree(&g).unwrap();
        assert_eq!(mst.edges().count(), 4);
        for v in 0..5 {
            assert!(mst.degree(v) >= 1);
        }
    }

    #[test]
    fn test_mst_trivial_sizes() {
        assert_eq!(
            minimum_spanning_tree(&WeightedGraph::new(0)).unwrap().num_nodes(),
            0
        );
        assert_eq!(
            minimum_spanning_tree(&WeightedGraph::new(1)).unwrap().edges().count(),
            0
        );
    }

    #[test]
    fn test_mst_disconnected_via_infinite_weights() {
        let mut g = WeightedGraph::new(3);
        g.set_weight(0, 1, 1.0);
        g.set_weight(0, 2, f64::INFINITY);
        g.set_weight(1, 2, f64::INFINITY);
        assert!(matches!(
            minimum_spanning_tree(&g),
            Err(CtpError::DisconnectedGraph)
        ));
    }
}
