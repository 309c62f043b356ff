//! Constructed worst-case instances for the repair strategies.

use crate::models::{Edge, EdgeSet, WeightedGraph};

/// Builds the chain-of-triangles instance that drives CNN to its
/// Θ(log k) ratio, together with its blocked-edge set.
///
/// The bottom row holds `2^p` nodes in a unit-weight path, each consecutive
/// pair capped by an apex node; an extra hub `u` connects to node 0 with a
/// clear unit edge and to every other node with a blocked unit edge. All
/// remaining pairs get weight 2, which keeps the graph complete and metric.
/// The number of blocked edges is `2^(p+1) - 2`.
///
/// # Examples
///
/// ```
/// use ctp_routing::generators::cnn_tight_bound_graph;
///
/// let (g, blocked) = cnn_tight_bound_graph(2);
/// assert_eq!(g.num_nodes(), 8);
/// assert_eq!(blocked.len(), 6);
/// assert!(g.is_metric(1e-12));
/// ```
pub fn cnn_tight_bound_graph(p: u32) -> (WeightedGraph, EdgeSet) {
    let bottom = 1usize << p;
    let hub = (1usize << (p + 1)) - 1;
    let n = hub + 1;

    let mut graph = WeightedGraph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            graph.set_weight(u, v, 2.0);
        }
    }

    // Triangle chain along the bottom row.
    for i in 0..bottom - 1 {
        let apex = bottom + i;
        graph.set_weight(i, i + 1, 1.0);
        graph.set_weight(i, apex, 1.0);
        graph.set_weight(i + 1, apex, 1.0);
    }

    graph.set_weight(hub, 0, 1.0);

    let mut blocked = EdgeSet::new();
    for v in 1..hub {
        graph.set_weight(v, hub, 1.0);
        blocked.insert(Edge::new(v, hub));
    }

    (graph, blocked)
}

/// Number of polygon nodes in [`cr_tight_bound_graph`] instances.
const CR_POLYGON_NODES: usize = 24;

/// Builds a polygon instance that degrades the CR strategy as `p` grows.
///
/// Blocks the first `p` perimeter edges `(i, i+1)` of a fixed 24-node
/// regular polygon. Each blocked perimeter step has no tour position between
/// its endpoints, so CR must defer the target to a later pass and stitch it
/// in over longer chords; the repair cost grows with `p` while the
/// Christofides tour (the perimeter) stays fixed.
///
/// # Panics
///
/// Panics if `p > 21`, which would leave fewer than `n - 2` usable edges.
pub fn cr_tight_bound_graph(p: usize) -> (WeightedGraph, EdgeSet) {
    assert!(p <= CR_POLYGON_NODES - 3, "too many blocked edges");

    let graph = super::polygon_graph(CR_POLYGON_NODES, -5.0, 5.0);
    let blocked: EdgeSet = (0..p).map(|i| Edge::new(i, i + 1)).collect();
    (graph, blocked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnn_tight_bound_structure() {
        let (g, blocked) = cnn_tight_bound_graph(1);
        // 2 bottom nodes, 1 apex, 1 hub.
        assert_eq!(g.num_nodes(), 4);
        let hub = 3;
        assert_eq!(g.weight(0, 1), 1.0);
        assert_eq!(g.weight(hub, 0), 1.0);
        assert_eq!(blocked.len(), 2);
        assert!(blocked.contains(&Edge::new(1, hub)));
        assert!(blocked.contains(&Edge::new(2, hub)));
        // The clear hub edge is not blocked.
        assert!(!blocked.contains(&Edge::new(0, hub)));
    }

    #[test]
    fn test_cnn_tight_bound_is_metric() {
        for p in 1..=3 {
            let (g, _) = cnn_tight_bound_graph(p);
            assert!(g.is_metric(1e-12), "p = {p}");
        }
    }

    #[test]
    fn test_cr_tight_bound_blocks_perimeter_prefix() {
        let (g, blocked) = cr_tight_bound_graph(4);
        assert_eq!(g.num_nodes(), CR_POLYGON_NODES);
        assert_eq!(blocked.len(), 4);
        assert!(blocked.contains(&Edge::new(0, 1)));
        assert!(blocked.contains(&Edge::new(3, 4)));
        assert!(!blocked.contains(&Edge::new(4, 5)));
    }
}
