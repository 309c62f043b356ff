//! Dense complete graph and sparse adjacency graph.

use super::{Edge, Node};

/// A complete, undirected, simple weighted graph over nodes `0..n`, stored as
/// a dense n×n row-major weight matrix.
///
/// Weights are kept symmetric with a zero diagonal. The approximation bounds
/// of the tour builder additionally assume the triangle inequality, which
/// callers can check with [`WeightedGraph::is_metric`]; violating it voids
/// the bounds but not termination.
///
/// # Examples
///
/// ```
/// use ctp_routing::models::WeightedGraph;
///
/// let g = WeightedGraph::from_points(&[(0.0, 0.0), (3.0, 4.0), (3.0, 0.0)]);
/// assert_eq!(g.num_nodes(), 3);
/// assert!((g.weight(0, 1) - 5.0).abs() < 1e-10);
/// assert!(g.is_metric(1e-10));
/// ```
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    weights: Vec<f64>,
    n: usize,
}

impl WeightedGraph {
    /// Creates a complete graph on `n` nodes with all weights zero.
    pub fn new(n: usize) -> Self {
        Self {
            weights: vec![0.0; n * n],
            n,
        }
    }

    /// Builds a complete graph from 2D points with Euclidean edge weights.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut graph = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                graph.set_weight(i, j, (dx * dx + dy * dy).sqrt());
            }
        }
        graph
    }

    /// Creates a graph from an explicit n×n weight grid.
    ///
    /// Returns `None` if the data length doesn't match `n * n`.
    pub fn from_data(n: usize, weights: Vec<f64>) -> Option<Self> {
        if weights.len() != n * n {
            return None;
        }
        Some(Self { weights, n })
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// Iterates over all nodes in ascending order.
    pub fn nodes(&self) -> std::ops::Range<Node> {
        0..self.n
    }

    /// Weight of the edge between `u` and `v`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn weight(&self, u: Node, v: Node) -> f64 {
        self.weights[u * self.n + v]
    }

    /// Sets the weight of the edge between `u` and `v` (both directions).
    pub fn set_weight(&mut self, u: Node, v: Node, weight: f64) {
        self.weights[u * self.n + v] = weight;
        self.weights[v * self.n + u] = weight;
    }

    /// Iterates over all edges in canonical order (ascending `(u, v)`).
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n).flat_map(move |u| ((u + 1)..self.n).map(move |v| Edge::new(u, v)))
    }

    /// Total weight of the consecutive edges of `path`.
    pub fn path_weight(&self, path: &[Node]) -> f64 {
        path.windows(2).map(|w| self.weight(w[0], w[1])).sum()
    }

    /// Returns `true` if every triple satisfies the triangle inequality
    /// within the given tolerance.
    pub fn is_metric(&self, tol: f64) -> bool {
        for u in 0..self.n {
            for v in (u + 1)..self.n {
                let direct = self.weight(u, v);
                for x in 0..self.n {
                    if x == u || x == v {
                        continue;
                    }
                    if direct > self.weight(u, x) + self.weight(x, v) + tol {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// An undirected weighted graph over nodes `0..n` stored as adjacency lists.
///
/// Used for subgraphs of the complete input graph: spanning trees and the
/// partial-knowledge graph built during repair. Neighbor lists are kept
/// sorted by node id so iteration order (and therefore tie-breaking in any
/// consumer) is deterministic.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    adj: Vec<Vec<(Node, f64)>>,
}

impl AdjacencyGraph {
    /// Creates an edgeless graph on `n` nodes.
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
        }
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.adj.len()
    }

    /// Adds an undirected edge. Callers must not add the same edge twice.
    pub fn add_edge(&mut self, u: Node, v: Node, weight: f64) {
        let pos = self.adj[u].partition_point(|&(w, _)| w < v);
        self.adj[u].insert(pos, (v, weight));
        let pos = self.adj[v].partition_point(|&(w, _)| w < u);
        self.adj[v].insert(pos, (u, weight));
    }

    /// Neighbors of `u` with edge weights, ascending by node id.
    pub fn neighbors(&self, u: Node) -> &[(Node, f64)] {
        &self.adj[u]
    }

    /// Degree of `u`.
    pub fn degree(&self, u: Node) -> usize {
        self.adj[u].len()
    }

    /// Returns `true` if the edge `{u, v}` is present.
    pub fn has_edge(&self, u: Node, v: Node) -> bool {
        self.adj[u].binary_search_by_key(&v, |&(w, _)| w).is_ok()
    }

    /// All edges in canonical form, ascending by `(u, v)`.
    pub fn edges(&self) -> impl Iterator<Item = (Edge, f64)> + '_ {
        self.adj.iter().enumerate().flat_map(|(u, neighbors)| {
            neighbors
                .iter()
                .filter(move |&&(v, _)| u < v)
                .map(move |&(v, w)| (Edge::new(u, v), w))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let g = WeightedGraph::from_points(&[(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)]);
        assert_eq!(g.num_nodes(), 3);
        assert!((g.weight(0, 1) - 5.0).abs() < 1e-10);
        assert!((g.weight(1, 0) - 5.0).abs() < 1e-10);
        assert!((g.weight(0, 2) - 8.0).abs() < 1e-10);
        assert!(g.weight(0, 0).abs() < 1e-10);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(WeightedGraph::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_path_weight() {
        let g = WeightedGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!((g.path_weight(&[0, 1, 2, 0]) - 4.0).abs() < 1e-10);
        assert!(g.path_weight(&[1]).abs() < 1e-10);
    }

    #[test]
    fn test_euclidean_is_metric() {
        let g = WeightedGraph::from_points(&[(0.0, 0.0), (1.0, 3.0), (-2.0, 1.5), (4.0, 4.0)]);
        assert!(g.is_metric(1e-10));
    }

    #[test]
    fn test_non_metric_detected() {
        let mut g = WeightedGraph::new(3);
        g.set_weight(0, 1, 1.0);
        g.set_weight(1, 2, 1.0);
        g.set_weight(0, 2, 10.0);
        assert!(!g.is_metric(1e-10));
    }

    #[test]
    fn test_edges_canonical_order() {
        let g = WeightedGraph::new(3);
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(
            edges,
            vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 2)]
        );
    }

    #[test]
    fn test_adjacency_graph() {
        let mut g = AdjacencyGraph::new(4);
        g.add_edge(2, 0, 1.5);
        g.add_edge(0, 1, 2.5);
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.degree(3), 0);
        assert!(g.has_edge(0, 2));
        assert!(g.has_edge(2, 0));
        assert!(!g.has_edge(1, 2));
        // neighbor lists sorted by node id
        assert_eq!(g.neighbors(0), &[(1, 2.5), (2, 1.5)]);
        let edges: Vec<_> = g.edges().map(|(e, _)| e).collect();
        assert_eq!(edges, vec![Edge::new(0, 1), Edge::new(0, 2)]);
    }
}
