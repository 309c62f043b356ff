//! Node, edge, and path types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A node of the graph: a dense index in `0..n`.
pub type Node = usize;

/// An ordered sequence of nodes. A *closed tour* starts and ends at the same
/// node and visits every other node exactly once.
pub type Path = Vec<Node>;

/// A set of undirected edges, e.g. the blocked-edge set of an instance or the
/// known-blocked accumulator built up during traversal.
pub type EdgeSet = HashSet<Edge>;

/// An undirected edge between two distinct nodes, stored in canonical form.
///
/// The constructor orders the endpoints, so `Edge::new(u, v)` and
/// `Edge::new(v, u)` compare equal and hash identically. Every edge-set
/// lookup in the crate goes through this type, which is what makes "is this
/// edge blocked?" checks independent of traversal direction.
///
/// # Examples
///
/// ```
/// use ctp_routing::models::Edge;
///
/// assert_eq!(Edge::new(3, 1), Edge::new(1, 3));
/// assert_eq!(Edge::new(1, 3).u(), 1);
/// assert_eq!(Edge::new(1, 3).v(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge(Node, Node);

impl Edge {
    /// Creates a canonical edge between two distinct nodes.
    ///
    /// # Panics
    ///
    /// Panics if `u == v`; the graphs here are simple.
    pub fn new(u: Node, v: Node) -> Self {
        assert_ne!(u, v, "self-loops are not valid edges");
        if u < v {
            Self(u, v)
        } else {
            Self(v, u)
        }
    }

    /// Smaller endpoint.
    pub fn u(&self) -> Node {
        self.0
    }

    /// Larger endpoint.
    pub fn v(&self) -> Node {
        self.1
    }

    /// Returns `true` if `node` is one of the endpoints.
    pub fn touches(&self, node: Node) -> bool {
        self.0 == node || self.1 == node
    }

    /// Returns the endpoint opposite to `node`, or `None` if `node` is not
    /// an endpoint.
    pub fn other(&self, node: Node) -> Option<Node> {
        if self.0 == node {
            Some(self.1)
        } else if self.1 == node {
            Some(self.0)
        } else {
            None
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Returns the consecutive edges of a path.
///
/// # Examples
///
/// ```
/// use ctp_routing::models::{path_edges, Edge};
///
/// let edges = path_edges(&[0, 2, 1, 0]);
/// assert_eq!(edges, vec![Edge::new(0, 2), Edge::new(1, 2), Edge::new(0, 1)]);
/// ```
pub fn path_edges(path: &[Node]) -> Vec<Edge> {
    path.windows(2).map(|w| Edge::new(w[0], w[1])).collect()
}

/// Returns `true` if `path` is a closed tour over exactly the nodes `0..n`:
/// first and last node equal, every node appearing exactly once otherwise.
pub fn is_closed_tour(path: &[Node], n: usize) -> bool {
    if path.len() != n + 1 || path.first() != path.last() {
        return false;
    }
    let mut seen = vec![false; n];
    for &node in &path[..path.len() - 1] {
        if node >= n || seen[node] {
            return false;
        }
        seen[node] = true;
    }
    seen.into_iter().all(|s| s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_canonical() {
        assert_eq!(Edge::new(5, 2), Edge::new(2, 5));
        assert_eq!(Edge::new(2, 5).u(), 2);
        assert_eq!(Edge::new(2, 5).v(), 5);
    }

    #[test]
    #[should_panic]
    fn test_edge_rejects_self_loop() {
        let _ = Edge::new(3, 3);
    }

    #[test]
    fn test_edge_touches_other() {
        let e = Edge::new(4, 1);
        assert!(e.touches(1));
        assert!(e.touches(4));
        assert!(!e.touches(2));
        assert_eq!(e.other(1), Some(4));
        assert_eq!(e.other(4), Some(1));
        assert_eq!(e.other(2), None);
    }

    #[test]
    fn test_edge_set_membership_is_direction_free() {
        let mut set = EdgeSet::new();
        set.insert(Edge::new(7, 3));
        assert!(set.contains(&Edge::new(3, 7)));
    }

    #[test]
    fn test_path_edges_empty_and_single() {
        assert!(path_edges(&[]).is_empty());
        assert!(path_edges(&[4]).is_empty());
    }

    #[test]
    fn test_is_closed_tour() {
        assert!(is_closed_tour(&[0, 1, 2, 0], 3));
        assert!(is_closed_tour(&[2, 0, 1, 2], 3));
        // not closed
        assert!(!is_closed_tour(&[0, 1, 2], 3));
        // repeated interior node
        assert!(!is_closed_tour(&[0, 1, 1, 0], 3));
        // missing node
        assert!(!is_closed_tour(&[0, 1, 0], 3));
    }
}
