//! Eulerian circuits over multigraphs (Hierholzer's algorithm).

use crate::models::Node;

/// An undirected multigraph: parallel edges between the same node pair are
/// kept distinct, which the tour builder needs when a matching edge
/// duplicates a spanning-tree edge.
///
/// # Examples
///
/// ```
/// use ctp_routing::primitives::Multigraph;
///
/// let mut mg = Multigraph::new(2);
/// mg.add_edge(0, 1);
/// mg.add_edge(0, 1);
/// assert_eq!(mg.num_edges(), 2);
/// assert_eq!(mg.degree(0), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Multigraph {
    adj: Vec<Vec<(Node, usize)>>,
    num_edges: usize,
}

impl Multigraph {
    /// Creates an edgeless multigraph on `n` nodes.
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
            num_edges: 0,
        }
    }

    /// Adds an undirected edge; parallel edges accumulate.
    pub fn add_edge(&mut self, u: Node, v: Node) {
        let id = self.num_edges;
        self.adj[u].push((v, id));
        self.adj[v].push((u, id));
        self.num_edges += 1;
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges (parallel edges counted individually).
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Degree of `u` (parallel edges counted individually).
    pub fn degree(&self, u: Node) -> usize {
        self.adj[u].len()
    }
}

/// Enumerates an Eulerian circuit starting at `start`, returned as the
/// ordered sequence of directed edges traversed.
///
/// Uses Hierholzer's algorithm in O(V + E). The caller must pass a
/// multigraph whose edge-carrying nodes are connected and all of even degree
/// (the tour builder guarantees this by unioning a spanning tree with a
/// perfect matching on its odd-degree nodes); otherwise the walk covers only
/// the edges reachable from `start`.
///
/// # Examples
///
/// ```
/// use ctp_routing::primitives::{eulerian_circuit, Multigraph};
///
/// let mut mg = Multigraph::new(3);
/// mg.add_edge(0, 1);
/// mg.add_edge(1, 2);
/// mg.add_edge(2, 0);
/// let circuit = eulerian_circuit(&mg, 0);
/// assert_eq!(circuit.len(), 3);
/// assert_eq!(circuit[0].0, 0);
/// assert_eq!(circuit[2].1, 0);
/// ```
pub fn eulerian_circuit(multigraph: &Multigraph, start: Node) -> Vec<(Node, Node)> {
    let n = multigraph.num_nodes();
    if n == 0 || multigraph.degree(start) == 0 {
        return Vec::new();
    }

    let mut used = vec![false; multigraph.num_edges];
    let mut next_idx = vec![0usize; n];
    let mut stack = vec![start];
    let mut walk: Vec<Node> = Vec::with_capacity(multigraph.num_edges + 1);

    while let Some(&v) = stack.last() {
        let neighbors = &multigraph.adj[v];
        while next_idx[v] < neighbors.len() && used[neighbors[next_idx[v]].1] {
            next_idx[v] += 1;
        }
        if next_idx[v] == neighbors.len() {
            walk.push(v);
            stack.pop();
        } else {
            let (u, id) = neighbors[next_idx[v]];
            used[id] = true;
            stack.push(u);
        }
    }

    walk.reverse();
    walk.windows(2).map(|w| (w[0], w[1])).collect()
}
