//! Christofides tour construction.

use crate::error::Result;
use crate::models::{Node, Path, WeightedGraph};
use crate::primitives::{eulerian_circuit, min_weight_matching, minimum_spanning_tree, Multigraph};
use tracing::debug;

/// Builds an approximate TSP tour with the Christofides algorithm.
///
/// Returns a closed tour (first node repeated at the end) and its total
/// weight. On a metric graph the weight is at most 1.5× the optimal tour
/// weight.
///
/// # Algorithm
///
/// 1. Compute a minimum spanning tree T.
/// 2. Collect the nodes of odd degree in T; this subset is always even-sized.
/// 3. Compute a minimum-weight perfect matching M on the complete subgraph
///    induced by those nodes.
/// 4. Union T and M into a multigraph; every node now has even degree, so an
///    Eulerian circuit exists.
/// 5. Shortcut the circuit into a Hamiltonian cycle by keeping only the first
///    occurrence of each node.
///
/// Graphs with fewer than two nodes yield an empty tour of weight zero.
///
/// # Errors
///
/// Returns [`CtpError::DisconnectedGraph`](crate::CtpError::DisconnectedGraph)
/// if no spanning tree exists.
///
/// # Reference
///
/// Christofides, N. (1976). "Worst-case analysis of a new heuristic for the
/// travelling salesman problem", Report 388, GSIA, Carnegie Mellon University.
///
/// # Examples
///
/// ```
/// use ctp_routing::christofides::christofides_tour;
/// use ctp_routing::models::WeightedGraph;
///
/// // Unit square: the optimal tour has weight 4.
/// let g = WeightedGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let (tour, weight) = christofides_tour(&g).unwrap();
/// assert_eq!(tour.len(), 5);
/// assert!(weight <= 1.5 * 4.0 + 1e-10);
/// ```
pub fn christofides_tour(graph: &WeightedGraph) -> Result<(Path, f64)> {
    let n = graph.num_nodes();
    if n < 2 {
        return Ok((Vec::new(), 0.0));
    }

    let mst = minimum_spanning_tree(graph)?;

    let odd_nodes: Vec<Node> = graph.nodes().filter(|&v| mst.degree(v) % 2 == 1).collect();
    let matching = min_weight_matching(graph, &odd_nodes)?;
    debug!(
        nodes = n,
        odd_nodes = odd_nodes.len(),
        "spanning tree and matching ready"
    );

    let mut multigraph = Multigraph::new(n);
    for (edge, _) in mst.edges() {
        multigraph.add_edge(edge.u(), edge.v());
    }
    for edge in &matching {
        multigraph.add_edge(edge.u(), edge.v());
    }

    let circuit = eulerian_circuit(&multigraph, 0);
    let visit_order: Vec<Node> = circuit.iter().map(|&(u, _)| u).collect();
    let tour = shortcut_eulerian_path(&visit_order);
    let weight = graph.path_weight(&tour);

    debug!(circuit_edges = circuit.len(), weight, "tour built");
    Ok((tour, weight))
}

/// Shortcuts a walk with repeated nodes into a simple closed cycle.
///
/// Keeps only the first occurrence of each node, preserving visitation
/// order, then closes the cycle back to the first node. On a metric graph
/// the shortcuts cannot increase the walk's weight.
///
/// # Examples
///
/// ```
/// use ctp_routing::christofides::shortcut_eulerian_path;
///
/// assert_eq!(shortcut_eulerian_path(&[0, 1, 2, 1, 3]), vec![0, 1, 2, 3, 0]);
/// ```
pub fn shortcut_eulerian_path(walk: &[Node]) -> Path {
    let mut visited = std::collections::HashSet::new();
    let mut cycle: Path = Vec::new();

    for &node in walk {
        if visited.insert(node) {
            cycle.push(node);
        }
    }

    // The deduplicated prefix never repeats a node, so closing the cycle
    // always requires appending the first node again.
    if let Some(&first) = cycle.first() {
        cycle.push(first);
    }

    cycle
}
