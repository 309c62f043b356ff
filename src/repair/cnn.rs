//! Christofides Nearest Neighbour (CNN) repair.
//!
//! Repairs a Christofides tour around blocked edges in three phases:
//!
//! 1. **Shortcut** — follow the tour, skipping nodes whose incoming edge is
//!    blocked; blocked edges incident to each reached node become known
//!    (discovery on arrival). If the walk strands away from the start it
//!    returns there-and-back along the already-walked path.
//! 2. **Compression** — build an exploration multigraph over the unvisited
//!    nodes plus the start: per pair a *risky* direct edge of unknown status
//!    and a *safe* edge realizing the shortest path through edges known to be
//!    unblocked.
//! 3. **Exploration** — nearest-neighbor over that multigraph until every
//!    node is visited, then close back to the start.
//!
//! # Reference
//!
//! Liao, C.-S., Huang, Y. (2014). "The covering Canadian traveller problem",
//! *Theoretical Computer Science* 530, 80-88.

use crate::christofides::christofides_tour;
use crate::error::{CtpError, Result};
use crate::models::{AdjacencyGraph, Edge, EdgeSet, Node, Path, WeightedGraph};
use crate::primitives::shortest_path;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Finds a closed path covering all nodes while avoiding blocked edges.
///
/// `tour` is an optional precomputed closed Christofides tour (first node
/// repeated at the end); when absent one is built. The result is the realized
/// node sequence, which may revisit already-seen nodes on safe detours, and
/// its total weight in the original graph.
///
/// The instance must leave the graph connected after removing the blocked
/// edges; the classical setting blocks at most `n - 2` edges.
///
/// # Errors
///
/// Propagates [`CtpError::DisconnectedGraph`] from tour construction.
/// [`CtpError::NoSafePath`] signals a violated internal invariant: the
/// knowledge graph assembled in phase 2 connects the explored nodes by
/// construction.
///
/// # Examples
///
/// ```
/// use ctp_routing::models::{EdgeSet, WeightedGraph};
/// use ctp_routing::repair::cnn_repair;
///
/// let g = WeightedGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let (path, weight) = cnn_repair(&g, &EdgeSet::new(), None).unwrap();
/// assert_eq!(path.first(), path.last());
/// assert!(weight > 0.0);
/// ```
pub fn cnn_repair(
    graph: &WeightedGraph,
    blocked_edges: &EdgeSet,
    tour: Option<&[Node]>,
) -> Result<(Path, f64)> {
    let mut tour: Path = match tour {
        Some(t) => t.to_vec(),
        None => christofides_tour(graph)?.0,
    };
    // Drop the closing duplicate of the start node.
    tour.pop();
    if tour.is_empty() {
        return Ok((Vec::new(), 0.0));
    }

    let (visited_path, unvisited, known_blocked) = shortcut_phase(graph, &tour, blocked_edges);
    debug!(
        visited = visited_path.len(),
        unvisited = unvisited.len(),
        known_blocked = known_blocked.len(),
        "shortcut phase done"
    );

    if unvisited.is_empty() {
        let weight = graph.path_weight(&visited_path);
        return Ok((visited_path, weight));
    }

    let exploration = ExplorationGraph::build(graph, &visited_path, &unvisited, &known_blocked)?;
    let exploration_path = nearest_neighbor(&exploration, tour[0], blocked_edges)?;
    debug!(
        exploration_nodes = exploration.nodes.len(),
        "exploration phase done"
    );

    let mut final_path = visited_path;
    final_path.extend(exploration_path);
    let weight = graph.path_weight(&final_path);
    Ok((final_path, weight))
}

/// Records every blocked edge incident to the newly reached node.
///
/// This is the discovery-on-arrival step: an edge may enter `known_blocked`
/// only through one of its endpoints being visited.
fn discover_blocked(
    node: Node,
    graph: &WeightedGraph,
    blocked_edges: &EdgeSet,
    known_blocked: &mut EdgeSet,
) {
    for other in graph.nodes() {
        if other == node {
            continue;
        }
        let edge = Edge::new(node, other);
        if blocked_edges.contains(&edge) {
            known_blocked.insert(edge);
        }
    }
}

/// Walks the tour in order, skipping nodes behind blocked edges.
///
/// Returns the realized path (always ending back at the start, via a
/// there-and-back walk when necessary), the set of tour nodes left
/// unvisited, and the blocked edges discovered along the way.
fn shortcut_phase(
    graph: &WeightedGraph,
    tour: &[Node],
    blocked_edges: &EdgeSet,
) -> (Path, BTreeSet<Node>, EdgeSet) {
    let start = tour[0];
    let mut visited_path = vec![start];
    let mut visited: BTreeSet<Node> = BTreeSet::from([start]);
    let mut known_blocked = EdgeSet::new();
    discover_blocked(start, graph, blocked_edges, &mut known_blocked);

    let mut current = start;
    for &next in tour[1..].iter().chain(std::iter::once(&start)) {
        if next == current || blocked_edges.contains(&Edge::new(current, next)) {
            continue;
        }
        visited_path.push(next);
        visited.insert(next);
        discover_blocked(next, graph, blocked_edges, &mut known_blocked);
        current = next;
    }

    // Stranded mid-tour: retrace the walk back to the start.
    if visited_path.last() != Some(&start) {
        let back: Vec<Node> = visited_path[..visited_path.len() - 1]
            .iter()
            .rev()
            .copied()
            .collect();
        visited_path.extend(back);
    }

    let unvisited: BTreeSet<Node> = tour
        .iter()
        .copied()
        .filter(|node| !visited.contains(node))
        .collect();
    (visited_path, unvisited, known_blocked)
}

/// One of up to two parallel edges between an exploration-graph node pair.
#[derive(Debug, Clone)]
struct ParallelEdge {
    weight: f64,
    /// Realized node sequence, oriented from the canonical smaller endpoint.
    path: Path,
    /// Safe edges follow known-unblocked edges; risky edges are direct edges
    /// whose status is still unknown.
    safe: bool,
}

/// Multigraph over the unvisited nodes plus the start node.
///
/// Risky edges are listed before the safe edge of the same pair, so the
/// strict-improvement scan in [`find_best_path`] prefers risky on cost ties,
/// matching the insertion-order semantics the algorithm was designed with.
#[derive(Debug)]
struct ExplorationGraph {
    nodes: BTreeSet<Node>,
    edges: BTreeMap<Edge, Vec<ParallelEdge>>,
}

impl ExplorationGraph {
    fn build(
        graph: &WeightedGraph,
        visited_path: &[Node],
        unvisited: &BTreeSet<Node>,
        known_blocked: &EdgeSet,
    ) -> Result<Self> {
        let visited: BTreeSet<Node> = visited_path.iter().copied().collect();

        // Knowledge graph: every edge with a visited endpoint has been seen,
        // and seen edges are known blocked or known clear.
        let mut knowledge = AdjacencyGraph::new(graph.num_nodes());
        for edge in graph.edges() {
            let seen = visited.contains(&edge.u()) || visited.contains(&edge.v());
            if seen && !known_blocked.contains(&edge) {
                knowledge.add_edge(edge.u(), edge.v(), graph.weight(edge.u(), edge.v()));
            }
        }

        let start = visited_path[0];
        let mut nodes = unvisited.clone();
        nodes.insert(start);

        let mut edges: BTreeMap<Edge, Vec<ParallelEdge>> = BTreeMap::new();

        // Risky direct edges: both endpoints unvisited, so the edge is unseen
        // and its status unknown.
        for &u in &nodes {
            for &v in nodes.range((u + 1)..) {
                if unvisited.contains(&u) && unvisited.contains(&v) {
                    edges.entry(Edge::new(u, v)).or_default().push(ParallelEdge {
                        weight: graph.weight(u, v),
                        path: vec![u, v],
                        safe: false,
                    });
                }
            }
        }

        // Safe edges: shortest path through the knowledge graph. One must
        // exist for every pair; failure is an invariant violation.
        for &u in &nodes {
            for &v in nodes.range((u + 1)..) {
                let path = shortest_path(&knowledge, u, v)?;
                let weight = knowledge_path_weight(&knowledge, &path);
                edges.entry(Edge::new(u, v)).or_default().push(ParallelEdge {
                    weight,
                    path,
                    safe: true,
                });
            }
        }

        Ok(Self { nodes, edges })
    }
}

fn knowledge_path_weight(knowledge: &AdjacencyGraph, path: &[Node]) -> f64 {
    path.windows(2)
        .map(|w| {
            knowledge
                .neighbors(w[0])
                .iter()
                .find(|&&(v, _)| v == w[1])
                .map(|&(_, weight)| weight)
                .unwrap_or(f64::INFINITY)
        })
        .sum()
}

/// Greedy traversal of the exploration graph: repeatedly take the cheapest
/// usable parallel edge toward any unvisited node, then close back to the
/// start the same way.
fn nearest_neighbor(
    exploration: &ExplorationGraph,
    start: Node,
    blocked_edges: &EdgeSet,
) -> Result<Path> {
    let mut current = start;
    let mut unvisited: BTreeSet<Node> = exploration.nodes.iter().copied().collect();
    unvisited.remove(&current);
    let mut path: Path = Vec::new();

    while !unvisited.is_empty() {
        let next_path = find_best_path(exploration, current, &unvisited, blocked_edges)?;
        append_oriented(&mut path, current, &next_path);
        current = *path.last().expect("append adds at least one node");
        unvisited.remove(&current);
    }

    let return_path = find_best_path(
        exploration,
        current,
        &BTreeSet::from([start]),
        blocked_edges,
    )?;
    append_oriented(&mut path, current, &return_path);

    Ok(path)
}

/// Appends `segment` to `path`, oriented to depart from `current`, without
/// repeating `current` itself.
fn append_oriented(path: &mut Path, current: Node, segment: &[Node]) {
    if segment.first() == Some(&current) {
        path.extend_from_slice(&segment[1..]);
    } else {
        path.extend(segment[..segment.len() - 1].iter().rev());
    }
}

/// Picks the cheapest usable parallel edge from `current` to any target.
///
/// Risky edges that are actually blocked are excluded; this inspects the
/// ground-truth blocked set rather than only the discovered accumulator,
/// preserving the original oracle semantics of the exploration phase.
fn find_best_path(
    exploration: &ExplorationGraph,
    current: Node,
    targets: &BTreeSet<Node>,
    blocked_edges: &EdgeSet,
) -> Result<Path> {
    let mut min_cost = f64::INFINITY;
    let mut best: Option<&Path> = None;

    for &target in targets {
        let key = Edge::new(current, target);
        let Some(parallel) = exploration.edges.get(&key) else {
            continue;
        };
        for edge in parallel {
            if !edge.safe && blocked_edges.contains(&Edge::new(edge.path[0], edge.path[1])) {
                continue;
            }
            if edge.weight < min_cost {
                min_cost = edge.weight;
                best = Some(&edge.path);
            }
        }
    }

    match best {
        Some(path) => Ok(path.clone()),
        // A safe edge exists for every pair, so this cannot be reached.
        None => Err(CtpError::NoSafePath {
            u: current,
            v: *targets.iter().next().expect("targets is non-empty"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::path_edges;

    fn square() -> WeightedGraph {
        WeightedGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    fn blocked(edges: &[(Node, Node)]) -> EdgeSet {
        edges.iter().map(|&(u, v)| Edge::new(u, v)).collect()
    }

    #[test]
    fn test_no_blockage_returns_tour_unchanged() {
        let g = square();
        let (tour, tour_weight) = christofides_tour(&g).unwrap();
        let (path, weight) = cnn_repair(&g, &EdgeSet::new(), Some(&tour)).unwrap();
        assert_eq!(path, tour);
        assert!((weight - tour_weight).abs() < 1e-10);
    }

    #[test]
    fn test_shortcut_phase_discovers_only_incident_blocks() {
        let g = square();
        let tour = vec![0, 1, 2, 3];
        // Block an edge between two nodes the walk reaches and one it skips.
        let blocks = blocked(&[(0, 1), (1, 2)]);
        let (path, unvisited, known) = shortcut_phase(&g, &tour, &blocks);
        // 0 -> skip 1 -> 2 -> 3 -> 0
        assert_eq!(path, vec![0, 2, 3, 0]);
        assert_eq!(unvisited.into_iter().collect::<Vec<_>>(), vec![1]);
        // Both blocked edges touch visited nodes, so both are discovered.
        assert!(known.contains(&Edge::new(0, 1)));
        assert!(known.contains(&Edge::new(1, 2)));
    }

    #[test]
    fn test_stranded_walk_retraces_to_start() {
        let g = square();
        let tour = vec![0, 1, 2, 3];
        // Blocking both edges of the closing stretch strands the walk at 2.
        let blocks = blocked(&[(2, 3), (2, 0), (3, 0)]);
        let (path, _, _) = shortcut_phase(&g, &tour, &blocks);
        assert_eq!(path, vec![0, 1, 2, 1, 0]);
    }

    #[test]
    fn test_blocked_tour_edge_forces_longer_tour() {
        let g = square();
        let (tour, tour_weight) = christofides_tour(&g).unwrap();
        let blocks = blocked(&[(tour[0], tour[1])]);
        let (path, weight) = cnn_repair(&g, &blocks, Some(&tour)).unwrap();

        assert_eq!(path.first(), Some(&tour[0]));
        assert_eq!(path.last(), Some(&tour[0]));
        for node in 0..4 {
            assert!(path.contains(&node), "missing {node} in {path:?}");
        }
        for edge in path_edges(&path) {
            assert!(!blocks.contains(&edge));
        }
        assert!(weight > tour_weight);
    }

    #[test]
    fn test_exploration_graph_edges() {
        let g = square();
        let tour = vec![0, 1, 2, 3];
        let blocks = blocked(&[(0, 1), (1, 2)]);
        let (path, unvisited, known) = shortcut_phase(&g, &tour, &blocks);
        let exploration = ExplorationGraph::build(&g, &path, &unvisited, &known).unwrap();

        assert_eq!(
            exploration.nodes.iter().copied().collect::<Vec<_>>(),
            vec![0, 1]
        );
        // Node 1 was never visited but every edge toward it was seen from the
        // visited side, so the pair gets a safe edge only.
        let parallel = &exploration.edges[&Edge::new(0, 1)];
        assert_eq!(parallel.len(), 1);
        assert!(parallel[0].safe);
        // Cheapest clear route 0-1 avoids the two blocked edges.
        assert_eq!(parallel[0].path, vec![0, 3, 1]);
    }

    #[test]
    fn test_empty_graph() {
        let g = WeightedGraph::new(0);
        assert_eq!(cnn_repair(&g, &EdgeSet::new(), None).unwrap(), (vec![], 0.0));
    }
}
