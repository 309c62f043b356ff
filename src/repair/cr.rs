//! Cyclic Routing (CR) repair.
//!
//! Treats the tour as an ordered cycle and repeatedly shortcuts it around
//! blocked edges. Each pass walks the remaining nodes in the current
//! direction; a blocked step is bridged by the first two-edge detour found
//! when scanning intermediate candidates in cyclic order, and targets with no
//! detour are deferred to a later pass. When a pass ends away from where the
//! remaining list expected, the traversal direction flips and the remaining
//! nodes are reordered around the pass's endpoint.
//!
//! # Reference
//!
//! Liao, C.-S., Huang, Y. (2014). "The covering Canadian traveller problem",
//! *Theoretical Computer Science* 530, 80-88.

use crate::christofides::christofides_tour;
use crate::error::{CtpError, Result};
use crate::models::{Edge, EdgeSet, Node, Path, WeightedGraph};
use std::collections::VecDeque;
use tracing::debug;

/// A tour node tagged with its original cyclic position.
type IndexedNode = (usize, Node);

/// Finds a closed path covering all nodes while avoiding blocked edges.
///
/// `tour` is an optional precomputed closed Christofides tour (first node
/// repeated at the end); when absent one is built. The result may revisit
/// nodes used as detour intermediates.
///
/// The instance must leave the graph connected after removing the blocked
/// edges; the classical setting blocks at most `n - 2` edges.
///
/// # Errors
///
/// Propagates [`CtpError::DisconnectedGraph`] from tour construction, and
/// returns [`CtpError::NoReturnPath`] if the closing edge back to the start
/// is blocked and detour searches in both directions are exhausted.
///
/// # Examples
///
/// ```
/// use ctp_routing::models::{Edge, EdgeSet, WeightedGraph};
/// use ctp_routing::repair::cr_repair;
///
/// let g = WeightedGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let blocked: EdgeSet = [Edge::new(0, 1)].into_iter().collect();
/// let (path, _) = cr_repair(&g, &blocked, None).unwrap();
/// assert_eq!(path.first(), path.last());
/// ```
pub fn cr_repair(
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

    let full_tour: Vec<IndexedNode> = tour.into_iter().enumerate().collect();

    let mut segments = find_tour_segments(blocked_edges, &full_tour);
    complete_tour(blocked_edges, &mut segments, &full_tour)?;
    let final_path = construct_final_path(&segments, &full_tour);

    let weight = graph.path_weight(&final_path);
    Ok((final_path, weight))
}

/// Runs shortcut passes until every tour position has been visited.
fn find_tour_segments(
    blocked_edges: &EdgeSet,
    full_tour: &[IndexedNode],
) -> Vec<Vec<IndexedNode>> {
    let mut to_visit: Vec<IndexedNode> = full_tour.to_vec();
    let mut direction: i32 = 1;
    let mut segments: Vec<Vec<IndexedNode>> = Vec::new();
    let mut passes = 0usize;

    while !to_visit.is_empty() {
        passes += 1;
        let segment = shortcut(blocked_edges, to_visit.clone(), full_tour, direction);

        let unvisited: Vec<IndexedNode> = to_visit
            .iter()
            .filter(|entry| !segment.contains(entry))
            .copied()
            .collect();

        if segment.len() > 1 {
            segments.push(segment.clone());
        }

        if unvisited.is_empty() {
            break;
        }

        (direction, to_visit) = update_traversal_direction(&segment, &to_visit, unvisited);
    }

    debug!(passes, segments = segments.len(), "shortcut passes done");
    segments
}

/// Decides the next direction and rebuilds the remaining worklist.
///
/// The direction reverses when the pass ended somewhere other than the
/// expected end of the worklist, or made no progress at all. On reversal the
/// still-unvisited nodes are split around the pass endpoint and each half is
/// reversed, so the next pass sweeps back across them.
fn update_traversal_direction(
    segment: &[IndexedNode],
    to_visit: &[IndexedNode],
    unvisited: Vec<IndexedNode>,
) -> (i32, Vec<IndexedNode>) {
    let segment_end = *segment.last().expect("a pass visits at least one node");
    let expected_end = to_visit.last().expect("worklist is non-empty");

    let should_reverse = segment_end.0 != expected_end.0 || segment.len() == 1;
    let direction = if should_reverse { -1 } else { 1 };

    let next = if should_reverse {
        let (lower, higher): (Vec<IndexedNode>, Vec<IndexedNode>) = unvisited
            .into_iter()
            .partition(|&(index, _)| index < segment_end.0);
        let mut next = vec![segment_end];
        next.extend(lower.into_iter().rev());
        next.extend(higher.into_iter().rev());
        next
    } else {
        let mut next = vec![segment_end];
        next.extend(unvisited);
        next
    };

    (direction, next)
}

/// One shortcut pass: visits the worklist in order, bridging blocked steps
/// with the first usable two-edge detour and deferring targets without one.
fn shortcut(
    blocked_edges: &EdgeSet,
    to_visit: Vec<IndexedNode>,
    full_tour: &[IndexedNode],
    direction: i32,
) -> Vec<IndexedNode> {
    let mut worklist: VecDeque<IndexedNode> = to_visit.into();
    let mut segment: Vec<IndexedNode> = Vec::new();

    let (first_index, _) = worklist.pop_front().expect("worklist is non-empty");
    segment.push(full_tour[first_index]);

    while let Some((next_index, next_node)) = worklist.pop_front() {
        // The current position is wherever the segment last ended; deferred
        // targets leave it unchanged.
        let current = *segment.last().expect("segment starts non-empty");
        if blocked_edges.contains(&Edge::new(current.1, next_node)) {
            let detour = find_alternate_path(
                blocked_edges,
                current,
                (next_index, next_node),
                full_tour,
                direction,
            );
            match detour {
                Some(detour) => {
                    for &(index, _) in &detour[1..detour.len() - 1] {
                        segment.push(full_tour[index]);
                    }
                    segment.push(full_tour[next_index]);
                }
                // No detour this pass: defer the target.
                None => continue,
            }
        } else {
            segment.push(full_tour[next_index]);
        }
    }

    segment
}

/// Searches for a two-edge detour around the blocked edge from `start` to
/// `end`.
///
/// Candidates are the tour nodes scanned in cyclic order (respecting
/// `direction`) starting just after `start` and stopping before `end`; the
/// first candidate with both legs unblocked wins. First match, not minimum
/// cost.
fn find_alternate_path(
    blocked_edges: &EdgeSet,
    start: IndexedNode,
    end: IndexedNode,
    full_tour: &[IndexedNode],
    direction: i32,
) -> Option<Vec<IndexedNode>> {
    let (start_index, start_node) = start;
    let (end_index, end_node) = end;

    let mut cycle: Vec<IndexedNode> = full_tour.to_vec();
    if direction < 0 {
        cycle.reverse();
    }

    // Rotate so the scan begins just after the start position.
    let split = cycle
        .iter()
        .position(|&(index, _)| index == start_index)
        .expect("start position is part of the tour");
    cycle.rotate_left(split + 1);

    for &(index, candidate) in &cycle {
        if index == end_index {
            break;
        }
        if !blocked_edges.contains(&Edge::new(start_node, candidate))
            && !blocked_edges.contains(&Edge::new(candidate, end_node))
        {
            return Some(vec![start, (index, candidate), end]);
        }
    }

    None
}

/// Appends a return segment if the last pass did not end at the start node.
///
/// Tries the direct edge, then detours in the forward and backward
/// directions; exhausting all three is fatal.
fn complete_tour(
    blocked_edges: &EdgeSet,
    segments: &mut Vec<Vec<IndexedNode>>,
    full_tour: &[IndexedNode],
) -> Result<()> {
    let Some(last) = segments.last().and_then(|segment| segment.last()).copied() else {
        return Ok(());
    };
    let first = full_tour[0];
    if last.1 == first.1 {
        return Ok(());
    }

    if !blocked_edges.contains(&Edge::new(last.1, first.1)) {
        segments.push(vec![last, first]);
        return Ok(());
    }

    let detour = find_alternate_path(blocked_edges, last, first, full_tour, 1)
        .or_else(|| find_alternate_path(blocked_edges, last, first, full_tour, -1));

    match detour {
        Some(detour) => {
            segments.push(detour);
            Ok(())
        }
        None => Err(CtpError::NoReturnPath {
            from: last.1,
            start: first.1,
        }),
    }
}

/// Concatenates the segments into one closed path, dropping the duplicate
/// joint node between consecutive segments.
fn construct_final_path(segments: &[Vec<IndexedNode>], full_tour: &[IndexedNode]) -> Path {
    let start = full_tour[0].1;
    let mut path = vec![start];

    for segment in segments {
        for &(_, node) in &segment[1..] {
            path.push(node);
        }
    }

    if path.last() != Some(&start) {
        path.push(start);
    }

    path
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
        let (path, weight) = cr_repair(&g, &EdgeSet::new(), Some(&tour)).unwrap();
        assert_eq!(path, tour);
        assert!((weight - tour_weight).abs() < 1e-10);
    }

    #[test]
    fn test_blocked_step_to_adjacent_node_defers_it() {
        let full_tour: Vec<IndexedNode> = vec![(0, 0), (1, 1), (2, 2), (3, 3)];
        let blocks = blocked(&[(0, 1)]);
        let segment = shortcut(&blocks, full_tour.clone(), &full_tour, 1);
        // No tour position lies cyclically between 0 and 1, so there is no
        // detour candidate: node 1 defers and the pass carries on from 0.
        assert_eq!(segment, vec![(0, 0), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_blocked_step_bridged_by_detour() {
        let full_tour: Vec<IndexedNode> = vec![(0, 0), (1, 1), (2, 2), (3, 3)];
        // Worklist skips node 1, and the direct step 0-2 is blocked.
        let to_visit: Vec<IndexedNode> = vec![(0, 0), (2, 2), (3, 3)];
        let blocks = blocked(&[(0, 2)]);
        let segment = shortcut(&blocks, to_visit, &full_tour, 1);
        // Candidate 1 sits between positions 0 and 2 with both legs clear.
        assert_eq!(segment, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_detour_scan_respects_direction() {
        let full_tour: Vec<IndexedNode> = vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)];
        let blocks = blocked(&[(0, 2)]);
        let forward = find_alternate_path(&blocks, (0, 0), (2, 2), &full_tour, 1);
        let backward = find_alternate_path(&blocks, (0, 0), (2, 2), &full_tour, -1);
        // Forward scan starts after position 0: candidate 1 comes first.
        assert_eq!(forward, Some(vec![(0, 0), (1, 1), (2, 2)]));
        // Backward scan runs the cycle in reverse: candidate 4 comes first.
        assert_eq!(backward, Some(vec![(0, 0), (4, 4), (2, 2)]));
    }

    #[test]
    fn test_reversal_reorders_remaining_nodes() {
        let to_visit: Vec<IndexedNode> = vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)];
        let segment: Vec<IndexedNode> = vec![(0, 0), (2, 2)];
        let unvisited: Vec<IndexedNode> = vec![(1, 1), (3, 3), (4, 4)];
        let (direction, next) = update_traversal_direction(&segment, &to_visit, unvisited);
        assert_eq!(direction, -1);
        // Endpoint first, then lower positions reversed, then higher reversed.
        assert_eq!(next, vec![(2, 2), (1, 1), (4, 4), (3, 3)]);
    }

    #[test]
    fn test_blocked_tour_edge_forces_longer_tour() {
        let g = square();
        let (tour, tour_weight) = christofides_tour(&g).unwrap();
        let blocks = blocked(&[(tour[0], tour[1])]);
        let (path, weight) = cr_repair(&g, &blocks, Some(&tour)).unwrap();

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
    fn test_return_path_exhaustion_is_fatal() {
        let full_tour: Vec<IndexedNode> = vec![(0, 0), (1, 1), (2, 2)];
        // The pass ends at 2 and every way back to 0 is blocked.
        let blocks = blocked(&[(2, 0), (1, 0)]);
        let mut segments = vec![vec![(0, 0), (1, 1), (2, 2)]];
        let result = complete_tour(&blocks, &mut segments, &full_tour);
        assert_eq!(result, Err(CtpError::NoReturnPath { from: 2, start: 0 }));
    }

    #[test]
    fn test_empty_graph() {
        let g = WeightedGraph::new(0);
        assert_eq!(cr_repair(&g, &EdgeSet::new(), None).unwrap(), (vec![], 0.0));
    }
}
