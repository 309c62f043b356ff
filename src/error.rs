//! Error types for tour construction and repair.

use crate::models::Node;
use thiserror::Error;

/// Errors surfaced by the tour builder and the repair strategies.
///
/// `DisconnectedGraph` is an input error; the remaining variants signal
/// violated internal invariants and are not recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CtpError {
    /// The input graph has no spanning tree.
    #[error("graph is disconnected: no spanning tree exists")]
    DisconnectedGraph,

    /// The odd-degree subset admits no perfect matching.
    ///
    /// Unreachable for a complete graph: the odd-degree subset of a spanning
    /// tree is always even-sized, and every even-sized complete subgraph has
    /// a perfect matching.
    #[error("no perfect matching on {0} odd-degree nodes")]
    MatchingInfeasible(usize),

    /// The CNN knowledge graph is disconnected between two nodes that both
    /// must be explored. By construction every unvisited node keeps at least
    /// one known-unblocked edge toward the visited part of the graph, so this
    /// indicates a bug rather than a degenerate input.
    #[error("knowledge graph has no safe path between {u} and {v}")]
    NoSafePath { u: Node, v: Node },

    /// Cyclic routing could not close the tour: the direct edge back to the
    /// start is blocked and both detour directions are exhausted.
    #[error("no return path from {from} back to start {start}")]
    NoReturnPath { from: Node, start: Node },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CtpError>;
