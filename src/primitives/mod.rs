//! Graph primitives consumed by the tour builder and the repair strategies.
//!
//! - [`minimum_spanning_tree`] — Prim's algorithm on the dense graph, O(n²)
//! - [`min_weight_matching`] — exact perfect matching for small subsets,
//!   greedy with 2-exchange refinement beyond
//! - [`eulerian_circuit`] — Hierholzer's algorithm over a [`Multigraph`]
//! - [`shortest_path`] — single-pair Dijkstra over an adjacency graph

mod eulerian;
mod matching;
mod mst;
mod shortest_path;

pub use eulerian::{eulerian_circuit, Multigraph};
pub use matching::min_weight_matching;
pub use mst::minimum_spanning_tree;
pub use shortest_path::shortest_path;
