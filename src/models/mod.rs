//! Core types for tour construction under blocked edges.
//!
//! Provides the graph and edge primitives shared by all algorithms: canonical
//! undirected edges, dense complete weighted graphs, sparse adjacency graphs
//! for partial knowledge, and path helpers.

mod edge;
mod graph;

pub use edge::{is_closed_tour, path_edges, Edge, EdgeSet, Node, Path};
pub use graph::{AdjacencyGraph, WeightedGraph};
