//! Instance generators: complete metric graphs and blocked-edge sets.
//!
//! - [`random_graph`] / [`polygon_graph`] / [`constant_weight_graph`] /
//!   [`manhattan_graph`] / [`clustered_graph`] / [`power_law_graph`] —
//!   complete metric graph families
//! - [`random_blocks`] — draw a blocked-edge set from a graph
//! - [`cnn_tight_bound_graph`] / [`cr_tight_bound_graph`] — constructed
//!   worst-case instances for the two repair strategies
//!
//! Randomized generators take a caller-supplied [`rand::Rng`] so instances
//! are reproducible from a seed.

mod points;
mod worst_case;

pub use points::{
    clustered_graph, constant_weight_graph, manhattan_graph, polygon_graph, power_law_graph,
    random_blocks, random_graph,
};
pub use worst_case::{cnn_tight_bound_graph, cr_tight_bound_graph};
