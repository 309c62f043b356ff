//! Christofides 1.5-approximation for metric TSP.
//!
//! - [`christofides_tour`] — build a closed tour, O(n³) dominated by the
//!   matching step
//! - [`shortcut_eulerian_path`] — collapse a walk into a simple cycle

mod tour;

pub use tour::{christofides_tour, shortcut_eulerian_path};
