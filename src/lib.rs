//! # ctp-routing
//!
//! Tour construction and adaptive repair for the Covering Canadian Traveller
//! Problem (CCTP): approximate TSP tours on complete metric graphs where some
//! edges are blocked and blockage is discovered only on arrival at an
//! incident node.
//!
//! ## Modules
//!
//! - [`models`] — Graph, edge, and path types (canonical undirected edges,
//!   dense complete graphs, adjacency graphs)
//! - [`primitives`] — Graph primitives (MST, perfect matching, Eulerian
//!   circuit, shortest path)
//! - [`christofides`] — Christofides 1.5-approximation tour builder
//! - [`repair`] — CNN and Cyclic Routing repair strategies for blocked edges
//! - [`generators`] — Complete metric instance families and blocked-edge sets
//!
//! ## Example
//!
//! ```
//! use ctp_routing::christofides::christofides_tour;
//! use ctp_routing::generators::{polygon_graph, random_blocks};
//! use ctp_routing::repair::{cnn_repair, cr_repair};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let graph = polygon_graph(8, -5.0, 5.0);
//! let mut rng = StdRng::seed_from_u64(42);
//! let blocked = random_blocks(3, &graph, &mut rng);
//!
//! let (tour, base_weight) = christofides_tour(&graph)?;
//! let (cnn_path, cnn_weight) = cnn_repair(&graph, &blocked, Some(&tour))?;
//! let (cr_path, cr_weight) = cr_repair(&graph, &blocked, Some(&tour))?;
//!
//! assert_eq!(cnn_path.first(), cnn_path.last());
//! assert_eq!(cr_path.first(), cr_path.last());
//! # Ok::<(), ctp_routing::CtpError>(())
//! ```

pub mod christofides;
pub mod error;
pub mod generators;
pub mod models;
pub mod primitives;
pub mod repair;

pub use error::{CtpError, Result};
