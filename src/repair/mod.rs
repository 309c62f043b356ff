//! Adaptive repair strategies for tours crossing blocked edges.
//!
//! - [`cnn_repair`] — shortcut the tour, then finish the unreached nodes by
//!   nearest-neighbor over an exploration multigraph
//! - [`cr_repair`] — iterative cyclic shortcutting with direction
//!   alternation and two-edge detours
//!
//! Both consume the input graph, the blocked-edge set, and an optional
//! precomputed closed tour; neither mutates its inputs.

mod cnn;
mod cr;

pub use cnn::cnn_repair;
pub use cr::cr_repair;
