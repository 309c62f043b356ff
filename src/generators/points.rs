//! Point-based instance generators.

use crate::models::{Edge, EdgeSet, WeightedGraph};
use rand::Rng;
use std::f64::consts::PI;

/// Complete graph over `n` uniformly random points in `[low, high]²`.
///
/// # Examples
///
/// ```
/// use ctp_routing::generators::random_graph;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let g = random_graph(10, -5.0, 5.0, &mut rng);
/// assert_eq!(g.num_nodes(), 10);
/// assert!(g.is_metric(1e-9));
/// ```
pub fn random_graph(n: usize, low: f64, high: f64, rng: &mut impl Rng) -> WeightedGraph {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(low..=high), rng.random_range(low..=high)))
        .collect();
    WeightedGraph::from_points(&points)
}

/// Complete graph over `n` points placed on a regular polygon, mapped into
/// `[low, high]²`.
pub fn polygon_graph(n: usize, low: f64, high: f64) -> WeightedGraph {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / n as f64;
            let x = (high - low) * (angle.sin() + 1.0) / 2.0 + low;
            let y = (high - low) * (angle.cos() + 1.0) / 2.0 + low;
            (x, y)
        })
        .collect();
    WeightedGraph::from_points(&points)
}

/// Complete graph on `n` nodes where every edge has weight 1.
///
/// Trivially metric: any indirect route costs at least as much as the direct
/// edge.
pub fn constant_weight_graph(n: usize) -> WeightedGraph {
    let mut graph = WeightedGraph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            graph.set_weight(u, v, 1.0);
        }
    }
    graph
}

/// Complete graph over an `n × n` grid with Manhattan-distance weights.
///
/// Node `i` sits at grid position `(i / n, i % n)`. Manhattan distances
/// satisfy the triangle inequality, with many exact ties.
pub fn manhattan_graph(n: usize) -> WeightedGraph {
    let total = n * n;
    let mut graph = WeightedGraph::new(total);
    for i in 0..total {
        let (x1, y1) = ((i / n) as f64, (i % n) as f64);
        for j in (i + 1)..total {
            let (x2, y2) = ((j / n) as f64, (j % n) as f64);
            graph.set_weight(i, j, (x1 - x2).abs() + (y1 - y2).abs());
        }
    }
    graph
}

/// Strongly clustered instance: `n` clusters of `n` nodes each.
///
/// Cluster centers are drawn uniformly from a square scaled by
/// `inter_multiplier`; nodes deviate from their center by at most
/// `intra_weight` per axis.
pub fn clustered_graph(
    n: usize,
    intra_weight: f64,
    inter_multiplier: f64,
    rng: &mut impl Rng,
) -> WeightedGraph {
    let centers: Vec<(f64, f64)> = (0..n)
        .map(|_| {
            (
                rng.random_range(-inter_multiplier..=inter_multiplier),
                rng.random_range(-inter_multiplier..=inter_multiplier),
            )
        })
        .collect();

    let mut points = Vec::with_capacity(n * n);
    for &(cx, cy) in &centers {
        for _ in 0..n {
            points.push((
                cx + rng.random_range(-intra_weight..=intra_weight),
                cy + rng.random_range(-intra_weight..=intra_weight),
            ));
        }
    }
    WeightedGraph::from_points(&points)
}

/// Instance whose node radii follow a power law: a dense hub near the origin
/// and increasingly peripheral nodes.
pub fn power_law_graph(n: usize, exponent: f64, rng: &mut impl Rng) -> WeightedGraph {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let radius = ((i + 1) as f64 / n as f64).powf(1.0 / exponent) * 10.0;
            let angle = rng.random_range(0.0..2.0 * PI);
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    WeightedGraph::from_points(&points)
}

/// Draws `k` distinct edges of the graph to block.
///
/// # Panics
///
/// Panics if `k` exceeds the number of edges.
pub fn random_blocks(k: usize, graph: &WeightedGraph, rng: &mut impl Rng) -> EdgeSet {
    let mut edges: Vec<Edge> = graph.edges().collect();
    assert!(k <= edges.len(), "cannot block {k} of {} edges", edges.len());

    let mut blocked = EdgeSet::with_capacity(k);
    for _ in 0..k {
        let pick = rng.random_range(0..edges.len());
        blocked.insert(edges.swap_remove(pick));
    }
    blocked
}
