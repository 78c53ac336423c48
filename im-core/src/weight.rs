//! Edge-weight assignment policies.
//!
//! Materialises edge probabilities on a [`Graph`] from a closed set of
//! policies, rather than requiring callers to compute them by hand.

use rand::Rng;
use tracing::instrument;

use crate::error::{ImError, Result};
use crate::graph::Graph;

/// A policy for assigning edge weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeightPolicy {
    /// Weighted cascade: `w(u, v) := 1 / in_degree(v)`; left at `1.0` when
    /// `in_degree(v) == 0` (the edge can never be reached anyway).
    Wc,
    /// Every edge weight is set to `p`.
    Uniform(f64),
    /// Every edge weight is drawn uniformly from `[lo, hi)`.
    Random(f64, f64),
    /// Leave weights as provided at construction time.
    Keep,
}

/// Applies `policy` to every edge of `graph`, mutating its weight table in
/// place.
///
/// `rng` is only consulted by [`WeightPolicy::Random`]; callers pass a
/// deterministic RNG if they want reproducible weights.
///
/// # Errors
/// Returns [`ImError::InvalidParameter`] if [`WeightPolicy::Uniform`] or
/// [`WeightPolicy::Random`] describe a value or range outside `[0, 1]`, or a
/// [`WeightPolicy::Random`] range with `lo > hi`.
#[instrument(name = "weight.set_edge_weight", skip(graph, rng), fields(n = graph.n(), m = graph.m(), ?policy))]
pub fn set_edge_weight<R: Rng + ?Sized>(
    graph: &mut Graph,
    policy: WeightPolicy,
    rng: &mut R,
) -> Result<()> {
    match policy {
        WeightPolicy::Keep => Ok(()),
        WeightPolicy::Uniform(p) => {
            validate_unit_interval("p", p)?;
            apply_to_every_edge(graph, |_, _| p)
        }
        WeightPolicy::Random(lo, hi) => {
            validate_unit_interval("lo", lo)?;
            validate_unit_interval("hi", hi)?;
            if lo > hi {
                return Err(ImError::InvalidParameter {
                    name: "lo",
                    reason: format!("lo ({lo}) must be <= hi ({hi})"),
                });
            }
            let edges = existing_edges(graph)?;
            for (u, v) in edges {
                let w = if (lo - hi).abs() < f64::EPSILON {
                    lo
                } else {
                    rng.gen_range(lo..hi)
                };
                graph.update_edge_weight(u, v, w)?;
            }
            Ok(())
        }
        WeightPolicy::Wc => {
            let in_degrees: Vec<usize> = (0..graph.n())
                .map(|v| graph.in_degree(v).unwrap_or(0))
                .collect();
            apply_to_every_edge(graph, |_, v| {
                let deg = in_degrees[v];
                if deg == 0 { 1.0 } else { 1.0 / deg as f64 }
            })
        }
    }
}

fn validate_unit_interval(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ImError::InvalidParameter {
            name,
            reason: format!("{value} is outside [0, 1]"),
        })
    }
}

fn existing_edges(graph: &Graph) -> Result<Vec<(usize, usize)>> {
    let mut edges = Vec::new();
    for u in 0..graph.n() {
        for &v in graph.out_neighbors(u)? {
            edges.push((u, v));
        }
    }
    Ok(edges)
}

fn apply_to_every_edge(graph: &mut Graph, mut f: impl FnMut(usize, usize) -> f64) -> Result<()> {
    for (u, v) in existing_edges(graph)? {
        let w = f(u, v);
        graph.update_edge_weight(u, v, w)?;
    }
    Ok(())
}
