//! Cheap degree-based heuristic selectors.
//!
//! Specified only by their public contract: plain out-degree bookkeeping,
//! no simulation, no tracing instrumentation beyond what their shared
//! [`super::clamp_budget`] helper already emits.

use crate::graph::{Graph, NodeId};
use crate::select::clamp_budget;

/// Iteratively picks the highest out-degree node not yet selected, then
/// discounts the out-degree of each of its out-neighbors by one (as if the
/// selected node's influence were removed from them).
pub struct SingleDiscount<'g> {
    graph: &'g Graph,
}

impl<'g> SingleDiscount<'g> {
    /// Builds a `SingleDiscount` selector bound to `graph`.
    #[must_use]
    pub const fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Selects up to `k` seeds (clamped to `graph.n()`). Ties are broken by
    /// smallest node id.
    #[must_use]
    pub fn run(&self, k: usize) -> Vec<NodeId> {
        let n = self.graph.n();
        let k = clamp_budget(k, n);
        let mut degree: Vec<i64> = (0..n).map(|v| degree_as_i64(&self.graph, v)).collect();
        let mut is_selected = vec![false; n];
        let mut selected = Vec::with_capacity(k);

        for _ in 0..k {
            let Some(v) = argmax_unselected(&degree, &is_selected) else {
                break;
            };
            is_selected[v] = true;
            selected.push(v);
            if let Ok(neighbours) = self.graph.out_neighbors(v) {
                for &w in neighbours {
                    degree[w] -= 1;
                }
            }
        }

        selected
    }
}

/// Chen et al.'s closed-form degree-discount heuristic.
pub struct DegreeDiscount<'g> {
    graph: &'g Graph,
}

impl<'g> DegreeDiscount<'g> {
    /// Builds a `DegreeDiscount` selector bound to `graph`.
    #[must_use]
    pub const fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Selects up to `k` seeds (clamped to `graph.n()`) using propagation
    /// probability `p`. Ties are broken by smallest node id.
    #[must_use]
    pub fn run(&self, k: usize, p: f64) -> Vec<NodeId> {
        let n = self.graph.n();
        let k = clamp_budget(k, n);
        let d: Vec<f64> = (0..n).map(|v| degree_as_f64(&self.graph, v)).collect();
        let mut t = vec![0.0_f64; n];
        let mut is_selected = vec![false; n];
        let mut selected = Vec::with_capacity(k);

        for _ in 0..k {
            let mut best: Option<(NodeId, f64)> = None;
            for v in 0..n {
                if is_selected[v] {
                    continue;
                }
                let score = d[v] - 2.0 * t[v] - (d[v] - t[v]) * t[v] * p;
                let improves = best.is_none_or(|(_, best_score)| score > best_score);
                if improves {
                    best = Some((v, score));
                }
            }
            let Some((v, _)) = best else { break };
            is_selected[v] = true;
            selected.push(v);
            if let Ok(in_neighbours) = self.graph.in_neighbors(v) {
                for &u in in_neighbours {
                    t[u] += 1.0;
                }
            }
        }

        selected
    }
}

#[allow(
    clippy::cast_possible_wrap,
    reason = "out-degree in practice never approaches i64::MAX; i64 gives headroom for the discount going negative"
)]
fn degree_as_i64(graph: &Graph, v: NodeId) -> i64 {
    graph.out_degree(v).unwrap_or(0) as i64
}

#[allow(
    clippy::cast_precision_loss,
    reason = "out-degrees small enough to iterate fit exactly in f64's 52-bit mantissa"
)]
fn degree_as_f64(graph: &Graph, v: NodeId) -> f64 {
    graph.out_degree(v).unwrap_or(0) as f64
}

fn argmax_unselected(scores: &[i64], is_selected: &[bool]) -> Option<NodeId> {
    scores
        .iter()
        .enumerate()
        .filter(|&(v, _)| !is_selected[v])
        .max_by_key(|&(v, &score)| (score, std::cmp::Reverse(v)))
        .map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(leaves: usize) -> Graph {
        let mut edges = Vec::new();
        for leaf in 1..=leaves {
            edges.push((leaf, 0));
            edges.push((0, leaf));
        }
        Graph::from_edges(leaves + 1, true, &edges, None).expect("valid edges")
    }

    #[test]
    fn single_discount_picks_the_hub_first() {
        let g = star(5);
        let selector = SingleDiscount::new(&g);
        assert_eq!(selector.run(1), vec![0]);
    }

    #[test]
    fn single_discount_discounts_chosen_node_neighbors() {
        let g = star(3);
        let selector = SingleDiscount::new(&g);
        let seeds = selector.run(2);
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0], 0);
    }

    #[test]
    fn degree_discount_picks_the_hub_first() {
        let g = star(5);
        let selector = DegreeDiscount::new(&g);
        assert_eq!(selector.run(1, 0.1), vec![0]);
    }

    #[test]
    fn degree_discount_clamps_budget_to_node_count() {
        let g = Graph::new(2, true);
        let selector = DegreeDiscount::new(&g);
        assert_eq!(selector.run(10, 0.1).len(), 2);
    }
}
