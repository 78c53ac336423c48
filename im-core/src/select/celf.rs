//! CELF (Cost-Effective Lazy Forward) seed selection.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

use tracing::instrument;

use crate::graph::{Graph, NodeId};
use crate::model::DiffusionModel;
use crate::select::clamp_budget;

#[derive(Clone, Copy, Debug, PartialEq)]
struct CelfEntry {
    node: NodeId,
    delta: f64,
    flag: usize,
}

impl Eq for CelfEntry {}

impl Ord for CelfEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Larger marginal gain sorts first; on a tie, the smaller node id
        // must pop first, so node comparison is reversed.
        self.delta
            .total_cmp(&other.delta)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for CelfEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selects seeds via lazy-forward marginal-gain evaluation, exploiting the
/// submodularity of the spread function to avoid recomputing every node's
/// marginal gain on every round.
///
/// Given identical `(graph, model, rounds, seed)`, returns the same seed
/// order as [`crate::select::Greedy`] up to tie-breaking.
pub struct Celf<'g, M, F> {
    graph: &'g Graph,
    model_ctor: F,
    _model: PhantomData<M>,
}

impl<'g, M, F> Celf<'g, M, F>
where
    M: DiffusionModel,
    F: Fn(&'g Graph) -> M,
{
    /// Builds a CELF selector bound to `graph`, using `model_ctor` to
    /// construct a fresh model instance for each candidate evaluation.
    #[must_use]
    pub const fn new(graph: &'g Graph, model_ctor: F) -> Self {
        Self {
            graph,
            model_ctor,
            _model: PhantomData,
        }
    }

    fn spread_of(&self, seeds: &[NodeId], rounds: u32, seed: u64) -> f64 {
        let mut model = (self.model_ctor)(self.graph);
        model.set_seeds(seeds);
        model.run_monte_carlo_diffusion(rounds, seed, false)
    }

    /// Selects up to `k` seeds (clamped to `graph.n()`).
    #[instrument(name = "select.celf.run", skip(self), fields(n = self.graph.n(), k, rounds))]
    #[must_use]
    pub fn run(&self, k: usize, rounds: u32, seed: u64) -> Vec<NodeId> {
        let n = self.graph.n();
        let k = clamp_budget(k, n);
        if k == 0 {
            return Vec::new();
        }

        let mut heap: BinaryHeap<CelfEntry> = (0..n)
            .map(|v| CelfEntry {
                node: v,
                delta: self.spread_of(&[v], rounds, seed),
                flag: 1,
            })
            .collect();

        let mut selected: Vec<NodeId> = Vec::with_capacity(k);
        let mut current_spread = 0.0;
        let mut round = 1;

        while selected.len() < k {
            let Some(mut top) = heap.pop() else { break };
            if top.flag == round {
                current_spread += top.delta;
                selected.push(top.node);
                round += 1;
            } else {
                let mut candidate = selected.clone();
                candidate.push(top.node);
                let new_spread = self.spread_of(&candidate, rounds, seed);
                top.delta = new_spread - current_spread;
                top.flag = round;
                heap.push(top);
            }
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IndependentCascade;
    use crate::select::Greedy;

    fn star(leaves: usize) -> Graph {
        let mut edges = Vec::new();
        for leaf in 1..=leaves {
            edges.push((leaf, 0));
            edges.push((0, leaf));
        }
        Graph::from_edges(leaves + 1, true, &edges, None).expect("valid edges")
    }

    #[test]
    fn matches_greedy_on_a_star() {
        let g = star(6);
        let celf = Celf::new(&g, |graph| IndependentCascade::new(graph, &[]));
        let greedy = Greedy::new(&g, |graph| IndependentCascade::new(graph, &[]));
        assert_eq!(celf.run(3, 100, 11), greedy.run(3, 100, 11));
    }

    #[test]
    fn zero_budget_returns_empty() {
        let g = Graph::new(3, true);
        let celf = Celf::new(&g, |graph| IndependentCascade::new(graph, &[]));
        assert_eq!(celf.run(0, 10, 0), Vec::<usize>::new());
    }

    #[test]
    fn clamps_budget_to_node_count() {
        let g = Graph::new(2, true);
        let celf = Celf::new(&g, |graph| IndependentCascade::new(graph, &[]));
        assert_eq!(celf.run(10, 10, 0).len(), 2);
    }
}
