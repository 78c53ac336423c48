//! Greedy seed selection by repeated marginal-gain queries.

use std::marker::PhantomData;

use tracing::instrument;

use crate::graph::{Graph, NodeId};
use crate::model::DiffusionModel;
use crate::select::clamp_budget;

/// Selects seeds by, for each of `k` rounds, querying the Monte Carlo spread
/// of every remaining candidate added to the current seed set and keeping
/// the argmax.
///
/// Generic over a model constructor `F: Fn(&Graph) -> M` rather than a
/// closed enum of model kinds, so callers can supply any
/// [`DiffusionModel`] implementation.
pub struct Greedy<'g, M, F> {
    graph: &'g Graph,
    model_ctor: F,
    _model: PhantomData<M>,
}

impl<'g, M, F> Greedy<'g, M, F>
where
    M: DiffusionModel,
    F: Fn(&'g Graph) -> M,
{
    /// Builds a Greedy selector bound to `graph`, using `model_ctor` to
    /// construct a fresh model instance for each candidate evaluation.
    #[must_use]
    pub const fn new(graph: &'g Graph, model_ctor: F) -> Self {
        Self {
            graph,
            model_ctor,
            _model: PhantomData,
        }
    }

    /// Selects up to `k` seeds (clamped to `graph.n()`), each round's mean
    /// spread estimated from `rounds` Monte Carlo trials seeded from `seed`.
    ///
    /// Ties are broken by smallest node id. The returned order is the
    /// marginal-gain selection order; any prefix is itself a valid
    /// selection for a smaller budget.
    #[instrument(name = "select.greedy.run", skip(self), fields(n = self.graph.n(), k, rounds))]
    #[must_use]
    pub fn run(&self, k: usize, rounds: u32, seed: u64) -> Vec<NodeId> {
        let n = self.graph.n();
        let k = clamp_budget(k, n);
        let mut selected: Vec<NodeId> = Vec::with_capacity(k);
        let mut is_selected = vec![false; n];

        for _round in 0..k {
            let mut best: Option<(NodeId, f64)> = None;
            for v in 0..n {
                if is_selected[v] {
                    continue;
                }
                let mut candidate = selected.clone();
                candidate.push(v);
                let mut model = (self.model_ctor)(self.graph);
                model.set_seeds(&candidate);
                let spread = model.run_monte_carlo_diffusion(rounds, seed, false);
                let improves = best.is_none_or(|(_, best_spread)| spread > best_spread);
                if improves {
                    best = Some((v, spread));
                }
            }
            let Some((v, _)) = best else { break };
            is_selected[v] = true;
            selected.push(v);
        }

        selected
    }
}
