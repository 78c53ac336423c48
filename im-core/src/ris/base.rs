//! BaseRIS: fixed-sample-size Reverse Influence Sampling.

use std::marker::PhantomData;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::instrument;

use crate::graph::{Graph, NodeId};
use crate::model::RrSampler;
use crate::ris::{RrCollection, max_cover};
use crate::select::clamp_budget;

/// Samples a fixed number `theta` of RR sets and runs greedy max-cover to
/// pick `k` seeds. Unlike [`super::Imm`], `theta` is supplied by the caller
/// rather than derived from an approximation target.
pub struct BaseRis<'g, M, F> {
    graph: &'g Graph,
    model_ctor: F,
    _model: PhantomData<M>,
}

impl<'g, M, F> BaseRis<'g, M, F>
where
    M: RrSampler,
    F: Fn(&'g Graph) -> M,
{
    /// Builds a `BaseRIS` selector bound to `graph`.
    #[must_use]
    pub const fn new(graph: &'g Graph, model_ctor: F) -> Self {
        Self {
            graph,
            model_ctor,
            _model: PhantomData,
        }
    }

    /// Samples `theta` RR sets seeded from `seed`, then selects up to `k`
    /// seeds (clamped to `graph.n()`) via greedy max-cover.
    #[instrument(name = "ris.base_ris.run", skip(self), fields(n = self.graph.n(), k, theta))]
    #[must_use]
    pub fn run(&self, k: usize, theta: usize, seed: u64) -> Vec<NodeId> {
        let n = self.graph.n();
        let k = clamp_budget(k, n);
        let model = (self.model_ctor)(self.graph);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut rr = RrCollection::new();
        rr.extend_sampled(&model, n, theta, &mut rng);
        max_cover(&rr, n, k).seeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IndependentCascade;

    #[test]
    fn picks_the_hub_of_a_star() {
        let mut edges = Vec::new();
        for leaf in 1..=4 {
            edges.push((leaf, 0));
        }
        let g = Graph::from_edges(5, true, &edges, None).expect("valid edges");
        let ris = BaseRis::new(&g, |graph| IndependentCascade::new(graph, &[]));
        let seeds = ris.run(1, 200, 3);
        assert_eq!(seeds, vec![0]);
    }

    #[test]
    fn clamps_budget_to_node_count() {
        let g = Graph::new(2, true);
        let ris = BaseRis::new(&g, |graph| IndependentCascade::new(graph, &[]));
        assert_eq!(ris.run(10, 50, 0).len(), 2);
    }
}
