//! Independent Cascade (IC) diffusion model.

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::graph::{Graph, NodeId};
use crate::model::{DiffusionModel, RrSampler};

/// Independent Cascade: each newly activated node gets one chance to
/// activate each out-neighbour, succeeding with the edge's weight as
/// probability.
#[derive(Debug)]
pub struct IndependentCascade<'g> {
    graph: &'g Graph,
    seeds: HashSet<NodeId>,
}

impl<'g> IndependentCascade<'g> {
    /// Builds an IC model bound to `graph`, with the given initial seed set.
    /// Duplicate seeds collapse into the set.
    #[must_use]
    pub fn new(graph: &'g Graph, seeds: &[NodeId]) -> Self {
        Self {
            graph,
            seeds: seeds.iter().copied().collect(),
        }
    }
}

impl DiffusionModel for IndependentCascade<'_> {
    fn set_seeds(&mut self, seeds: &[NodeId]) {
        self.seeds = seeds.iter().copied().collect();
    }

    fn seeds(&self) -> &HashSet<NodeId> {
        &self.seeds
    }

    fn run_single_trial(&self, rng: &mut SmallRng) -> usize {
        let n = self.graph.n();
        let mut activated = vec![false; n];
        let mut frontier: Vec<NodeId> = Vec::new();
        for &s in &self.seeds {
            if !activated[s] {
                activated[s] = true;
                frontier.push(s);
            }
        }

        let mut front = 0;
        while front < frontier.len() {
            let u = frontier[front];
            front += 1;
            let Ok(neighbours) = self.graph.out_neighbors(u) else {
                continue;
            };
            for &v in neighbours {
                if activated[v] {
                    continue;
                }
                let w = self.graph.weight(u, v).unwrap_or(0.0);
                if rng.gen::<f64>() < w {
                    activated[v] = true;
                    frontier.push(v);
                }
            }
        }

        activated.iter().filter(|&&a| a).count()
    }
}

impl RrSampler for IndependentCascade<'_> {
    fn sample_rr_set(&self, root: NodeId, rng: &mut SmallRng) -> HashSet<NodeId> {
        let mut visited = HashSet::new();
        visited.insert(root);
        let mut frontier = vec![root];
        let mut front = 0;
        while front < frontier.len() {
            let x = frontier[front];
            front += 1;
            let Ok(in_neighbours) = self.graph.in_neighbors(x) else {
                continue;
            };
            for &y in in_neighbours {
                if visited.contains(&y) {
                    continue;
                }
                let w = self.graph.weight(y, x).unwrap_or(0.0);
                if rng.gen::<f64>() < w {
                    visited.insert(y);
                    frontier.push(y);
                }
            }
        }
        visited
    }
}
