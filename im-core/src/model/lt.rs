//! Linear Threshold (LT) diffusion model.

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::error::{ImError, Result};
use crate::graph::{Graph, NodeId};
use crate::model::{DiffusionModel, RrSampler};

/// Linear Threshold: a node activates once the summed weight of its active
/// in-neighbours reaches a threshold drawn uniformly from `[theta_l, theta_h)`
/// once per trial.
#[derive(Debug)]
pub struct LinearThreshold<'g> {
    graph: &'g Graph,
    seeds: HashSet<NodeId>,
    theta_l: f64,
    theta_h: f64,
}

impl<'g> LinearThreshold<'g> {
    /// Builds an LT model bound to `graph`, with the given initial seed set
    /// and threshold range `[theta_l, theta_h]`.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidParameter`] if either bound is outside
    /// `[0, 1]` or `theta_l > theta_h`.
    pub fn new(graph: &'g Graph, seeds: &[NodeId], theta_l: f64, theta_h: f64) -> Result<Self> {
        for (name, value) in [("theta_l", theta_l), ("theta_h", theta_h)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ImError::InvalidParameter {
                    name,
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }
        if theta_l > theta_h {
            return Err(ImError::InvalidParameter {
                name: "theta_l",
                reason: format!("theta_l ({theta_l}) must be <= theta_h ({theta_h})"),
            });
        }
        Ok(Self {
            graph,
            seeds: seeds.iter().copied().collect(),
            theta_l,
            theta_h,
        })
    }

    fn sample_threshold(&self, rng: &mut SmallRng) -> f64 {
        if (self.theta_h - self.theta_l).abs() < f64::EPSILON {
            self.theta_l
        } else {
            rng.gen_range(self.theta_l..self.theta_h)
        }
    }
}

impl DiffusionModel for LinearThreshold<'_> {
    fn set_seeds(&mut self, seeds: &[NodeId]) {
        self.seeds = seeds.iter().copied().collect();
    }

    fn seeds(&self) -> &HashSet<NodeId> {
        &self.seeds
    }

    fn run_single_trial(&self, rng: &mut SmallRng) -> usize {
        let n = self.graph.n();
        let thresholds: Vec<f64> = (0..n).map(|_| self.sample_threshold(rng)).collect();
        let mut activated = vec![false; n];
        let mut influence = vec![0.0_f64; n];
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
                influence[v] += self.graph.weight(u, v).unwrap_or(0.0);
                if influence[v] >= thresholds[v] {
                    activated[v] = true;
                    frontier.push(v);
                }
            }
        }

        activated.iter().filter(|&&a| a).count()
    }
}

impl RrSampler for LinearThreshold<'_> {
    fn sample_rr_set(&self, root: NodeId, rng: &mut SmallRng) -> HashSet<NodeId> {
        let mut rr = HashSet::new();
        rr.insert(root);
        let mut x = root;
        loop {
            let Ok(in_neighbours) = self.graph.in_neighbors(x) else {
                break;
            };
            if in_neighbours.is_empty() {
                break;
            }
            let total: f64 = in_neighbours
                .iter()
                .map(|&y| self.graph.weight(y, x).unwrap_or(0.0))
                .sum();
            let r: f64 = rng.gen();
            if r >= total {
                break;
            }

            let mut cumulative = 0.0;
            let next = in_neighbours.iter().find(|&&y| {
                cumulative += self.graph.weight(y, x).unwrap_or(0.0);
                cumulative > r
            });
            let Some(&y) = next else {
                break;
            };

            if rr.contains(&y) {
                break;
            }
            rr.insert(y);
            x = y;
        }
        rr
    }
}
