//! Reverse Influence Sampling: RR-set collection and greedy max-cover.

mod base;
mod imm;

pub use base::BaseRis;
pub use imm::Imm;

use std::collections::HashSet;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::SmallRng;

use crate::graph::NodeId;
use crate::model::RrSampler;

/// An append-only collection of RR sets sampled over a fixed node count.
///
/// Every RR set is non-empty: it always contains the root it was sampled
/// from.
#[derive(Clone, Debug, Default)]
pub struct RrCollection {
    sets: Vec<HashSet<NodeId>>,
}

impl RrCollection {
    /// Builds an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { sets: Vec::new() }
    }

    /// Returns the number of RR sets collected so far (`theta`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Appends one RR set.
    pub fn push(&mut self, rr: HashSet<NodeId>) {
        self.sets.push(rr);
    }

    /// Samples `count` additional RR sets, each rooted at a node drawn
    /// uniformly from `[0, n)`, and appends them.
    pub fn extend_sampled<S: RrSampler + ?Sized>(
        &mut self,
        sampler: &S,
        n: usize,
        count: usize,
        rng: &mut SmallRng,
    ) {
        if n == 0 {
            return;
        }
        let root_dist = Uniform::new(0, n);
        for _ in 0..count {
            let root = root_dist.sample(rng);
            self.sets.push(sampler.sample_rr_set(root, rng));
        }
    }

    /// Returns the RR sets as a slice.
    #[must_use]
    pub fn sets(&self) -> &[HashSet<NodeId>] {
        &self.sets
    }
}

/// The result of a greedy max-cover run: the selected seeds (in selection
/// order) and the number of RR sets they cover.
#[derive(Clone, Debug, PartialEq)]
pub struct MaxCoverResult {
    /// Selected seeds, in the order they were chosen.
    pub seeds: Vec<NodeId>,
    /// Number of RR sets covered by `seeds`.
    pub covered: usize,
    /// Total number of RR sets considered.
    pub total: usize,
}

impl MaxCoverResult {
    /// The spread estimate `n * (covered / total)` implied by this result.
    #[must_use]
    pub fn spread_estimate(&self, n: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        n_as_f64(n) * (covered_fraction(self.covered, self.total))
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "node counts here are graph sizes, far below f64's 52-bit mantissa"
)]
pub(crate) fn n_as_f64(n: usize) -> f64 {
    n as f64
}

#[allow(
    clippy::cast_precision_loss,
    reason = "RR-set counts are Monte Carlo sample sizes, far below f64's 52-bit mantissa"
)]
pub(crate) fn covered_fraction(covered: usize, total: usize) -> f64 {
    covered as f64 / total as f64
}

/// Greedily selects up to `k` nodes that maximize the number of RR sets
/// covered, tie-breaking on smallest node id.
///
/// Maintains, for each node, the set of RR-set indices it belongs to; each
/// round picks the node with the highest uncovered-hit count and removes
/// newly covered sets from every remaining node's count.
#[must_use]
pub fn max_cover(rr: &RrCollection, n: usize, k: usize) -> MaxCoverResult {
    let total = rr.len();
    let mut membership: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (idx, set) in rr.sets().iter().enumerate() {
        for &node in set {
            membership[node].push(idx);
        }
    }

    let mut covered_sets = vec![false; total];
    let mut remaining_hits: Vec<usize> = membership.iter().map(Vec::len).collect();
    let mut seeds = Vec::with_capacity(k);
    let mut covered = 0;

    for _ in 0..k {
        let Some(best) = argmax_hits(&remaining_hits) else {
            break;
        };
        if remaining_hits[best] == 0 {
            break;
        }
        seeds.push(best);

        for &idx in &membership[best] {
            if covered_sets[idx] {
                continue;
            }
            covered_sets[idx] = true;
            covered += 1;
            for &node in &rr.sets()[idx] {
                remaining_hits[node] -= 1;
            }
        }
    }

    MaxCoverResult {
        seeds,
        covered,
        total,
    }
}

fn argmax_hits(remaining_hits: &[usize]) -> Option<NodeId> {
    remaining_hits
        .iter()
        .enumerate()
        .max_by_key(|&(v, &hits)| (hits, std::cmp::Reverse(v)))
        .map(|(v, _)| v)
}
