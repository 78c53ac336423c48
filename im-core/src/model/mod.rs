//! Diffusion model capability traits.
//!
//! Greedy and CELF only need a spread oracle (`simulate`); BaseRIS and IMM
//! only need a reverse-reachable-set sampler. Keeping these as two small
//! traits rather than one fat interface (or a closed enum of model kinds)
//! lets a caller plug in a model this crate has never heard of.

mod ic;
mod lt;

pub use ic::IndependentCascade;
pub use lt::LinearThreshold;

use std::collections::HashSet;

use rand::rngs::SmallRng;

use crate::graph::NodeId;
use crate::rng::{master_trial_seeds, trial_rng};

/// A stochastic diffusion model bound to a graph and a mutable seed set.
///
/// Implementations run one stochastic cascade per call to
/// [`run_single_trial`](DiffusionModel::run_single_trial); the default
/// [`run_monte_carlo_diffusion`](DiffusionModel::run_monte_carlo_diffusion)
/// aggregates many trials into a mean spread using the reproducible RNG
/// harness in [`crate::rng`].
pub trait DiffusionModel: Send + Sync {
    /// Replaces the active seed set.
    fn set_seeds(&mut self, seeds: &[NodeId]);

    /// Returns the active seed set.
    fn seeds(&self) -> &HashSet<NodeId>;

    /// Runs one stochastic cascade from the current seed set and returns the
    /// number of nodes activated, including the seeds themselves.
    fn run_single_trial(&self, rng: &mut SmallRng) -> usize;

    /// Runs `rounds` independent trials and returns their mean activated
    /// count.
    ///
    /// `rounds <= 0` returns `0.0` without touching the RNG harness. When
    /// `use_multithread` is set (and the `cpu` feature is enabled), trials
    /// are partitioned round-robin across rayon's worker threads; per
    /// property (O1) in the design, the returned mean is identical to the
    /// single-threaded result for the same `(rounds, seed)`.
    fn run_monte_carlo_diffusion(&self, rounds: u32, seed: u64, use_multithread: bool) -> f64 {
        if rounds == 0 {
            return 0.0;
        }
        let trial_seeds = master_trial_seeds(seed, rounds);
        if use_multithread {
            parallel_mean(self, &trial_seeds)
        } else {
            sequential_mean(self, &trial_seeds)
        }
    }
}

/// A model capable of sampling reverse-reachable (RR) sets for the Reverse
/// Influence Sampling family (BaseRIS, IMM).
pub trait RrSampler: Send + Sync {
    /// Samples one RR set rooted at `root`: the set of nodes that, under a
    /// reverse simulation of this model, could have activated `root`. Always
    /// contains `root` itself.
    fn sample_rr_set(&self, root: NodeId, rng: &mut SmallRng) -> HashSet<NodeId>;
}

fn sequential_mean<M: DiffusionModel + ?Sized>(model: &M, trial_seeds: &[u32]) -> f64 {
    let sum: u64 = trial_seeds
        .iter()
        .map(|&s| model.run_single_trial(&mut trial_rng(s)) as u64)
        .sum();
    sum_as_mean(sum, trial_seeds.len())
}

#[cfg(feature = "cpu")]
fn parallel_mean<M: DiffusionModel + ?Sized>(model: &M, trial_seeds: &[u32]) -> f64 {
    use rayon::iter::{IntoParallelIterator, ParallelIterator};

    let workers = rayon::current_num_threads().max(1);
    let sum: u64 = (0..workers)
        .into_par_iter()
        .map(|worker| {
            trial_seeds
                .iter()
                .enumerate()
                .filter(|(i, _)| i % workers == worker)
                .map(|(_, &s)| model.run_single_trial(&mut trial_rng(s)) as u64)
                .sum::<u64>()
        })
        .sum();
    sum_as_mean(sum, trial_seeds.len())
}

#[cfg(not(feature = "cpu"))]
fn parallel_mean<M: DiffusionModel + ?Sized>(model: &M, trial_seeds: &[u32]) -> f64 {
    sequential_mean(model, trial_seeds)
}

#[allow(
    clippy::cast_precision_loss,
    reason = "activated-node counts summed over at most a few million trials fit in f64's 52-bit mantissa"
)]
fn sum_as_mean(sum: u64, count: usize) -> f64 {
    sum as f64 / count as f64
}
