//! Reproducible RNG harness.
//!
//! Splits one caller-supplied seed into `K` independent per-trial seeds using
//! a 32-bit Mersenne Twister (MT19937), so that:
//!
//! - the same seed always yields the same per-trial seed table regardless of
//!   how many threads later consume it (P1);
//! - trial `i`'s samples depend only on `t_i`, so the assignment of trials to
//!   threads never changes the *sum* of per-trial results (P2);
//! - the mean over `K` trials is byte-identical whether computed
//!   single-threaded or split across any number of workers (P3).
//!
//! MT19937 is implemented directly here (in the manner of
//! `hnsw/cpu/rng.rs::splitmix64` in this crate's sibling examples) because the
//! splitting generator the spec pins down is a specific, well-known algorithm
//! rather than "any RNG" — the actual per-trial sampling RNG is
//! [`rand::rngs::SmallRng`], seeded from each derived value.

use rand::SeedableRng;
use rand::rngs::SmallRng;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// A 32-bit Mersenne Twister (MT19937) generator.
struct Mt19937 {
    state: [u32; N],
    index: usize,
}

impl Mt19937 {
    fn new(seed: u32) -> Self {
        let mut state = [0_u32; N];
        state[0] = seed;
        for i in 1..N {
            state[i] = 1_812_433_253_u32
                .wrapping_mul(state[i - 1] ^ (state[i - 1] >> 30))
                .wrapping_add(u32::try_from(i).unwrap_or(u32::MAX));
        }
        Self { state, index: N }
    }

    fn regenerate(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut next = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.index = 0;
    }

    fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.regenerate();
        }
        let mut y = self.state[self.index];
        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        self.index += 1;
        y
    }
}

/// Folds a 64-bit user seed down to the 32-bit word the master generator
/// expects, without discarding either half's entropy.
const fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Derives `rounds` independent per-trial seeds from `seed`, by initializing
/// a master MT19937 with `seed` and drawing `rounds` consecutive words from
/// it.
#[must_use]
pub fn master_trial_seeds(seed: u64, rounds: u32) -> Vec<u32> {
    let mut mt = Mt19937::new(fold_seed(seed));
    (0..rounds).map(|_| mt.next_u32()).collect()
}

/// Builds the per-trial sampling RNG for a derived trial seed.
#[must_use]
pub fn trial_rng(trial_seed: u32) -> SmallRng {
    SmallRng::seed_from_u64(u64::from(trial_seed))
}
