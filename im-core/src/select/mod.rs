//! Seed selectors: simulation-based (Greedy, CELF) and cheap heuristics
//! (SingleDiscount, DegreeDiscount).

mod celf;
mod greedy;
mod heuristics;

pub use celf::Celf;
pub use greedy::Greedy;
pub use heuristics::{DegreeDiscount, SingleDiscount};

use tracing::warn;

use crate::error::ImErrorCode;

/// Clamps a requested budget `k` to the node count `n`, emitting a
/// `tracing::warn!` carrying [`ImErrorCode::BudgetExceedsNodes`] when
/// clamping occurs, per the documented default resolution.
pub(crate) fn clamp_budget(k: usize, n: usize) -> usize {
    if k > n {
        warn!(
            requested = k,
            n,
            code = %ImErrorCode::BudgetExceedsNodes,
            "requested budget exceeds node count, clamping to n"
        );
        n
    } else {
        k
    }
}
