//! Error types for the `im-core` library.
//!
//! Defines the error enum exposed by the public API, a parallel enum of
//! stable machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::graph::NodeId;

/// Stable codes describing [`ImError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ImErrorCode {
    /// A node id fell outside `[0, n)`.
    InvalidNode,
    /// An edge was removed or updated that does not exist.
    EdgeNotFound,
    /// Parallel edge/weight arrays differed in length.
    LengthMismatch,
    /// A numeric parameter (threshold, epsilon, ell, budget) was out of range.
    InvalidParameter,
    /// The requested seed-set budget exceeded the node count.
    BudgetExceedsNodes,
}

impl ImErrorCode {
    /// Returns the stable, machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidNode => "IM_INVALID_NODE",
            Self::EdgeNotFound => "IM_EDGE_NOT_FOUND",
            Self::LengthMismatch => "IM_LENGTH_MISMATCH",
            Self::InvalidParameter => "IM_INVALID_PARAMETER",
            Self::BudgetExceedsNodes => "IM_BUDGET_EXCEEDS_NODES",
        }
    }
}

impl fmt::Display for ImErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced by fallible `im-core` operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ImError {
    /// A node id fell outside `[0, n)`.
    #[error("node {node} is out of bounds for a graph with {n} nodes")]
    InvalidNode {
        /// The offending node id.
        node: NodeId,
        /// The graph's node count.
        n: usize,
    },
    /// An edge was removed or updated that does not exist.
    #[error("edge ({u}, {v}) does not exist")]
    EdgeNotFound {
        /// The edge source.
        u: NodeId,
        /// The edge target.
        v: NodeId,
    },
    /// Parallel edge/weight arrays differed in length.
    #[error("edges has length {edges} but weights has length {weights}")]
    LengthMismatch {
        /// Length of the edge array.
        edges: usize,
        /// Length of the weight array.
        weights: usize,
    },
    /// A numeric parameter was out of its documented range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The parameter's name (`theta_l`, `theta_h`, `epsilon`, `ell`, `k`, ...).
        name: &'static str,
        /// A human-readable reason the value was rejected.
        reason: String,
    },
    /// The requested seed-set budget exceeded the node count.
    #[error("requested budget {k} exceeds node count {n}")]
    BudgetExceedsNodes {
        /// The requested budget.
        k: usize,
        /// The graph's node count.
        n: usize,
    },
}

impl ImError {
    /// Retrieves the stable [`ImErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ImErrorCode {
        match self {
            Self::InvalidNode { .. } => ImErrorCode::InvalidNode,
            Self::EdgeNotFound { .. } => ImErrorCode::EdgeNotFound,
            Self::LengthMismatch { .. } => ImErrorCode::LengthMismatch,
            Self::InvalidParameter { .. } => ImErrorCode::InvalidParameter,
            Self::BudgetExceedsNodes { .. } => ImErrorCode::BudgetExceedsNodes,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ImError>;
