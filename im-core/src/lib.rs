//! Influence maximization core library.

mod error;
mod graph;
mod model;
mod ris;
mod rng;
mod select;
mod weight;

pub use crate::error::{ImError, ImErrorCode, Result};
pub use crate::graph::{Graph, NodeId};
pub use crate::model::{DiffusionModel, IndependentCascade, LinearThreshold, RrSampler};
pub use crate::ris::{BaseRis, Imm, MaxCoverResult, RrCollection, max_cover};
pub use crate::select::{Celf, DegreeDiscount, Greedy, SingleDiscount};
pub use crate::weight::{WeightPolicy, set_edge_weight};
