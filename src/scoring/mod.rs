//! Cost modeling and quote ranking.

mod cost;
mod rank;

pub use cost::expected_cost;
pub use rank::{rank, ScoringError};
