//! Data models for quotes and ranking.

mod quote;

pub use quote::{FamilyProfile, QuoteRecord, RankedQuote, WeightVector, DEFAULT_COINSURANCE};
