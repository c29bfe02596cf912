//! Quotewise - insurance quote extraction, scoring, and comparison.
//!
//! Extracts structured quote records from PDF documents (direct text
//! with an OCR fallback) and tabular files, computes an expected
//! annual cost per quote, and ranks the batch with a weighted blend
//! of cost, coverage, and network scores. An optional narrator
//! service turns the ranked table into a plain-language
//! recommendation; without it a deterministic local summary is used.

pub mod cli;
pub mod config;
pub mod extract;
pub mod ingest;
pub mod models;
pub mod narrator;
pub mod report;
pub mod scoring;
