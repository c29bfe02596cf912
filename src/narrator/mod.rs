//! Natural-language explanation of a ranked batch.
//!
//! The narrator is an optional external collaborator (an Ollama
//! endpoint). The core works with it entirely absent: any failure
//! falls back to a deterministic local summary and is never surfaced
//! as a fatal error.

mod client;
mod summary;

pub use client::{NarratorClient, NarratorConfig, NarratorError};
pub use summary::local_summary;

use tracing::warn;

use crate::models::{FamilyProfile, RankedQuote};

/// Explain the ranking, preferring the narrator when one is present.
///
/// Narrator errors are logged and recovered locally; the returned
/// prose is always usable.
pub async fn explain_or_fallback(
    narrator: Option<&NarratorClient>,
    ranked: &[RankedQuote],
    question: &str,
    profile: &FamilyProfile,
) -> String {
    if let Some(client) = narrator {
        match client.explain(ranked, question, profile).await {
            Ok(answer) => return answer,
            Err(e) => {
                warn!("narrator unavailable, using local summary: {}", e);
            }
        }
    }

    local_summary(ranked, profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_narrator_uses_local_summary() {
        let ranked = vec![RankedQuote {
            plan_name: "Beacon Gold".to_string(),
            expected_annual_cost: 3800.0,
            cost_score: 0.963,
            coverage_score: 1.0,
            network_score: 0.5,
            composite_score: 0.928,
            premium: 1000.0,
            deductible: 500.0,
            coinsurance: 0.2,
            out_of_pocket_max: 3000.0,
            coverage_limit: Some(500_000.0),
            annual_benefit_max: None,
            network_size: Some(2000.0),
        }];

        let answer = explain_or_fallback(
            None,
            &ranked,
            "Which plan fits us?",
            &FamilyProfile::default(),
        )
        .await;

        assert!(answer.contains("Beacon Gold"));
    }
}
