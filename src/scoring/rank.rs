//! Weighted composite ranking across a batch of quotes.

use thiserror::Error;

use crate::models::{QuoteRecord, RankedQuote, WeightVector};

use super::cost::expected_cost;

/// Errors from the scoring engine.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("cannot rank an empty batch of quotes")]
    EmptyBatch,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Rank a batch of quotes by weighted composite score, descending.
///
/// Cost, coverage, and network dimensions are normalized across the
/// batch before blending, so scores are comparable regardless of the
/// absolute currency scale. Ties keep input order (stable sort). The
/// input records are only borrowed and never mutated.
pub fn rank(
    quotes: &[QuoteRecord],
    expected_claims: u32,
    avg_claim_amount: f64,
    weights: &WeightVector,
) -> Result<Vec<RankedQuote>, ScoringError> {
    if quotes.is_empty() {
        return Err(ScoringError::EmptyBatch);
    }

    let weights = weights.normalized();

    // Floored at 1 so all-absent batches divide by one, not zero
    let max_network = quotes
        .iter()
        .map(|q| q.network_size.unwrap_or(0.0))
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let max_coverage = quotes
        .iter()
        .map(|q| q.coverage_limit.unwrap_or(0.0) + q.annual_benefit_max.unwrap_or(0.0))
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let mut ranked: Vec<RankedQuote> = quotes
        .iter()
        .map(|q| {
            let exp_cost = expected_cost(q, expected_claims, avg_claim_amount);
            // Smooth decreasing function of cost, bounded in (0, 1]
            let cost_score = 1.0 / (1.0 + exp_cost / 100_000.0);
            let coverage = q
                .coverage_limit
                .or(q.annual_benefit_max)
                .unwrap_or(0.0);
            let coverage_score = coverage / max_coverage;
            let network_score = q.network_size.unwrap_or(0.0) / max_network;

            let composite = weights.cost * cost_score
                + weights.coverage * coverage_score
                + weights.network * network_score;

            RankedQuote {
                plan_name: q.plan_name.clone(),
                expected_annual_cost: round2(exp_cost),
                cost_score: round3(cost_score),
                coverage_score: round3(coverage_score),
                network_score: round3(network_score),
                composite_score: round3(composite),
                premium: q.premium,
                deductible: q.deductible,
                coinsurance: q.coinsurance,
                out_of_pocket_max: q.out_of_pocket_max,
                coverage_limit: q.coverage_limit,
                annual_benefit_max: q.annual_benefit_max,
                network_size: q.network_size,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(name: &str, premium: f64, coverage: Option<f64>, network: Option<f64>) -> QuoteRecord {
        QuoteRecord {
            plan_name: name.to_string(),
            premium,
            deductible: 500.0,
            coinsurance: 0.2,
            out_of_pocket_max: 3000.0,
            coverage_limit: coverage,
            annual_benefit_max: None,
            network_size: network,
        }
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let result = rank(&[], 1, 50_000.0, &WeightVector::default());
        assert!(matches!(result, Err(ScoringError::EmptyBatch)));
    }

    #[test]
    fn test_output_is_permutation_of_input() {
        let quotes = vec![
            quote("A", 9000.0, None, None),
            quote("B", 1000.0, Some(500_000.0), Some(4000.0)),
            quote("C", 2000.0, Some(100_000.0), None),
        ];
        let ranked = rank(&quotes, 1, 50_000.0, &WeightVector::default()).unwrap();

        assert_eq!(ranked.len(), quotes.len());
        let mut names: Vec<_> = ranked.iter().map(|r| r.plan_name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["A", "B", "C"]);

        // Non-increasing composite scores
        for pair in ranked.windows(2) {
            assert!(pair[0].composite_score >= pair[1].composite_score);
        }
    }

    #[test]
    fn test_cheaper_better_covered_plan_wins() {
        let quotes = vec![
            quote("Pricey", 9000.0, Some(100_000.0), Some(100.0)),
            quote("Value", 1000.0, Some(500_000.0), Some(4000.0)),
        ];
        let ranked = rank(&quotes, 1, 50_000.0, &WeightVector::default()).unwrap();
        assert_eq!(ranked[0].plan_name, "Value");
    }

    #[test]
    fn test_zero_weights_fall_back_to_equal() {
        let quotes = vec![
            quote("A", 1000.0, Some(500_000.0), Some(4000.0)),
            quote("B", 2000.0, Some(250_000.0), Some(2000.0)),
        ];
        let zero = WeightVector {
            cost: 0.0,
            coverage: 0.0,
            network: 0.0,
        };
        let ranked = rank(&quotes, 1, 50_000.0, &zero).unwrap();

        assert_eq!(ranked.len(), 2);
        // Equal weighting still produces meaningful, nonzero composites
        assert!(ranked.iter().all(|r| r.composite_score > 0.0));
        assert_eq!(ranked[0].plan_name, "A");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let quotes = vec![
            quote("First", 1000.0, None, None),
            quote("Second", 1000.0, None, None),
        ];
        let ranked = rank(&quotes, 1, 50_000.0, &WeightVector::default()).unwrap();
        assert_eq!(ranked[0].plan_name, "First");
        assert_eq!(ranked[1].plan_name, "Second");
    }

    #[test]
    fn test_all_network_sizes_absent() {
        let quotes = vec![quote("A", 1000.0, None, None)];
        let ranked = rank(&quotes, 1, 50_000.0, &WeightVector::default()).unwrap();
        assert_eq!(ranked[0].network_score, 0.0);
        assert_eq!(ranked[0].coverage_score, 0.0);
    }

    #[test]
    fn test_coverage_prefers_coverage_limit() {
        let mut a = quote("A", 1000.0, Some(200_000.0), None);
        a.annual_benefit_max = Some(50_000.0);
        let b = quote("B", 1000.0, None, None);

        let ranked = rank(&[a, b], 1, 50_000.0, &WeightVector::default()).unwrap();
        let top = ranked.iter().find(|r| r.plan_name == "A").unwrap();
        // numerator 200k over denominator 250k
        assert_eq!(top.coverage_score, 0.8);
    }

    #[test]
    fn test_scores_are_rounded() {
        let quotes = vec![quote("A", 1234.567, Some(333_333.0), Some(7.0))];
        let ranked = rank(&quotes, 1, 50_000.0, &WeightVector::default()).unwrap();
        let r = &ranked[0];

        let as_cents = r.expected_annual_cost * 100.0;
        assert!((as_cents - as_cents.round()).abs() < 1e-6);
        for score in [r.cost_score, r.coverage_score, r.network_score, r.composite_score] {
            let scaled = score * 1000.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }
}
