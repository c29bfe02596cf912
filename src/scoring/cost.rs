//! Expected annual out-of-pocket cost for one quote.

use crate::models::QuoteRecord;

/// Compute the expected annual cost of a quote under a claims
/// frequency assumption.
///
/// Standard layered cost-sharing: the member pays the full deductible
/// layer per claim, then the coinsurance fraction of any excess above
/// the deductible. Total out-of-pocket across the year is capped at
/// the quote's stated maximum; a quote without one gets a computed
/// fallback of `deductible + coinsurance * avg_claim_amount`.
pub fn expected_cost(quote: &QuoteRecord, expected_claims: u32, avg_claim_amount: f64) -> f64 {
    let deductible = quote.deductible;
    let coinsurance = quote.coinsurance;

    let cap = if quote.out_of_pocket_max > 0.0 {
        quote.out_of_pocket_max
    } else {
        deductible + coinsurance * avg_claim_amount
    };

    let per_claim = deductible + coinsurance * (avg_claim_amount - deductible).max(0.0);
    let claims_cost = f64::from(expected_claims) * per_claim;

    quote.premium + claims_cost.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(premium: f64, deductible: f64, coinsurance: f64, oop_max: f64) -> QuoteRecord {
        QuoteRecord {
            plan_name: "Test".to_string(),
            premium,
            deductible,
            coinsurance,
            out_of_pocket_max: oop_max,
            coverage_limit: None,
            annual_benefit_max: None,
            network_size: None,
        }
    }

    #[test]
    fn test_layered_cost_sharing() {
        // per-claim = 500 + 0.2 * 4500 = 1400; two claims = 2800,
        // below the 3000 cap; total = 1000 + 2800
        let q = quote(1000.0, 500.0, 0.2, 3000.0);
        assert_eq!(expected_cost(&q, 2, 5000.0), 3800.0);
    }

    #[test]
    fn test_cap_binds_under_heavy_claims() {
        let q = quote(1000.0, 500.0, 0.2, 3000.0);
        assert_eq!(expected_cost(&q, 10, 5000.0), 4000.0);
    }

    #[test]
    fn test_never_exceeds_premium_plus_cap() {
        let q = quote(1200.0, 750.0, 0.3, 2500.0);
        for claims in 0..50 {
            let cost = expected_cost(&q, claims, 80_000.0);
            assert!(cost <= q.premium + q.out_of_pocket_max + 1e-9, "claims={}", claims);
        }
    }

    #[test]
    fn test_missing_cap_uses_fallback() {
        // fallback cap = 500 + 0.2 * 5000 = 1500, binding at 2 claims
        let q = quote(1000.0, 500.0, 0.2, 0.0);
        assert_eq!(expected_cost(&q, 2, 5000.0), 2500.0);
    }

    #[test]
    fn test_claim_below_deductible() {
        // claim smaller than the deductible: no coinsurance layer
        let q = quote(0.0, 1000.0, 0.2, 10_000.0);
        assert_eq!(expected_cost(&q, 1, 400.0), 1000.0);
    }

    #[test]
    fn test_zero_claims() {
        let q = quote(1000.0, 500.0, 0.2, 3000.0);
        assert_eq!(expected_cost(&q, 0, 5000.0), 1000.0);
    }
}
