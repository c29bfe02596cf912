//! Canonical quote record and its derived ranking projection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Coinsurance fraction assumed when a quote does not state one.
pub const DEFAULT_COINSURANCE: f64 = 0.2;

/// One insurance quote in canonical form.
///
/// Numeric fields are annual amounts. Missing or unparseable values
/// default to 0.0, except `coinsurance` which defaults to 0.2.
/// Records are immutable once constructed; ranking produces a
/// separate [`RankedQuote`] and never mutates the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Plan name, synthesized from the source file or row when absent.
    pub plan_name: String,
    /// Annual premium.
    pub premium: f64,
    /// Annual deductible.
    pub deductible: f64,
    /// Fraction of post-deductible cost the insured pays (0.2 = 20%).
    pub coinsurance: f64,
    /// Annual out-of-pocket maximum (0.0 when unstated).
    pub out_of_pocket_max: f64,
    /// Total coverage limit, if stated.
    pub coverage_limit: Option<f64>,
    /// Annual benefit maximum, if stated.
    pub annual_benefit_max: Option<f64>,
    /// Provider network size or score, if stated.
    pub network_size: Option<f64>,
}

impl QuoteRecord {
    /// Build a record from a map of extracted field values.
    ///
    /// Absent fields take their documented defaults; the caller
    /// supplies the plan name (typically the document's file stem).
    pub fn from_fields(plan_name: impl Into<String>, fields: &HashMap<&'static str, f64>) -> Self {
        Self {
            plan_name: plan_name.into(),
            premium: fields.get("premium").copied().unwrap_or(0.0),
            deductible: fields.get("deductible").copied().unwrap_or(0.0),
            coinsurance: fields
                .get("coinsurance")
                .copied()
                .unwrap_or(DEFAULT_COINSURANCE),
            out_of_pocket_max: fields.get("out_of_pocket_max").copied().unwrap_or(0.0),
            coverage_limit: fields.get("coverage_limit").copied(),
            annual_benefit_max: fields.get("annual_benefit_max").copied(),
            network_size: fields.get("network_size").copied(),
        }
    }
}

/// Read-only projection of a [`QuoteRecord`] plus computed scores.
///
/// Created fresh on every scoring pass and discarded after the
/// ranked view is rendered or consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedQuote {
    pub plan_name: String,
    /// Expected annual cost under the claims assumptions, rounded to 2 dp.
    pub expected_annual_cost: f64,
    /// Smooth decreasing function of expected cost, in (0, 1]. 3 dp.
    pub cost_score: f64,
    /// Coverage relative to the best-covered quote in the batch. 3 dp.
    pub coverage_score: f64,
    /// Network size relative to the largest in the batch. 3 dp.
    pub network_score: f64,
    /// Weighted blend of the three scores. 3 dp.
    pub composite_score: f64,
    pub premium: f64,
    pub deductible: f64,
    pub coinsurance: f64,
    pub out_of_pocket_max: f64,
    pub coverage_limit: Option<f64>,
    pub annual_benefit_max: Option<f64>,
    pub network_size: Option<f64>,
}

/// Relative importance of the three ranking dimensions.
///
/// Weights need not sum to 1; the scoring engine renormalizes them
/// and falls back to equal weights when the sum is near zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub cost: f64,
    pub coverage: f64,
    pub network: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            cost: 0.6,
            coverage: 0.3,
            network: 0.1,
        }
    }
}

impl WeightVector {
    /// Normalize the weights to sum to 1.
    ///
    /// A near-zero sum (all weights ~0) falls back to equal weights
    /// rather than dividing by zero.
    pub fn normalized(&self) -> Self {
        let total = self.cost + self.coverage + self.network;
        if total.abs() < 1e-9 {
            let third = 1.0 / 3.0;
            return Self {
                cost: third,
                coverage: third,
                network: third,
            };
        }
        Self {
            cost: self.cost / total,
            coverage: self.coverage / total,
            network: self.network / total,
        }
    }
}

/// Family context the ranking and narration are performed for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyProfile {
    /// Region or country the family lives in.
    #[serde(default = "default_region")]
    pub region: String,
    /// Rough income bracket ("Low", "Middle", "High").
    #[serde(default = "default_income")]
    pub income_level: String,
    /// Number of covered family members.
    #[serde(default = "default_family_size")]
    pub family_size: u32,
    /// Expected number of claims per year.
    #[serde(default = "default_expected_claims")]
    pub expected_claims: u32,
    /// Average amount per claim.
    #[serde(default = "default_avg_claim")]
    pub avg_claim_amount: f64,
}

fn default_region() -> String {
    "United States".to_string()
}
fn default_income() -> String {
    "Middle".to_string()
}
fn default_family_size() -> u32 {
    4
}
fn default_expected_claims() -> u32 {
    1
}
fn default_avg_claim() -> f64 {
    50_000.0
}

impl Default for FamilyProfile {
    fn default() -> Self {
        Self {
            region: default_region(),
            income_level: default_income(),
            family_size: default_family_size(),
            expected_claims: default_expected_claims(),
            avg_claim_amount: default_avg_claim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_defaults() {
        let fields = HashMap::from([("premium", 1200.0), ("deductible", 500.0)]);
        let quote = QuoteRecord::from_fields("Acme Gold", &fields);

        assert_eq!(quote.plan_name, "Acme Gold");
        assert_eq!(quote.premium, 1200.0);
        assert_eq!(quote.deductible, 500.0);
        assert_eq!(quote.coinsurance, DEFAULT_COINSURANCE);
        assert_eq!(quote.out_of_pocket_max, 0.0);
        assert_eq!(quote.coverage_limit, None);
        assert_eq!(quote.network_size, None);
    }

    #[test]
    fn test_weights_normalize() {
        let weights = WeightVector {
            cost: 2.0,
            coverage: 1.0,
            network: 1.0,
        };
        let norm = weights.normalized();
        assert!((norm.cost - 0.5).abs() < 1e-12);
        assert!((norm.coverage - 0.25).abs() < 1e-12);
        assert!((norm.network + norm.coverage + norm.cost - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weights_fall_back_to_equal() {
        let weights = WeightVector {
            cost: 0.0,
            coverage: 0.0,
            network: 0.0,
        };
        let norm = weights.normalized();
        assert!((norm.cost - 1.0 / 3.0).abs() < 1e-12);
        assert!((norm.coverage - 1.0 / 3.0).abs() < 1e-12);
        assert!((norm.network - 1.0 / 3.0).abs() < 1e-12);
    }
}
