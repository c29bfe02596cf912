//! Deterministic fallback summary when no narrator is reachable.

use crate::models::{FamilyProfile, RankedQuote};

/// Build a structured local summary of the top-ranked plan.
///
/// Input must already be sorted by composite score, descending, as
/// produced by the scoring engine.
pub fn local_summary(ranked: &[RankedQuote], profile: &FamilyProfile) -> String {
    let Some(best) = ranked.first() else {
        return "No quotes available for analysis.".to_string();
    };

    let mut out = String::from("### Analysis\n");
    out.push_str(&format!("- **Best Plan:** {}\n", best.plan_name));
    out.push_str(&format!("- **Coverage Score:** {}\n", best.coverage_score));
    out.push_str(&format!("- **Deductible:** ${:.0}\n", best.deductible));
    out.push_str(&format!(
        "- **Coinsurance:** {:.0}%\n",
        best.coinsurance * 100.0
    ));
    out.push_str(&format!(
        "- **Out-of-Pocket Max:** ${:.0}\n",
        best.out_of_pocket_max
    ));

    out.push_str("\n### Recommended Plan\n");
    out.push_str(&format!(
        "**{}** is the most suitable option for a {} income family of {}. \
         It balances coverage, deductible, and coinsurance most effectively.",
        best.plan_name,
        profile.income_level.to_lowercase(),
        profile.family_size
    ));

    out
}
