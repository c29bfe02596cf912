//! Rendering of the ranked quote table.

use crate::models::RankedQuote;

/// Column order of the ranked table.
const COLUMNS: &[&str] = &[
    "plan_name",
    "expected_annual_cost",
    "cost_score",
    "coverage_score",
    "network_score",
    "composite_score",
    "premium",
    "deductible",
    "coinsurance",
    "out_of_pocket_max",
    "coverage_limit",
    "annual_benefit_max",
    "network_size",
];

fn fmt_amount(value: f64) -> String {
    if value == value.trunc() {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn fmt_optional(value: Option<f64>) -> String {
    value.map(fmt_amount).unwrap_or_default()
}

fn row_values(quote: &RankedQuote) -> Vec<String> {
    vec![
        quote.plan_name.clone(),
        format!("{:.2}", quote.expected_annual_cost),
        format!("{:.3}", quote.cost_score),
        format!("{:.3}", quote.coverage_score),
        format!("{:.3}", quote.network_score),
        format!("{:.3}", quote.composite_score),
        fmt_amount(quote.premium),
        fmt_amount(quote.deductible),
        format!("{}", quote.coinsurance),
        fmt_amount(quote.out_of_pocket_max),
        fmt_optional(quote.coverage_limit),
        fmt_optional(quote.annual_benefit_max),
        fmt_optional(quote.network_size),
    ]
}

/// Render the ranked quotes as a markdown table, one row per plan,
/// in ranking order.
pub fn ranked_table(ranked: &[RankedQuote]) -> String {
    let mut lines = vec![
        format!("| {} |", COLUMNS.join(" | ")),
        format!("| {} |", vec!["---"; COLUMNS.len()].join(" | ")),
    ];
    for quote in ranked {
        lines.push(format!("| {} |", row_values(quote).join(" | ")));
    }
    lines.join("\n")
}
