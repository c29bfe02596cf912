//! Labeled field patterns for recovering quote data from raw text.
//!
//! Each recognized field has one case-insensitive pattern, evaluated
//! independently so new fields or label variants can be added without
//! touching the extraction control flow. Extraction is lenient by
//! design: a missing field is acceptable, a plausible-looking wrong
//! number is not, so every pattern requires the full label text as a
//! prefix before the numeric run.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::normalize::clean_number;

/// One labeled field pattern with an optional post-processing step.
struct FieldPattern {
    name: &'static str,
    pattern: Regex,
    post: Option<fn(f64) -> f64>,
}

/// Coinsurance printed as a percentage ("20" or "20%") becomes a fraction.
fn percent_to_fraction(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

/// Patterns tolerate commas and line breaks inside the numeric run,
/// which show up when a value wraps inside a table cell.
static FIELD_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern {
            name: "premium",
            pattern: Regex::new(r"(?i)(?:annual\s+premium|premium)[^\d]*(\d[\d,\n ]+)").unwrap(),
            post: None,
        },
        FieldPattern {
            name: "deductible",
            pattern: Regex::new(r"(?i)deductible[^\d]*(\d[\d,\n ]+)").unwrap(),
            post: None,
        },
        FieldPattern {
            name: "coinsurance",
            pattern: Regex::new(r"(?i)coinsurance[^\d]*(\d+)%?").unwrap(),
            post: Some(percent_to_fraction),
        },
        FieldPattern {
            name: "out_of_pocket_max",
            pattern: Regex::new(r"(?i)out[- ]?of[- ]?pocket(?:\s*maximum|\s*max)?[^\d]*(\d[\d,\n ]+)")
                .unwrap(),
            post: None,
        },
        FieldPattern {
            name: "coverage_limit",
            pattern: Regex::new(r"(?i)(?:coverage\s*limit|sum\s*insured)[^\d]*(\d[\d,\n ]+)")
                .unwrap(),
            post: None,
        },
        FieldPattern {
            name: "network_size",
            pattern: Regex::new(r"(?i)network\s*size[^\d]*(\d[\d,\n ]+)").unwrap(),
            post: None,
        },
    ]
});

/// Parse recognized quote fields out of raw document text.
///
/// Only the first match per field is used; documents that print a
/// field more than once lead with the summary line. Unmatched fields
/// are absent from the result, and the caller supplies defaults.
pub fn parse_fields(text: &str) -> HashMap<&'static str, f64> {
    let mut fields = HashMap::new();

    for field in FIELD_PATTERNS.iter() {
        if let Some(caps) = field.pattern.captures(text) {
            // Reassemble runs split across line breaks ("6\n500" -> "6500")
            let joined: String = caps[1].split_whitespace().collect();
            let mut value = clean_number(&joined);
            if let Some(post) = field.post {
                value = post(value);
            }
            fields.insert(field.name, value);
        }
    }

    fields
}
