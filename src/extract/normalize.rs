//! Numeric normalization for noisy document text.

/// Clean a raw numeric substring like "6,500" or "6\n500" into 6500.0.
///
/// Every character that is not a decimal digit is stripped, including
/// decimal points and signs: source documents only ever carry
/// non-negative integer-like amounts, and OCR noise inside the run is
/// more common than real fractional values. Returns 0.0 when nothing
/// numeric remains.
pub fn clean_number(raw: &str) -> f64 {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0.0;
    }
    digits.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated() {
        assert_eq!(clean_number("12,000"), 12000.0);
        assert_eq!(clean_number("1,234,567"), 1234567.0);
    }

    #[test]
    fn test_line_break_inside_number() {
        assert_eq!(clean_number("6\n500"), 6500.0);
        assert_eq!(clean_number("6 500"), 6500.0);
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_eq!(clean_number(""), 0.0);
        assert_eq!(clean_number("abc"), 0.0);
        assert_eq!(clean_number("$ ,"), 0.0);
    }

    #[test]
    fn test_signs_and_points_are_stripped() {
        assert_eq!(clean_number("-500"), 500.0);
        assert_eq!(clean_number("1.5"), 15.0);
    }
}
