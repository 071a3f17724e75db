use regex::Regex;
use std::sync::OnceLock;

fn under_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)k").expect("static regex"))
}

fn over_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)m").expect("static regex"))
}

fn bounded_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)k\s*-\s*(\d+)([km])").expect("static regex"))
}

/// Convert a bucketed value range string into a numeric midpoint estimate.
///
/// Examples: "50k - 100k" -> 75000, "Under 50k" -> 25000, "Over 1M" -> 1250000.
///
/// "Under Nk" assumes the bucket floor is 0, so the midpoint is N * 500.
/// "Over Nm" extrapolates a fixed half-bucket width above the bound.
/// Unparseable input yields 0; this function never fails.
pub fn parse_value_range(range: &str) -> f64 {
    let lower = range.to_lowercase();

    if lower.contains("under") {
        // "Under 50k" -> half of 50k = 25k
        if let Some(caps) = under_re().captures(&lower) {
            return parse_digits(&caps[1]) * 500.0;
        }
        return 25_000.0; // fallback
    }

    if lower.contains("over") {
        // "Over 1M" -> 1M + 250k
        if let Some(caps) = over_re().captures(&lower) {
            return parse_digits(&caps[1]) * 1_000_000.0 + 250_000.0;
        }
        return 1_250_000.0; // fallback
    }

    // "50k - 100k" -> midpoint = 75k
    if let Some(caps) = bounded_re().captures(&lower) {
        let min = parse_digits(&caps[1]) * 1_000.0;
        let max_multiplier = if &caps[3] == "m" { 1_000_000.0 } else { 1_000.0 };
        let max = parse_digits(&caps[2]) * max_multiplier;
        return (min + max) / 2.0;
    }

    0.0 // fallback for unparseable ranges
}

fn parse_digits(digits: &str) -> f64 {
    digits.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::parse_value_range;
    use bidflow_types::PROJECT_VALUE_RANGES;

    #[test]
    fn under_bucket_is_half_the_bound() {
        assert_eq!(parse_value_range("Under 50k"), 25_000.0);
    }

    #[test]
    fn over_bucket_extrapolates_a_quarter_million() {
        assert_eq!(parse_value_range("Over 1M"), 1_250_000.0);
    }

    #[test]
    fn bounded_buckets_return_the_arithmetic_mean() {
        assert_eq!(parse_value_range("50k - 100k"), 75_000.0);
        assert_eq!(parse_value_range("100k - 250k"), 175_000.0);
        assert_eq!(parse_value_range("250k - 500k"), 375_000.0);
        assert_eq!(parse_value_range("500k - 1M"), 750_000.0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(parse_value_range("UNDER 50K"), 25_000.0);
        assert_eq!(parse_value_range("over 2m"), 2_250_000.0);
    }

    #[test]
    fn whole_catalogue_parses_to_nonzero() {
        for range in PROJECT_VALUE_RANGES {
            assert!(parse_value_range(range) > 0.0, "{range} parsed to zero");
        }
    }

    #[test]
    fn malformed_keyword_buckets_use_fixed_fallbacks() {
        assert_eq!(parse_value_range("Under a lot"), 25_000.0);
        assert_eq!(parse_value_range("Over the moon"), 1_250_000.0);
    }

    #[test]
    fn garbage_returns_zero_without_panicking() {
        assert_eq!(parse_value_range(""), 0.0);
        assert_eq!(parse_value_range("about tree fiddy"), 0.0);
        assert_eq!(parse_value_range("100 - 200"), 0.0);
    }
}
