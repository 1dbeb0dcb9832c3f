//! Sanitization of raw field input before it reaches the engine.

/// Parses a raw field value, mapping anything unusable to 0.
///
/// Empty, unparsable, NaN, infinite and negative input all become `0.0`;
/// the engine itself never sees a negative or non-finite number from here.
///
/// # Examples
///
/// ```
/// use dualfuel_cost::input::coerce_non_negative;
///
/// assert_eq!(coerce_non_negative(" 2.1 "), 2.1);
/// assert_eq!(coerce_non_negative("abc"), 0.0);
/// assert_eq!(coerce_non_negative("-3"), 0.0);
/// ```
pub fn coerce_non_negative(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Splits a `section.field=value` assignment into its path and raw value.
///
/// Returns `None` if there is no `=` or the path is empty.
pub fn split_assignment(assignment: &str) -> Option<(&str, &str)> {
    let (path, value) = assignment.split_once('=')?;
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    Some((path, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_accepts_plain_numbers() {
        assert_eq!(coerce_non_negative("29"), 29.0);
        assert_eq!(coerce_non_negative("0.5"), 0.5);
    }

    #[test]
    fn coerce_defaults_to_zero() {
        assert_eq!(coerce_non_negative(""), 0.0);
        assert_eq!(coerce_non_negative("   "), 0.0);
        assert_eq!(coerce_non_negative("NaN"), 0.0);
        assert_eq!(coerce_non_negative("inf"), 0.0);
        assert_eq!(coerce_non_negative("-0.1"), 0.0);
        assert_eq!(coerce_non_negative("12km"), 0.0);
    }

    #[test]
    fn coerce_never_returns_negative_zero() {
        assert!(coerce_non_negative("-0").is_sign_positive());
    }

    #[test]
    fn assignment_split() {
        assert_eq!(
            split_assignment("electric.spend = 30"),
            Some(("electric.spend", "30"))
        );
        assert_eq!(split_assignment("fuel.mode=rate"), Some(("fuel.mode", "rate")));
        assert_eq!(split_assignment("fuel.mode"), None);
        assert_eq!(split_assignment("=3"), None);
    }
}
