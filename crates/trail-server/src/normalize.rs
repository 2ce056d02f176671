//! Fixed-point to floating-point normalization
//!
//! Storage keeps lengths as exact `NUMERIC` values. JSON clients expect
//! plain numbers, so every decimal read from a result set is converted to
//! `f64` before it leaves the store.

use bigdecimal::{BigDecimal, Signed, ToPrimitive};

/// Convert an exact decimal to the nearest `f64`
///
/// Magnitudes beyond `f64` range saturate to `f64::MAX` (or `f64::MIN`),
/// so the result always serializes as a JSON number, never `null`.
pub fn decimal_to_f64(value: &BigDecimal) -> f64 {
    value
        .to_f64()
        .or_else(|| value.to_string().parse().ok())
        .filter(|v: &f64| v.is_finite())
        .unwrap_or(if value.is_negative() { f64::MIN } else { f64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_trailing_zeros_are_dropped() {
        let value = BigDecimal::from_str("5.50").unwrap();
        assert_eq!(decimal_to_f64(&value), 5.5);
    }

    #[test]
    fn test_serializes_as_json_number() {
        let value = BigDecimal::from_str("12.25").unwrap();
        let json = serde_json::json!({ "Length_km": decimal_to_f64(&value) });
        assert_eq!(json.to_string(), r#"{"Length_km":12.25}"#);
    }

    #[test]
    fn test_integral_and_zero_values() {
        assert_eq!(decimal_to_f64(&BigDecimal::from(42)), 42.0);
        assert_eq!(decimal_to_f64(&BigDecimal::from_str("0.00").unwrap()), 0.0);
    }

    #[test]
    fn test_out_of_range_saturates_to_finite() {
        let huge = BigDecimal::from_str("1e400").unwrap();
        assert_eq!(decimal_to_f64(&huge), f64::MAX);

        let very_negative = BigDecimal::from_str("-1e400").unwrap();
        assert_eq!(decimal_to_f64(&very_negative), f64::MIN);

        let json = serde_json::json!({ "Length_km": decimal_to_f64(&huge) });
        assert!(json["Length_km"].is_number());
    }
}
