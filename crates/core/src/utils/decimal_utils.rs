use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Rounds to `dp` decimal places, ties away from zero (2.345 -> 2.35, -2.345 -> -2.35).
///
/// `Decimal::round_dp` rounds ties to even, which would turn 0.125 into 0.12.
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Divides, returning zero when the denominator is zero or the quotient overflows.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Parses an exchange-supplied amount string, with support for scientific notation.
/// Blank or unparseable input falls back to zero.
pub fn parse_decimal_string_tolerant(value_str: &str, field_name: &str) -> Decimal {
    let trimmed = value_str.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    match Decimal::from_str(trimmed) {
        Ok(d) => d,
        Err(e_decimal) => match Decimal::from_scientific(trimmed) {
            Ok(d) => d,
            Err(e_scientific) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as scientific (err: {}). Falling back to ZERO.",
                    field_name, value_str, e_decimal, e_scientific
                );
                Decimal::ZERO
            }
        },
    }
}

/// Same as [`parse_decimal_string_tolerant`] for optional fields.
pub fn parse_optional_decimal(value: Option<&str>, field_name: &str) -> Option<Decimal> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_decimal_string_tolerant(s, field_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_half_away(dec!(0.125), 2), dec!(0.13));
        assert_eq!(round_half_away(dec!(-0.125), 2), dec!(-0.13));
        assert_eq!(round_half_away(dec!(42.857142857142), 2), dec!(42.86));
        assert_eq!(round_half_away(dec!(0.123456789), 8), dec!(0.12345679));
    }

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_div(dec!(10), dec!(4)), dec!(2.5));
        assert_eq!(safe_div(Decimal::MAX, dec!(0.0001)), Decimal::ZERO);
    }

    #[test]
    fn test_parse_tolerant() {
        assert_eq!(parse_decimal_string_tolerant("0.5", "amount"), dec!(0.5));
        assert_eq!(parse_decimal_string_tolerant("1e-3", "amount"), dec!(0.001));
        assert_eq!(parse_decimal_string_tolerant("abc", "amount"), Decimal::ZERO);
        assert_eq!(parse_decimal_string_tolerant("  ", "amount"), Decimal::ZERO);
        assert_eq!(parse_optional_decimal(None, "fee"), None);
        assert_eq!(parse_optional_decimal(Some(""), "fee"), None);
        assert_eq!(parse_optional_decimal(Some("0.25"), "fee"), Some(dec!(0.25)));
    }
}
