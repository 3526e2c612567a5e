//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so every write path enforces the same
//! invariants.

use rust_decimal::Decimal;

use crate::{LedgerError, ResultLedger};

/// Validate a monetary amount and convert it to its stored representation.
///
/// Amounts are entered as non-negative values; the store keeps them with
/// two fraction digits.
pub(crate) fn validate_amount(value: f64) -> ResultLedger<Decimal> {
    if !value.is_finite() {
        return Err(LedgerError::InvalidAmount(
            "amount must be a finite number".to_string(),
        ));
    }
    if value < 0.0 {
        return Err(LedgerError::InvalidAmount(
            "amount must not be negative".to_string(),
        ));
    }
    Decimal::from_f64_retain(value)
        .map(|amount| amount.round_dp(2))
        .ok_or_else(|| LedgerError::InvalidAmount(format!("unrepresentable amount: {value}")))
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_rounded_to_cents() {
        assert_eq!(validate_amount(10.506).unwrap(), Decimal::new(1051, 2));
        assert_eq!(validate_amount(25.0).unwrap(), Decimal::from(25));
        assert_eq!(validate_amount(0.0).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        assert!(validate_amount(-1.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn optional_text_normalizes_blank_to_none() {
        assert_eq!(normalize_optional_text(None), None);
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(
            normalize_optional_text(Some(" groceries ")),
            Some("groceries".to_string())
        );
    }
}
