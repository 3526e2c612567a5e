use numfmt::{Formatter, Precision};
use serde::{Deserialize, Serialize};

/// Code/symbol pair describing how monetary values are rendered.
///
/// This is distinct from the currency a transaction was originally entered
/// in: persisted amounts are never converted, only their presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCurrency {
    pub code: String,
    pub symbol: String,
}

impl Default for DisplayCurrency {
    fn default() -> Self {
        Self {
            code: "USD".to_string(),
            symbol: "$".to_string(),
        }
    }
}

/// Payload broadcast when the user picks a different display currency.
///
/// `conversion_rate` rescales original amounts into the new currency for
/// presentation only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrencyChange {
    pub code: String,
    pub symbol: String,
    pub conversion_rate: f64,
}

/// Formats a monetary value as `symbol` + fixed two decimals with `,` group
/// separators, locale-independent. Negative values get a leading minus
/// before the symbol.
pub fn format_amount(symbol: &str, value: f64) -> String {
    if value == 0.0 {
        // Zero is hardcoded as "0" by the formatter, so spell it out.
        return format!("{symbol}0.00");
    }

    let prefix = if value < 0.0 {
        format!("-{symbol}")
    } else {
        symbol.to_string()
    };

    let formatter = match Formatter::currency(&prefix) {
        Ok(formatter) => formatter.precision(Precision::Decimals(2)),
        Err(_) => return format!("{prefix}{:.2}", value.abs()),
    };
    let mut formatted = formatter.fmt_string(value.abs());

    // numfmt omits the last trailing zero ("12.30" is rendered as "12.3"),
    // so we must add it ourselves.
    if formatted.as_bytes()[formatted.len() - 3] != b'.' {
        formatted = format!("{formatted}0");
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimals_with_group_separators() {
        assert_eq!(format_amount("$", 1234567.5), "$1,234,567.50");
        assert_eq!(format_amount("$", 60.0), "$60.00");
        assert_eq!(format_amount("€", 0.05), "€0.05");
    }

    #[test]
    fn formats_zero_and_negatives() {
        assert_eq!(format_amount("$", 0.0), "$0.00");
        assert_eq!(format_amount("$", -40.25), "-$40.25");
    }

    #[test]
    fn default_display_currency_is_dollars() {
        let currency = DisplayCurrency::default();
        assert_eq!(currency.code, "USD");
        assert_eq!(currency.symbol, "$");
    }
}
