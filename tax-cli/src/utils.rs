use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a command-line amount cannot be parsed.
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("amount must not be empty")]
    Empty,

    #[error("invalid decimal '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a command-line amount into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"70,000"`).
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Err(ParseDecimalError::Empty);
    }
    normalized
        .parse()
        .map_err(|source| ParseDecimalError::Invalid {
            input: s.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("70,000").unwrap(), dec!(70000));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_trims_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_rejects_empty() {
        assert!(matches!(parse_decimal("   "), Err(ParseDecimalError::Empty)));
    }

    #[test]
    fn parse_decimal_invalid_names_input() {
        let err = parse_decimal("abc").unwrap_err();

        assert!(err.to_string().starts_with("invalid decimal 'abc'"));
    }
}
