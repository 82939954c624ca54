//! JSON calculation requests.
//!
//! ```json
//! {
//!   "totalIncome": 500000.0,
//!   "wht": 0.0,
//!   "allowances": [
//!     { "allowanceType": "donation", "amount": 0.0 }
//!   ]
//! }
//! ```
//!
//! `wht` and `allowances` may be omitted. Allowance types are matched
//! against the known categories (`donation`, `k-receipt`, `e-shopping`);
//! anything else rejects the whole request.

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{Allowance, AllowanceCategory, TaxInput};
use thiserror::Error;

/// Message shown to the caller for every rejected request. The specific
/// [`RequestError`] is only logged.
pub const INVALID_REQUEST: &str = "invalid request";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("malformed request body: {0}")]
    Malformed(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("unknown allowance type '{0}'")]
    UnknownAllowanceType(String),

    #[error("'{field}' must be non-negative, got {amount}")]
    NegativeAmount { field: String, amount: Decimal },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculationRequest {
    total_income: Option<Decimal>,
    wht: Option<Decimal>,
    #[serde(default)]
    allowances: Vec<AllowanceRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllowanceRequest {
    allowance_type: String,
    amount: Decimal,
}

/// Parses and validates a JSON request body into an engine input.
pub fn parse_request(body: &str) -> Result<TaxInput, RequestError> {
    let request: CalculationRequest =
        serde_json::from_str(body).map_err(|e| RequestError::Malformed(e.to_string()))?;

    let gross_income = request
        .total_income
        .ok_or(RequestError::MissingField("totalIncome"))?;
    ensure_non_negative("totalIncome", gross_income)?;

    let withholding = request.wht.unwrap_or(Decimal::ZERO);
    ensure_non_negative("wht", withholding)?;

    let mut input = TaxInput::new(gross_income).with_withholding(withholding);
    for allowance in request.allowances {
        let category = AllowanceCategory::parse(allowance.allowance_type.trim())
            .ok_or_else(|| RequestError::UnknownAllowanceType(allowance.allowance_type.clone()))?;
        ensure_non_negative(category.as_str(), allowance.amount)?;
        input = input.with_allowance(Allowance::new(category, allowance.amount));
    }

    Ok(input)
}

fn ensure_non_negative(
    field: &str,
    amount: Decimal,
) -> Result<(), RequestError> {
    if amount < Decimal::ZERO {
        return Err(RequestError::NegativeAmount {
            field: field.to_string(),
            amount,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_full_request() {
        let input = parse_request(
            r#"{
                "totalIncome": 4000000.0,
                "wht": 1000.5,
                "allowances": [
                    { "allowanceType": "donation", "amount": 20000.0 },
                    { "allowanceType": "k-receipt", "amount": 20000.0 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            input,
            TaxInput::new(dec!(4000000))
                .with_withholding(dec!(1000.5))
                .with_allowance(Allowance::donation(dec!(20000)))
                .with_allowance(Allowance::k_receipt(dec!(20000)))
        );
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let input = parse_request(r#"{ "totalIncome": 500000 }"#).unwrap();

        assert_eq!(input, TaxInput::new(dec!(500000)));
    }

    #[test]
    fn e_shopping_is_accepted() {
        let input = parse_request(
            r#"{ "totalIncome": 1, "allowances": [{ "allowanceType": "e-shopping", "amount": 5 }] }"#,
        )
        .unwrap();

        assert_eq!(input.allowances, vec![Allowance::e_shopping(dec!(5))]);
    }

    #[test]
    fn missing_total_income_is_rejected() {
        let result = parse_request(r#"{ "wht": 100 }"#);

        assert_eq!(result, Err(RequestError::MissingField("totalIncome")));
    }

    #[test]
    fn null_total_income_is_rejected() {
        let result = parse_request(r#"{ "totalIncome": null }"#);

        assert_eq!(result, Err(RequestError::MissingField("totalIncome")));
    }

    #[test]
    fn unknown_allowance_type_is_rejected() {
        let result = parse_request(
            r#"{ "totalIncome": 500000, "allowances": [{ "allowanceType": "lottery", "amount": 1 }] }"#,
        );

        assert_eq!(
            result,
            Err(RequestError::UnknownAllowanceType("lottery".to_string()))
        );
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let cases = [
            (r#"{ "totalIncome": -1 }"#, "totalIncome", dec!(-1)),
            (r#"{ "totalIncome": 1, "wht": -2.5 }"#, "wht", dec!(-2.5)),
            (
                r#"{ "totalIncome": 1, "allowances": [{ "allowanceType": "donation", "amount": -3 }] }"#,
                "donation",
                dec!(-3),
            ),
        ];

        for (body, field, amount) in cases {
            assert_eq!(
                parse_request(body),
                Err(RequestError::NegativeAmount {
                    field: field.to_string(),
                    amount,
                }),
                "{body}"
            );
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            parse_request("{ totalIncome: "),
            Err(RequestError::Malformed(_))
        ));
        assert!(matches!(
            parse_request(r#"{ "totalIncome": "lots" }"#),
            Err(RequestError::Malformed(_))
        ));
    }

    #[test]
    fn allowance_without_amount_is_malformed() {
        let result = parse_request(
            r#"{ "totalIncome": 1, "allowances": [{ "allowanceType": "donation" }] }"#,
        );

        assert!(matches!(result, Err(RequestError::Malformed(_))));
    }
}
