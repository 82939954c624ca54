//! Progressive bracket schedule and evaluator.
//!
//! # Standard Schedule
//!
//! | Bracket | Taxable income | Rate | Max contribution |
//! |---------|----------------|------|------------------|
//! | 0 | 0 – 150,000 | 0% | 0 |
//! | 1 | 150,001 – 500,000 | 10% | 35,000 |
//! | 2 | 500,001 – 1,000,000 | 15% | 75,000 |
//! | 3 | 1,000,001 – 2,000,000 | 20% | 200,000 |
//! | 4 | 2,000,001 and above | 35% | unbounded |
//!
//! Every bracket is reported on every evaluation, with a zero amount when the
//! income does not reach it, so the breakdown always has one entry per
//! bracket.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{cap, round_half_up};
use crate::calculations::error::BracketScheduleError;
use crate::{BracketResult, TaxBracket};

/// The fixed personal income tax schedule.
pub static STANDARD_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        label: "0-150,000",
        min_income: dec!(0),
        max_income: Some(dec!(150000)),
        tax_rate: dec!(0),
    },
    TaxBracket {
        label: "150,001-500,000",
        min_income: dec!(150000),
        max_income: Some(dec!(500000)),
        tax_rate: dec!(0.10),
    },
    TaxBracket {
        label: "500,001-1,000,000",
        min_income: dec!(500000),
        max_income: Some(dec!(1000000)),
        tax_rate: dec!(0.15),
    },
    TaxBracket {
        label: "1,000,001-2,000,000",
        min_income: dec!(1000000),
        max_income: Some(dec!(2000000)),
        tax_rate: dec!(0.20),
    },
    TaxBracket {
        label: "2,000,001 and above",
        min_income: dec!(2000000),
        max_income: None,
        tax_rate: dec!(0.35),
    },
];

/// Per-bracket breakdown and the liability it sums to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketEvaluation {
    pub brackets: Vec<BracketResult>,
    pub gross_liability: Decimal,
}

/// Applies a validated bracket schedule to taxable income.
#[derive(Debug, Clone, Copy)]
pub struct BracketEvaluator<'a> {
    brackets: &'a [TaxBracket],
}

impl BracketEvaluator<'static> {
    /// Evaluator over [`STANDARD_BRACKETS`].
    pub fn standard() -> Self {
        Self {
            brackets: &STANDARD_BRACKETS,
        }
    }
}

impl<'a> BracketEvaluator<'a> {
    /// Creates an evaluator over a custom schedule.
    ///
    /// Brackets must be sorted by `min_income`, start at zero, be contiguous,
    /// and end with a single unbounded bracket.
    ///
    /// # Errors
    ///
    /// Returns [`BracketScheduleError`] describing the first violation.
    pub fn new(brackets: &'a [TaxBracket]) -> Result<Self, BracketScheduleError> {
        validate_schedule(brackets)?;
        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &'a [TaxBracket] {
        self.brackets
    }

    /// Computes the tax owed in each bracket for `taxable_income`.
    ///
    /// Each contribution is rounded half-up to two decimal places and
    /// `gross_liability` is the sum of the rounded contributions.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::calculations::BracketEvaluator;
    ///
    /// let evaluation = BracketEvaluator::standard().evaluate(dec!(440000));
    ///
    /// assert_eq!(evaluation.gross_liability, dec!(29000));
    /// assert_eq!(evaluation.brackets.len(), 5);
    /// assert_eq!(evaluation.brackets[1].amount, dec!(29000));
    /// ```
    pub fn evaluate(
        &self,
        taxable_income: Decimal,
    ) -> BracketEvaluation {
        let brackets: Vec<BracketResult> = self
            .brackets
            .iter()
            .map(|bracket| BracketResult {
                label: bracket.label.to_string(),
                amount: bracket_tax(bracket, taxable_income),
            })
            .collect();

        let gross_liability = brackets.iter().map(|b| b.amount).sum();

        BracketEvaluation {
            brackets,
            gross_liability,
        }
    }
}

fn bracket_tax(
    bracket: &TaxBracket,
    taxable_income: Decimal,
) -> Decimal {
    if taxable_income <= bracket.min_income {
        return Decimal::ZERO;
    }

    let income_in_bracket = taxable_income - bracket.min_income;
    let taxed = match bracket.max_income {
        Some(max) => cap(income_in_bracket, max - bracket.min_income),
        None => income_in_bracket,
    };

    round_half_up(taxed * bracket.tax_rate)
}

fn validate_schedule(brackets: &[TaxBracket]) -> Result<(), BracketScheduleError> {
    let first = brackets.first().ok_or(BracketScheduleError::Empty)?;
    if first.min_income != Decimal::ZERO {
        return Err(BracketScheduleError::NonZeroStart(first.min_income));
    }

    let last_index = brackets.len() - 1;
    let mut expected_min = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(BracketScheduleError::InvalidRate {
                index,
                rate: bracket.tax_rate,
            });
        }

        if bracket.min_income != expected_min {
            return Err(BracketScheduleError::Gap {
                index,
                expected: expected_min,
                found: bracket.min_income,
            });
        }

        match bracket.max_income {
            Some(max) if max <= bracket.min_income => {
                return Err(BracketScheduleError::EmptySpan {
                    index,
                    min: bracket.min_income,
                    max,
                });
            }
            Some(_) if index == last_index => return Err(BracketScheduleError::BoundedTop),
            Some(max) => expected_min = max,
            None if index != last_index => {
                return Err(BracketScheduleError::UnboundedBeforeEnd(index));
            }
            None => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn amounts(evaluation: &BracketEvaluation) -> Vec<Decimal> {
        evaluation.brackets.iter().map(|b| b.amount).collect()
    }

    fn bracket(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> TaxBracket {
        TaxBracket {
            label: "test",
            min_income: min,
            max_income: max,
            tax_rate: rate,
        }
    }

    // =========================================================================
    // standard schedule
    // =========================================================================

    #[test]
    fn standard_schedule_is_valid() {
        assert_eq!(validate_schedule(&STANDARD_BRACKETS), Ok(()));
    }

    #[test]
    fn standard_labels_are_in_order() {
        let labels: Vec<_> = STANDARD_BRACKETS.iter().map(|b| b.label).collect();

        assert_eq!(
            labels,
            vec![
                "0-150,000",
                "150,001-500,000",
                "500,001-1,000,000",
                "1,000,001-2,000,000",
                "2,000,001 and above",
            ]
        );
    }

    // =========================================================================
    // evaluate
    // =========================================================================

    #[test]
    fn zero_income_reports_every_bracket_as_zero() {
        let evaluation = BracketEvaluator::standard().evaluate(Decimal::ZERO);

        assert_eq!(evaluation.brackets.len(), 5);
        assert_eq!(amounts(&evaluation), vec![Decimal::ZERO; 5]);
        assert_eq!(evaluation.gross_liability, Decimal::ZERO);
    }

    #[test]
    fn income_at_zero_rate_ceiling_owes_nothing() {
        let evaluation = BracketEvaluator::standard().evaluate(dec!(150000));

        assert_eq!(evaluation.gross_liability, Decimal::ZERO);
    }

    #[test]
    fn one_unit_into_second_bracket() {
        let evaluation = BracketEvaluator::standard().evaluate(dec!(150001));

        assert_eq!(evaluation.brackets[1].amount, dec!(0.10));
        assert_eq!(evaluation.gross_liability, dec!(0.10));
    }

    #[test]
    fn second_bracket_is_capped_at_its_span() {
        let evaluation = BracketEvaluator::standard().evaluate(dec!(500001));

        assert_eq!(
            amounts(&evaluation),
            vec![dec!(0), dec!(35000), dec!(0.15), dec!(0), dec!(0)]
        );
        assert_eq!(evaluation.gross_liability, dec!(35000.15));
    }

    #[test]
    fn full_brackets_contribute_their_maximum() {
        let evaluation = BracketEvaluator::standard().evaluate(dec!(2000000));

        assert_eq!(
            amounts(&evaluation),
            vec![dec!(0), dec!(35000), dec!(75000), dec!(200000), dec!(0)]
        );
        assert_eq!(evaluation.gross_liability, dec!(310000));
    }

    #[test]
    fn top_bracket_is_unbounded() {
        let evaluation = BracketEvaluator::standard().evaluate(dec!(3900000));

        assert_eq!(evaluation.brackets[4].amount, dec!(665000));
        assert_eq!(evaluation.gross_liability, dec!(975000));
    }

    #[test]
    fn fractional_contribution_is_rounded_half_up() {
        // 0.05 * 0.10 = 0.005 -> 0.01
        let evaluation = BracketEvaluator::standard().evaluate(dec!(150000.05));

        assert_eq!(evaluation.brackets[1].amount, dec!(0.01));
    }

    #[test]
    fn bracket_amounts_sum_to_gross_liability() {
        for income in [
            dec!(0),
            dec!(150000.33),
            dec!(499999.99),
            dec!(777777.77),
            dec!(1999999.97),
            dec!(12345678.91),
        ] {
            let evaluation = BracketEvaluator::standard().evaluate(income);
            let sum: Decimal = amounts(&evaluation).into_iter().sum();

            assert_eq!(sum, evaluation.gross_liability, "income {income}");
        }
    }

    #[test]
    fn bracket_amounts_never_decrease_as_income_rises() {
        let evaluator = BracketEvaluator::standard();
        let mut previous = evaluator.evaluate(Decimal::ZERO);

        let mut income = Decimal::ZERO;
        while income <= dec!(2500000) {
            income += dec!(12500);
            let current = evaluator.evaluate(income);
            for (before, after) in previous.brackets.iter().zip(&current.brackets) {
                assert!(after.amount >= before.amount, "income {income}");
            }
            previous = current;
        }
    }

    // =========================================================================
    // custom schedules
    // =========================================================================

    #[test]
    fn custom_schedule_is_evaluated() {
        let schedule = [
            bracket(dec!(0), Some(dec!(100)), dec!(0.10)),
            bracket(dec!(100), None, dec!(0.50)),
        ];
        let evaluator = BracketEvaluator::new(&schedule).unwrap();

        let evaluation = evaluator.evaluate(dec!(300));

        assert_eq!(amounts(&evaluation), vec![dec!(10), dec!(100)]);
        assert_eq!(evaluation.gross_liability, dec!(110));
    }

    #[test]
    fn empty_schedule_is_rejected() {
        assert_eq!(
            BracketEvaluator::new(&[]).unwrap_err(),
            BracketScheduleError::Empty
        );
    }

    #[test]
    fn schedule_must_start_at_zero() {
        let schedule = [bracket(dec!(10), None, dec!(0.1))];

        assert_eq!(
            BracketEvaluator::new(&schedule).unwrap_err(),
            BracketScheduleError::NonZeroStart(dec!(10))
        );
    }

    #[test]
    fn gap_between_brackets_is_rejected() {
        let schedule = [
            bracket(dec!(0), Some(dec!(100)), dec!(0.1)),
            bracket(dec!(150), None, dec!(0.2)),
        ];

        assert_eq!(
            BracketEvaluator::new(&schedule).unwrap_err(),
            BracketScheduleError::Gap {
                index: 1,
                expected: dec!(100),
                found: dec!(150),
            }
        );
    }

    #[test]
    fn bounded_top_bracket_is_rejected() {
        let schedule = [bracket(dec!(0), Some(dec!(100)), dec!(0.1))];

        assert_eq!(
            BracketEvaluator::new(&schedule).unwrap_err(),
            BracketScheduleError::BoundedTop
        );
    }

    #[test]
    fn unbounded_middle_bracket_is_rejected() {
        let schedule = [
            bracket(dec!(0), None, dec!(0.1)),
            bracket(dec!(100), None, dec!(0.2)),
        ];

        assert_eq!(
            BracketEvaluator::new(&schedule).unwrap_err(),
            BracketScheduleError::UnboundedBeforeEnd(0)
        );
    }

    #[test]
    fn inverted_span_is_rejected() {
        let schedule = [
            bracket(dec!(0), Some(dec!(0)), dec!(0.1)),
            bracket(dec!(0), None, dec!(0.2)),
        ];

        assert_eq!(
            BracketEvaluator::new(&schedule).unwrap_err(),
            BracketScheduleError::EmptySpan {
                index: 0,
                min: dec!(0),
                max: dec!(0),
            }
        );
    }

    #[test]
    fn rate_above_one_is_rejected() {
        let schedule = [bracket(dec!(0), None, dec!(1.5))];

        assert_eq!(
            BracketEvaluator::new(&schedule).unwrap_err(),
            BracketScheduleError::InvalidRate {
                index: 0,
                rate: dec!(1.5),
            }
        );
    }
}
