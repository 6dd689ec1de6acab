//! Goal seeking: the constant extra monthly payment that retires a loan in a
//! shorter target term.
//!
//! The figure is closed-form: the base (level payment or level principal) at
//! the desired term minus the base at the original term. Fees and insurance
//! are ignored, so it is an approximation of what the full prepayment
//! simulation would need.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{validate_loan, AmortizationMethod, LoanInput};
use crate::error::LoanError;
use crate::time_value::nominal_monthly_rate;
use crate::types::{with_metadata, ComputationOutput, Money, Periods, Rate};
use crate::LoanResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSeekInput {
    pub method: AmortizationMethod,
    pub principal: Money,
    pub annual_rate: Rate,
    pub original_term_months: Periods,
    /// Signed so that out-of-range targets can be reported instead of
    /// rejected at deserialization.
    pub desired_term_months: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSeekOutput {
    /// Extra amount to add every month; zero when no solution applies.
    pub extra_payment: Money,
    pub original_base: Money,
    pub desired_base: Money,
    /// False when the desired term was out of range and zero was returned.
    pub feasible: bool,
}

/// Solve for the extra monthly payment that hits the desired term.
pub fn solve_extra_payment(input: &GoalSeekInput) -> LoanResult<ComputationOutput<GoalSeekOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = LoanInput::new(input.principal, input.annual_rate, input.original_term_months);
    validate_loan(&loan)?;

    let monthly_rate = nominal_monthly_rate(input.annual_rate);
    let original_base = input
        .method
        .base(monthly_rate, input.original_term_months, input.principal)?;

    let output = match desired_term(input) {
        Ok(Some(desired)) => {
            let desired_base = input.method.base(monthly_rate, desired, input.principal)?;
            GoalSeekOutput {
                extra_payment: desired_base - original_base,
                original_base,
                desired_base,
                feasible: true,
            }
        }
        Ok(None) => GoalSeekOutput {
            extra_payment: Decimal::ZERO,
            original_base,
            desired_base: original_base,
            feasible: true,
        },
        Err(e) => {
            warnings.push(format!("Goal seek not computed: {e}"));
            GoalSeekOutput {
                extra_payment: Decimal::ZERO,
                original_base,
                desired_base: original_base,
                feasible: false,
            }
        }
    };
    warnings.push("Fees and insurance are excluded from the extra payment estimate".into());

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Goal Seek: Extra Monthly Payment",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// `Ok(None)` when the desired term is not shorter than the original.
fn desired_term(input: &GoalSeekInput) -> LoanResult<Option<Periods>> {
    if input.desired_term_months <= 0 {
        return Err(LoanError::InvalidInput {
            field: "desired_term_months".into(),
            reason: format!(
                "Desired term must be at least 1 month, got {}",
                input.desired_term_months
            ),
        });
    }
    if input.desired_term_months >= i64::from(input.original_term_months) {
        return Ok(None);
    }
    Ok(Some(input.desired_term_months as Periods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::level_payment;
    use rust_decimal_macros::dec;

    fn input(method: AmortizationMethod, desired: i64) -> GoalSeekInput {
        GoalSeekInput {
            method,
            principal: dec!(100000),
            annual_rate: dec!(0.10),
            original_term_months: 120,
            desired_term_months: desired,
        }
    }

    #[test]
    fn test_same_term_needs_no_extra() {
        let out = solve_extra_payment(&input(AmortizationMethod::ConstantPayment, 120)).unwrap();
        assert_eq!(out.result.extra_payment, Decimal::ZERO);
        assert!(out.result.feasible);
    }

    #[test]
    fn test_longer_term_needs_no_extra() {
        let out = solve_extra_payment(&input(AmortizationMethod::ConstantPrincipal, 240)).unwrap();
        assert_eq!(out.result.extra_payment, Decimal::ZERO);
    }

    #[test]
    fn test_non_positive_term_reports_instead_of_failing() {
        for desired in [0, -12] {
            let out =
                solve_extra_payment(&input(AmortizationMethod::ConstantPayment, desired)).unwrap();
            assert_eq!(out.result.extra_payment, Decimal::ZERO);
            assert!(!out.result.feasible);
            assert!(out.warnings.iter().any(|w| w.contains("not computed")));
        }
    }

    #[test]
    fn test_constant_principal_difference() {
        // 100000/60 - 100000/120 = 833.33
        let out = solve_extra_payment(&input(AmortizationMethod::ConstantPrincipal, 60)).unwrap();
        assert!((out.result.extra_payment - dec!(833.33)).abs() < dec!(0.01));
    }

    #[test]
    fn test_constant_payment_difference() {
        let r = dec!(0.10) / dec!(12);
        let expected = level_payment(r, 60, dec!(100000)).unwrap()
            - level_payment(r, 120, dec!(100000)).unwrap();
        let out = solve_extra_payment(&input(AmortizationMethod::ConstantPayment, 60)).unwrap();
        assert_eq!(out.result.extra_payment, expected);
        assert!(out.result.extra_payment > Decimal::ZERO);
    }

    #[test]
    fn test_invalid_principal_is_an_error() {
        let mut bad = input(AmortizationMethod::ConstantPayment, 60);
        bad.principal = dec!(-5);
        assert!(solve_extra_payment(&bad).is_err());
    }
}
