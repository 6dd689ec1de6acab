use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanError;
use crate::time_value::equivalent_monthly_rate;
use crate::types::{with_metadata, ComputationOutput, Money, Periods, Rate};
use crate::LoanResult;

/// Input for a compound-growth projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub initial_amount: Money,
    /// Annual yield net of taxes and fees (e.g., 0.12 = 12%).
    pub annual_net_yield: Rate,
    pub periods: Periods,
}

/// One month of the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPeriod {
    pub period: Periods,
    /// Yield earned this month.
    pub period_yield: Money,
    pub accumulated: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentProjection {
    pub initial_amount: Money,
    pub monthly_rate: Rate,
    pub final_value: Money,
    /// Final value minus the initial amount.
    pub total_gain: Money,
    pub periods: Vec<InvestmentPeriod>,
}

/// Roll an amount forward at the monthly rate equivalent to the annual yield.
pub fn build_projection(input: &InvestmentInput) -> LoanResult<InvestmentProjection> {
    validate_investment(input)?;

    let monthly_rate = equivalent_monthly_rate(input.annual_net_yield);
    let (periods, final_value) = (1..=input.periods).fold(
        (Vec::with_capacity(input.periods as usize), input.initial_amount),
        |(mut rows, accumulated), period| {
            let period_yield = accumulated * monthly_rate;
            let accumulated = accumulated + period_yield;
            rows.push(InvestmentPeriod {
                period,
                period_yield,
                accumulated,
            });
            (rows, accumulated)
        },
    );

    Ok(InvestmentProjection {
        initial_amount: input.initial_amount,
        monthly_rate,
        final_value,
        total_gain: final_value - input.initial_amount,
        periods,
    })
}

/// Project the future value of an investment month by month.
pub fn project_investment(
    input: &InvestmentInput,
) -> LoanResult<ComputationOutput<InvestmentProjection>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if input.annual_net_yield > Decimal::ONE {
        warnings.push(format!(
            "Annual yield {} exceeds 100%; check that it is a decimal, not a percentage",
            input.annual_net_yield
        ));
    }
    if input.periods == 0 {
        warnings.push("Zero periods: projection is empty".into());
    }

    let output = build_projection(input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound Growth Projection",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_investment(input: &InvestmentInput) -> LoanResult<()> {
    if input.initial_amount < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "initial_amount".into(),
            reason: "Initial amount must be non-negative".into(),
        });
    }
    if input.annual_net_yield < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "annual_net_yield".into(),
            reason: "Net yield must be non-negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_one_year_compounds_to_annual_yield() {
        let input = InvestmentInput {
            initial_amount: dec!(10000),
            annual_net_yield: dec!(0.12),
            periods: 12,
        };
        let proj = build_projection(&input).unwrap();
        assert_eq!(proj.periods.len(), 12);
        assert!((proj.final_value - dec!(11200)).abs() < dec!(0.05), "got {}", proj.final_value);
        assert!((proj.total_gain - dec!(1200)).abs() < dec!(0.05));
    }

    #[test]
    fn test_rows_accumulate() {
        let input = InvestmentInput {
            initial_amount: dec!(1000),
            annual_net_yield: dec!(0.08),
            periods: 24,
        };
        let proj = build_projection(&input).unwrap();
        let mut prev = input.initial_amount;
        for row in &proj.periods {
            assert_eq!(row.accumulated, prev + row.period_yield);
            assert!(row.period_yield > Decimal::ZERO);
            prev = row.accumulated;
        }
        assert_eq!(proj.final_value, prev);
    }

    #[test]
    fn test_zero_yield_has_no_gain() {
        let input = InvestmentInput {
            initial_amount: dec!(5000),
            annual_net_yield: Decimal::ZERO,
            periods: 36,
        };
        let proj = build_projection(&input).unwrap();
        assert_eq!(proj.total_gain, Decimal::ZERO);
        assert_eq!(proj.final_value, dec!(5000));
    }

    #[test]
    fn test_zero_periods_is_empty() {
        let input = InvestmentInput {
            initial_amount: dec!(5000),
            annual_net_yield: dec!(0.1),
            periods: 0,
        };
        let out = project_investment(&input).unwrap();
        assert!(out.result.periods.is_empty());
        assert_eq!(out.result.total_gain, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let input = InvestmentInput {
            initial_amount: dec!(-1),
            annual_net_yield: dec!(0.1),
            periods: 12,
        };
        assert!(project_investment(&input).is_err());
    }
}
