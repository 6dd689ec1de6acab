//! Prepay or invest: compares the cost saved by a single extra amortization
//! with the gain from investing the same amount until the original schedule
//! would have ended.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::prepayment::{run_prepayment, Occurrence, PrepaymentEvent};
use crate::amortization::schedule::{build_schedule, loan_warnings};
use crate::amortization::LoanInput;
use crate::error::LoanError;
use crate::investment::projection::{build_projection, InvestmentInput, InvestmentProjection};
use crate::types::{with_metadata, ComputationOutput, Money, Periods, Rate};
use crate::LoanResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityCostInput {
    pub loan: LoanInput,
    /// Must be a `single` prepayment.
    pub event: PrepaymentEvent,
    pub annual_net_yield: Rate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    Prepay,
    Invest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityCostOutput {
    /// Interest, insurance and fees avoided by prepaying.
    pub prepayment_gain: Money,
    /// Yield earned by investing the extra amount instead.
    pub investment_gain: Money,
    /// Months the money stays invested: original term minus prepayment month.
    pub investment_periods: Periods,
    pub recommendation: Recommendation,
    /// How much better the recommended option is.
    pub advantage: Money,
    pub projection: InvestmentProjection,
}

/// Decide whether a single extra payment is better spent on the loan or invested.
pub fn compare_prepay_vs_invest(
    input: &OpportunityCostInput,
) -> LoanResult<ComputationOutput<OpportunityCostOutput>> {
    let start = Instant::now();
    let mut warnings = loan_warnings(&input.loan);

    if input.event.occurrence != Occurrence::Single {
        return Err(LoanError::InvalidInput {
            field: "occurrence".into(),
            reason: "Prepay-vs-invest compares a single prepayment only".into(),
        });
    }

    let baseline = build_schedule(&input.loan, input.event.method)?;
    let simulated = run_prepayment(&input.loan, &input.event)?;
    let prepayment_gain = baseline.summary.total_cost - simulated.summary.total_cost;

    let original_periods = baseline.summary.number_of_periods;
    if input.event.start_period >= original_periods {
        warnings.push(format!(
            "Prepayment month {} is at or after the end of the loan; nothing is invested",
            input.event.start_period
        ));
    }
    let investment_periods = original_periods.saturating_sub(input.event.start_period);

    let projection = build_projection(&InvestmentInput {
        initial_amount: input.event.amount,
        annual_net_yield: input.annual_net_yield,
        periods: investment_periods,
    })?;
    let investment_gain = projection.total_gain;

    let (recommendation, advantage) = if prepayment_gain > investment_gain {
        (Recommendation::Prepay, prepayment_gain - investment_gain)
    } else {
        (Recommendation::Invest, investment_gain - prepayment_gain)
    };

    if simulated.summary.total_extra_principal < input.event.amount
        && simulated.summary.total_extra_principal > Decimal::ZERO
    {
        warnings.push(
            "Extra amount exceeds the outstanding balance; only part of it is prepaid".into(),
        );
    }

    let output = OpportunityCostOutput {
        prepayment_gain,
        investment_gain,
        investment_periods,
        recommendation,
        advantage,
        projection,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Prepay vs Invest Opportunity Cost",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{AmortizationMethod, RebalanceStrategy};
    use rust_decimal_macros::dec;

    fn input(annual_net_yield: Rate) -> OpportunityCostInput {
        OpportunityCostInput {
            loan: LoanInput::new(dec!(100000), dec!(0.10), 120),
            event: PrepaymentEvent {
                method: AmortizationMethod::ConstantPayment,
                strategy: RebalanceStrategy::ShortenTerm,
                occurrence: Occurrence::Single,
                amount: dec!(10000),
                start_period: 12,
            },
            annual_net_yield,
        }
    }

    #[test]
    fn test_low_yield_favours_prepaying() {
        let out = compare_prepay_vs_invest(&input(dec!(0.02))).unwrap();
        let r = &out.result;
        assert_eq!(r.investment_periods, 108);
        assert_eq!(r.recommendation, Recommendation::Prepay);
        assert_eq!(r.advantage, r.prepayment_gain - r.investment_gain);
    }

    #[test]
    fn test_high_yield_favours_investing() {
        let out = compare_prepay_vs_invest(&input(dec!(0.40))).unwrap();
        assert_eq!(out.result.recommendation, Recommendation::Invest);
        assert!(out.result.advantage > Decimal::ZERO);
    }

    #[test]
    fn test_percentage_style_loan_rate_warns() {
        let mut pct = input(dec!(0.05));
        pct.loan.annual_rate = dec!(12);
        let out = compare_prepay_vs_invest(&pct).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("exceeds 100%")));

        let out = compare_prepay_vs_invest(&input(dec!(0.05))).unwrap();
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_recurring_rejected() {
        let mut bad = input(dec!(0.10));
        bad.event.occurrence = Occurrence::Recurring;
        assert!(compare_prepay_vs_invest(&bad).is_err());
    }
}
