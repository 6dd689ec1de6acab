//! Extraordinary principal payments and schedule re-amortization.
//!
//! A prepayment goes straight to the outstanding balance. The forward
//! schedule is then re-derived either by keeping the term and lowering the
//! base (`ReducePayment`) or by keeping the base and finishing earlier
//! (`ShortenTerm`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::engine::amortize;
use super::schedule::{build_schedule, loan_warnings};
use super::{
    validate_loan, AmortizationMethod, LoanInput, RebalanceStrategy, Schedule, ScheduleSummary,
};
use crate::error::LoanError;
use crate::types::{with_metadata, ComputationOutput, Money, Periods};
use crate::LoanResult;

/// Months between two recurring prepayments.
pub const RECURRING_INTERVAL: Periods = 12;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// When the extra amount is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occurrence {
    /// Once, at the start period.
    Single,
    /// At the start period and every 12 months after (e.g. a yearly bonus).
    Recurring,
}

/// An extra amortization plan applied to a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentEvent {
    pub method: AmortizationMethod,
    pub strategy: RebalanceStrategy,
    pub occurrence: Occurrence,
    /// Extra principal paid on each occurrence.
    pub amount: Money,
    /// 1-based month of the first (or only) prepayment.
    pub start_period: Periods,
}

impl PrepaymentEvent {
    pub fn fires_at(&self, period: Periods) -> bool {
        match self.occurrence {
            Occurrence::Single => period == self.start_period,
            Occurrence::Recurring => {
                period >= self.start_period
                    && (period - self.start_period) % RECURRING_INTERVAL == 0
            }
        }
    }

    /// Extra principal requested for `period`, before clamping to the balance.
    pub fn extra_due(&self, period: Periods) -> Money {
        if self.amount > Decimal::ZERO && self.fires_at(period) {
            self.amount
        } else {
            Decimal::ZERO
        }
    }
}

/// Loan plus prepayment plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub loan: LoanInput,
    pub event: PrepaymentEvent,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// What the prepayment plan saves against the plain schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentSavings {
    pub interest_saved: Money,
    pub insurance_saved: Money,
    pub fees_saved: Money,
    /// Interest + insurance + fees saved.
    pub cost_saved: Money,
    pub periods_saved: Periods,
    pub total_extra_paid: Money,
}

/// Simulated schedule with its baseline comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentOutput {
    pub schedule: Schedule,
    pub baseline: ScheduleSummary,
    pub savings: PrepaymentSavings,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the prepayment simulation and return the resulting schedule only.
pub fn run_prepayment(loan: &LoanInput, event: &PrepaymentEvent) -> LoanResult<Schedule> {
    validate_loan(loan)?;
    validate_event(event)?;
    let periods = amortize(loan, event.method, Some(event))?;
    Ok(Schedule::new(event.method, periods))
}

/// Simulate extra amortization and compare it with the plain schedule.
pub fn simulate_prepayment(
    input: &PrepaymentInput,
) -> LoanResult<ComputationOutput<PrepaymentOutput>> {
    let start = Instant::now();
    let mut warnings = loan_warnings(&input.loan);
    let event = &input.event;

    let schedule = run_prepayment(&input.loan, event)?;
    let baseline = build_schedule(&input.loan, event.method)?.summary;

    if event.amount.is_zero() {
        warnings.push("Extra amount is zero; schedule equals the plain schedule".into());
    }
    if event.start_period > input.loan.term_months {
        warnings.push(format!(
            "Start period {} is after the last month ({}); no prepayment is made",
            event.start_period, input.loan.term_months
        ));
    }
    let requested: Money = (1..=input.loan.term_months)
        .filter(|p| *p <= schedule.summary.number_of_periods)
        .map(|p| event.extra_due(p))
        .sum();
    if requested > schedule.summary.total_extra_principal {
        warnings.push(format!(
            "Extra payments were capped at the outstanding balance ({} requested, {} applied)",
            requested, schedule.summary.total_extra_principal
        ));
    }

    let savings = savings_against(&baseline, &schedule.summary);
    let output = PrepaymentOutput {
        schedule,
        baseline,
        savings,
    };

    let methodology = match event.strategy {
        RebalanceStrategy::ShortenTerm => "Extra Amortization (Shorten Term)",
        RebalanceStrategy::ReducePayment => "Extra Amortization (Reduce Payment)",
    };
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

fn savings_against(baseline: &ScheduleSummary, simulated: &ScheduleSummary) -> PrepaymentSavings {
    PrepaymentSavings {
        interest_saved: baseline.total_interest - simulated.total_interest,
        insurance_saved: baseline.total_insurance - simulated.total_insurance,
        fees_saved: baseline.total_fees - simulated.total_fees,
        cost_saved: baseline.total_cost - simulated.total_cost,
        periods_saved: baseline
            .number_of_periods
            .saturating_sub(simulated.number_of_periods),
        total_extra_paid: simulated.total_extra_principal,
    }
}

fn validate_event(event: &PrepaymentEvent) -> LoanResult<()> {
    if event.amount < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "amount".into(),
            reason: "Extra amount must be non-negative".into(),
        });
    }
    if event.start_period == 0 {
        return Err(LoanError::InvalidInput {
            field: "start_period".into(),
            reason: "Start period is 1-based and must be at least 1".into(),
        });
    }
    Ok(())
}
