//! Loan amortization: plain schedules for the constant-payment (Price) and
//! constant-principal (SAC) conventions, and prepayment simulation with
//! re-amortization. All math in `rust_decimal::Decimal`.

mod engine;
pub mod method;
pub mod prepayment;
pub mod schedule;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::{Money, Periods, Rate};
use crate::LoanResult;

pub use method::{AmortizationMethod, RebalanceStrategy};

/// Balance at or below which the loan is considered fully paid (one cent).
pub const BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Static loan parameters for a single schedule computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount financed.
    pub principal: Money,
    /// Nominal annual interest rate (e.g., 0.10 = 10%), divided by 12 monthly.
    pub annual_rate: Rate,
    /// Contractual term in months.
    pub term_months: Periods,
    /// Fixed administration fee charged every month.
    #[serde(default)]
    pub monthly_fee: Money,
    /// Annual insurance rate applied to the outstanding balance (divided by 12).
    #[serde(default)]
    pub annual_insurance_rate: Rate,
    /// Annual inflation rate used only to discount payments to present value.
    #[serde(default)]
    pub annual_inflation_rate: Rate,
}

impl LoanInput {
    /// Loan with no fee, insurance or inflation.
    pub fn new(principal: Money, annual_rate: Rate, term_months: Periods) -> Self {
        Self {
            principal,
            annual_rate,
            term_months,
            monthly_fee: Decimal::ZERO,
            annual_insurance_rate: Decimal::ZERO,
            annual_inflation_rate: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of a schedule.
///
/// `payment = principal + interest + fee + insurance` holds for every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// 1-based month index.
    pub period: Periods,
    /// Total paid this month, fees and insurance included.
    pub payment: Money,
    pub interest: Money,
    /// Principal repaid this month, including any extra amortization.
    pub principal: Money,
    /// Part of `principal` that came from a prepayment.
    pub extra_principal: Money,
    pub insurance: Money,
    pub fee: Money,
    /// Closing balance after this month's principal.
    pub balance: Money,
    /// `payment` discounted by the compounded monthly inflation rate.
    pub present_value: Money,
}

/// Totals over a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub number_of_periods: Periods,
    pub first_payment: Money,
    pub last_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_insurance: Money,
    pub total_fees: Money,
    /// Interest + insurance + fees: everything paid beyond principal.
    pub total_cost: Money,
    pub total_principal: Money,
    pub total_extra_principal: Money,
    pub total_present_value: Money,
}

impl ScheduleSummary {
    pub fn from_periods(periods: &[PeriodRecord]) -> Self {
        let mut summary = ScheduleSummary {
            number_of_periods: periods.len() as Periods,
            first_payment: periods.first().map_or(Decimal::ZERO, |p| p.payment),
            last_payment: periods.last().map_or(Decimal::ZERO, |p| p.payment),
            total_paid: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_insurance: Decimal::ZERO,
            total_fees: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            total_principal: Decimal::ZERO,
            total_extra_principal: Decimal::ZERO,
            total_present_value: Decimal::ZERO,
        };

        for p in periods {
            summary.total_paid += p.payment;
            summary.total_interest += p.interest;
            summary.total_insurance += p.insurance;
            summary.total_fees += p.fee;
            summary.total_principal += p.principal;
            summary.total_extra_principal += p.extra_principal;
            summary.total_present_value += p.present_value;
        }
        summary.total_cost = summary.total_interest + summary.total_insurance + summary.total_fees;
        summary
    }
}

/// A complete, immutable amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub method: AmortizationMethod,
    pub periods: Vec<PeriodRecord>,
    pub summary: ScheduleSummary,
}

impl Schedule {
    pub(crate) fn new(method: AmortizationMethod, periods: Vec<PeriodRecord>) -> Self {
        let summary = ScheduleSummary::from_periods(&periods);
        Self {
            method,
            periods,
            summary,
        }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub(crate) fn validate_loan(input: &LoanInput) -> LoanResult<()> {
    if input.principal <= BALANCE_EPSILON {
        return Err(LoanError::InvalidInput {
            field: "principal".into(),
            reason: format!("Principal must exceed {BALANCE_EPSILON}"),
        });
    }
    if input.term_months == 0 {
        return Err(LoanError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    if input.annual_rate < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate must be non-negative".into(),
        });
    }
    if input.monthly_fee < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "monthly_fee".into(),
            reason: "Monthly fee must be non-negative".into(),
        });
    }
    if input.annual_insurance_rate < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "annual_insurance_rate".into(),
            reason: "Insurance rate must be non-negative".into(),
        });
    }
    if input.annual_inflation_rate < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "annual_inflation_rate".into(),
            reason: "Inflation rate must be non-negative".into(),
        });
    }
    Ok(())
}
