use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::engine::amortize;
use super::{validate_loan, AmortizationMethod, LoanInput, Schedule, ScheduleSummary};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanResult;

/// Input for a single plain schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub loan: LoanInput,
    pub method: AmortizationMethod,
}

/// Side-by-side totals of both conventions for the same loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodComparison {
    pub constant_payment: ScheduleSummary,
    pub constant_principal: ScheduleSummary,
    /// Price total cost minus SAC total cost (positive when SAC is cheaper).
    pub cost_difference: Money,
    pub first_payment_difference: Money,
    pub last_payment_difference: Money,
    pub cheaper_method: AmortizationMethod,
}

/// Build the full schedule for one convention without the output envelope.
pub fn build_schedule(loan: &LoanInput, method: AmortizationMethod) -> LoanResult<Schedule> {
    validate_loan(loan)?;
    let periods = amortize(loan, method, None)?;
    Ok(Schedule::new(method, periods))
}

/// Constant-payment (Price) schedule.
pub fn constant_payment_schedule(loan: &LoanInput) -> LoanResult<Schedule> {
    build_schedule(loan, AmortizationMethod::ConstantPayment)
}

/// Constant-principal (SAC) schedule.
pub fn constant_principal_schedule(loan: &LoanInput) -> LoanResult<Schedule> {
    build_schedule(loan, AmortizationMethod::ConstantPrincipal)
}

/// Generate a month-by-month amortization schedule.
pub fn generate_schedule(input: &ScheduleInput) -> LoanResult<ComputationOutput<Schedule>> {
    let start = Instant::now();
    let warnings = loan_warnings(&input.loan);

    let schedule = build_schedule(&input.loan, input.method)?;

    let methodology = match input.method {
        AmortizationMethod::ConstantPayment => "Constant Payment (Price) Amortization",
        AmortizationMethod::ConstantPrincipal => "Constant Principal (SAC) Amortization",
    };
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, schedule))
}

/// Compare total cost and payment profile of Price against SAC.
pub fn compare_methods(loan: &LoanInput) -> LoanResult<ComputationOutput<MethodComparison>> {
    let start = Instant::now();
    let warnings = loan_warnings(loan);

    let price = constant_payment_schedule(loan)?;
    let sac = constant_principal_schedule(loan)?;

    let cost_difference = price.summary.total_cost - sac.summary.total_cost;
    let cheaper_method = if cost_difference > Decimal::ZERO {
        AmortizationMethod::ConstantPrincipal
    } else {
        AmortizationMethod::ConstantPayment
    };

    let output = MethodComparison {
        first_payment_difference: price.summary.first_payment - sac.summary.first_payment,
        last_payment_difference: price.summary.last_payment - sac.summary.last_payment,
        constant_payment: price.summary,
        constant_principal: sac.summary,
        cost_difference,
        cheaper_method,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Price vs SAC Cost Comparison",
        loan,
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn loan_warnings(loan: &LoanInput) -> Vec<String> {
    let mut warnings = Vec::new();
    if loan.annual_rate > Decimal::ONE {
        warnings.push(format!(
            "Annual rate {} exceeds 100%; check that it is a decimal, not a percentage",
            loan.annual_rate
        ));
    }
    if loan.annual_insurance_rate > dec!(0.10) {
        warnings.push(format!(
            "Annual insurance rate {} is unusually high",
            loan.annual_insurance_rate
        ));
    }
    if loan.term_months > 600 {
        warnings.push(format!(
            "Term of {} months exceeds 50 years",
            loan.term_months
        ));
    }
    warnings
}
