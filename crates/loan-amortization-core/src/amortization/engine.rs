//! The month-by-month recurrence shared by plain schedules and prepayment
//! simulations.

use rust_decimal::Decimal;
use tracing::debug;

use super::method::{AmortizationMethod, Rebalanced};
use super::prepayment::PrepaymentEvent;
use super::{LoanInput, PeriodRecord, BALANCE_EPSILON};
use crate::time_value::{equivalent_monthly_rate, nominal_monthly_rate, present_value};
use crate::types::{Money, Periods, Rate};
use crate::LoanResult;

/// Monthly rates derived once from the loan's annual figures.
struct MonthlyRates {
    interest: Rate,
    insurance: Rate,
    inflation: Rate,
}

impl MonthlyRates {
    fn from_loan(loan: &LoanInput) -> Self {
        Self {
            interest: nominal_monthly_rate(loan.annual_rate),
            insurance: nominal_monthly_rate(loan.annual_insurance_rate),
            inflation: equivalent_monthly_rate(loan.annual_inflation_rate),
        }
    }
}

/// Loop state carried from one month to the next.
#[derive(Debug, Clone)]
struct AmortizationState {
    balance: Money,
    period: Periods,
    /// Last month of the schedule; shrinks under `ShortenTerm`.
    effective_term: Periods,
    /// Level payment or level principal, depending on the method.
    base: Money,
}

/// Run the amortization recurrence, injecting `prepayment` when given.
///
/// The caller validates `loan` beforehand.
pub(super) fn amortize(
    loan: &LoanInput,
    method: AmortizationMethod,
    prepayment: Option<&PrepaymentEvent>,
) -> LoanResult<Vec<PeriodRecord>> {
    let rates = MonthlyRates::from_loan(loan);
    let mut state = AmortizationState {
        balance: loan.principal,
        period: 1,
        effective_term: loan.term_months,
        base: method.base(rates.interest, loan.term_months, loan.principal)?,
    };
    let mut periods = Vec::with_capacity(loan.term_months as usize);

    while state.balance > BALANCE_EPSILON && state.period <= state.effective_term {
        let extra_due = prepayment.map_or(Decimal::ZERO, |e| e.extra_due(state.period));

        let interest = state.balance * rates.interest;
        let insurance = state.balance * rates.insurance;

        // Never pay more principal than is outstanding.
        let scheduled = method
            .scheduled_principal(state.base, interest)
            .min(state.balance);
        let extra = if scheduled + extra_due > state.balance {
            state.balance - scheduled
        } else {
            extra_due
        };

        let mut principal = scheduled + extra;
        let mut payment = principal + interest + loan.monthly_fee + insurance;
        let mut closing = state.balance - principal;

        if closing <= BALANCE_EPSILON || state.period == state.effective_term {
            if closing.abs() > BALANCE_EPSILON {
                debug!(
                    period = state.period,
                    residual = %closing,
                    "folding residual balance into final payment"
                );
                principal += closing;
                payment += closing;
            }
            closing = Decimal::ZERO;
        }

        periods.push(PeriodRecord {
            period: state.period,
            payment,
            interest,
            principal,
            extra_principal: extra,
            insurance,
            fee: loan.monthly_fee,
            balance: closing,
            present_value: present_value(payment, rates.inflation, state.period)?,
        });
        state.balance = closing;

        if extra > Decimal::ZERO && state.balance > BALANCE_EPSILON {
            if let Some(event) = prepayment {
                reamortize(&mut state, method, event, rates.interest)?;
            }
        }

        state.period += 1;
    }

    Ok(periods)
}

fn reamortize(
    state: &mut AmortizationState,
    method: AmortizationMethod,
    event: &PrepaymentEvent,
    monthly_rate: Rate,
) -> LoanResult<()> {
    // The loop zeroes the balance on the last effective month before this
    // runs, so this only guards direct callers.
    let remaining = state.effective_term.saturating_sub(state.period);
    if remaining == 0 {
        return Ok(());
    }

    match method.rebalance(
        event.strategy,
        state.base,
        state.balance,
        monthly_rate,
        remaining,
    )? {
        Rebalanced::Base(base) => {
            debug!(
                period = state.period,
                old_base = %state.base,
                new_base = %base,
                "re-amortized over unchanged term"
            );
            state.base = base;
        }
        Rebalanced::RemainingTerm(months) => {
            let term = (state.period + months).min(state.effective_term);
            debug!(
                period = state.period,
                old_term = state.effective_term,
                new_term = term,
                "re-amortized with shorter term"
            );
            state.effective_term = term;
        }
    }
    Ok(())
}
