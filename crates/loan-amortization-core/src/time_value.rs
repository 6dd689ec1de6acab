use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanError;
use crate::types::{Money, Periods, Rate};
use crate::LoanResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Nominal monthly rate from a nominal annual rate (linear banking convention).
pub fn nominal_monthly_rate(annual_rate: Rate) -> Rate {
    annual_rate / MONTHS_PER_YEAR
}

/// Monthly rate compounding to the given annual rate: (1 + annual)^(1/12) - 1.
///
/// Used for discounting and investment growth, where the annual figure is an
/// effective rate rather than a nominal one. Non-positive rates map to zero.
pub fn equivalent_monthly_rate(annual_rate: Rate) -> Rate {
    if annual_rate <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (Decimal::ONE + annual_rate).powd(Decimal::ONE / MONTHS_PER_YEAR) - Decimal::ONE
}

/// Compound growth factor `(1 + monthly_rate)^period`.
pub fn discount_factor(monthly_rate: Rate, period: Periods) -> LoanResult<Decimal> {
    (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(period))
        .ok_or_else(|| LoanError::Overflow {
            context: format!("discount factor (1 + {monthly_rate})^{period}"),
        })
}

/// Value today of `amount` paid at the end of `period`.
pub fn present_value(amount: Money, monthly_rate: Rate, period: Periods) -> LoanResult<Money> {
    let factor = discount_factor(monthly_rate, period)?;
    if factor.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "present value discount factor".into(),
        });
    }
    Ok(amount / factor)
}

/// Level payment (PMT) of an ordinary annuity, returned as a positive amount.
///
/// `principal * r / (1 - (1+r)^-n)`, or straight-line `principal / n` when the
/// periodic rate is zero.
pub fn level_payment(rate: Rate, nper: Periods, principal: Money) -> LoanResult<Money> {
    if nper == 0 {
        return Err(LoanError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if rate < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate must be non-negative".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    // (1+r)^-n shrinks toward zero, so long terms cannot overflow here.
    let discount = (Decimal::ONE / (Decimal::ONE + rate))
        .checked_powi(i64::from(nper))
        .ok_or_else(|| LoanError::Overflow {
            context: format!("annuity discount (1 + {rate})^-{nper}"),
        })?;
    let denominator = Decimal::ONE - discount;

    if denominator.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(denominator))
        .ok_or_else(|| LoanError::Overflow {
            context: format!("level payment on {principal} over {nper} periods"),
        })
}

/// Number of periods (NPER, fractional) for `payment` to retire `balance`.
///
/// Inverse of [`level_payment`]. The caller rounds up to whole periods.
pub fn periods_to_amortize(rate: Rate, payment: Money, balance: Money) -> LoanResult<Decimal> {
    if payment.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "NPER with zero payment".into(),
        });
    }
    if payment < Decimal::ZERO || balance < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "payment".into(),
            reason: "Payment and balance must be non-negative".into(),
        });
    }
    if rate < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate must be non-negative".into(),
        });
    }

    if rate.is_zero() {
        return Ok(balance / payment);
    }

    let interest = rate * balance;
    if payment <= interest {
        return Err(LoanError::FinancialImpossibility(format!(
            "Payment {payment} does not cover periodic interest {interest}; the balance never amortizes"
        )));
    }

    let log_growth = (Decimal::ONE + rate).ln();
    if log_growth.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "NPER log(1 + rate)".into(),
        });
    }

    Ok((payment / (payment - interest)).ln() / log_growth)
}
