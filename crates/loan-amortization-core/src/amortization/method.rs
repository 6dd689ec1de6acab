use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::time_value::{level_payment, periods_to_amortize};
use crate::types::{Money, Periods, Rate};
use crate::LoanResult;

/// Amortization convention.
///
/// The "base" of a method is the quantity it holds constant between
/// prepayments: the level payment (interest + principal) for
/// `ConstantPayment`, the principal portion for `ConstantPrincipal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmortizationMethod {
    /// French system (Tabela Price): level payment, growing principal.
    ConstantPayment,
    /// SAC: level principal, declining payment.
    ConstantPrincipal,
}

/// How the schedule is re-derived after an extra principal payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RebalanceStrategy {
    /// Keep the base and pay off earlier.
    ShortenTerm,
    /// Keep the term and lower the base.
    ReducePayment,
}

/// Forward parameters after a re-amortization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Rebalanced {
    Base(Money),
    RemainingTerm(Periods),
}

impl AmortizationMethod {
    pub fn label(&self) -> &'static str {
        match self {
            AmortizationMethod::ConstantPayment => "Price",
            AmortizationMethod::ConstantPrincipal => "SAC",
        }
    }

    /// Base for amortizing `balance` over `term` months at `monthly_rate`.
    pub fn base(&self, monthly_rate: Rate, term: Periods, balance: Money) -> LoanResult<Money> {
        match self {
            AmortizationMethod::ConstantPayment => level_payment(monthly_rate, term, balance),
            AmortizationMethod::ConstantPrincipal => {
                if term == 0 {
                    return Err(LoanError::DivisionByZero {
                        context: "constant principal over zero months".into(),
                    });
                }
                Ok(balance / Decimal::from(term))
            }
        }
    }

    /// Principal due this month under the current base.
    pub fn scheduled_principal(&self, base: Money, interest: Money) -> Money {
        match self {
            AmortizationMethod::ConstantPayment => base - interest,
            AmortizationMethod::ConstantPrincipal => base,
        }
    }

    /// Re-derive forward parameters after a prepayment left `balance`
    /// outstanding with `remaining` months left on the effective term.
    pub(crate) fn rebalance(
        &self,
        strategy: RebalanceStrategy,
        base: Money,
        balance: Money,
        monthly_rate: Rate,
        remaining: Periods,
    ) -> LoanResult<Rebalanced> {
        match strategy {
            RebalanceStrategy::ReducePayment => {
                Ok(Rebalanced::Base(self.base(monthly_rate, remaining, balance)?))
            }
            RebalanceStrategy::ShortenTerm => {
                let fractional = match self {
                    AmortizationMethod::ConstantPayment => {
                        periods_to_amortize(monthly_rate, base, balance)?
                    }
                    AmortizationMethod::ConstantPrincipal => {
                        if base <= Decimal::ZERO {
                            return Err(LoanError::DivisionByZero {
                                context: "remaining term with zero principal portion".into(),
                            });
                        }
                        balance / base
                    }
                };
                let whole = fractional
                    .ceil()
                    .to_u32()
                    .ok_or_else(|| LoanError::Overflow {
                        context: format!("remaining term {fractional}"),
                    })?;
                Ok(Rebalanced::RemainingTerm(whole.max(1)))
            }
        }
    }
}
