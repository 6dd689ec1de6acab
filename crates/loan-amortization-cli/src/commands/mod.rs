pub mod export;
pub mod goal_seek;
pub mod investment;
pub mod prepayment;
pub mod schedule;

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use loan_amortization_core::amortization::prepayment::Occurrence;
use loan_amortization_core::amortization::{AmortizationMethod, LoanInput, RebalanceStrategy};

use crate::input;

/// Loan terms shared by every loan-based command
#[derive(Args, Debug, Clone)]
pub struct LoanArgs {
    /// Amount financed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual nominal interest rate (e.g. 0.10 for 10%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Fixed monthly administration fee
    #[arg(long, default_value = "0")]
    pub fee: Decimal,

    /// Annual balance-insurance rate
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Annual inflation used to discount payments to present value
    #[arg(long, default_value = "0")]
    pub inflation: Decimal,
}

impl LoanArgs {
    pub fn to_loan(&self) -> Result<LoanInput, Box<dyn std::error::Error>> {
        Ok(LoanInput {
            principal: self
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: self.rate.ok_or("--rate is required (or provide --input)")?,
            term_months: self.term.ok_or("--term is required (or provide --input)")?,
            monthly_fee: self.fee,
            annual_insurance_rate: self.insurance,
            annual_inflation_rate: self.inflation,
        })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    /// Constant payment (Price / French)
    Price,
    /// Constant principal (SAC)
    Sac,
}

impl From<MethodArg> for AmortizationMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Price => AmortizationMethod::ConstantPayment,
            MethodArg::Sac => AmortizationMethod::ConstantPrincipal,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Keep the installment, finish earlier
    ShortenTerm,
    /// Keep the end date, pay less each month
    ReducePayment,
}

impl From<StrategyArg> for RebalanceStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::ShortenTerm => RebalanceStrategy::ShortenTerm,
            StrategyArg::ReducePayment => RebalanceStrategy::ReducePayment,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OccurrenceArg {
    Single,
    /// Every 12 months from the start month
    Recurring,
}

impl From<OccurrenceArg> for Occurrence {
    fn from(arg: OccurrenceArg) -> Self {
        match arg {
            OccurrenceArg::Single => Occurrence::Single,
            OccurrenceArg::Recurring => Occurrence::Recurring,
        }
    }
}

/// Resolve a typed input from `--input`, piped stdin, or the flag fallback.
pub fn load_input<T, F>(path: Option<&str>, from_flags: F) -> Result<T, Box<dyn std::error::Error>>
where
    T: serde::de::DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    if let Some(path) = path {
        input::file::read_json(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        from_flags()
    }
}
