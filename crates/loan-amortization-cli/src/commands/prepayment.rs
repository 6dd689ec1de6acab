use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_amortization_core::amortization::prepayment::{self, PrepaymentEvent, PrepaymentInput};

use super::{load_input, LoanArgs, MethodArg, OccurrenceArg, StrategyArg};

/// Prepayment plan flags, shared with the prepay-vs-invest command
#[derive(Args, Debug, Clone)]
pub struct EventArgs {
    /// Amortization method of the loan
    #[arg(long, value_enum, default_value = "price")]
    pub method: MethodArg,

    /// How the schedule is re-derived after each extra payment
    #[arg(long, value_enum, default_value = "shorten-term")]
    pub strategy: StrategyArg,

    /// Extra principal paid on each occurrence
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Month (1-based) of the first extra payment
    #[arg(long, default_value = "1")]
    pub start: u32,
}

impl EventArgs {
    pub fn to_event(&self, occurrence: OccurrenceArg) -> Result<PrepaymentEvent, Box<dyn std::error::Error>> {
        Ok(PrepaymentEvent {
            method: self.method.into(),
            strategy: self.strategy.into(),
            occurrence: occurrence.into(),
            amount: self.amount.ok_or("--amount is required (or provide --input)")?,
            start_period: self.start,
        })
    }
}

/// Arguments for extra-amortization simulation
#[derive(Args)]
pub struct PrepayArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    #[command(flatten)]
    pub event: EventArgs,

    /// Pay once, or every 12 months from the start month
    #[arg(long, value_enum, default_value = "single")]
    pub occurrence: OccurrenceArg,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_prepay(args: PrepayArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pp_input: PrepaymentInput = load_input(args.input.as_deref(), || {
        Ok(PrepaymentInput {
            loan: args.loan.to_loan()?,
            event: args.event.to_event(args.occurrence)?,
        })
    })?;
    let result = prepayment::simulate_prepayment(&pp_input)?;
    Ok(serde_json::to_value(result)?)
}
