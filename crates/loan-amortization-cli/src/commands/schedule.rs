use clap::Args;
use serde_json::Value;

use loan_amortization_core::amortization::schedule::{self, ScheduleInput};
use loan_amortization_core::amortization::LoanInput;

use super::{load_input, LoanArgs, MethodArg};

/// Arguments for a single amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Amortization method
    #[arg(long, value_enum, default_value = "price")]
    pub method: MethodArg,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a Price vs SAC comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Path to JSON loan file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = load_input(args.input.as_deref(), || {
        Ok(ScheduleInput {
            loan: args.loan.to_loan()?,
            method: args.method.into(),
        })
    })?;
    let result = schedule::generate_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: LoanInput = load_input(args.input.as_deref(), || args.loan.to_loan())?;
    let result = schedule::compare_methods(&loan)?;
    Ok(serde_json::to_value(result)?)
}
