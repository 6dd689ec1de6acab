use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_amortization_core::goal_seek::extra_payment::{self, GoalSeekInput};

use super::{load_input, MethodArg};

/// Arguments for the extra-payment goal seek
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GoalSeekArgs {
    /// Amortization method
    #[arg(long, value_enum, default_value = "price")]
    pub method: MethodArg,

    /// Amount financed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual nominal interest rate
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Contracted term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Term in months the borrower wants to finish in
    #[arg(long)]
    pub desired_term: Option<i64>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_goal_seek(args: GoalSeekArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let gs_input: GoalSeekInput = load_input(args.input.as_deref(), || {
        Ok(GoalSeekInput {
            method: args.method.into(),
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            original_term_months: args.term.ok_or("--term is required (or provide --input)")?,
            desired_term_months: args
                .desired_term
                .ok_or("--desired-term is required (or provide --input)")?,
        })
    })?;
    let result = extra_payment::solve_extra_payment(&gs_input)?;
    Ok(serde_json::to_value(result)?)
}
