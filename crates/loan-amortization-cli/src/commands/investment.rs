use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_amortization_core::analysis::opportunity_cost::{self, OpportunityCostInput};
use loan_amortization_core::investment::projection::{self, InvestmentInput};

use super::prepayment::EventArgs;
use super::{load_input, LoanArgs, OccurrenceArg};

/// Arguments for an investment projection
#[derive(Args)]
pub struct InvestArgs {
    /// Amount invested at month 0
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual yield net of taxes and fees (e.g. 0.12 for 12%)
    #[arg(long)]
    pub annual_yield: Option<Decimal>,

    /// Number of months to project
    #[arg(long)]
    pub periods: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the prepay-or-invest decision
#[derive(Args)]
pub struct PrepayVsInvestArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    #[command(flatten)]
    pub event: EventArgs,

    /// Annual net yield the extra amount would earn if invested
    #[arg(long)]
    pub annual_yield: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_invest(args: InvestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inv_input: InvestmentInput = load_input(args.input.as_deref(), || {
        Ok(InvestmentInput {
            initial_amount: args.amount.ok_or("--amount is required (or provide --input)")?,
            annual_net_yield: args
                .annual_yield
                .ok_or("--annual-yield is required (or provide --input)")?,
            periods: args.periods.ok_or("--periods is required (or provide --input)")?,
        })
    })?;
    let result = projection::project_investment(&inv_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_prepay_vs_invest(args: PrepayVsInvestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let oc_input: OpportunityCostInput = load_input(args.input.as_deref(), || {
        Ok(OpportunityCostInput {
            loan: args.loan.to_loan()?,
            event: args.event.to_event(OccurrenceArg::Single)?,
            annual_net_yield: args
                .annual_yield
                .ok_or("--annual-yield is required (or provide --input)")?,
        })
    })?;
    let result = opportunity_cost::compare_prepay_vs_invest(&oc_input)?;
    Ok(serde_json::to_value(result)?)
}
