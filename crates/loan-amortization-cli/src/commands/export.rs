use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use loan_amortization_core::amortization::prepayment::{run_prepayment, PrepaymentEvent};
use loan_amortization_core::amortization::schedule::{
    constant_payment_schedule, constant_principal_schedule,
};
use loan_amortization_core::amortization::{LoanInput, Schedule};

use super::prepayment::EventArgs;
use super::{load_input, LoanArgs, OccurrenceArg};

/// Loan plus an optional prepayment plan to export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportInput {
    pub loan: LoanInput,
    #[serde(default)]
    pub prepayment: Option<PrepaymentEvent>,
}

/// Arguments for the CSV export
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Prepayment plan; the simulation sheet is written only with --amount
    #[command(flatten)]
    pub event: EventArgs,

    #[arg(long, value_enum, default_value = "single")]
    pub occurrence: OccurrenceArg,

    /// Directory the CSV files are written to
    #[arg(long, default_value = ".")]
    pub dir: String,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let export_input: ExportInput = load_input(args.input.as_deref(), || {
        let prepayment = match args.event.amount {
            Some(_) => Some(args.event.to_event(args.occurrence)?),
            None => None,
        };
        Ok(ExportInput {
            loan: args.loan.to_loan()?,
            prepayment,
        })
    })?;

    let mut sheets: Vec<(&str, Schedule)> = vec![
        ("price_original", constant_payment_schedule(&export_input.loan)?),
        ("sac_original", constant_principal_schedule(&export_input.loan)?),
    ];
    if let Some(ref event) = export_input.prepayment {
        sheets.push(("simulation", run_prepayment(&export_input.loan, event)?));
    }

    let files = write_sheets(Path::new(&args.dir), &sheets)?;
    tracing::info!(count = files.len(), dir = %args.dir, "exported schedules");

    Ok(serde_json::json!({
        "files": files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
    }))
}

/// Write each named schedule to `<dir>/<name>.csv`, one row per period.
pub fn write_sheets(
    dir: &Path,
    sheets: &[(&str, Schedule)],
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create '{}': {}", dir.display(), e))?;

    let mut written = Vec::with_capacity(sheets.len());
    for (name, schedule) in sheets {
        let path = dir.join(format!("{name}.csv"));
        let mut wtr = csv::Writer::from_path(&path)
            .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
        for record in &schedule.periods {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        written.push(path);
    }
    Ok(written)
}
