//! Minmax command implementation

use calibrar_common::{OutputFormat, Result, TableBuilder};
use ndarray::ArrayView2;
use serde::Serialize;

use super::tensors::load_tensors;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::MinMaxArgs;
use crate::quant::{par_reduce, reduce, ValueRange};

/// Observed range of one tensor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeReport {
    pub name: String,
    pub shape: [usize; 2],
    pub min: f32,
    pub max: f32,
}

pub(crate) fn reduce_with(tensor: ArrayView2<'_, f32>, parallel: bool) -> Result<ValueRange> {
    if parallel {
        par_reduce(tensor)
    } else {
        reduce(tensor)
    }
}

/// Render range reports as an aligned table or a JSON array
pub fn render_reports(reports: &[RangeReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
        OutputFormat::Table => {
            let table = reports
                .iter()
                .fold(
                    TableBuilder::new().headers(vec!["TENSOR", "SHAPE", "MIN", "MAX"]),
                    |builder, r| {
                        builder.row(vec![
                            r.name.clone(),
                            format!("{}x{}", r.shape[0], r.shape[1]),
                            format!("{:.6}", r.min),
                            format!("{:.6}", r.max),
                        ])
                    },
                )
                .build();
            Ok(table.to_string())
        }
    }
}

pub fn run_minmax(args: MinMaxArgs, level: LogLevel) -> Result<()> {
    log(
        level,
        LogLevel::Verbose,
        &format!("Reducing tensors in {}", args.tensors.display()),
    );

    let loaded = load_tensors(&args.tensors)?;
    for name in &loaded.skipped {
        log(
            level,
            LogLevel::Verbose,
            &format!("  Skipping {name} (not a 2-D F32 tensor)"),
        );
    }

    let mut reports = Vec::with_capacity(loaded.tensors.len());
    for (name, tensor) in &loaded.tensors {
        let range = reduce_with(tensor.view(), args.parallel)
            .inspect_err(|_| eprintln!("Failed to reduce {name}"))?;
        let (rows, cols) = tensor.dim();
        reports.push(RangeReport {
            name: name.clone(),
            shape: [rows, cols],
            min: range.min,
            max: range.max,
        });
    }

    if reports.is_empty() {
        eprintln!("No 2-D F32 tensors found in {}", args.tensors.display());
        return Ok(());
    }

    println!("{}", render_reports(&reports, args.format)?);

    Ok(())
}
