//! Calibrate command implementation

use calibrar_common::{OutputFormat, Result};
use serde::Serialize;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::CalibrateArgs;
use crate::quant::{calibrate, CodeRange, QuantizationParameters, ValueRange};

#[derive(Debug, Serialize)]
struct CalibrationReport {
    range: ValueRange,
    code_range: CodeRange,
    zero_point: i32,
    scale: f32,
}

/// Code range selected by `--qmin/--qmax`, or by `--bits/--unsigned`
pub fn resolve_code_range(args: &CalibrateArgs) -> Result<CodeRange> {
    match (args.qmin, args.qmax) {
        (Some(qmin), Some(qmax)) => CodeRange::new(qmin, qmax),
        _ => CodeRange::from_precision(!args.unsigned, args.bits),
    }
}

/// Calibrate the range given on the command line
pub fn calibrate_args(args: &CalibrateArgs) -> Result<(CodeRange, QuantizationParameters)> {
    let codes = resolve_code_range(args)?;
    let params = calibrate(ValueRange::new(args.min, args.max), codes)?;
    Ok((codes, params))
}

pub fn run_calibrate(args: CalibrateArgs, level: LogLevel) -> Result<()> {
    let (codes, params) = calibrate_args(&args)?;

    match args.format {
        OutputFormat::Json => {
            let report = CalibrationReport {
                range: ValueRange::new(args.min, args.max),
                code_range: codes,
                zero_point: params.zero_point,
                scale: params.scale,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            log(
                level,
                LogLevel::Verbose,
                &format!(
                    "Range [{}, {}] -> codes [{}, {}]",
                    args.min, args.max, codes.qmin, codes.qmax
                ),
            );
            log(
                level,
                LogLevel::Normal,
                &format!("zero_point: {}", params.zero_point),
            );
            log(level, LogLevel::Normal, &format!("scale:      {}", params.scale));
        }
    }

    Ok(())
}
