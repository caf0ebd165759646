//! Validate command implementation

use calibrar_common::Result;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_spec, CalibrationSpec, ValidateArgs};
use crate::quant::ObserverMethod;

/// Format a calibration config summary
pub fn format_spec_summary(spec: &CalibrationSpec) -> String {
    let signedness = if spec.precision.signed {
        "signed"
    } else {
        "unsigned"
    };
    let mut lines = vec![format!(
        "  Precision: {}-bit {signedness}",
        spec.precision.bits
    )];

    if let Ok(codes) = spec.precision.code_range() {
        lines.push(format!("  Codes: [{}, {}]", codes.qmin, codes.qmax));
    }

    match spec.observer {
        ObserverMethod::MinMax => lines.push("  Observer: min/max".to_string()),
        ObserverMethod::MovingAverage { momentum } => {
            lines.push(format!("  Observer: moving average (momentum {momentum})"));
        }
    }
    lines.push(format!("  Parallel reduction: {}", spec.parallel));
    lines.join("\n")
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<()> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_spec(&args.config)?;

    log(level, LogLevel::Normal, "Configuration is valid");
    log(level, LogLevel::Verbose, &format_spec_summary(&spec));

    Ok(())
}
