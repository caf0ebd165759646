//! Quantize command implementation

use calibrar_common::{CalibrarError, Result};
use ndarray::{ArrayView2, Axis};
use serde::Serialize;
use std::collections::BTreeMap;

use super::minmax::reduce_with;
use super::tensors::load_tensors;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, load_spec, CalibrationSpec, QuantizeArgs};
use crate::quant::{
    calibrate, quantize, CodeRange, ObserverMethod, QuantizedTensor, RangeObserver, ValueRange,
};

/// Calibrated and quantized tensor as written to the output file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibratedTensor {
    /// Range the parameters were calibrated from
    pub range: ValueRange,
    #[serde(flatten)]
    pub quantized: QuantizedTensor,
}

/// Config file (if any) with command-line overrides applied
fn resolve_spec(args: &QuantizeArgs) -> Result<CalibrationSpec> {
    let mut spec = match &args.config {
        Some(path) => load_spec(path)?,
        None => CalibrationSpec::default(),
    };
    apply_overrides(&mut spec, args);
    Ok(spec)
}

/// Range of `tensor` under the configured observer.
///
/// The moving average treats every row as one batch.
pub fn observe_range(tensor: ArrayView2<'_, f32>, spec: &CalibrationSpec) -> Result<ValueRange> {
    match spec.observer {
        ObserverMethod::MinMax => reduce_with(tensor, spec.parallel),
        method => {
            let mut observer = RangeObserver::new(method)?;
            for batch in tensor.axis_chunks_iter(Axis(0), 1) {
                observer.observe(batch)?;
            }
            let (rows, cols) = tensor.dim();
            observer
                .range()
                .ok_or(CalibrarError::EmptyTensor { rows, cols })
        }
    }
}

/// Calibrate and quantize a single tensor
pub fn calibrate_and_quantize(
    tensor: ArrayView2<'_, f32>,
    spec: &CalibrationSpec,
    codes: CodeRange,
) -> Result<CalibratedTensor> {
    let range = observe_range(tensor, spec)?;
    let params = calibrate(range, codes)?;
    let quantized = quantize(tensor, params, codes)?;
    Ok(CalibratedTensor { range, quantized })
}

fn save_quantized(
    tensors: &BTreeMap<String, CalibratedTensor>,
    args: &QuantizeArgs,
) -> Result<()> {
    let output_data = serde_json::to_vec_pretty(tensors)?;

    std::fs::write(&args.output, &output_data).map_err(|e| {
        CalibrarError::io(format!("writing output {}", args.output.display()), e)
    })?;

    Ok(())
}

pub fn run_quantize(args: QuantizeArgs, level: LogLevel) -> Result<()> {
    let spec = resolve_spec(&args)?;
    let codes = spec.precision.code_range()?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Quantizing {} to codes [{}, {}]",
            args.tensors.display(),
            codes.qmin,
            codes.qmax
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Observer: {:?}", spec.observer),
    );

    let loaded = load_tensors(&args.tensors)?;
    for name in &loaded.skipped {
        log(
            level,
            LogLevel::Verbose,
            &format!("  Skipping {name} (not a 2-D F32 tensor)"),
        );
    }

    let mut calibrated = BTreeMap::new();
    for (name, tensor) in loaded.tensors {
        let result = calibrate_and_quantize(tensor.view(), &spec, codes)
            .inspect_err(|_| eprintln!("Failed to quantize {name}"))?;

        log(
            level,
            LogLevel::Verbose,
            &format!(
                "  Quantized {name}: range [{}, {}] -> zero_point {}, scale {}",
                result.range.min,
                result.range.max,
                result.quantized.params.zero_point,
                result.quantized.params.scale
            ),
        );
        calibrated.insert(name, result);
    }

    save_quantized(&calibrated, &args)?;

    log(
        level,
        LogLevel::Normal,
        &format!("Quantization complete: {} tensors", calibrated.len()),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("  Output: {}", args.output.display()),
    );

    Ok(())
}
