//! Clamp quantization of a 2-D tensor with per-row code accumulators

use calibrar_common::{CalibrarError, Result};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::quant::types::{CodeRange, QuantizationParameters};

/// Integer codes of a quantized `M×K` tensor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantizedTensor {
    /// `M×K` integer codes, each within `code_range`
    pub codes: Array2<i32>,
    /// Sum of each row's codes (length `M`)
    pub row_acc: Array1<i32>,
    /// Parameters used to produce the codes
    pub params: QuantizationParameters,
    /// Representable code interval
    pub code_range: CodeRange,
}

impl QuantizedTensor {
    pub fn shape(&self) -> (usize, usize) {
        self.codes.dim()
    }

    /// Map every code back to its real value
    pub fn dequantize(&self) -> Array2<f32> {
        self.codes.mapv(|code| self.params.dequantize(code))
    }
}

/// Quantize `tensor` with `params`, clamping into `codes`.
///
/// Each element becomes `trunc(clamp(zero_point + x / scale, qmin, qmax))`;
/// the conversion truncates toward zero after clamping.
///
/// # Errors
///
/// - [`CalibrarError::EmptyTensor`] for a tensor without elements
/// - [`CalibrarError::InvalidCodeRange`] if `qmin >= qmax`
/// - [`CalibrarError::InvalidArgument`] for a non-positive or non-finite
///   scale, or a zero-point outside `codes`
pub fn quantize(
    tensor: ArrayView2<'_, f32>,
    params: QuantizationParameters,
    codes: CodeRange,
) -> Result<QuantizedTensor> {
    codes.validate()?;
    validate_params(params, codes)?;

    let (rows, cols) = tensor.dim();
    if tensor.is_empty() {
        return Err(CalibrarError::EmptyTensor { rows, cols });
    }

    let quantized = tensor.mapv(|x| params.quantize(x, codes));
    let row_acc = row_accumulators(&quantized)?;

    Ok(QuantizedTensor {
        codes: quantized,
        row_acc,
        params,
        code_range: codes,
    })
}

fn validate_params(params: QuantizationParameters, codes: CodeRange) -> Result<()> {
    if !(params.scale > 0.0 && params.scale.is_finite()) {
        return Err(CalibrarError::invalid_argument(
            "scale",
            format!("{} must be positive and finite", params.scale),
        ));
    }
    if !codes.contains(params.zero_point) {
        return Err(CalibrarError::invalid_argument(
            "zero_point",
            format!(
                "{} lies outside [{}, {}]",
                params.zero_point, codes.qmin, codes.qmax
            ),
        ));
    }
    Ok(())
}

fn row_accumulators(codes: &Array2<i32>) -> Result<Array1<i32>> {
    codes
        .axis_iter(Axis(0))
        .map(|row| {
            let sum: i64 = row.iter().map(|&c| i64::from(c)).sum();
            i32::try_from(sum).map_err(|_| {
                CalibrarError::invalid_argument("tensor", "row accumulator overflows i32")
            })
        })
        .collect::<Result<Vec<i32>>>()
        .map(Array1::from)
}
