//! Integer matrix multiply with dequantization back to `f32`

use calibrar_common::{CalibrarError, Result};
use ndarray::Array2;
use tracing::trace;

use super::quantize::QuantizedTensor;

/// Multiply quantized activations by quantized weights and dequantize.
///
/// `data` is `M×K`, `weight` is `N×K` (one row per output feature); the
/// result is the `M×N` float product `data · weightᵀ`:
///
/// ```text
/// out[i][j] = s_w·s_d · ( Σ_k d[i][k]·w[j][k]
///                         − acc_d[i]·zp_w − acc_w[j]·zp_d + zp_w·zp_d·K )
/// ```
///
/// Integer terms are accumulated in `i64`.
///
/// # Errors
///
/// [`CalibrarError::ShapeMismatch`] if the inner dimensions differ.
pub fn mm_dequantize(weight: &QuantizedTensor, data: &QuantizedTensor) -> Result<Array2<f32>> {
    let (m, k) = data.shape();
    let (n, weight_k) = weight.shape();
    if weight_k != k {
        return Err(CalibrarError::ShapeMismatch {
            expected: vec![n, k],
            actual: vec![n, weight_k],
        });
    }

    let d = data.codes.mapv(i64::from);
    let w = weight.codes.mapv(i64::from);
    let products = d.dot(&w.t());

    let zp_w = i64::from(weight.params.zero_point);
    let zp_d = i64::from(data.params.zero_point);
    let zero_point_term = zp_w * zp_d * k as i64;
    let scale = f64::from(weight.params.scale) * f64::from(data.params.scale);

    trace!(m, n, k, scale, zero_point_term, "dequantizing integer matmul");

    Ok(Array2::from_shape_fn((m, n), |(i, j)| {
        let acc = products[[i, j]]
            - i64::from(data.row_acc[i]) * zp_w
            - i64::from(weight.row_acc[j]) * zp_d
            + zero_point_term;
        (scale * acc as f64) as f32
    }))
}
