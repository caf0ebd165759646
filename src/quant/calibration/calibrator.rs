//! Scale and zero-point derivation for per-tensor affine quantization

use calibrar_common::{CalibrarError, Result};
use ndarray::ArrayView2;
use tracing::debug;

use crate::quant::range::reduce;
use crate::quant::types::{CodeRange, QuantizationParameters, ValueRange};

/// Scale used when the observed range has no spread (e.g. an all-zero tensor).
///
/// Fixed policy, independent of the data.
pub const DEFAULT_FALLBACK_SCALE: f64 = 0.1;

/// Compute affine quantization parameters for `range` over `codes`.
///
/// The range is first stretched to include `0.0` so that zero maps to an
/// exact integer code. The zero-point is anchored at whichever end of the
/// code range has the smaller error estimate `|q| + |bound / scale|`, then
/// clamped into `[qmin, qmax]` or rounded half-to-even.
///
/// # Errors
///
/// - [`CalibrarError::InvalidCodeRange`] if `qmin >= qmax`
/// - [`CalibrarError::NonFiniteRange`] if either bound is NaN or infinite
/// - [`CalibrarError::InvalidArgument`] (field `codes`) if the code range is
///   too narrow for the spread, i.e. the scale does not fit in a finite `f32`
pub fn calibrate(range: ValueRange, codes: CodeRange) -> Result<QuantizationParameters> {
    codes.validate()?;
    if !range.is_finite() {
        return Err(CalibrarError::NonFiniteRange {
            min: range.min,
            max: range.max,
        });
    }

    let extended = range.including_zero();
    let extended_min = f64::from(extended.min);
    let extended_max = f64::from(extended.max);
    let qmin = f64::from(codes.qmin);
    let qmax = f64::from(codes.qmax);

    let mut scale = (extended_max - extended_min) / codes.span();
    if scale == 0.0 || scale as f32 == 0.0 {
        debug!(
            min = range.min,
            max = range.max,
            fallback = DEFAULT_FALLBACK_SCALE,
            "degenerate range, using fallback scale"
        );
        scale = DEFAULT_FALLBACK_SCALE;
    }
    if !(scale as f32).is_finite() {
        return Err(CalibrarError::invalid_argument(
            "codes",
            format!(
                "[{}, {}] is too narrow for range [{}, {}]: scale {scale:e} overflows f32",
                codes.qmin, codes.qmax, range.min, range.max
            ),
        ));
    }

    let zero_point_from_min = qmin - extended_min / scale;
    let zero_point_from_max = qmax - extended_max / scale;
    let zero_point_from_min_error = qmin.abs() + (extended_min / scale).abs();
    let zero_point_from_max_error = qmax.abs() + (extended_max / scale).abs();

    let anchored_at_min = zero_point_from_min_error < zero_point_from_max_error;
    let initial_zero_point = if anchored_at_min {
        zero_point_from_min
    } else {
        zero_point_from_max
    };

    let zero_point = nudge_zero_point(initial_zero_point, codes);
    debug!(
        initial_zero_point,
        zero_point,
        scale,
        anchored_at_min,
        "calibrated quantization parameters"
    );

    Ok(QuantizationParameters {
        zero_point,
        scale: scale as f32,
    })
}

/// Reduce `tensor` to its range and calibrate from it
pub fn calibrate_tensor(
    tensor: ArrayView2<'_, f32>,
    codes: CodeRange,
) -> Result<QuantizationParameters> {
    calibrate(reduce(tensor)?, codes)
}

/// Clamp to the code range, otherwise round half to even
fn nudge_zero_point(initial: f64, codes: CodeRange) -> i32 {
    if initial < f64::from(codes.qmin) {
        codes.qmin
    } else if initial > f64::from(codes.qmax) {
        codes.qmax
    } else {
        // in range, so the conversion cannot saturate
        initial.round_ties_even() as i32
    }
}
