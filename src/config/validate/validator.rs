//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::CalibrationSpec;
use crate::quant::{is_valid_momentum, ObserverMethod, SUPPORTED_BITS};

/// Validate a calibration config
///
/// Checks:
/// - Bit width yields a representable code range
/// - Moving-average momentum is in `(0, 1]`
pub fn validate_spec(spec: &CalibrationSpec) -> Result<(), ValidationError> {
    if !SUPPORTED_BITS.contains(&spec.precision.bits) {
        return Err(ValidationError::InvalidBits(spec.precision.bits));
    }

    if let ObserverMethod::MovingAverage { momentum } = spec.observer {
        if !is_valid_momentum(momentum) {
            return Err(ValidationError::InvalidMomentum(momentum));
        }
    }

    Ok(())
}
