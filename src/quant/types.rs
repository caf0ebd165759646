//! Value ranges, integer code ranges and affine quantization parameters

use calibrar_common::{CalibrarError, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Bit widths accepted by [`CodeRange::from_precision`]; row accumulators
/// stay within `i32` up to 16 bits.
pub const SUPPORTED_BITS: RangeInclusive<u8> = 2..=16;

/// Observed extent of a tensor's values
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Smallest observed value
    pub min: f32,
    /// Largest observed value
    pub max: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Both bounds are finite (neither NaN nor infinite)
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Smallest range containing both `self` and `other`
    pub fn union(self, other: ValueRange) -> ValueRange {
        ValueRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Range stretched to include `0.0`
    pub fn including_zero(self) -> ValueRange {
        ValueRange {
            min: self.min.min(0.0),
            max: self.max.max(0.0),
        }
    }
}

/// Closed interval `[qmin, qmax]` of representable integer codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRange {
    pub qmin: i32,
    pub qmax: i32,
}

impl CodeRange {
    /// Signed 8-bit codes, `[-128, 127]`
    pub const I8: CodeRange = CodeRange {
        qmin: i8::MIN as i32,
        qmax: i8::MAX as i32,
    };

    /// Unsigned 8-bit codes, `[0, 255]`
    pub const U8: CodeRange = CodeRange {
        qmin: 0,
        qmax: u8::MAX as i32,
    };

    /// Create a code range, rejecting empty or inverted intervals
    pub fn new(qmin: i32, qmax: i32) -> Result<Self> {
        let codes = Self { qmin, qmax };
        codes.validate()?;
        Ok(codes)
    }

    /// Code range of a `bits`-wide integer type.
    ///
    /// Signed: `[-(2^(bits-1)), 2^(bits-1) - 1]`, unsigned: `[0, 2^bits - 1]`.
    /// `bits` must be in [`SUPPORTED_BITS`].
    pub fn from_precision(signed: bool, bits: u8) -> Result<Self> {
        if !SUPPORTED_BITS.contains(&bits) {
            return Err(CalibrarError::invalid_argument(
                "bits",
                format!(
                    "unsupported precision {bits} (must be between {} and {})",
                    SUPPORTED_BITS.start(),
                    SUPPORTED_BITS.end()
                ),
            ));
        }

        let codes = if signed {
            let half = 1i32 << (bits - 1);
            Self {
                qmin: -half,
                qmax: half - 1,
            }
        } else {
            Self {
                qmin: 0,
                qmax: (1i32 << bits) - 1,
            }
        };
        Ok(codes)
    }

    /// Fail with [`CalibrarError::InvalidCodeRange`] unless `qmin < qmax`
    pub fn validate(&self) -> Result<()> {
        if self.qmin >= self.qmax {
            return Err(CalibrarError::InvalidCodeRange {
                qmin: self.qmin,
                qmax: self.qmax,
            });
        }
        Ok(())
    }

    /// Number of steps between the two extremes (`qmax - qmin`)
    pub fn span(&self) -> f64 {
        f64::from(self.qmax) - f64::from(self.qmin)
    }

    pub fn contains(&self, code: i32) -> bool {
        (self.qmin..=self.qmax).contains(&code)
    }
}

/// Affine mapping `real ≈ scale * (code - zero_point)`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantizationParameters {
    /// Integer code that represents `0.0` exactly
    pub zero_point: i32,
    /// Real-valued step between adjacent codes
    pub scale: f32,
}

impl QuantizationParameters {
    /// Quantize a single value: `trunc(clamp(zero_point + real / scale))`.
    pub fn quantize(&self, real: f32, codes: CodeRange) -> i32 {
        let shifted = self.zero_point as f32 + real / self.scale;
        shifted.max(codes.qmin as f32).min(codes.qmax as f32) as i32
    }

    /// Map an integer code back to its real value
    pub fn dequantize(&self, code: i32) -> f32 {
        self.scale * (i64::from(code) - i64::from(self.zero_point)) as f32
    }
}
