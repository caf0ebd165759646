//! Affine (scale + zero-point) quantization
//!
//! - Range reduction: global min/max of a tensor, running observers
//! - Calibration: scale and zero-point from a value range and a code range
//! - Affine kernels: clamp quantization and integer matmul dequantization

mod affine;
mod calibration;
mod range;
mod types;

pub use affine::{mm_dequantize, quantize, QuantizedTensor};
pub use calibration::{calibrate, calibrate_tensor, DEFAULT_FALLBACK_SCALE};
pub use range::{is_valid_momentum, par_reduce, reduce, ObserverMethod, RangeObserver};
pub use types::{CodeRange, QuantizationParameters, ValueRange, SUPPORTED_BITS};
