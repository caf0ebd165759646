//! Affine quantization calibration.
//!
//! Reduces a 2-D `f32` tensor to its value range and derives the
//! `(zero_point, scale)` pair of the affine mapping
//! `real ≈ scale * (code - zero_point)` for a target integer code range.
//! The range is always stretched to include `0.0`, so zero is exactly
//! representable by the zero-point code.
//!
//! ```
//! use calibrar::{calibrate_tensor, CodeRange};
//! use ndarray::array;
//!
//! let activations = array![[-0.0456f32, 0.1], [0.4556, 0.0]];
//! let params = calibrate_tensor(activations.view(), CodeRange::I8)?;
//!
//! assert_eq!(params.zero_point, -105);
//! assert!(params.scale > 0.0);
//! # Ok::<(), calibrar::CalibrarError>(())
//! ```

pub mod cli;
pub mod config;
pub mod quant;

pub use calibrar_common::{CalibrarError, ErrorKind, Result};
pub use quant::{
    calibrate, calibrate_tensor, mm_dequantize, par_reduce, quantize, reduce, CodeRange,
    ObserverMethod, QuantizationParameters, QuantizedTensor, RangeObserver, ValueRange,
    DEFAULT_FALLBACK_SCALE,
};
