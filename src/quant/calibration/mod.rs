//! Quantization parameter calibration
//!
//! Derives the `(zero_point, scale)` pair of a per-tensor affine scheme from an
//! observed value range and a target integer code range.

mod calibrator;

#[cfg(test)]
mod tests;

pub use calibrator::{calibrate, calibrate_tensor, DEFAULT_FALLBACK_SCALE};
