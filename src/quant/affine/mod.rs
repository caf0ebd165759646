//! Affine quantization kernels
//!
//! Consumers of calibrated parameters: clamp quantization with per-row
//! accumulators, and the integer matmul that dequantizes its result.

mod dequantize;
mod quantize;


pub use dequantize::mm_dequantize;
pub use quantize::{quantize, QuantizedTensor};
