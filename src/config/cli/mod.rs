//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! calibrar minmax weights.safetensors
//! calibrar calibrate --min -0.5 --max 2.0 --bits 8 --unsigned
//! calibrar quantize weights.safetensors -o quantized.json --config calibration.yaml
//! calibrar validate calibration.yaml
//! ```

mod calibration;
mod core;

pub use calibration::{CalibrateArgs, MinMaxArgs, QuantizeArgs};
pub use core::{apply_overrides, parse_args, Cli, Command, ValidateArgs};
