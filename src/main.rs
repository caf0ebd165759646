//! Calibrar CLI
//!
//! Affine quantization calibration over SafeTensors files.
//!
//! # Usage
//!
//! ```bash
//! # Value range of every 2-D F32 tensor
//! calibrar minmax weights.safetensors --format json
//!
//! # Parameters for an explicit range
//! calibrar calibrate --min -0.0456 --max 0.4556
//!
//! # Calibrate and quantize to 4-bit unsigned codes
//! calibrar quantize weights.safetensors -o quantized.json --bits 4 --unsigned
//!
//! # Validate config
//! calibrar validate calibration.yaml
//! ```

use calibrar::cli::{init_tracing, run_command, Cli, LogLevel};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.verbose, cli.quiet));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error [{}]: {e}", e.code());
            ExitCode::FAILURE
        }
    }
}
