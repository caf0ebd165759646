//! Core CLI types - Cli, Command, and basic argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::calibration::{CalibrateArgs, MinMaxArgs, QuantizeArgs};
use crate::config::CalibrationSpec;

/// calibrar: affine quantization parameter calibration
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "calibrar")]
#[command(version)]
#[command(about = "Min/max reduction and affine (scale + zero-point) quantization calibration")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Report the value range of every 2-D F32 tensor in a SafeTensors file
    Minmax(MinMaxArgs),

    /// Compute quantization parameters for an explicit value range
    Calibrate(CalibrateArgs),

    /// Calibrate and quantize every 2-D F32 tensor in a SafeTensors file
    Quantize(QuantizeArgs),

    /// Validate a calibration config without reading any tensor
    Validate(ValidateArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a CalibrationSpec
pub fn apply_overrides(spec: &mut CalibrationSpec, args: &QuantizeArgs) {
    if let Some(bits) = args.bits {
        spec.precision.bits = bits;
    }
    if args.unsigned {
        spec.precision.signed = false;
    }
    if args.parallel {
        spec.parallel = true;
    }
}
