//! Calibration command types

use calibrar_common::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for the minmax command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct MinMaxArgs {
    /// Path to SafeTensors file
    #[arg(value_name = "TENSORS")]
    pub tensors: PathBuf,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Reduce rows in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for the calibrate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CalibrateArgs {
    /// Observed minimum value
    #[arg(long, allow_negative_numbers = true)]
    pub min: f32,

    /// Observed maximum value
    #[arg(long, allow_negative_numbers = true)]
    pub max: f32,

    /// Bit width of the target integer type
    #[arg(short, long, default_value = "8")]
    pub bits: u8,

    /// Use unsigned codes [0, 2^bits - 1]
    #[arg(long)]
    pub unsigned: bool,

    /// Explicit lowest code (overrides --bits/--unsigned, requires --qmax)
    #[arg(long, allow_negative_numbers = true, requires = "qmax")]
    pub qmin: Option<i32>,

    /// Explicit highest code (overrides --bits/--unsigned, requires --qmin)
    #[arg(long, allow_negative_numbers = true, requires = "qmin")]
    pub qmax: Option<i32>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the quantize command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct QuantizeArgs {
    /// Path to SafeTensors file
    #[arg(value_name = "TENSORS")]
    pub tensors: PathBuf,

    /// Output path for quantized tensors (JSON)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Calibration config (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override bit width
    #[arg(short, long)]
    pub bits: Option<u8>,

    /// Override signedness to unsigned codes
    #[arg(long)]
    pub unsigned: bool,

    /// Reduce rows in parallel
    #[arg(long)]
    pub parallel: bool,
}
