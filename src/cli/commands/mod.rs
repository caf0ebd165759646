//! CLI command implementations

mod calibrate;
mod minmax;
mod quantize;
mod tensors;
mod validate;


use calibrar_common::Result;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Minmax(args) => minmax::run_minmax(args, log_level),
        Command::Calibrate(args) => calibrate::run_calibrate(args, log_level),
        Command::Quantize(args) => quantize::run_quantize(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
    }
}
