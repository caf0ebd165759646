//! Calibration configuration
//!
//! - YAML schema (`CalibrationSpec`) with validation
//! - CLI argument types

mod cli;
mod loader;
mod schema;
mod validate;


pub use cli::{
    apply_overrides, parse_args, CalibrateArgs, Cli, Command, MinMaxArgs, QuantizeArgs,
    ValidateArgs,
};
pub use loader::{load_spec, parse_spec};
pub use schema::{CalibrationSpec, PrecisionSpec};
pub use validate::{validate_spec, ValidationError};
