//! Configuration validation
//!
//! Validates calibration configs before any tensor is read.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_spec;
