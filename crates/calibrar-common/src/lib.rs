//! Shared infrastructure for calibrar.
//!
//! - Error handling with actionable diagnostics
//! - Output format selection and table rendering for the CLI

pub mod error;
pub mod output;

pub use error::{CalibrarError, ErrorKind, Result};
pub use output::{OutputFormat, Table, TableBuilder};
