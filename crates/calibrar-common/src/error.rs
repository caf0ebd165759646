//! Error types with actionable diagnostics.
//!
//! Every variant carries enough context to locate the offending input, and
//! user-facing variants end with a `→` hint line.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for calibrar operations.
pub type Result<T> = std::result::Result<T, CalibrarError>;

/// Coarse classification of a [`CalibrarError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input: empty tensor, invalid code range, non-finite bounds.
    InvalidArgument,
    /// Operands whose shapes cannot be combined.
    ShapeMismatch,
    /// Configuration could not be found, parsed or validated.
    Config,
    /// Filesystem failure.
    Io,
    /// Encoding or decoding failure.
    Serialization,
}

/// Errors that can occur while calibrating or applying quantization.
#[derive(Error, Debug)]
pub enum CalibrarError {
    /// A tensor with no elements was passed where data is required.
    #[error("Empty tensor: shape [{rows}, {cols}] has no elements\n  → Pass a tensor with at least one row and one column")]
    EmptyTensor { rows: usize, cols: usize },

    /// The integer code range is empty or inverted.
    #[error("Invalid code range: qmin ({qmin}) must be smaller than qmax ({qmax})\n  → Use e.g. [-128, 127] for int8 or [0, 255] for uint8")]
    InvalidCodeRange { qmin: i32, qmax: i32 },

    /// A value range bound is NaN or infinite.
    #[error("Non-finite value range: min = {min}, max = {max}\n  → Remove NaN/Inf values from the tensor before calibrating")]
    NonFiniteRange { min: f32, max: f32 },

    /// Any other rejected argument.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// Operand shapes are incompatible.
    #[error("Tensor shape mismatch: expected {expected:?}, got {actual:?}\n  → Check that both operands share the inner dimension")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    /// Configuration file not found at expected path.
    #[error("Configuration file not found: {path}\n  → Create a config file or use --config to specify a different path")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file has invalid syntax.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// Configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}\n  → {suggestion}")]
    ConfigValue {
        field: String,
        message: String,
        suggestion: String,
    },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl CalibrarError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an [`CalibrarError::InvalidArgument`] for `field`.
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTensor { .. }
            | Self::InvalidCodeRange { .. }
            | Self::NonFiniteRange { .. }
            | Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            Self::ConfigNotFound { .. } | Self::ConfigParsing { .. } | Self::ConfigValue { .. } => {
                ErrorKind::Config
            }
            Self::Io { .. } => ErrorKind::Io,
            Self::Serialization { .. } => ErrorKind::Serialization,
        }
    }

    /// Stable error code, printed by the CLI as `Error [E0xx]: ...`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. } => "E001",
            Self::ConfigParsing { .. } => "E002",
            Self::ConfigValue { .. } => "E003",
            Self::EmptyTensor { .. } => "E010",
            Self::InvalidCodeRange { .. } => "E011",
            Self::NonFiniteRange { .. } => "E012",
            Self::InvalidArgument { .. } => "E013",
            Self::ShapeMismatch { .. } => "E040",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}

impl From<serde_json::Error> for CalibrarError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
