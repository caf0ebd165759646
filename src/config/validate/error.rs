//! Validation error types

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid precision: {0} bits (must be between 2 and 16)")]
    InvalidBits(u8),

    #[error("Invalid observer momentum: {0} (must be in (0.0, 1.0])")]
    InvalidMomentum(f32),
}

impl ValidationError {
    /// Config field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidBits(_) => "precision.bits",
            Self::InvalidMomentum(_) => "observer.momentum",
        }
    }

    /// Hint shown alongside the error
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidBits(_) => "Use 8 for int8/uint8 or 4 for int4",
            Self::InvalidMomentum(_) => "Use a value like 0.1, or method: min_max",
        }
    }
}
