//! YAML schema for calibration configuration

use serde::{Deserialize, Deserializer, Serialize};

use crate::quant::{CodeRange, ObserverMethod};
use calibrar_common::Result;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`).
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

fn default_bits() -> u8 {
    8
}

fn default_signed() -> bool {
    true
}

/// Target integer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionSpec {
    /// Bit width of the quantized type
    #[serde(default = "default_bits")]
    pub bits: u8,

    /// Signed (`[-2^(b-1), 2^(b-1) - 1]`) or unsigned (`[0, 2^b - 1]`) codes
    #[serde(default = "default_signed", deserialize_with = "deserialize_bool_lenient")]
    pub signed: bool,
}

impl Default for PrecisionSpec {
    fn default() -> Self {
        Self {
            bits: default_bits(),
            signed: default_signed(),
        }
    }
}

impl PrecisionSpec {
    pub fn code_range(&self) -> Result<CodeRange> {
        CodeRange::from_precision(self.signed, self.bits)
    }
}

/// Complete calibration configuration
///
/// ```yaml
/// precision:
///   bits: 8
///   signed: true
/// observer:
///   method: moving_average
///   momentum: 0.1
/// parallel: false
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibrationSpec {
    #[serde(default)]
    pub precision: PrecisionSpec,

    #[serde(default)]
    pub observer: ObserverMethod,

    /// Reduce rows on the rayon pool
    #[serde(default, deserialize_with = "deserialize_bool_lenient")]
    pub parallel: bool,
}
