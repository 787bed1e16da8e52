use super::error::ValidationError;
use super::tolerance::{self, Sensitivity};
use crate::core::models::structure::AtomicStructure;
use std::fmt;
use std::str::FromStr;

/// How the RMSD acceptance threshold of a comparison is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Threshold {
    /// Estimate from the reference structure with [`Sensitivity::Normal`].
    #[default]
    Auto,
    /// Estimate from the reference structure with the given sensitivity.
    Preset(Sensitivity),
    /// Use this value as-is.
    Value(f64),
}

impl Threshold {
    /// Resolves the threshold against the reference structure of a comparison.
    pub fn resolve(&self, reference: &AtomicStructure) -> Result<f64, ValidationError> {
        match *self {
            Self::Auto => Ok(tolerance::estimate(reference, Sensitivity::Normal)),
            Self::Preset(sensitivity) => Ok(tolerance::estimate(reference, sensitivity)),
            Self::Value(value) if value.is_nan() => Err(ValidationError::InvalidArgument(
                "Threshold must be a number, not NaN".to_string(),
            )),
            Self::Value(value) => Ok(value),
        }
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<Sensitivity> for Threshold {
    fn from(sensitivity: Sensitivity) -> Self {
        Self::Preset(sensitivity)
    }
}

impl FromStr for Threshold {
    type Err = ValidationError;

    /// Parses a numeric threshold or one of the tokens `tight` / `loose` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.is_nan() {
                return Err(ValidationError::InvalidArgument(format!(
                    "Bad threshold provided: '{s}' is not a number"
                )));
            }
            return Ok(Self::Value(value));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "tight" => Ok(Self::Preset(Sensitivity::Tight)),
            "loose" => Ok(Self::Preset(Sensitivity::Loose)),
            _ => Err(ValidationError::InvalidArgument(format!(
                "Bad threshold provided: '{s}'. Expected a number, 'tight' or 'loose'."
            ))),
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Preset(sensitivity) => write!(f, "{sensitivity}"),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}
