use super::threshold::Threshold;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidatorConfig {
    /// Collect a diagnostic trace alongside every verdict.
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuiteConfig {
    pub validator: ValidatorConfig,
    /// Threshold for cases that do not specify their own.
    pub default_threshold: Threshold,
}

#[derive(Default)]
pub struct SuiteConfigBuilder {
    debug: Option<bool>,
    default_threshold: Option<Threshold>,
}

impl SuiteConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }
    pub fn default_threshold(mut self, threshold: Threshold) -> Self {
        self.default_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> Result<SuiteConfig, ConfigError> {
        let default_threshold = self.default_threshold.unwrap_or_default();
        if let Threshold::Value(value) = default_threshold {
            if value.is_nan() {
                return Err(ConfigError::InvalidParameter {
                    name: "default_threshold",
                    reason: "threshold must not be NaN".to_string(),
                });
            }
        }

        Ok(SuiteConfig {
            validator: ValidatorConfig {
                debug: self.debug.unwrap_or(false),
            },
            default_threshold,
        })
    }
}
