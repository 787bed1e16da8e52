pub mod defaults;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::Path;
use strucval::engine::config::{SuiteConfig, SuiteConfigBuilder};
use strucval::engine::threshold::Threshold;
use strucval::harness::filter::NameFilter;
use tracing::debug;

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum PartialThreshold {
    Number(f64),
    Text(String),
}

impl PartialThreshold {
    fn into_text(self) -> String {
        match self {
            PartialThreshold::Number(value) => value.to_string(),
            PartialThreshold::Text(text) => text,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialRunConfig {
    debug: Option<bool>,
    default_threshold: Option<PartialThreshold>,
    filter: Option<String>,
    tests: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    run: Option<PartialRunConfig>,
}

/// Everything the `run` command needs after merging file, CLI and defaults.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub suite: SuiteConfig,
    pub selection: Vec<String>,
    pub filter: NameFilter,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file if one was given, otherwise starts from an empty configuration.
    pub fn from_optional_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// CLI arguments win over file values, which win over built-in defaults.
    pub fn merge_with_cli(self, args: &RunArgs) -> Result<RunSettings> {
        let defaults = DefaultsConfig::default();
        let run = self.run.unwrap_or_default();

        let debug = args.debug || run.debug.unwrap_or(defaults.debug);

        let threshold_text = args
            .threshold
            .clone()
            .or_else(|| run.default_threshold.map(PartialThreshold::into_text))
            .unwrap_or(defaults.threshold);
        let default_threshold = parse_threshold(&threshold_text)?;

        let selection = if !args.tests.is_empty() {
            args.tests.clone()
        } else {
            run.tests
                .filter(|tests| !tests.is_empty())
                .unwrap_or(defaults.selection)
        };

        let filter = NameFilter::from(args.filter.as_deref().or(run.filter.as_deref()));

        let suite = SuiteConfigBuilder::new()
            .debug(debug)
            .default_threshold(default_threshold)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(RunSettings {
            suite,
            selection,
            filter,
        })
    }
}

/// Parses a threshold as accepted by the validator, plus `auto` for the estimated default.
pub fn parse_threshold(text: &str) -> Result<Threshold> {
    if text.trim().eq_ignore_ascii_case("auto") {
        return Ok(Threshold::Auto);
    }
    text.parse::<Threshold>()
        .map_err(|e| CliError::Argument(e.to_string()))
}
