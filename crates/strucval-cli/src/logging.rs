use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing_subscriber::fmt::format::{DefaultFields, Format, Full};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

type FileLayer<S> = fmt::Layer<S, DefaultFields, Format<Full>, File>;

/// Maps `-v` occurrences and `--quiet` to the global level.
///
/// `--quiet` wins over any `-v` and still lets errors through.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Plain-text layer for `--log-file`. Validation traces arrive here at DEBUG level.
fn file_layer<S>(path: &Path) -> Result<FileLayer<S>> {
    let file = File::create(path).map_err(CliError::Io)?;
    Ok(fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true))
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let file = log_file.map(file_layer).transpose()?;

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr)
        .with(file)
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::WATER;
    use serial_test::serial;
    use strucval::engine::threshold::Threshold;
    use strucval::engine::validator::StructureValidator;
    use strucval::harness::manifest::Manifest;

    fn compare_water_at(level: LevelFilter, path: &Path) -> String {
        let manifest = Manifest::from_toml_str(WATER).unwrap();
        let water = manifest.structure("ref").unwrap();

        let subscriber = tracing_subscriber::registry()
            .with(level)
            .with(file_layer(path).unwrap());
        tracing::subscriber::with_default(subscriber, || {
            StructureValidator::with_debug(true)
                .validate(water, water, &Threshold::Value(0.1))
                .unwrap();
        });
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn quiet_keeps_errors_visible() {
        for verbosity in 0..=3 {
            assert_eq!(level_filter(verbosity, true), LevelFilter::ERROR);
        }
    }

    #[test]
    fn each_verbose_flag_lowers_the_level() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(3, false), LevelFilter::TRACE);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
    }

    #[test]
    #[serial]
    fn log_file_receives_debug_traces_of_a_comparison() {
        let dir = tempfile::tempdir().unwrap();
        let content = compare_water_at(level_filter(2, false), &dir.path().join("debug.log"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ref and test:"));
        assert!(content.contains("THRESH: 0.1"));
    }

    #[test]
    #[serial]
    fn info_level_file_omits_validation_traces() {
        let dir = tempfile::tempdir().unwrap();
        let content = compare_water_at(level_filter(1, false), &dir.path().join("info.log"));
        assert!(!content.contains("THRESH:"));
    }

    #[test]
    fn unwritable_log_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = setup_logging(0, false, Some(dir.path()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
