use crate::cli::RunArgs;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use std::path::Path;
use strucval::engine::progress::ProgressReporter;
use strucval::harness::report::RunReport;
use strucval::workflows::suite;
use tracing::{debug, info};

pub fn run(args: RunArgs, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    let settings = PartialConfig::from_optional_file(config_path)?.merge_with_cli(&args)?;
    debug!(?settings, "Resolved run settings.");

    let registry = super::load_registry(&args.manifests)?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Running test selection: {}", settings.selection.join(", "));
    let report = suite::run(
        &registry,
        &settings.selection,
        &settings.filter,
        &settings.suite,
        &reporter,
    )?;

    print_report(&report, settings.suite.validator.debug);

    if report.all_passed() {
        Ok(())
    } else {
        let failed = report.results().filter(|(_, r)| r.outcome.is_problem()).count();
        Err(CliError::TestsFailed {
            failed,
            total: report.total_tests(),
        })
    }
}

fn print_report(report: &RunReport, debug: bool) {
    for line in &report.log {
        println!("{line}");
    }

    for (group, result) in report.results() {
        if result.outcome.is_problem() {
            println!(
                "{}: {group}/{}: {}",
                result.outcome.kind.log_tag(),
                result.name,
                result.outcome.message
            );
        }
        if debug {
            if let Some(comparison) = &result.comparison {
                println!("--- trace {group}/{} ---", result.name);
                for line in &comparison.trace {
                    println!("{line}");
                }
            }
        }
    }

    let summary = report.summary();
    if summary.is_empty() {
        println!("No tests were run.");
    } else {
        println!(
            "{summary} ({} total in {:.3}s)",
            report.total_tests(),
            report.total_time().as_secs_f64()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::commands::fixtures::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn run_args(paths: &[PathBuf], extra: &[&str]) -> RunArgs {
        let mut args: Vec<String> = vec!["strucval".into(), "run".into()];
        args.extend(paths.iter().map(|p| p.to_string_lossy().to_string()));
        args.extend(extra.iter().map(|s| s.to_string()));
        match Cli::parse_from(args).command {
            Commands::Run(args) => args,
            _ => panic!("Expected 'run' subcommand"),
        }
    }

    #[test]
    fn passing_suite_succeeds() {
        let (_dir, paths) = write_manifests(&[("water.toml", WATER)]);
        assert!(run(run_args(&paths, &["--debug"]), None, true).is_ok());
    }

    #[test]
    fn failing_case_makes_the_run_fail() {
        let (_dir, paths) = write_manifests(&[("water.toml", WATER), ("broken.toml", BROKEN)]);
        let result = run(run_args(&paths, &[]), None, true);
        assert!(matches!(
            result,
            Err(CliError::TestsFailed {
                failed: 1,
                total: 3
            })
        ));
    }

    #[test]
    fn selection_can_exclude_the_failing_group() {
        let (_dir, paths) = write_manifests(&[("water.toml", WATER), ("broken.toml", BROKEN)]);
        assert!(run(run_args(&paths, &["-t", "water"]), None, true).is_ok());
    }

    #[test]
    fn config_file_threshold_applies() {
        let (dir, paths) = write_manifests(&[("broken.toml", BROKEN)]);
        let config_path = dir.path().join("strucval.toml");
        std::fs::write(&config_path, "[run]\ndefault-threshold = 1.0\n").unwrap();

        assert!(run(run_args(&paths, &[]), Some(&config_path), true).is_ok());
    }

    #[test]
    fn unknown_group_is_an_error() {
        let (_dir, paths) = write_manifests(&[("water.toml", WATER)]);
        let result = run(run_args(&paths, &["-t", "benzene"]), None, true);
        assert!(matches!(result, Err(CliError::Harness(_))));
    }
}
