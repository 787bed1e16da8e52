use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strucval::engine::tolerance::Sensitivity;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "StrucVal CLI - Run structural validation suites comparing labelled 3D molecular structures by element sequence, connectivity and optimal-superposition RMSD.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel validation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the validation cases declared in one or more suite manifests.
    Run(RunArgs),
    /// List the test groups and cases declared in suite manifests.
    List(ListArgs),
    /// Print the estimated RMSD threshold for a structure.
    Tolerance(ToleranceArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Suite manifests to load; each one becomes a test group.
    #[arg(required = true, value_name = "MANIFEST")]
    pub manifests: Vec<PathBuf>,

    /// Run only the named test groups ('all' runs every group). Repeatable.
    #[arg(short = 't', long = "test", value_name = "NAME")]
    pub tests: Vec<String>,

    /// Run only cases whose group or case name contains this text (case-insensitive).
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Print the diagnostic trace of every comparison.
    #[arg(long)]
    pub debug: bool,

    /// Threshold for cases without their own: a number, 'tight', 'loose' or 'auto'.
    #[arg(long, value_name = "THRESHOLD")]
    pub threshold: Option<String>,
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(required = true, value_name = "MANIFEST")]
    pub manifests: Vec<PathBuf>,

    /// List only cases whose group or case name contains this text (case-insensitive).
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,
}

/// Arguments for the `tolerance` subcommand.
#[derive(Args, Debug)]
pub struct ToleranceArgs {
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Name of the structure within the manifest.
    #[arg(short, long, value_name = "NAME")]
    pub structure: String,

    /// Sensitivity preset: 'tight', 'normal' or 'loose'. All three are printed if omitted.
    #[arg(long, value_name = "LEVEL")]
    pub sensitivity: Option<Sensitivity>,
}
