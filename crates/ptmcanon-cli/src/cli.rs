use clap::{Args, Parser, Subcommand};
use ptmcanon::engine::config::{CandidateOrder, FailurePolicy};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ptmcanon CLI - Recognize post-translational modifications on molecule graphs and give their atoms canonical names.",
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

    /// Set the number of threads used to screen candidate patterns.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recognize modifications in a molecule graph and canonicalize their atom names.
    Canonize(CanonizeArgs),
    /// Inspect and validate pattern libraries.
    Patterns(PatternsArgs),
}

/// Where the pattern library comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct LibraryArgs {
    /// Additional pattern-definition file (TOML), appended to the built-in patterns.
    #[arg(short = 'l', long = "pattern-library", value_name = "PATH")]
    pub pattern_library: Option<PathBuf>,

    /// Do not include the built-in patterns (N-terminus, C-terminus).
    #[arg(long)]
    pub no_builtin: bool,
}

/// Arguments for the `canonize` subcommand.
#[derive(Args, Debug)]
pub struct CanonizeArgs {
    /// Path to the input molecule graph (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the canonicalized molecule graph (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub library: LibraryArgs,

    /// Order in which candidate patterns are tried, overriding the config file.
    #[arg(long, value_name = "smallest-first|largest-first")]
    pub candidate_order: Option<CandidateOrder>,

    /// What happens to finished residue groups when a later group fails.
    #[arg(long, value_name = "atomic|group-granular")]
    pub failure_policy: Option<FailurePolicy>,
}

/// Arguments for the `patterns` subcommand.
#[derive(Args, Debug)]
pub struct PatternsArgs {
    #[command(subcommand)]
    pub command: PatternsCommands,
}

#[derive(Subcommand, Debug)]
pub enum PatternsCommands {
    /// List the patterns of the effective library.
    List {
        #[command(flatten)]
        library: LibraryArgs,
    },
    /// Validate a pattern-definition file without running anything.
    Check {
        /// The pattern-definition file to validate.
        #[arg(required = true, value_name = "PATH")]
        path: PathBuf,
    },
}
