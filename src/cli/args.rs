//! CLI argument definitions
//!
//! All Clap derive structs for `cuetimer` command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Interval timer driven by a media playback clock.
#[derive(Parser, Debug)]
#[command(name = "cuetimer", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "CUETIMER_COLOR")]
    pub color: ColorChoice,

    /// Log line format on stderr.
    #[arg(long, default_value = "human", global = true, env = "CUETIMER_LOG_FORMAT")]
    pub log_format: LogFormatArg,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a timer against a simulated real-time playback clock.
    Run(RunArgs),

    /// Replay a playback range offline and print what the timer shows.
    Simulate(SimulateArgs),

    /// Validate timer configuration files.
    Validate(ValidateArgs),

    /// Convert between time strings and seconds.
    Time(TimeCommand),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

// ============================================================================
// Schedule Source
// ============================================================================

/// Where the timer schedule comes from: a config file or inline flags.
#[derive(Args, Debug, Clone, Default)]
pub struct ScheduleSource {
    /// Path to a YAML or JSON timer configuration.
    #[arg(
        short,
        long,
        env = "CUETIMER_CONFIG",
        conflicts_with_all = ["trigger", "work", "rest", "intervals"]
    )]
    pub config: Option<PathBuf>,

    /// Playback position where the schedule begins (`m:ss` or seconds).
    #[arg(long)]
    pub trigger: Option<String>,

    /// Work duration of a fixed cycle.
    #[arg(long, requires = "rest", conflicts_with = "intervals")]
    pub work: Option<String>,

    /// Rest duration of a fixed cycle.
    #[arg(long, requires = "work", conflicts_with = "intervals")]
    pub rest: Option<String>,

    /// Comma-separated interval list, e.g. `10,0:20,10`.
    #[arg(long)]
    pub intervals: Option<String>,

    /// Display title for inline schedules.
    #[arg(long)]
    pub title: Option<String>,
}

// ============================================================================
// Run / Simulate
// ============================================================================

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Schedule to run.
    #[command(flatten)]
    pub source: ScheduleSource,

    /// Sampling period of the playback clock.
    #[arg(long, default_value = "100ms", value_parser = humantime::parse_duration)]
    pub tick: Duration,

    /// Playback position the clock starts at.
    #[arg(long, default_value = "0")]
    pub start: String,

    /// Playback position at which the media ends.
    #[arg(long)]
    pub until: Option<String>,

    /// Ring the terminal bell on every cue.
    #[arg(long)]
    pub bell: bool,

    /// Write JSONL session events to this file.
    #[arg(long, env = "CUETIMER_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,

    /// Expose Prometheus metrics on `127.0.0.1:<port>`.
    #[arg(long, env = "CUETIMER_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Arguments for `simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Schedule to replay.
    #[command(flatten)]
    pub source: ScheduleSource,

    /// First playback position to sample.
    #[arg(long, default_value = "0")]
    pub from: String,

    /// Last playback position to sample. Defaults to one second past the
    /// end of an interval list; required for fixed cycles.
    #[arg(long)]
    pub until: Option<String>,

    /// Playback distance between samples.
    #[arg(long, default_value = "250ms", value_parser = humantime::parse_duration)]
    pub step: Duration,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Write JSONL session events to this file.
    #[arg(long)]
    pub events_file: Option<PathBuf>,
}

// ============================================================================
// Validate
// ============================================================================

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Time
// ============================================================================

/// Time conversion commands.
#[derive(Args, Debug)]
pub struct TimeCommand {
    /// Time subcommand.
    #[command(subcommand)]
    pub subcommand: TimeSubcommand,
}

/// Time subcommands.
#[derive(Subcommand, Debug)]
pub enum TimeSubcommand {
    /// Parse `m:ss` or bare seconds into whole seconds.
    Parse {
        /// Time string.
        text: String,
    },

    /// Format seconds as `m:ss`.
    Format {
        /// Seconds; fractions are floored.
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Log format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable lines.
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output (one document per line).
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
