//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod run;
pub mod simulate;
pub mod time;
pub mod validate;
pub mod version;

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands, ScheduleSource};
use crate::config::{ConfigLimits, ConfigLoader, RawTimerConfig, TimeValue, TimerConfig, Validator};
use crate::error::{ConfigError, CueTimerError};
use crate::observability::EventEmitter;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), CueTimerError> {
    match cli.command {
        Commands::Run(args) => run::run(&args, cancel).await,
        Commands::Simulate(args) => simulate::run(&args),
        Commands::Validate(args) => validate::run(&args),
        Commands::Time(cmd) => time::run(&cmd),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Resolves `--config` or the inline schedule flags into a validated config.
///
/// Inline flags go through the same validator as files, so both paths
/// report identical messages. An inline schedule without `--trigger`
/// starts at `0`.
///
/// # Errors
///
/// Returns a usage error when no schedule is given, or a config error when
/// loading or validation fails.
pub fn load_schedule(source: &ScheduleSource) -> Result<Arc<TimerConfig>, CueTimerError> {
    if let Some(path) = &source.config {
        tracing::info!(config = %path.display(), "loading timer configuration");
        let result = ConfigLoader::with_defaults().load(path)?;
        for warning in &result.warnings {
            tracing::warn!(
                location = warning.location.as_deref().unwrap_or("<unknown>"),
                "{}",
                warning.message
            );
        }
        return Ok(result.config);
    }

    if source.work.is_none() && source.intervals.is_none() {
        return Err(CueTimerError::Usage(
            "a schedule is required: pass --config, --work/--rest or --intervals".to_string(),
        ));
    }

    let raw = RawTimerConfig {
        title: source.title.clone(),
        url: None,
        trigger: Some(TimeValue::from(source.trigger.as_deref().unwrap_or("0"))),
        duration: source.work.as_deref().map(TimeValue::from),
        cooldown: source.rest.as_deref().map(TimeValue::from),
        intervals: source
            .intervals
            .as_deref()
            .map(|list| list.split(',').map(|item| TimeValue::from(item.trim())).collect()),
    };

    let result = Validator::new().validate(&raw, &ConfigLimits::default());
    for warning in &result.warnings {
        tracing::warn!(location = %warning.path, "{}", warning.message);
    }
    match result.config {
        Some(config) if result.errors.is_empty() => Ok(Arc::new(config)),
        _ => Err(ConfigError::ValidationError {
            path: "<command line>".to_string(),
            errors: result.errors,
        }
        .into()),
    }
}

/// Opens the JSONL event sink when `--events-file` is given.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created.
pub fn open_events(path: Option<&Path>) -> Result<Option<Arc<EventEmitter>>, CueTimerError> {
    path.map(|p| EventEmitter::from_file(p).map(Arc::new))
        .transpose()
        .map_err(CueTimerError::from)
}
