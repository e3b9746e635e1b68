//! Offline replay of a playback range.

use std::io::Write;

use chrono::Utc;

use crate::cli::args::SimulateArgs;
use crate::cli::commands::{load_schedule, open_events};
use crate::cli::render::Renderer;
use crate::error::CueTimerError;
use crate::observability::Event;
use crate::phase::Activation;
use crate::session::{ClockSample, TimerSession};
use crate::time_codec::parse_time;

/// Upper bound on samples per replay.
const MAX_SAMPLES: u64 = 10_000_000;

/// Replays `--from..=--until` in `--step` increments and prints what changes.
///
/// # Errors
///
/// Returns a usage error for an empty or unbounded range, a config error
/// for a bad schedule, or an I/O error if stdout or the event file fails.
pub fn run(args: &SimulateArgs) -> Result<(), CueTimerError> {
    let config = load_schedule(&args.source)?;
    let activation = config.activation.clone();

    let from = f64::from(parse_time(&args.from)?);
    let until = match &args.until {
        Some(text) => f64::from(parse_time(text)?),
        None => schedule_end(&activation).ok_or_else(|| {
            CueTimerError::Usage("--until is required for a fixed cycle".to_string())
        })?,
    };
    let samples = sample_count(from, until, args.step.as_secs_f64())?;

    let events = open_events(args.events_file.as_deref())?;
    let mut session = TimerSession::new();
    if let Some(events) = &events {
        session = session.with_events(std::sync::Arc::clone(events));
    }
    session.activate(activation, config.title.clone());

    let mut renderer = Renderer::new(args.format);
    let mut out = std::io::stdout().lock();
    let step = args.step.as_secs_f64();
    for i in 0..samples {
        #[allow(clippy::cast_precision_loss)]
        let t = step.mul_add(i as f64, from);
        let report = session.tick(ClockSample::at(t));
        for line in renderer.render(&report) {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()?;

    tracing::debug!(samples, "simulation finished");
    if let Some(events) = events {
        events.emit(Event::SessionStopped {
            timestamp: Utc::now(),
            reason: "simulation finished".to_string(),
        });
    }
    Ok(())
}

/// Number of samples in `from..=until` spaced `step` apart.
fn sample_count(from: f64, until: f64, step: f64) -> Result<u64, CueTimerError> {
    if step <= 0.0 {
        return Err(CueTimerError::Usage("--step must be greater than zero".to_string()));
    }
    if until < from {
        return Err(CueTimerError::Usage(
            "--until must not be before --from".to_string(),
        ));
    }
    let count = ((until - from) / step).floor() + 1.0;
    #[allow(clippy::cast_precision_loss)]
    let max = MAX_SAMPLES as f64;
    if count > max {
        return Err(CueTimerError::Usage(format!(
            "range needs {count} samples; at most {MAX_SAMPLES} are allowed, use a larger --step"
        )));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count as u64;
    Ok(count)
}

/// One second past the last interval, or `None` for an unbounded schedule.
#[allow(clippy::cast_precision_loss)]
fn schedule_end(activation: &Activation) -> Option<f64> {
    let total = activation.schedule().total_seconds()?;
    Some((u64::from(activation.trigger_timestamp()) + total + 1) as f64)
}
