//! Real-time timer driver.
//!
//! Samples a simulated playback clock on a fixed tick until the media ends,
//! an interval list completes, or the process is asked to stop.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::cli::args::{OutputFormat, RunArgs};
use crate::cli::commands::{load_schedule, open_events};
use crate::cli::render::Renderer;
use crate::error::CueTimerError;
use crate::observability::{Event, EventEmitter};
use crate::phase::Phase;
use crate::session::{ClockSample, TimerSession};
use crate::time_codec::parse_time;

/// Shortest tick accepted without a warning.
const MIN_RECOMMENDED_TICK: Duration = Duration::from_millis(10);

/// Why the sampling loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Cancelled,
    MediaEnded,
    ScheduleCompleted,
}

impl StopReason {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::MediaEnded => "media ended",
            Self::ScheduleCompleted => "schedule completed",
        }
    }
}

/// Runs the timer in real time.
///
/// # Errors
///
/// Returns a usage error for a bad tick or range, a config error for a bad
/// schedule, or an I/O error if stdout, the event file or the metrics
/// listener fails.
pub async fn run(args: &RunArgs, cancel: CancellationToken) -> Result<(), CueTimerError> {
    if args.tick.is_zero() {
        return Err(CueTimerError::Usage("--tick must be greater than zero".to_string()));
    }
    if args.tick < MIN_RECOMMENDED_TICK {
        tracing::warn!(tick = ?args.tick, "tick is very short; expect high CPU use");
    }
    if let Some(port) = args.metrics_port {
        crate::observability::init_metrics(Some(port))?;
        tracing::info!(port, "Prometheus metrics endpoint started");
    }

    let config = load_schedule(&args.source)?;
    let start = f64::from(parse_time(&args.start)?);
    let until = args
        .until
        .as_deref()
        .map(parse_time)
        .transpose()?
        .map(f64::from);
    if until.is_some_and(|end| end < start) {
        return Err(CueTimerError::Usage(
            "--until must not be before --start".to_string(),
        ));
    }

    let events = open_events(args.events_file.as_deref())?;
    let mut session = TimerSession::new();
    if let Some(events) = &events {
        session = session.with_events(Arc::clone(events));
    }
    session.activate(config.activation.clone(), config.title.clone());

    let clock = PlaybackClock {
        origin: Instant::now(),
        start,
        until,
    };
    let reason = drive(&mut session, &clock, args, &cancel).await?;

    tracing::info!(reason = reason.as_str(), "timer stopped");
    stop(events.as_deref(), reason);
    Ok(())
}

/// A playback position that advances with wall-clock time.
#[derive(Debug, Clone, Copy)]
struct PlaybackClock {
    origin: Instant,
    start: f64,
    until: Option<f64>,
}

impl PlaybackClock {
    fn sample_at(&self, now: Instant) -> ClockSample {
        let position = self.start + now.duration_since(self.origin).as_secs_f64();
        match self.until {
            Some(end) if position >= end => ClockSample::ended_at(end),
            _ => ClockSample::at(position),
        }
    }
}

async fn drive(
    session: &mut TimerSession,
    clock: &PlaybackClock,
    args: &RunArgs,
    cancel: &CancellationToken,
) -> Result<StopReason, CueTimerError> {
    let mut interval = tokio::time::interval(args.tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut renderer = Renderer::new(OutputFormat::Human);
    let terminating = session
        .activation()
        .is_some_and(|a| a.schedule().is_terminating());

    loop {
        let now = tokio::select! {
            biased;
            () = cancel.cancelled() => return Ok(StopReason::Cancelled),
            now = interval.tick() => now,
        };

        let sample = clock.sample_at(now);
        let report = session.tick(sample);

        let mut out = std::io::stdout().lock();
        for line in renderer.render(&report) {
            writeln!(out, "{line}")?;
        }
        if args.bell && !report.cues.is_empty() {
            write!(out, "\x07")?;
        }
        out.flush()?;
        drop(out);

        if sample.ended {
            return Ok(StopReason::MediaEnded);
        }
        if terminating && report.output.is_some_and(|o| o.phase == Phase::Done) {
            return Ok(StopReason::ScheduleCompleted);
        }
    }
}

fn stop(events: Option<&EventEmitter>, reason: StopReason) {
    if let Some(events) = events {
        events.emit(Event::SessionStopped {
            timestamp: Utc::now(),
            reason: reason.as_str().to_string(),
        });
    }
}
