//! Time-to-phase derivation
//!
//! Every output is a pure function of the schedule and the elapsed time
//! since the trigger timestamp. Nothing is carried between samples, so
//! seeking the playback clock in either direction recomputes cleanly.

use super::schedule::{
    Activation, FINISHING_SECONDS, FixedCycle, GET_READY_SECONDS, IntervalList,
    PREPARING_SECONDS, Schedule,
};
use super::state::{EngineOutput, Phase};

/// Evaluates `schedule` started at `trigger_timestamp` for a playback sample.
#[must_use]
pub fn evaluate(schedule: &Schedule, trigger_timestamp: u32, current_time: f64) -> EngineOutput {
    evaluate_elapsed(schedule, current_time - f64::from(trigger_timestamp))
}

/// Evaluates `schedule` at `elapsed` seconds after its trigger.
///
/// Interval lists report [`Phase::Done`] when `elapsed` is negative, past
/// the end, or not a number. Fixed cycles clamp negative and non-finite
/// values to zero, reporting the start of the lead-in.
#[must_use]
pub fn evaluate_elapsed(schedule: &Schedule, elapsed: f64) -> EngineOutput {
    match schedule {
        Schedule::FixedCycle(cycle) => evaluate_fixed_cycle(cycle, elapsed),
        Schedule::IntervalList(list) => evaluate_interval_list(list, elapsed),
    }
}

/// Engine bound to one activation.
#[derive(Debug, Clone)]
pub struct PhaseEngine {
    activation: Activation,
}

impl PhaseEngine {
    /// Creates an engine for `activation`.
    #[must_use]
    pub const fn new(activation: Activation) -> Self {
        Self { activation }
    }

    /// The activation this engine evaluates.
    #[must_use]
    pub const fn activation(&self) -> &Activation {
        &self.activation
    }

    /// Seconds between the trigger timestamp and `current_time`.
    #[must_use]
    pub fn elapsed(&self, current_time: f64) -> f64 {
        current_time - f64::from(self.activation.trigger_timestamp())
    }

    /// Evaluates the activation at playback position `current_time`.
    #[must_use]
    pub fn evaluate(&self, current_time: f64) -> EngineOutput {
        evaluate_elapsed(self.activation.schedule(), self.elapsed(current_time))
    }
}

// ============================================================================
// Interval list
// ============================================================================

#[allow(clippy::cast_precision_loss)]
fn evaluate_interval_list(list: &IntervalList, elapsed: f64) -> EngineOutput {
    let total = list.total_seconds() as f64;
    if !(0.0..total).contains(&elapsed) {
        return EngineOutput::done();
    }

    let mut start = 0.0;
    for (index, &len) in (0_u64..).zip(list.intervals()) {
        let end = start + f64::from(len);
        if elapsed < end {
            let countdown = Countdown::measure(len, elapsed - start);
            let phase = if index == 0 {
                Phase::Starting
            } else if index % 2 == 1 {
                work_phase(countdown.seconds_remaining)
            } else {
                rest_phase(countdown.seconds_remaining)
            };
            return countdown.into_output(phase, index);
        }
        start = end;
    }

    // Only reachable through float rounding right at the end.
    EngineOutput::done()
}

// ============================================================================
// Fixed cycle
// ============================================================================

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn evaluate_fixed_cycle(cycle: &FixedCycle, elapsed: f64) -> EngineOutput {
    // Not started yet (or a nonsense sample): hold at the top of the lead-in.
    let elapsed = if elapsed.is_finite() && elapsed > 0.0 {
        elapsed
    } else {
        0.0
    };

    let first_cycle = cycle.first_cycle_seconds() as f64;
    let (index, mut into_cycle) = if elapsed < first_cycle {
        (0, elapsed)
    } else {
        let after_first = elapsed - first_cycle;
        let cycle_len = cycle.cycle_seconds() as f64;
        (
            1 + (after_first / cycle_len).floor() as u64,
            after_first % cycle_len,
        )
    };

    if index == 0 {
        let lead_in = f64::from(GET_READY_SECONDS);
        if into_cycle < lead_in {
            return Countdown::measure(GET_READY_SECONDS, into_cycle)
                .into_output(Phase::Starting, index);
        }
        into_cycle -= lead_in;
    }

    let work = f64::from(cycle.work());
    if into_cycle < work {
        let countdown = Countdown::measure(cycle.work(), into_cycle);
        return countdown.into_output(work_phase(countdown.seconds_remaining), index);
    }

    let countdown = Countdown::measure(cycle.rest(), into_cycle - work);
    countdown.into_output(rest_phase(countdown.seconds_remaining), index)
}

// ============================================================================
// Shared window arithmetic
// ============================================================================

/// Position inside one window of `len` seconds.
#[derive(Debug, Clone, Copy)]
struct Countdown {
    seconds_remaining: u32,
    progress: f64,
}

impl Countdown {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn measure(len: u32, into: f64) -> Self {
        if len == 0 {
            return Self {
                seconds_remaining: 0,
                progress: 0.0,
            };
        }
        let len_f = f64::from(len);
        let remaining = (len_f - into.floor()).clamp(0.0, len_f);
        Self {
            seconds_remaining: remaining as u32,
            progress: ((len_f - into) / len_f).clamp(0.0, 1.0),
        }
    }

    const fn into_output(self, phase: Phase, index: u64) -> EngineOutput {
        EngineOutput {
            phase,
            seconds_remaining: self.seconds_remaining,
            progress: self.progress,
            index: Some(index),
        }
    }
}

const fn work_phase(seconds_remaining: u32) -> Phase {
    if seconds_remaining >= 1 && seconds_remaining <= FINISHING_SECONDS {
        Phase::Finishing
    } else {
        Phase::Running
    }
}

const fn rest_phase(seconds_remaining: u32) -> Phase {
    if seconds_remaining >= 1 && seconds_remaining <= PREPARING_SECONDS {
        Phase::Preparing
    } else {
        Phase::Cooldown
    }
}
