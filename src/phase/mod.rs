//! Phase engine
//!
//! Derives the current stage of an interval timer from a playback clock
//! and decides which audio cues to request on stage boundaries.
//!
//! # Architecture
//!
//! - [`Schedule`] / [`Activation`] - validated schedule bound to a trigger timestamp
//! - [`engine`] - pure `(schedule, elapsed) -> EngineOutput` derivation
//! - [`CueDispatcher`] - per-tick cue decisions with second-level de-duplication

pub mod cue;
pub mod engine;
pub mod schedule;
pub mod state;

pub use cue::{CueDispatcher, CueKind, CueRequest, Tone, Waveform};
pub use engine::{PhaseEngine, evaluate, evaluate_elapsed};
pub use schedule::{
    Activation, FINISHING_SECONDS, FixedCycle, GET_READY_SECONDS, IntervalList,
    PREPARING_SECONDS, Schedule,
};
pub use state::{EngineOutput, Phase};
