//! `cuetimer` - interval timer driven by a media playback clock
//!
//! A schedule (fixed work/rest cycle or explicit interval list) is anchored
//! to a playback timestamp. On every clock sample the phase engine derives
//! the current stage, and the cue dispatcher decides which audio cues to
//! request.
//!
//! ```
//! use cuetimer::phase::{Activation, Phase, Schedule};
//! use cuetimer::session::{ClockSample, TimerSession};
//!
//! let schedule = Schedule::fixed_cycle(35, 25).unwrap();
//! let mut session = TimerSession::new();
//! session.activate(Activation::new(schedule, 195), None);
//!
//! let report = session.tick(ClockSample::at(199.5));
//! assert_eq!(report.output.unwrap().phase, Phase::Running);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod phase;
pub mod session;
pub mod time_codec;
