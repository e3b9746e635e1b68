//! Audio cue dispatch
//!
//! Turns the per-tick [`EngineOutput`] stream into audio cue requests.
//! The engine is polled, not event driven, so edge cues are de-duplicated
//! on `(index, phase, seconds_remaining)`: a `Finishing` window spanning
//! many samples produces exactly one cue per whole second.
//!
//! The dispatcher only describes tones; synthesis belongs to the caller.

use serde::Serialize;

use super::state::{EngineOutput, Phase};

/// Oscillator shape for a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// Pure sine
    #[default]
    Sine,
    /// Square
    Square,
    /// Sawtooth
    Sawtooth,
    /// Triangle
    Triangle,
}

/// Parameters for one audible cue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tone {
    /// Pitch in hertz
    pub frequency_hz: u32,
    /// Length of each beep in milliseconds
    pub duration_ms: u32,
    /// Number of beeps
    pub repeat: u32,
    /// Gap between beep starts in milliseconds
    pub spacing_ms: u32,
    /// Oscillator shape
    pub waveform: Waveform,
    /// Peak gain, decaying to silence over `duration_ms`
    pub gain: f32,
}

impl Tone {
    const fn single(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            repeat: 1,
            spacing_ms: 250,
            waveform: Waveform::Sine,
            gain: 0.3,
        }
    }
}

/// Long low tone marking the start of a work or rest window.
pub const TRANSITION_TONE: Tone = Tone::single(523, 1000);

/// Short tick during the lead-in and the end of rest.
pub const GET_READY_TONE: Tone = Tone::single(660, 100);

/// Higher tick during the end of work.
pub const WRAP_UP_TONE: Tone = Tone::single(880, 150);

/// Why a cue fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    /// Phase changed into `Running` or `Cooldown`
    Transition,
    /// New second of `Starting` or `Preparing`
    GetReady,
    /// New second of `Finishing`
    WrapUp,
}

impl CueKind {
    /// Tone realised for this kind of cue.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Transition => TRANSITION_TONE,
            Self::GetReady => GET_READY_TONE,
            Self::WrapUp => WRAP_UP_TONE,
        }
    }

    /// Lowercase name used in logs and metrics labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transition => "transition",
            Self::GetReady => "get_ready",
            Self::WrapUp => "wrap_up",
        }
    }
}

impl std::fmt::Display for CueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for the audio collaborator to play a tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CueRequest {
    /// Why the cue fired
    pub kind: CueKind,
    /// What to play
    pub tone: Tone,
}

impl From<CueKind> for CueRequest {
    fn from(kind: CueKind) -> Self {
        Self {
            kind,
            tone: kind.tone(),
        }
    }
}

/// Second-granularity identity of an edge cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CueKey {
    /// Cycle or interval index
    pub index: Option<u64>,
    /// Phase at the time of the cue
    pub phase: Phase,
    /// Whole seconds remaining at the time of the cue
    pub seconds_remaining: u32,
}

impl From<&EngineOutput> for CueKey {
    fn from(output: &EngineOutput) -> Self {
        Self {
            index: output.index,
            phase: output.phase,
            seconds_remaining: output.seconds_remaining,
        }
    }
}

/// Decides which cues fire on each tick.
///
/// Holds the previous tick's phase and the key of the last edge cue.
/// Call [`reset`](Self::reset) whenever the activation changes, or a stale
/// previous phase produces a spurious transition cue.
#[derive(Debug, Clone, Default)]
pub struct CueDispatcher {
    previous_phase: Option<Phase>,
    last_cue_key: Option<CueKey>,
}

impl CueDispatcher {
    /// Creates a dispatcher with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all history.
    pub const fn reset(&mut self) {
        self.previous_phase = None;
        self.last_cue_key = None;
    }

    /// Phase seen on the previous tick.
    #[must_use]
    pub const fn previous_phase(&self) -> Option<Phase> {
        self.previous_phase
    }

    /// Key of the most recent edge cue.
    #[must_use]
    pub const fn last_cue_key(&self) -> Option<CueKey> {
        self.last_cue_key
    }

    /// Consumes one tick of engine output and returns the cues to play,
    /// transition cue first.
    pub fn on_tick(&mut self, output: &EngineOutput) -> Vec<CueRequest> {
        let mut cues: Vec<CueRequest> = Vec::with_capacity(2);

        if let Some(previous) = self.previous_phase {
            if previous != output.phase
                && previous != Phase::Done
                && matches!(output.phase, Phase::Running | Phase::Cooldown)
            {
                cues.push(CueKind::Transition.into());
            }
        }

        let key = CueKey::from(output);
        if self.last_cue_key != Some(key) {
            // The key only advances when an edge cue actually fires.
            let edge = match output.phase {
                Phase::Starting | Phase::Preparing => Some(CueKind::GetReady),
                Phase::Finishing => Some(CueKind::WrapUp),
                Phase::Running | Phase::Cooldown | Phase::Done => None,
            };
            if let Some(kind) = edge {
                cues.push(kind.into());
                self.last_cue_key = Some(key);
            }
        }

        self.previous_phase = Some(output.phase);
        cues
    }
}
