//! Phase and per-tick engine output

use serde::Serialize;

/// Named stage of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Initial lead-in
    Starting,
    /// Work window, more than the finishing window remaining
    Running,
    /// Final seconds of a work window
    Finishing,
    /// Rest window, more than the preparing window remaining
    Cooldown,
    /// Final seconds of a rest window
    Preparing,
    /// Schedule exhausted (interval lists only)
    Done,
}

impl Phase {
    /// Lowercase name used in logs, events and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Finishing => "finishing",
            Self::Cooldown => "cooldown",
            Self::Preparing => "preparing",
            Self::Done => "done",
        }
    }

    /// `Running` or `Finishing`.
    #[must_use]
    pub const fn is_work(self) -> bool {
        matches!(self, Self::Running | Self::Finishing)
    }

    /// `Cooldown` or `Preparing`.
    #[must_use]
    pub const fn is_rest(self) -> bool {
        matches!(self, Self::Cooldown | Self::Preparing)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating a schedule at one playback sample.
///
/// Recomputed from scratch every tick; never carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineOutput {
    /// Active phase
    pub phase: Phase,
    /// Whole seconds left in the active window (floor-based)
    pub seconds_remaining: u32,
    /// Fraction of the active window still remaining, in `[0, 1]`
    pub progress: f64,
    /// Cycle index (fixed cycle) or interval index (interval list);
    /// `None` once an interval list is done
    pub index: Option<u64>,
}

impl EngineOutput {
    /// Terminal output for an exhausted or not-yet-started interval list.
    #[must_use]
    pub const fn done() -> Self {
        Self {
            phase: Phase::Done,
            seconds_remaining: 0,
            progress: 1.0,
            index: None,
        }
    }
}
