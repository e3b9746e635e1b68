//! Timer schedules and activations
//!
//! A [`Schedule`] is either a repeating fixed work/rest cycle or a finite,
//! ordered list of intervals. Construction validates the shape once; the
//! phase engine relies on that and never re-checks.

use serde::Serialize;

use crate::error::ScheduleError;

/// One-time lead-in before the first work window of a fixed cycle.
pub const GET_READY_SECONDS: u32 = 4;

/// Trailing seconds of a work window reported as `Finishing`.
pub const FINISHING_SECONDS: u32 = 4;

/// Trailing seconds of a rest window reported as `Preparing`.
pub const PREPARING_SECONDS: u32 = 4;

/// Repeating `(work, rest)` cycle.
///
/// Cycle 0 is preceded by a [`GET_READY_SECONDS`] lead-in; every later
/// cycle starts straight with work. Never finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixedCycle {
    work: u32,
    rest: u32,
}

impl FixedCycle {
    /// Seconds of work per cycle (always > 0).
    #[must_use]
    pub const fn work(&self) -> u32 {
        self.work
    }

    /// Seconds of rest per cycle (may be 0).
    #[must_use]
    pub const fn rest(&self) -> u32 {
        self.rest
    }

    /// Length of cycle 0, lead-in included.
    #[must_use]
    pub const fn first_cycle_seconds(&self) -> u64 {
        GET_READY_SECONDS as u64 + self.work as u64 + self.rest as u64
    }

    /// Length of every cycle after the first.
    #[must_use]
    pub const fn cycle_seconds(&self) -> u64 {
        self.work as u64 + self.rest as u64
    }
}

/// Ordered interval lengths alternating lead-in/rest (even positions)
/// and work (odd positions). Finishes once the last entry elapses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IntervalList {
    intervals: Vec<u32>,
}

impl IntervalList {
    /// Interval lengths in seconds, all > 0, never empty.
    #[must_use]
    pub fn intervals(&self) -> &[u32] {
        &self.intervals
    }

    /// Sum of all interval lengths.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.intervals.iter().copied().map(u64::from).sum()
    }
}

/// A validated timer schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Fixed work/rest cycle, repeating forever
    FixedCycle(FixedCycle),
    /// Explicit interval list, terminating
    IntervalList(IntervalList),
}

impl Schedule {
    /// Builds a repeating work/rest schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::NonPositiveWork`] when `work` is zero.
    pub const fn fixed_cycle(work: u32, rest: u32) -> Result<Self, ScheduleError> {
        if work == 0 {
            return Err(ScheduleError::NonPositiveWork);
        }
        Ok(Self::FixedCycle(FixedCycle { work, rest }))
    }

    /// Builds a terminating interval-list schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::EmptyIntervals`] for an empty list and
    /// [`ScheduleError::ZeroInterval`] for the first zero-length entry.
    pub fn interval_list(intervals: Vec<u32>) -> Result<Self, ScheduleError> {
        if intervals.is_empty() {
            return Err(ScheduleError::EmptyIntervals);
        }
        if let Some(index) = intervals.iter().position(|&len| len == 0) {
            return Err(ScheduleError::ZeroInterval { index });
        }
        Ok(Self::IntervalList(IntervalList { intervals }))
    }

    /// Total length for terminating schedules, `None` for repeating ones.
    #[must_use]
    pub fn total_seconds(&self) -> Option<u64> {
        match self {
            Self::FixedCycle(_) => None,
            Self::IntervalList(list) => Some(list.total_seconds()),
        }
    }

    /// Whether the schedule can reach `Done`.
    #[must_use]
    pub const fn is_terminating(&self) -> bool {
        matches!(self, Self::IntervalList(_))
    }

    /// Short human-readable summary, e.g. `"0:35 / 0:25"` or `"3 intervals"`.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::FixedCycle(cycle) => format!(
                "{} / {}",
                crate::time_codec::format_seconds(cycle.work),
                crate::time_codec::format_seconds(cycle.rest)
            ),
            Self::IntervalList(list) => match list.intervals.len() {
                1 => "1 interval".to_owned(),
                n => format!("{n} intervals"),
            },
        }
    }
}

/// A schedule bound to the playback position where it begins.
///
/// Immutable for the life of the activation; start a new one to change
/// either part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activation {
    schedule: Schedule,
    trigger_timestamp: u32,
}

impl Activation {
    /// Binds `schedule` to start `trigger_timestamp` seconds into playback.
    #[must_use]
    pub const fn new(schedule: Schedule, trigger_timestamp: u32) -> Self {
        Self {
            schedule,
            trigger_timestamp,
        }
    }

    /// The activated schedule.
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Playback second at which the schedule begins.
    #[must_use]
    pub const fn trigger_timestamp(&self) -> u32 {
        self.trigger_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_cycle_rejects_zero_work() {
        assert_eq!(
            Schedule::fixed_cycle(0, 10),
            Err(ScheduleError::NonPositiveWork)
        );
    }

    #[test]
    fn test_fixed_cycle_allows_zero_rest() {
        let schedule = Schedule::fixed_cycle(30, 0).unwrap();
        let Schedule::FixedCycle(cycle) = schedule else {
            panic!("expected fixed cycle");
        };
        assert_eq!(cycle.rest(), 0);
        assert_eq!(cycle.cycle_seconds(), 30);
        assert_eq!(cycle.first_cycle_seconds(), 34);
    }

    #[test]
    fn test_interval_list_rejects_empty() {
        assert_eq!(
            Schedule::interval_list(vec![]),
            Err(ScheduleError::EmptyIntervals)
        );
    }

    #[test]
    fn test_interval_list_rejects_zero_entry() {
        assert_eq!(
            Schedule::interval_list(vec![10, 20, 0, 5, 0]),
            Err(ScheduleError::ZeroInterval { index: 2 })
        );
    }

    #[test]
    fn test_total_seconds() {
        let list = Schedule::interval_list(vec![10, 20, 10]).unwrap();
        assert_eq!(list.total_seconds(), Some(40));
        assert!(list.is_terminating());

        let cycle = Schedule::fixed_cycle(30, 10).unwrap();
        assert_eq!(cycle.total_seconds(), None);
        assert!(!cycle.is_terminating());
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            Schedule::fixed_cycle(35, 25).unwrap().summary(),
            "35 / 25"
        );
        assert_eq!(
            Schedule::fixed_cycle(90, 60).unwrap().summary(),
            "1:30 / 1:00"
        );
        assert_eq!(
            Schedule::interval_list(vec![5]).unwrap().summary(),
            "1 interval"
        );
        assert_eq!(
            Schedule::interval_list(vec![5, 10, 5]).unwrap().summary(),
            "3 intervals"
        );
    }

    #[test]
    fn test_activation_accessors() {
        let activation = Activation::new(Schedule::fixed_cycle(30, 10).unwrap(), 195);
        assert_eq!(activation.trigger_timestamp(), 195);
        assert!(matches!(activation.schedule(), Schedule::FixedCycle(_)));
    }
}
