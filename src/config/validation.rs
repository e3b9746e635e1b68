//! Configuration validation
//!
//! Turns a [`RawTimerConfig`] into a [`TimerConfig`]. Every field is
//! checked and all issues are collected before reporting, so a config with
//! three bad intervals yields three errors rather than one.

use crate::config::loader::ConfigLimits;
use crate::config::schema::{RawTimerConfig, TimeValue, TimerConfig};
use crate::error::{Severity, ValidationIssue};
use crate::phase::{Activation, FINISHING_SECONDS, PREPARING_SECONDS, Schedule};

/// Outcome of validating one raw configuration.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validated configuration; `None` whenever `errors` is non-empty.
    pub config: Option<TimerConfig>,

    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Timer configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `raw` against `limits` and builds the activation when no
    /// errors were found.
    pub fn validate(&mut self, raw: &RawTimerConfig, limits: &ConfigLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        if raw.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.add_warning("title", "title is empty");
        }

        let trigger = match &raw.trigger {
            Some(value) => self.seconds("trigger", value),
            None => {
                self.add_error("trigger", "trigger timestamp is required");
                None
            }
        };

        let schedule = self.validate_schedule(raw, limits);

        let config = match (trigger, schedule) {
            (Some(trigger), Some(schedule)) if self.errors.is_empty() => Some(TimerConfig {
                title: raw.title.clone(),
                url: raw.url.clone(),
                activation: Activation::new(schedule, trigger),
            }),
            _ => None,
        };

        ValidationResult {
            config,
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_schedule(
        &mut self,
        raw: &RawTimerConfig,
        limits: &ConfigLimits,
    ) -> Option<Schedule> {
        let has_cycle = raw.duration.is_some() || raw.cooldown.is_some();
        match (&raw.intervals, has_cycle) {
            (Some(_), true) => {
                self.add_error(
                    "intervals",
                    "use either intervals or duration/cooldown, not both",
                );
                None
            }
            (Some(intervals), false) => self.validate_intervals(intervals, limits),
            (None, true) => self.validate_fixed_cycle(raw),
            (None, false) => {
                self.add_error(
                    "duration",
                    "a schedule is required: set duration and cooldown, or intervals",
                );
                None
            }
        }
    }

    fn validate_fixed_cycle(&mut self, raw: &RawTimerConfig) -> Option<Schedule> {
        let work = match &raw.duration {
            Some(value) => self.seconds("duration", value),
            None => {
                self.add_error("duration", "duration is required when cooldown is set");
                None
            }
        };
        let rest = match &raw.cooldown {
            Some(value) => self.seconds("cooldown", value),
            None => {
                self.add_error("cooldown", "cooldown is required when duration is set");
                None
            }
        };

        if work == Some(0) {
            self.add_error("duration", "duration must be greater than zero");
        } else if work.is_some_and(|w| w <= FINISHING_SECONDS) {
            self.add_warning(
                "duration",
                &format!("duration of {FINISHING_SECONDS}s or less is entirely wrap-up"),
            );
        }
        if rest.is_some_and(|r| r <= PREPARING_SECONDS) {
            self.add_warning(
                "cooldown",
                &format!("cooldown of {PREPARING_SECONDS}s or less is entirely get-ready"),
            );
        }

        Schedule::fixed_cycle(work?, rest?).ok()
    }

    fn validate_intervals(
        &mut self,
        intervals: &[TimeValue],
        limits: &ConfigLimits,
    ) -> Option<Schedule> {
        if intervals.is_empty() {
            self.add_error("intervals", "interval list must contain at least one entry");
            return None;
        }
        if intervals.len() > limits.max_intervals {
            self.add_error(
                "intervals",
                &format!(
                    "{} intervals exceeds the limit of {}",
                    intervals.len(),
                    limits.max_intervals
                ),
            );
            return None;
        }
        if intervals.len() == 1 {
            self.add_warning(
                "intervals",
                "a single interval is only a lead-in; add work and rest entries",
            );
        }

        let mut seconds = Vec::with_capacity(intervals.len());
        for (i, value) in intervals.iter().enumerate() {
            let path = format!("intervals[{i}]");
            match self.seconds(&path, value) {
                Some(0) => self.add_error(&path, "interval must be greater than zero"),
                Some(s) => seconds.push(s),
                None => {}
            }
        }

        if seconds.len() == intervals.len() {
            Schedule::interval_list(seconds).ok()
        } else {
            None
        }
    }

    /// Converts a time value, recording an error on failure.
    fn seconds(&mut self, path: &str, value: &TimeValue) -> Option<u32> {
        match value.to_seconds() {
            Ok(s) => Some(s),
            Err(e) => {
                self.add_error(path, &format!("invalid time value '{value}': {e}"));
                None
            }
        }
    }

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}
