//! Configuration schema
//!
//! Raw, as-written timer configuration (`RawTimerConfig`) and the frozen,
//! validated form (`TimerConfig`) handed to a session.

use serde::{Deserialize, Serialize};

use crate::error::TimeFormatError;
use crate::phase::Activation;
use crate::time_codec::parse_time;

/// A duration as written in a config file: a whole number of seconds or a
/// time string such as `"0:35"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Integer seconds (`35`)
    Integer(i64),
    /// Time string (`"0:35"`, `"35"`)
    Text(String),
    /// Any other number; always rejected
    Number(f64),
}

impl TimeValue {
    /// Converts to whole seconds using the time codec's rules.
    ///
    /// # Errors
    ///
    /// Returns a [`TimeFormatError`] for negative or fractional numbers,
    /// values that overflow `u32`, and malformed strings.
    pub fn to_seconds(&self) -> Result<u32, TimeFormatError> {
        match self {
            Self::Integer(n) if *n < 0 => Err(TimeFormatError::NotANumber(n.to_string())),
            Self::Integer(n) => {
                u32::try_from(*n).map_err(|_| TimeFormatError::Overflow(n.to_string()))
            }
            Self::Text(text) => parse_time(text),
            Self::Number(n) => Err(TimeFormatError::NotANumber(n.to_string())),
        }
    }
}

impl std::fmt::Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<u32> for TimeValue {
    fn from(seconds: u32) -> Self {
        Self::Integer(i64::from(seconds))
    }
}

impl From<&str> for TimeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// Timer configuration exactly as deserialized.
///
/// Exactly one schedule form must be present: `intervals`, or both
/// `duration` and `cooldown`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawTimerConfig {
    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Source media URL; opaque to the timer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Playback position at which the schedule begins
    #[serde(
        default,
        alias = "triggerTimestamp",
        alias = "trigger_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub trigger: Option<TimeValue>,

    /// Work seconds per fixed cycle
    #[serde(default, alias = "work", skip_serializing_if = "Option::is_none")]
    pub duration: Option<TimeValue>,

    /// Rest seconds per fixed cycle
    #[serde(
        default,
        alias = "cooldownDuration",
        alias = "cooldown_duration",
        alias = "rest",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooldown: Option<TimeValue>,

    /// Explicit interval list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervals: Option<Vec<TimeValue>>,
}

/// Validated timer configuration, ready to activate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerConfig {
    /// Display title
    pub title: Option<String>,
    /// Source media URL
    pub url: Option<String>,
    /// Schedule bound to its trigger timestamp
    pub activation: Activation,
}
