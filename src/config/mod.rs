//! Timer configuration
//!
//! Loads a YAML (or JSON) timer description and turns it into a validated
//! [`Activation`](crate::phase::Activation).
//!
//! ```yaml
//! title: Morning HIIT
//! trigger: "3:15"
//! duration: "0:35"
//! cooldown: "0:25"
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLimits, ConfigLoader, LoadResult, LoadWarning, LoaderOptions};
pub use schema::{RawTimerConfig, TimeValue, TimerConfig};
pub use validation::{ValidationResult, Validator};
