//! Error types for `cuetimer`
//!
//! This module provides the error hierarchy shared by the time codec,
//! schedule construction, configuration loading and the CLI, together with
//! the process exit codes the binary reports.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `cuetimer` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure, bad time value)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `cuetimer` operations.
///
/// Aggregates the domain-specific errors and maps each one to an exit code.
#[derive(Debug, Error)]
pub enum CueTimerError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Schedule construction error
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Malformed time string
    #[error(transparent)]
    TimeFormat(#[from] TimeFormatError),

    /// One or more files failed `validate`
    #[error("{failed} of {total} configuration file(s) failed validation")]
    ValidationFailed {
        /// Files with errors
        failed: usize,
        /// Files checked
        total: usize,
    },

    /// Invalid command-line usage
    #[error("usage error: {0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CueTimerError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_)
            | Self::Schedule(_)
            | Self::TimeFormat(_)
            | Self::Json(_)
            | Self::Yaml(_)
            | Self::ValidationFailed { .. } => ExitCode::CONFIG_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Time Codec Errors
// ============================================================================

/// A time string that is not `m:ss` or a bare non-negative integer.
///
/// Returned as a value so callers can collect several field failures
/// before reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    /// Input was empty or whitespace only
    #[error("time value is empty")]
    Empty,

    /// More than one `:` separator
    #[error("'{0}' has more than one ':' separator")]
    TooManySeparators(String),

    /// A component is not made of ASCII digits only
    #[error("'{0}' is not a non-negative integer")]
    NotANumber(String),

    /// Seconds component of `m:ss` outside `0..=59`
    #[error("seconds component {0} is outside 0..=59")]
    SecondsOutOfRange(u64),

    /// Total does not fit the supported range
    #[error("'{0}' is too large")]
    Overflow(String),
}

// ============================================================================
// Schedule Errors
// ============================================================================

/// Schedule construction errors.
///
/// A `Schedule` that exists has passed these checks; the phase engine
/// never re-validates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Fixed cycle with a zero-length work window
    #[error("work duration must be greater than zero")]
    NonPositiveWork,

    /// Interval list with no entries
    #[error("interval list must contain at least one entry")]
    EmptyIntervals,

    /// Interval list containing a zero-length entry
    #[error("interval {index} must be greater than zero")]
    ZeroInterval {
        /// Zero-based position of the offending entry
        index: usize,
    },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the configuration file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Configuration file larger than the configured limit
    #[error("{path} is {size} bytes (limit: {limit})")]
    TooLarge {
        /// Path to the configuration file
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: usize,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// A required `${VAR:?message}` reference had no value
    #[error("environment variable '{var}' not set: {message}")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Message supplied after `:?`
        message: String,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "intervals[2]")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - validation failure that prevents configuration from being used
    Error,
    /// Warning - potential issue that does not prevent configuration loading
    Warning,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `cuetimer` operations.
pub type Result<T> = std::result::Result<T, CueTimerError>;

// ============================================================================
// Tests
// ============================================================================
