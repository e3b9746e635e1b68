//! Configuration loader
//!
//! Pipeline: size check, read, BOM strip, `${VAR}` expansion, YAML parse,
//! validation, freeze.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::schema::{RawTimerConfig, TimerConfig};
use crate::config::validation::Validator;
use crate::error::ConfigError;

/// Options for the configuration loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Limits for configuration size.
    pub config_limits: ConfigLimits,
}

/// Limits that keep a hostile or runaway config from exhausting memory.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum number of entries in an interval list.
    pub max_intervals: usize,

    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_intervals: env_or("CUETIMER_MAX_INTERVALS", 1000),
            max_config_size: env_or("CUETIMER_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<TimerConfig>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} at {location}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Timer configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Loads and validates the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file is missing, unreadable or larger than the size limit
    /// - A required `${VAR:?msg}` reference is unset
    /// - YAML parsing fails or the document is empty
    /// - Validation reports any error
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let limit = self.options.config_limits.max_config_size;
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        if usize::try_from(metadata.len()).map_or(true, |size| size > limit) {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit,
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        debug!(path = %path.display(), bytes = content.len(), "loading timer config");
        self.load_str(&content, path)
    }

    /// Loads a configuration from in-memory text. `origin` labels errors.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus the file checks.
    pub fn load_str(&self, content: &str, origin: &Path) -> Result<LoadResult, ConfigError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let location = origin.display().to_string();

        let (expanded, unset) = expand_env(content, |name| std::env::var(name).ok())?;
        let mut warnings: Vec<LoadWarning> = unset
            .into_iter()
            .map(|var| LoadWarning {
                message: format!("environment variable '{var}' is not set, using empty string"),
                location: Some(location.clone()),
            })
            .collect();

        let raw = parse_raw(&expanded, origin)?;

        let result = Validator::new().validate(&raw, &self.options.config_limits);
        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: location,
                errors: result.errors,
            });
        }
        warnings.extend(result.warnings.into_iter().map(|issue| LoadWarning {
            message: issue.message,
            location: Some(issue.path),
        }));

        let config = result.config.ok_or_else(|| ConfigError::ValidationError {
            path: location,
            errors: Vec::new(),
        })?;

        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }
}

fn parse_raw(text: &str, origin: &Path) -> Result<RawTimerConfig, ConfigError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| parse_error(origin, &e))?;
    if value.is_null() {
        return Err(ConfigError::ParseError {
            path: origin.to_path_buf(),
            line: None,
            message: "configuration file is empty".to_string(),
        });
    }
    serde_yaml::from_value(value).map_err(|e| parse_error(origin, &e))
}

fn parse_error(origin: &Path, e: &serde_yaml::Error) -> ConfigError {
    ConfigError::ParseError {
        path: PathBuf::from(origin),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    }
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expands `${VAR}`, `${VAR:-default}`, `${VAR:?message}` and `$$` in raw
/// text before YAML parsing.
///
/// Returns the expanded text and the names of plain `${VAR}` references that
/// had no value (they expand to the empty string).
fn expand_env<F>(text: &str, lookup: F) -> Result<(String, Vec<String>), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut unset = Vec::new();
    let mut rest = text;

    while let Some(at) = rest.find('$') {
        out.push_str(&rest[..at]);
        let tail = &rest[at + 1..];
        if let Some(after) = tail.strip_prefix('$') {
            out.push('$');
            rest = after;
        } else if let Some(body) = tail.strip_prefix('{') {
            let close = body.find('}').ok_or_else(|| ConfigError::ParseError {
                path: PathBuf::new(),
                line: None,
                message: format!("unclosed environment variable reference: ${{{body}"),
            })?;
            let reference = &body[..close];
            if let Some((name, default)) = reference.split_once(":-") {
                out.push_str(&lookup(name).unwrap_or_else(|| default.to_string()));
            } else if let Some((name, message)) = reference.split_once(":?") {
                let value = lookup(name).ok_or_else(|| ConfigError::EnvVarNotSet {
                    var: name.to_string(),
                    message: message.to_string(),
                })?;
                out.push_str(&value);
            } else if let Some(value) = lookup(reference) {
                out.push_str(&value);
            } else {
                unset.push(reference.to_string());
            }
            rest = &body[close + 1..];
        } else {
            out.push('$');
            rest = tail;
        }
    }
    out.push_str(rest);
    Ok((out, unset))
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
