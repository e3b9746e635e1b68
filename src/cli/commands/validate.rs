//! `validate`: load and check timer configuration files.

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::ConfigLoader;
use crate::error::{ConfigError, CueTimerError};
use crate::time_codec::format_seconds;

/// Outcome for one file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trigger: Option<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Validates every file, prints a report, and fails if any file failed.
///
/// # Errors
///
/// Returns `CueTimerError::ValidationFailed` when at least one file has an
/// error (or, with `--strict`, a warning).
pub fn run(args: &ValidateArgs) -> Result<(), CueTimerError> {
    let loader = ConfigLoader::with_defaults();
    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check(&loader, path, args.strict))
        .collect();

    let failed = reports.iter().filter(|r| !r.valid).count();

    match args.format {
        OutputFormat::Human => {
            for report in &reports {
                print_human(report);
            }
        }
        OutputFormat::Json => {
            let document = serde_json::json!({
                "files": reports,
                "summary": {
                    "total": reports.len(),
                    "valid": reports.len() - failed,
                    "invalid": failed,
                },
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    if failed > 0 {
        return Err(CueTimerError::ValidationFailed {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}

fn check(loader: &ConfigLoader, path: &Path, strict: bool) -> FileReport {
    tracing::info!(file = %path.display(), "validating configuration");
    let mut report = FileReport {
        path: path.display().to_string(),
        valid: false,
        schedule: None,
        trigger: None,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    match loader.load(path) {
        Ok(result) => {
            report.warnings = result.warnings.iter().map(ToString::to_string).collect();
            report.schedule = Some(result.config.activation.schedule().summary());
            report.trigger = Some(format_seconds(
                result.config.activation.trigger_timestamp(),
            ));
            report.valid = !(strict && !report.warnings.is_empty());
        }
        Err(ConfigError::ValidationError { errors, .. }) => {
            report.errors = errors.iter().map(ToString::to_string).collect();
        }
        Err(e) => report.errors.push(e.to_string()),
    }
    report
}

fn print_human(report: &FileReport) {
    if report.valid {
        println!(
            "ok    {}  ({} from {})",
            report.path,
            report.schedule.as_deref().unwrap_or("-"),
            report.trigger.as_deref().unwrap_or("0")
        );
    } else {
        println!("FAIL  {}", report.path);
    }
    for error in &report.errors {
        println!("      {error}");
    }
    for warning in &report.warnings {
        println!("      warning: {warning}");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_valid_file() {
        let file = write_config("trigger: \"1:00\"\nduration: 30\ncooldown: 10\n");
        let report = check(&ConfigLoader::with_defaults(), file.path(), false);
        assert!(report.valid);
        assert_eq!(report.schedule.as_deref(), Some("30 / 10"));
        assert_eq!(report.trigger.as_deref(), Some("1:00"));
    }

    #[test]
    fn test_invalid_file_lists_errors() {
        let file = write_config("trigger: 0\nintervals: [0, \"x\"]\n");
        let report = check(&ConfigLoader::with_defaults(), file.path(), false);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("intervals[0]"));
    }

    #[test]
    fn test_strict_fails_on_warning() {
        let file = write_config("trigger: 0\nduration: 30\ncooldown: 2\n");
        let loader = ConfigLoader::with_defaults();
        assert!(check(&loader, file.path(), false).valid);
        assert!(!check(&loader, file.path(), true).valid);
    }

    #[test]
    fn test_missing_file() {
        let report = check(
            &ConfigLoader::with_defaults(),
            Path::new("/nonexistent/timer.yaml"),
            false,
        );
        assert!(!report.valid);
        assert!(report.errors[0].contains("not found"));
    }
}
