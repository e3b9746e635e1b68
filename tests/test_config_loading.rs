mod common;

use std::io::Write;

use common::fixture_path;
use cuetimer::config::{ConfigLimits, ConfigLoader, LoaderOptions};
use cuetimer::error::{ConfigError, CueTimerError, ExitCode};
use cuetimer::phase::Schedule;

#[test]
fn json_fixture_uses_camel_case_aliases() {
    let loaded = ConfigLoader::with_defaults()
        .load(&fixture_path("intervals.json"))
        .unwrap();
    assert_eq!(loaded.config.title.as_deref(), Some("Tabata warm-up"));
    assert_eq!(loaded.config.activation.trigger_timestamp(), 30);
    assert_eq!(
        loaded.config.activation.schedule(),
        &Schedule::interval_list(vec![10, 20, 10, 20]).unwrap()
    );
}

#[test]
fn invalid_fixture_collects_all_issues() {
    let err = ConfigLoader::with_defaults()
        .load(&fixture_path("invalid.yaml"))
        .unwrap_err();
    let ConfigError::ValidationError { errors, .. } = &err else {
        panic!("expected validation error, got {err:?}");
    };
    let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["trigger", "intervals[1]", "intervals[2]"]);

    let top: CueTimerError = err.into();
    assert_eq!(top.exit_code(), ExitCode::CONFIG_ERROR);
}

#[test]
fn warnings_do_not_block_loading() {
    let loaded = ConfigLoader::with_defaults()
        .load(&fixture_path("short_rest.yaml"))
        .unwrap();
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(
        loaded.config.activation.schedule(),
        &Schedule::fixed_cycle(20, 3).unwrap()
    );
}

#[test]
fn interval_limit_is_configurable() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "trigger: 0\nintervals: [5, 5, 5, 5]").unwrap();

    let strict = ConfigLoader::new(LoaderOptions {
        config_limits: ConfigLimits {
            max_intervals: 3,
            max_config_size: 1024,
        },
    });
    assert!(matches!(
        strict.load(file.path()),
        Err(ConfigError::ValidationError { .. })
    ));
    assert!(ConfigLoader::with_defaults().load(file.path()).is_ok());
}

#[test]
fn unknown_keys_are_parse_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "trigger: 0\nduration: 30\ncooldown: 10\nrepeat: 3").unwrap();
    let err = ConfigLoader::with_defaults().load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }), "{err:?}");
    assert!(err.to_string().contains("repeat"));
}
