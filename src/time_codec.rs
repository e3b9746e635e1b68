//! Human-readable time strings
//!
//! Parses `m:ss` or bare-seconds text into whole seconds and renders
//! whole seconds back as display text. The two directions are deliberately
//! asymmetric: `parse_time("90")` is `90`, but `format_seconds(90)` is
//! `"1:30"`. Only `parse_time(&format_seconds(n)) == n` is guaranteed.

use crate::error::TimeFormatError;

/// Parses a time string into whole seconds.
///
/// Accepts either a bare non-negative integer (`"195"`, any magnitude) or
/// `minutes:seconds` (`"3:15"`) with `seconds` in `0..=59`. Surrounding
/// whitespace is ignored; every component must consist of ASCII digits only.
///
/// # Errors
///
/// Returns a [`TimeFormatError`] describing the first problem found:
/// empty input, more than one `:`, a non-numeric or signed component,
/// seconds outside `0..=59`, or a total that does not fit in `u32`.
pub fn parse_time(text: &str) -> Result<u32, TimeFormatError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TimeFormatError::Empty);
    }

    let total = match trimmed.split_once(':') {
        None => parse_component(trimmed)?,
        Some((minutes, seconds)) => {
            if seconds.contains(':') {
                return Err(TimeFormatError::TooManySeparators(trimmed.to_owned()));
            }
            let minutes = parse_component(minutes)?;
            let seconds = parse_component(seconds)?;
            if seconds > 59 {
                return Err(TimeFormatError::SecondsOutOfRange(seconds));
            }
            minutes
                .checked_mul(60)
                .and_then(|m| m.checked_add(seconds))
                .ok_or_else(|| TimeFormatError::Overflow(trimmed.to_owned()))?
        }
    };

    u32::try_from(total).map_err(|_| TimeFormatError::Overflow(trimmed.to_owned()))
}

/// Parses one numeric component, rejecting signs and embedded garbage.
fn parse_component(component: &str) -> Result<u64, TimeFormatError> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeFormatError::NotANumber(component.to_owned()));
    }
    component
        .parse::<u64>()
        .map_err(|_| TimeFormatError::Overflow(component.to_owned()))
}

/// Formats a (possibly fractional) number of seconds for display.
///
/// Fractions are floored. `NaN`, infinities and negative values render
/// as `"0"`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(total_seconds: f64) -> String {
    if !total_seconds.is_finite() || total_seconds < 0.0 {
        return "0".to_owned();
    }
    format_whole(total_seconds.floor() as u64)
}

/// Formats whole seconds as `m:ss`, or bare seconds below one minute.
#[must_use]
pub fn format_seconds(total_seconds: u32) -> String {
    format_whole(u64::from(total_seconds))
}

fn format_whole(total: u64) -> String {
    let minutes = total / 60;
    let seconds = total % 60;
    if minutes > 0 {
        format!("{minutes}:{seconds:02}")
    } else {
        seconds.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- parse_time ----

    #[test]
    fn test_parse_bare_seconds() {
        assert_eq!(parse_time("0").unwrap(), 0);
        assert_eq!(parse_time("45").unwrap(), 45);
        assert_eq!(parse_time("195").unwrap(), 195);
    }

    #[test]
    fn test_parse_minutes_seconds() {
        assert_eq!(parse_time("3:15").unwrap(), 195);
        assert_eq!(parse_time("0:35").unwrap(), 35);
        assert_eq!(parse_time("10:00").unwrap(), 600);
        assert_eq!(parse_time("1:5").unwrap(), 65);
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        assert_eq!(parse_time("  1:30\n").unwrap(), 90);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_time(""), Err(TimeFormatError::Empty));
        assert_eq!(parse_time("   "), Err(TimeFormatError::Empty));
    }

    #[test]
    fn test_parse_too_many_separators() {
        assert!(matches!(
            parse_time("1:2:3"),
            Err(TimeFormatError::TooManySeparators(_))
        ));
    }

    #[test]
    fn test_parse_seconds_out_of_range() {
        assert_eq!(
            parse_time("1:60"),
            Err(TimeFormatError::SecondsOutOfRange(60))
        );
    }

    #[test]
    fn test_parse_negative_rejected() {
        assert!(matches!(
            parse_time("-5"),
            Err(TimeFormatError::NotANumber(_))
        ));
        assert!(matches!(
            parse_time("-1:30"),
            Err(TimeFormatError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert!(parse_time("12abc").is_err());
        assert!(parse_time("+5").is_err());
        assert!(parse_time("1.5").is_err());
        assert!(parse_time(":30").is_err());
        assert!(parse_time("1:").is_err());
        assert!(parse_time("1 :30").is_err());
    }

    #[test]
    fn test_parse_overflow() {
        assert!(matches!(
            parse_time("99999999999999999999999"),
            Err(TimeFormatError::Overflow(_))
        ));
        assert!(matches!(
            parse_time("71582789:00"),
            Err(TimeFormatError::Overflow(_))
        ));
    }

    // ---- format ----

    #[test]
    fn test_format_under_a_minute_is_bare() {
        assert_eq!(format_seconds(0), "0");
        assert_eq!(format_seconds(7), "7");
        assert_eq!(format_seconds(59), "59");
    }

    #[test]
    fn test_format_pads_seconds() {
        assert_eq!(format_seconds(60), "1:00");
        assert_eq!(format_seconds(65), "1:05");
        assert_eq!(format_seconds(195), "3:15");
        assert_eq!(format_seconds(3600), "60:00");
    }

    #[test]
    fn test_format_time_floors_fractions() {
        assert_eq!(format_time(59.99), "59");
        assert_eq!(format_time(90.4), "1:30");
    }

    #[test]
    fn test_format_time_degenerate_inputs() {
        assert_eq!(format_time(f64::NAN), "0");
        assert_eq!(format_time(-3.0), "0");
        assert_eq!(format_time(f64::INFINITY), "0");
    }

    #[test]
    fn test_format_parse_is_not_symmetric() {
        assert_eq!(parse_time("90").unwrap(), 90);
        assert_eq!(format_seconds(90), "1:30");
    }

    #[test]
    fn test_format_max_round_trips() {
        let text = format_seconds(u32::MAX);
        assert_eq!(parse_time(&text).unwrap(), u32::MAX);
    }
}
