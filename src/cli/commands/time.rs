//! `time parse` / `time format`.

use crate::cli::args::{TimeCommand, TimeSubcommand};
use crate::error::CueTimerError;
use crate::time_codec::{format_time, parse_time};

/// Converts between time strings and seconds and prints the result.
///
/// # Errors
///
/// Returns a time format error when `parse` is given malformed text.
pub fn run(cmd: &TimeCommand) -> Result<(), CueTimerError> {
    println!("{}", convert(&cmd.subcommand)?);
    Ok(())
}

fn convert(subcommand: &TimeSubcommand) -> Result<String, CueTimerError> {
    match subcommand {
        TimeSubcommand::Parse { text } => Ok(parse_time(text)?.to_string()),
        TimeSubcommand::Format { seconds } => Ok(format_time(*seconds)),
    }
}
