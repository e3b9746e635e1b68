//! Terminal rendering of tick reports.
//!
//! Both `run` and `simulate` print a line only when what a viewer would see
//! changes (visibility, phase, whole seconds, index), plus one line per cue.

use crate::cli::args::OutputFormat;
use crate::phase::{CueRequest, EngineOutput, Phase};
use crate::session::TickReport;
use crate::time_codec::{format_seconds, format_time};

/// The parts of a report that change what is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Displayed {
    visible: bool,
    phase: Option<Phase>,
    seconds_remaining: u32,
    index: Option<u64>,
}

impl From<&TickReport> for Displayed {
    fn from(report: &TickReport) -> Self {
        Self {
            visible: report.visible,
            phase: report.output.map(|o| o.phase),
            seconds_remaining: report.output.map_or(0, |o| o.seconds_remaining),
            index: report.output.and_then(|o| o.index),
        }
    }
}

/// Turns a stream of reports into output lines, suppressing repeats.
#[derive(Debug)]
pub struct Renderer {
    format: OutputFormat,
    last: Option<Displayed>,
}

impl Renderer {
    /// Creates a renderer for `format`.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format, last: None }
    }

    /// Lines to print for `report`; empty when nothing visible changed.
    #[must_use]
    pub fn render(&mut self, report: &TickReport) -> Vec<String> {
        let displayed = Displayed::from(report);
        let changed = self.last != Some(displayed);
        self.last = Some(displayed);
        if !changed && report.cues.is_empty() {
            return Vec::new();
        }

        match self.format {
            OutputFormat::Json => serde_json::to_string(report).into_iter().collect(),
            OutputFormat::Human => {
                let mut lines = Vec::with_capacity(1 + report.cues.len());
                if changed {
                    lines.push(state_line(report.playback_time, report.output.as_ref()));
                }
                lines.extend(
                    report
                        .cues
                        .iter()
                        .map(|cue| cue_line(report.playback_time, cue)),
                );
                lines
            }
        }
    }
}

fn state_line(playback_time: f64, output: Option<&EngineOutput>) -> String {
    let clock = format_time(playback_time);
    match output {
        None => format!("{clock:>6}  -"),
        Some(o) => {
            let index = o.index.map_or_else(|| "-".to_owned(), |i| format!("#{i}"));
            format!(
                "{clock:>6}  {:<9} {:>5}  {index}",
                o.phase.as_str(),
                format_seconds(o.seconds_remaining)
            )
        }
    }
}

fn cue_line(playback_time: f64, cue: &CueRequest) -> String {
    format!(
        "{:>6}  cue {} ({} Hz, {} ms)",
        format_time(playback_time),
        cue.kind,
        cue.tone.frequency_hz,
        cue.tone.duration_ms
    )
}
