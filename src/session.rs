//! Timer session
//!
//! Glue between a playback clock and the phase engine: owns the current
//! activation, decides whether the timer is visible for a sample, runs the
//! engine and the cue dispatcher, and reports to logs, metrics and the
//! event stream.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::observability::events::{Event, EventEmitter};
use crate::observability::metrics;
use crate::phase::{Activation, CueDispatcher, CueRequest, EngineOutput, Phase, PhaseEngine};

/// One sample of the external playback clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSample {
    /// Playback position in seconds. May jump in either direction on seek.
    pub current_time: f64,
    /// Whether playback has reached the end of the media.
    pub ended: bool,
}

impl ClockSample {
    /// A sample taken while the media is still playable.
    #[must_use]
    pub const fn at(current_time: f64) -> Self {
        Self {
            current_time,
            ended: false,
        }
    }

    /// A sample taken after the media ended.
    #[must_use]
    pub const fn ended_at(current_time: f64) -> Self {
        Self {
            current_time,
            ended: true,
        }
    }
}

/// What one tick produced, for the renderer and the audio collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// Playback position the report was computed for.
    pub playback_time: f64,
    /// Whether the timer should be drawn at all.
    pub visible: bool,
    /// Engine output, present only while visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<EngineOutput>,
    /// Cues to play, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cues: Vec<CueRequest>,
}

impl TickReport {
    const fn hidden(playback_time: f64) -> Self {
        Self {
            playback_time,
            visible: false,
            output: None,
            cues: Vec::new(),
        }
    }
}

/// A single activation's lifetime on a playback clock.
#[derive(Debug, Default)]
pub struct TimerSession {
    engine: Option<PhaseEngine>,
    title: Option<String>,
    dispatcher: CueDispatcher,
    events: Option<Arc<EventEmitter>>,
}

impl TimerSession {
    /// Creates a session with nothing activated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an event sink.
    #[must_use]
    pub fn with_events(mut self, events: Arc<EventEmitter>) -> Self {
        self.events = Some(events);
        self
    }

    /// Activates `activation`, replacing any previous one.
    ///
    /// Cue history is cleared so the old activation's last phase cannot
    /// produce a transition cue in the new one.
    pub fn activate(&mut self, activation: Activation, title: Option<String>) {
        info!(
            schedule = %activation.schedule().summary(),
            trigger = activation.trigger_timestamp(),
            title = title.as_deref().unwrap_or(""),
            "timer activated"
        );
        self.emit(Event::SessionActivated {
            timestamp: Utc::now(),
            schedule: activation.schedule().summary(),
            trigger_timestamp: activation.trigger_timestamp(),
            title: title.clone(),
        });
        self.engine = Some(PhaseEngine::new(activation));
        self.title = title;
        self.dispatcher.reset();
    }

    /// Drops the current activation.
    pub fn deactivate(&mut self) {
        if self.engine.take().is_some() {
            debug!("timer deactivated");
        }
        self.title = None;
        self.dispatcher.reset();
    }

    /// The current activation, if any.
    #[must_use]
    pub fn activation(&self) -> Option<&Activation> {
        self.engine.as_ref().map(PhaseEngine::activation)
    }

    /// Display title of the current activation.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Whether the timer is shown for `sample`: an activation exists,
    /// playback has reached the trigger, and the media has not ended.
    #[must_use]
    pub fn is_visible(&self, sample: ClockSample) -> bool {
        self.engine.as_ref().is_some_and(|engine| {
            !sample.ended
                && sample.current_time >= f64::from(engine.activation().trigger_timestamp())
        })
    }

    /// Processes one clock sample.
    ///
    /// A hidden tick clears cue history, so re-entering the visible range
    /// starts without a remembered previous phase.
    pub fn tick(&mut self, sample: ClockSample) -> TickReport {
        if !self.is_visible(sample) {
            self.dispatcher.reset();
            return TickReport::hidden(sample.current_time);
        }
        let Some(engine) = &self.engine else {
            return TickReport::hidden(sample.current_time);
        };

        metrics::record_tick();
        let output = engine.evaluate(sample.current_time);
        let previous = self.dispatcher.previous_phase();
        let cues = self.dispatcher.on_tick(&output);

        if previous != Some(output.phase) {
            self.report_phase_change(sample.current_time, previous, &output);
        }
        metrics::set_cycle_index(output.index);

        for cue in &cues {
            trace!(kind = %cue.kind, hz = cue.tone.frequency_hz, "cue requested");
            metrics::record_cue(cue.kind);
            self.emit(Event::CueRequested {
                timestamp: Utc::now(),
                playback_time: sample.current_time,
                kind: cue.kind,
                tone: cue.tone,
            });
        }

        TickReport {
            playback_time: sample.current_time,
            visible: true,
            output: Some(output),
            cues,
        }
    }

    fn report_phase_change(
        &self,
        playback_time: f64,
        previous: Option<Phase>,
        output: &EngineOutput,
    ) {
        debug!(
            from = previous.map_or("none", Phase::as_str),
            to = %output.phase,
            index = ?output.index,
            remaining = output.seconds_remaining,
            "phase changed"
        );
        metrics::record_phase_change(output.phase);
        self.emit(Event::PhaseChanged {
            timestamp: Utc::now(),
            playback_time,
            from: previous,
            to: output.phase,
            index: output.index,
            seconds_remaining: output.seconds_remaining,
        });
        if output.phase == Phase::Done {
            info!(playback_time, "schedule completed");
            self.emit(Event::ScheduleCompleted {
                timestamp: Utc::now(),
                playback_time,
            });
        }
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::{CueKind, Schedule};

    fn session(schedule: Schedule, trigger: u32) -> TimerSession {
        let mut s = TimerSession::new();
        s.activate(Activation::new(schedule, trigger), Some("test".to_owned()));
        s
    }

    fn cue_kinds(report: &TickReport) -> Vec<CueKind> {
        report.cues.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_inactive_session_is_hidden() {
        let mut s = TimerSession::new();
        let report = s.tick(ClockSample::at(100.0));
        assert!(!report.visible);
        assert!(report.output.is_none());
        assert!(report.cues.is_empty());
    }

    #[test]
    fn test_hidden_before_trigger() {
        let mut s = session(Schedule::fixed_cycle(30, 10).unwrap(), 60);
        assert!(!s.tick(ClockSample::at(59.9)).visible);
        assert!(s.tick(ClockSample::at(60.0)).visible);
    }

    #[test]
    fn test_hidden_after_media_ends() {
        let mut s = session(Schedule::fixed_cycle(30, 10).unwrap(), 0);
        assert!(!s.tick(ClockSample::ended_at(20.0)).visible);
    }

    #[test]
    fn test_first_visible_tick_cues_get_ready() {
        let mut s = session(Schedule::fixed_cycle(30, 10).unwrap(), 10);
        let report = s.tick(ClockSample::at(10.0));
        assert_eq!(report.output.unwrap().phase, Phase::Starting);
        assert_eq!(cue_kinds(&report), vec![CueKind::GetReady]);
    }

    #[test]
    fn test_hidden_tick_resets_history() {
        let mut s = session(Schedule::fixed_cycle(30, 10).unwrap(), 10);
        s.tick(ClockSample::at(13.5));
        // Seek before the trigger, then straight into work.
        s.tick(ClockSample::at(5.0));
        let report = s.tick(ClockSample::at(15.0));
        assert_eq!(report.output.unwrap().phase, Phase::Running);
        assert!(report.cues.is_empty(), "no stale transition: {report:?}");
    }

    #[test]
    fn test_reactivation_resets_history() {
        let mut s = session(Schedule::fixed_cycle(30, 10).unwrap(), 0);
        s.tick(ClockSample::at(3.5));
        s.activate(
            Activation::new(Schedule::fixed_cycle(20, 5).unwrap(), 0),
            None,
        );
        let report = s.tick(ClockSample::at(5.0));
        assert_eq!(report.output.unwrap().phase, Phase::Running);
        assert!(report.cues.is_empty());
        assert_eq!(s.title(), None);
    }

    #[test]
    fn test_deactivate() {
        let mut s = session(Schedule::interval_list(vec![5, 5]).unwrap(), 0);
        assert!(s.activation().is_some());
        s.deactivate();
        assert!(s.activation().is_none());
        assert!(!s.tick(ClockSample::at(1.0)).visible);
    }

    #[test]
    fn test_transition_cue_reaches_report() {
        let mut s = session(Schedule::interval_list(vec![4, 10, 10]).unwrap(), 0);
        s.tick(ClockSample::at(3.5));
        let report = s.tick(ClockSample::at(4.1));
        assert_eq!(cue_kinds(&report), vec![CueKind::Transition]);
    }

    #[test]
    fn test_events_are_emitted() {
        let events = Arc::new(EventEmitter::noop());
        let mut s = TimerSession::new().with_events(Arc::clone(&events));
        s.activate(
            Activation::new(Schedule::interval_list(vec![2, 2]).unwrap(), 0),
            None,
        );
        // SessionActivated
        assert_eq!(events.event_count(), 1);
        // PhaseChanged + CueRequested(GetReady)
        s.tick(ClockSample::at(0.0));
        assert_eq!(events.event_count(), 3);
        // PhaseChanged(done) + ScheduleCompleted
        s.tick(ClockSample::at(4.0));
        assert_eq!(events.event_count(), 5);
    }

    #[test]
    fn test_report_serializes_without_empty_fields() {
        let mut s = TimerSession::new();
        let json = serde_json::to_value(s.tick(ClockSample::at(1.0))).unwrap();
        assert_eq!(json["visible"], false);
        assert!(json.get("output").is_none());
        assert!(json.get("cues").is_none());
    }
}
