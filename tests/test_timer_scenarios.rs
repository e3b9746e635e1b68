//! End-to-end scenarios through the public library API: schedule, engine,
//! cue dispatch and the session's visibility rules.

use cuetimer::config::ConfigLoader;
use cuetimer::phase::{
    Activation, CueDispatcher, CueKind, Phase, PhaseEngine, Schedule, evaluate_elapsed,
};
use cuetimer::session::{ClockSample, TimerSession};
use std::path::Path;

fn kinds(cues: &[cuetimer::phase::CueRequest]) -> Vec<CueKind> {
    cues.iter().map(|c| c.kind).collect()
}

#[test]
fn fixed_cycle_reference_points() {
    let schedule = Schedule::fixed_cycle(30, 10).unwrap();
    let cases = [
        (0.0, Phase::Starting, 4, 0),
        (4.0, Phase::Running, 30, 0),
        (30.0, Phase::Finishing, 4, 0),
        (34.0, Phase::Cooldown, 10, 0),
        (40.0, Phase::Preparing, 4, 0),
        (44.0, Phase::Running, 30, 1),
        (84.0, Phase::Running, 30, 2),
    ];
    for (elapsed, phase, remaining, index) in cases {
        let output = evaluate_elapsed(&schedule, elapsed);
        assert_eq!(output.phase, phase, "at {elapsed}");
        assert_eq!(output.seconds_remaining, remaining, "at {elapsed}");
        assert_eq!(output.index, Some(index), "at {elapsed}");
    }
}

#[test]
fn interval_list_reference_points() {
    let schedule = Schedule::interval_list(vec![10, 20, 10]).unwrap();

    let running = evaluate_elapsed(&schedule, 10.0);
    assert_eq!(running.phase, Phase::Running);
    assert_eq!(running.index, Some(1));
    assert_eq!(running.seconds_remaining, 20);

    let cooldown = evaluate_elapsed(&schedule, 30.0);
    assert_eq!(cooldown.phase, Phase::Cooldown);
    assert_eq!(cooldown.seconds_remaining, 10);

    let done = evaluate_elapsed(&schedule, 40.0);
    assert_eq!(done.phase, Phase::Done);
    assert!((done.progress - 1.0).abs() < f64::EPSILON);
    assert_eq!(done.index, None);
}

#[test]
fn negative_elapsed_holds_fixed_cycle_at_lead_in() {
    // Clamped rather than extrapolated: a sample before the trigger reads
    // as "not started", never as a lead-in longer than four seconds.
    let schedule = Schedule::fixed_cycle(30, 10).unwrap();
    let output = evaluate_elapsed(&schedule, -12.5);
    assert_eq!(output.phase, Phase::Starting);
    assert_eq!(output.seconds_remaining, 4);
    assert!((output.progress - 1.0).abs() < f64::EPSILON);
}

#[test]
fn negative_elapsed_is_done_for_interval_list() {
    let schedule = Schedule::interval_list(vec![5, 5]).unwrap();
    assert_eq!(evaluate_elapsed(&schedule, -0.1).phase, Phase::Done);
}

#[test]
fn engine_recomputes_after_backward_seek() {
    let engine = PhaseEngine::new(Activation::new(Schedule::fixed_cycle(30, 10).unwrap(), 100));
    let before = engine.evaluate(150.0);
    let _ = engine.evaluate(400.0);
    assert_eq!(engine.evaluate(150.0), before);
}

#[test]
fn one_full_fixed_cycle_of_cues() {
    let schedule = Schedule::fixed_cycle(10, 6).unwrap();
    let mut dispatcher = CueDispatcher::new();
    let mut fired = Vec::new();
    // Lead-in, work, rest and the first second of cycle 1, sampled four
    // times a second.
    for i in 0..(21 * 4) {
        let output = evaluate_elapsed(&schedule, f64::from(i) * 0.25);
        fired.extend(kinds(&dispatcher.on_tick(&output)));
    }
    let count = |kind| fired.iter().filter(|&&k| k == kind).count();
    // 4 lead-in ticks, 4 wrap-up ticks, 4 preparing ticks
    assert_eq!(count(CueKind::GetReady), 8);
    assert_eq!(count(CueKind::WrapUp), 4);
    // into work, into cooldown, into work of cycle 1
    assert_eq!(count(CueKind::Transition), 3);
}

#[test]
fn session_hides_before_trigger_and_after_end() {
    let mut session = TimerSession::new();
    session.activate(
        Activation::new(Schedule::interval_list(vec![4, 10]).unwrap(), 30),
        Some("ladder".to_owned()),
    );
    assert!(!session.tick(ClockSample::at(29.0)).visible);

    let first = session.tick(ClockSample::at(30.0));
    assert!(first.visible);
    assert_eq!(kinds(&first.cues), vec![CueKind::GetReady]);

    assert!(!session.tick(ClockSample::ended_at(35.0)).visible);
}

#[test]
fn session_seek_back_into_lead_in_cues_get_ready() {
    let mut session = TimerSession::new();
    session.activate(
        Activation::new(Schedule::fixed_cycle(30, 10).unwrap(), 0),
        None,
    );
    session.tick(ClockSample::at(20.0)); // running
    // Seek backwards into the lead-in: Starting emits its own cue.
    let report = session.tick(ClockSample::at(1.0));
    assert_eq!(report.output.unwrap().phase, Phase::Starting);
    assert_eq!(kinds(&report.cues), vec![CueKind::GetReady]);
}

#[test]
fn loaded_config_drives_a_session() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/hiit.yaml");
    let loaded = ConfigLoader::with_defaults().load(&path).unwrap();
    assert!(loaded.warnings.is_empty());

    let mut session = TimerSession::new();
    session.activate(loaded.config.activation.clone(), loaded.config.title.clone());
    assert_eq!(session.title(), Some("Morning HIIT"));

    session.tick(ClockSample::at(198.5));
    let report = session.tick(ClockSample::at(199.0));
    let output = report.output.unwrap();
    assert_eq!(output.phase, Phase::Running);
    assert_eq!(output.seconds_remaining, 35);
    assert_eq!(kinds(&report.cues), vec![CueKind::Transition]);
}
