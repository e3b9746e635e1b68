#![no_main]

use cuetimer::phase::{CueDispatcher, Schedule, evaluate_elapsed};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u16>, Vec<f64>)| {
    let (lengths, samples) = input;
    let intervals: Vec<u32> = lengths.into_iter().map(u32::from).collect();
    let schedule = match intervals.as_slice() {
        [work, rest] => Schedule::fixed_cycle(*work, *rest),
        _ => Schedule::interval_list(intervals),
    };
    let Ok(schedule) = schedule else {
        return;
    };

    let mut dispatcher = CueDispatcher::new();
    for elapsed in samples {
        let output = evaluate_elapsed(&schedule, elapsed);
        assert!((0.0..=1.0).contains(&output.progress));
        let _ = dispatcher.on_tick(&output);
    }
});
