//! Metrics collection for `cuetimer`.
//!
//! Prometheus-compatible counters and gauges for the sampling loop. All
//! label values come from closed enums, so cardinality is bounded.

use std::sync::atomic::{AtomicBool, Ordering};

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::CueTimerError;
use crate::phase::{CueKind, Phase};

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initializes the global metrics recorder.
///
/// When `port` is `Some`, a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`. When `None`, the recorder is installed without
/// an HTTP endpoint.
///
/// # Errors
///
/// Returns `CueTimerError::Io` if the recorder or HTTP listener
/// cannot be installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), CueTimerError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| CueTimerError::Io(std::io::Error::other(e.to_string())))?;

    describe_metrics();
    Ok(())
}

/// Registers metric descriptions with the global recorder.
fn describe_metrics() {
    describe_counter!(
        "cuetimer_ticks_total",
        "Total number of playback samples evaluated"
    );
    describe_counter!("cuetimer_cues_total", "Audio cues requested by kind");
    describe_counter!(
        "cuetimer_phase_changes_total",
        "Phase changes by destination phase"
    );
    describe_gauge!(
        "cuetimer_cycle_index",
        "Current cycle or interval index (-1 when done)"
    );
}

/// Records one evaluated playback sample.
pub fn record_tick() {
    counter!("cuetimer_ticks_total").increment(1);
}

/// Records a requested cue.
pub fn record_cue(kind: CueKind) {
    counter!("cuetimer_cues_total", "kind" => kind.as_str()).increment(1);
}

/// Records a phase change into `to`.
pub fn record_phase_change(to: Phase) {
    counter!("cuetimer_phase_changes_total", "phase" => to.as_str()).increment(1);
}

/// Sets the current cycle/interval index gauge.
#[allow(clippy::cast_precision_loss)]
pub fn set_cycle_index(index: Option<u64>) {
    gauge!("cuetimer_cycle_index").set(index.map_or(-1.0, |i| i as f64));
}
