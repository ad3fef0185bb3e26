//! Verbose trace output.
//!
//! Per-beatmap chatter (timing point dumps, per-file decisions) goes through
//! a `Diagnostics` sink handed to the finder instead of a global flag.

use crate::beatmap::TempoChange;

pub trait Diagnostics {
    fn trace(&self, message: &str);

    /// False when messages are thrown away, so callers can skip building them.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Discards everything. Used unless verbose diagnostics are enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn trace(&self, _message: &str) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Forwards messages to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn trace(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}

/// Pick the sink matching the `verbose_diagnostics` setting.
pub fn for_verbosity(verbose: bool) -> Box<dyn Diagnostics> {
    if verbose {
        Box::new(TracingDiagnostics)
    } else {
        Box::new(SilentDiagnostics)
    }
}

/// Format a timing point list, one `Point #i: T=<offset> BPM=<bpm>` line each.
pub fn format_tempo_changes(tempo_changes: &[TempoChange]) -> String {
    let mut out = String::from("--TIMING POINTS--");
    for (i, tempo) in tempo_changes.iter().enumerate() {
        out.push_str(&format!(
            "\nPoint #{}: T={} BPM={}",
            i,
            tempo.offset_ms.round() as i64,
            tempo.bpm().round() as i64
        ));
    }
    out
}
