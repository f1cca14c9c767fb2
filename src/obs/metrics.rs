//! Call counter. Without the `metrics` feature nothing is recorded.

// self
use crate::obs::{CallKind, CallMode, CallOutcome};

/// Name of the counter bumped once per attempt and once per mapped outcome.
pub const CALL_COUNTER: &str = "tpauth_call_total";

/// Bumps [`CALL_COUNTER`] for a `kind` call made by the `mode` client.
///
/// Goes to whichever recorder is installed globally; with none installed the increment is dropped.
pub fn record_call_outcome(kind: CallKind, mode: CallMode, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		CALL_COUNTER,
		"call" => kind.as_str(),
		"mode" => mode.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, mode, outcome);
}
