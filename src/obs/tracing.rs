//! Span plumbing for client calls. Without the `tracing` feature every item here is a no-op.

// self
use crate::{
	_prelude::*,
	obs::{CallKind, CallMode},
};

/// `fut` wrapped in its call span, or `fut` itself when tracing is compiled out.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// `fut` wrapped in its call span, or `fut` itself when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// The `tpauth.call` span opened around one `login` or `from_token` call.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Opens the span for a `kind` call made by the `mode` client.
	pub fn new(kind: CallKind, mode: CallMode) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("tpauth.call", call = kind.as_str(), mode = mode.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, mode);

			Self {}
		}
	}

	/// Makes the span current on this thread until the guard drops.
	///
	/// The blocking client holds the guard for the whole round trip.
	pub fn entered(self) -> CallSpanGuard {
		#[cfg(feature = "tracing")]
		{
			CallSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			CallSpanGuard {}
		}
	}

	/// Attaches the span to `fut`; it is current only while `fut` is being polled.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Keeps a [`CallSpan`] current while alive.
pub struct CallSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for CallSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CallSpanGuard").finish_non_exhaustive()
	}
}
