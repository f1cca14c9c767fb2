//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `tpauth.call` with the `call` (operation) and
//!   `mode` (blocking or async) fields. The mapper logs rejected, malformed, and failed exchanges
//!   inside that span.
//! - Enable `metrics` to increment the `tpauth_call_total` counter for every attempt and every
//!   mapped outcome, labeled by `call` + `mode` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, auth::ErrorKind};

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Username/password login.
	Login,
	/// Session token validation.
	FromToken,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Login => "login",
			CallKind::FromToken => "from_token",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Which client performed the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallMode {
	/// [`SyncAuthClient`](crate::client::SyncAuthClient).
	Blocking,
	/// [`AsyncAuthClient`](crate::client::AsyncAuthClient).
	Async,
}
impl CallMode {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallMode::Blocking => "blocking",
			CallMode::Async => "async",
		}
	}
}
impl Display for CallMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Mapped result of the operation.
	Completed(ErrorKind),
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Completed(kind) => kind.as_str(),
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
