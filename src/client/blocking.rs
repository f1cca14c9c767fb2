//! Blocking client: each call parks the calling thread for one round trip.

// self
use crate::{
	_prelude::*,
	auth::AuthOutcome,
	client::common,
	error::TransportError,
	http::{AuthRequest, BlockingAuthHttpClient},
	mapper,
	obs::{self, CallKind, CallMode, CallOutcome, CallSpan},
	provider::ProviderDescriptor,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestBlockingHttpClient;

/// Authenticates users against one identity provider, blocking the calling thread.
///
/// Every call returns an [`AuthOutcome`]; rejected credentials, unreachable providers, and
/// malformed replies are reported through [`ErrorKind`](crate::auth::ErrorKind) rather than as
/// errors. The client holds no per-call state, so it can be shared across threads as long as the
/// transport is `Sync` (which [`BlockingAuthHttpClient`] requires).
pub struct SyncAuthClient<C>
where
	C: ?Sized + BlockingAuthHttpClient,
{
	/// Transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Provider endpoints and wire conventions.
	pub descriptor: ProviderDescriptor,
}
impl<C> SyncAuthClient<C>
where
	C: ?Sized + BlockingAuthHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(descriptor: ProviderDescriptor, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), descriptor }
	}

	/// Logs in with a username and password.
	pub fn login(&self, username: &str, password: &str) -> AuthOutcome {
		self.call(CallKind::Login, Ok(common::login_request(&self.descriptor, username, password)))
	}

	/// Validates a session token and returns the profile it belongs to.
	#[allow(clippy::wrong_self_convention)]
	pub fn from_token(&self, token: &str) -> AuthOutcome {
		self.call(CallKind::FromToken, common::token_request(&self.descriptor, token))
	}

	fn call(
		&self,
		kind: CallKind,
		request: Result<AuthRequest, TransportError>,
	) -> AuthOutcome {
		const MODE: CallMode = CallMode::Blocking;

		let _span = CallSpan::new(kind, MODE).entered();

		obs::record_call_outcome(kind, MODE, CallOutcome::Attempt);

		let result = request.and_then(|request| self.http_client.execute(request));
		let outcome = mapper::map_outcome(result);

		obs::record_call_outcome(kind, MODE, CallOutcome::Completed(outcome.error()));

		outcome
	}
}
#[cfg(feature = "reqwest")]
impl SyncAuthClient<ReqwestBlockingHttpClient> {
	/// Creates a client backed by a default blocking reqwest transport.
	///
	/// Must be called outside of an async runtime, as required by `reqwest::blocking`.
	pub fn new(descriptor: ProviderDescriptor) -> Result<Self> {
		Ok(Self::with_http_client(descriptor, ReqwestBlockingHttpClient::new()?))
	}

	/// Creates a client for `base_url` with the default endpoint layout.
	///
	/// Fails fast when the address cannot serve as an HTTP(S) base.
	pub fn connect(base_url: &str) -> Result<Self> {
		Self::new(ProviderDescriptor::from_base_url(base_url)?)
	}
}
impl<C> Clone for SyncAuthClient<C>
where
	C: ?Sized + BlockingAuthHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), descriptor: self.descriptor.clone() }
	}
}
impl<C> Debug for SyncAuthClient<C>
where
	C: ?Sized + BlockingAuthHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SyncAuthClient").field("descriptor", &self.descriptor).finish()
	}
}
