//! Async client: the round trip is the only suspension point of each call.
//!
//! The client works on any tokio runtime, including the single-threaded `current_thread`
//! scheduler; concurrent calls on one thread interleave only while they await the provider.
//! Deadlines ([`AsyncAuthClient::with_timeout`]) need the runtime's time driver.

// self
use crate::{
	_prelude::*,
	auth::AuthOutcome,
	client::common,
	error::TransportError,
	http::{AuthHttpClient, AuthRequest, HttpReply},
	mapper,
	obs::{self, CallKind, CallMode, CallOutcome, CallSpan},
	provider::ProviderDescriptor,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Authenticates users against one identity provider without blocking the executor.
///
/// For the same transport result, every operation returns exactly the [`AuthOutcome`] its
/// [`SyncAuthClient`](crate::client::SyncAuthClient) counterpart would. The in-flight request is
/// owned by the transport future, which is dropped on every exit path (reply, failure, deadline,
/// cancellation), releasing its connection.
pub struct AsyncAuthClient<C>
where
	C: ?Sized + AuthHttpClient,
{
	/// Transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Provider endpoints and wire conventions.
	pub descriptor: ProviderDescriptor,
	/// Optional per-call deadline; expiry maps to a timeout outcome.
	pub timeout: Option<Duration>,
}
impl<C> AsyncAuthClient<C>
where
	C: ?Sized + AuthHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(descriptor: ProviderDescriptor, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), descriptor, timeout: None }
	}

	/// Sets a per-call deadline covering the whole exchange.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Logs in with a username and password.
	pub async fn login(&self, username: &str, password: &str) -> AuthOutcome {
		self.login_or_cancel(username, password, std::future::pending()).await
	}

	/// Validates a session token and returns the profile it belongs to.
	#[allow(clippy::wrong_self_convention)]
	pub async fn from_token(&self, token: &str) -> AuthOutcome {
		self.from_token_or_cancel(token, std::future::pending()).await
	}

	/// Like [`login`](Self::login), but gives up as soon as `cancel` resolves.
	///
	/// A cancelled call drops the in-flight request and reports
	/// [`ErrorKind::Timeout`](crate::auth::ErrorKind::Timeout).
	pub async fn login_or_cancel<F>(&self, username: &str, password: &str, cancel: F) -> AuthOutcome
	where
		F: Future<Output = ()>,
	{
		let request = common::login_request(&self.descriptor, username, password);

		self.call(CallKind::Login, Ok(request), cancel).await
	}

	/// Like [`from_token`](Self::from_token), but gives up as soon as `cancel` resolves.
	#[allow(clippy::wrong_self_convention)]
	pub async fn from_token_or_cancel<F>(&self, token: &str, cancel: F) -> AuthOutcome
	where
		F: Future<Output = ()>,
	{
		let request = common::token_request(&self.descriptor, token);

		self.call(CallKind::FromToken, request, cancel).await
	}

	async fn call<F>(
		&self,
		kind: CallKind,
		request: Result<AuthRequest, TransportError>,
		cancel: F,
	) -> AuthOutcome
	where
		F: Future<Output = ()>,
	{
		const MODE: CallMode = CallMode::Async;

		let span = CallSpan::new(kind, MODE);

		obs::record_call_outcome(kind, MODE, CallOutcome::Attempt);

		let outcome = span
			.instrument(async move {
				let result = tokio::select! {
					biased;
					() = cancel => Err(TransportError::Cancelled),
					result = self.exchange(request) => result,
				};

				mapper::map_outcome(result)
			})
			.await;

		obs::record_call_outcome(kind, MODE, CallOutcome::Completed(outcome.error()));

		outcome
	}

	async fn exchange(
		&self,
		request: Result<AuthRequest, TransportError>,
	) -> Result<HttpReply, TransportError> {
		let exchange = self.http_client.execute(request?);

		match self.timeout {
			Some(limit) => tokio::time::timeout(limit, exchange)
				.await
				.unwrap_or(Err(TransportError::TimedOut)),
			None => exchange.await,
		}
	}
}
#[cfg(feature = "reqwest")]
impl AsyncAuthClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(descriptor: ProviderDescriptor) -> Self {
		Self::with_http_client(descriptor, ReqwestHttpClient::default())
	}

	/// Creates a client for `base_url` with the default endpoint layout.
	///
	/// Fails fast when the address cannot serve as an HTTP(S) base.
	pub fn connect(base_url: &str) -> Result<Self> {
		Ok(Self::new(ProviderDescriptor::from_base_url(base_url)?))
	}
}
impl<C> Clone for AsyncAuthClient<C>
where
	C: ?Sized + AuthHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			descriptor: self.descriptor.clone(),
			timeout: self.timeout,
		}
	}
}
impl<C> Debug for AsyncAuthClient<C>
where
	C: ?Sized + AuthHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AsyncAuthClient")
			.field("descriptor", &self.descriptor)
			.field("timeout", &self.timeout)
			.finish()
	}
}
