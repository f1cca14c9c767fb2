// std
use std::{
	future::Future,
	pin::Pin,
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	thread,
	time::Duration,
};
// crates.io
use parking_lot::Mutex;
// self
use tpauth::{
	auth::{AuthOutcome, ErrorKind},
	client::{AsyncAuthClient, SyncAuthClient},
	error::TransportError,
	http::{
		AuthHttpClient, AuthRequest, BlockingAuthHttpClient, HttpReply, Method, StatusCode,
		TransportFuture, header::AUTHORIZATION,
	},
	provider::ProviderDescriptor,
};

const PROFILE_BODY: &str = r#"{"data":{"id":123,"token":"valid_token","name":"John Doe","alias":"johnd","email":"john.doe@example.com","phone":"1234567890","roles":[1,2,3],"permissions":[4,5,6]}}"#;

/// Scripted result replayed for every request.
#[derive(Clone, Copy, Debug)]
enum FakeBehavior {
	Reply(StatusCode, &'static str),
	ConnectionRefused,
	Hang,
}

/// Sets its flag when dropped, proving the in-flight exchange was released.
struct ReleaseProbe(Arc<AtomicBool>);
impl Drop for ReleaseProbe {
	fn drop(&mut self) {
		self.0.store(true, Ordering::SeqCst);
	}
}

/// Fake transport implementing both the blocking and async capabilities.
#[derive(Clone)]
struct FakeHttpClient {
	behavior: FakeBehavior,
	requests: Arc<Mutex<Vec<AuthRequest>>>,
	released: Arc<AtomicBool>,
}
impl FakeHttpClient {
	fn new(behavior: FakeBehavior) -> Self {
		Self { behavior, requests: Default::default(), released: Default::default() }
	}

	fn recorded_requests(&self) -> Vec<AuthRequest> {
		self.requests.lock().clone()
	}

	fn was_released(&self) -> bool {
		self.released.load(Ordering::SeqCst)
	}

	fn replay(&self) -> Result<HttpReply, TransportError> {
		match self.behavior {
			FakeBehavior::Reply(status, body) => Ok(HttpReply::new(status, body)),
			FakeBehavior::ConnectionRefused | FakeBehavior::Hang =>
				Err(TransportError::network(std::io::Error::new(
					std::io::ErrorKind::ConnectionRefused,
					"connection refused",
				))),
		}
	}
}
impl BlockingAuthHttpClient for FakeHttpClient {
	fn execute(&self, request: AuthRequest) -> Result<HttpReply, TransportError> {
		self.requests.lock().push(request);

		self.replay()
	}
}
impl AuthHttpClient for FakeHttpClient {
	fn execute(&self, request: AuthRequest) -> TransportFuture<'_> {
		self.requests.lock().push(request);

		let probe = ReleaseProbe(self.released.clone());

		Box::pin(async move {
			let _probe = probe;

			if matches!(self.behavior, FakeBehavior::Hang) {
				std::future::pending::<()>().await;
			}

			tokio::task::yield_now().await;

			self.replay()
		})
	}
}

/// Async transport that counts how many exchanges are in flight at once.
#[derive(Default)]
struct GaugeHttpClient {
	in_flight: AtomicUsize,
	peak: AtomicUsize,
}
impl AuthHttpClient for GaugeHttpClient {
	fn execute(&self, _request: AuthRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;

			self.peak.fetch_max(now, Ordering::SeqCst);
			tokio::time::sleep(Duration::from_millis(20)).await;
			self.in_flight.fetch_sub(1, Ordering::SeqCst);

			Ok(HttpReply::new(StatusCode::OK, PROFILE_BODY))
		})
	}
}

fn descriptor() -> ProviderDescriptor {
	ProviderDescriptor::from_base_url("http://localhost")
		.expect("Localhost descriptor should build.")
}

fn sync_client(transport: &FakeHttpClient) -> SyncAuthClient<FakeHttpClient> {
	SyncAuthClient::with_http_client(descriptor(), Arc::new(transport.clone()))
}

fn async_client(transport: &FakeHttpClient) -> AsyncAuthClient<FakeHttpClient> {
	AsyncAuthClient::with_http_client(descriptor(), Arc::new(transport.clone()))
}

fn behaviors() -> [FakeBehavior; 7] {
	[
		FakeBehavior::Reply(StatusCode::OK, PROFILE_BODY),
		FakeBehavior::Reply(StatusCode::OK, "{\"data\":null}"),
		FakeBehavior::Reply(StatusCode::UNAUTHORIZED, ""),
		FakeBehavior::Reply(StatusCode::UNAUTHORIZED, PROFILE_BODY),
		FakeBehavior::Reply(StatusCode::NOT_FOUND, ""),
		FakeBehavior::Reply(StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
		FakeBehavior::ConnectionRefused,
	]
}

#[test]
fn blocking_client_covers_each_outcome() {
	let expected = [
		ErrorKind::Nothing,
		ErrorKind::ServerError,
		ErrorKind::Unauthorized,
		ErrorKind::Unauthorized,
		ErrorKind::ServerError,
		ErrorKind::ServerError,
		ErrorKind::Timeout,
	];

	for (behavior, kind) in behaviors().into_iter().zip(expected) {
		let transport = FakeHttpClient::new(behavior);
		let outcome = sync_client(&transport).login("user", "pw");

		assert_eq!(outcome.error(), kind, "Behavior {behavior:?} mapped unexpectedly.");
		assert_eq!(outcome.status(), kind == ErrorKind::Nothing);
		assert_eq!(outcome.data().is_some(), outcome.status());
	}
}

#[tokio::test]
async fn async_and_blocking_clients_agree() {
	for behavior in behaviors() {
		let transport = FakeHttpClient::new(behavior);
		let sync = sync_client(&transport);
		let aio = async_client(&transport);

		assert_eq!(
			aio.login("user", "pw").await,
			sync.login("user", "pw"),
			"Login outcomes diverged for {behavior:?}."
		);
		assert_eq!(
			aio.from_token("valid_token").await,
			sync.from_token("valid_token"),
			"Token outcomes diverged for {behavior:?}."
		);
	}
}

#[test]
fn scenario_a_login_success_carries_profile_fields() {
	let transport = FakeHttpClient::new(FakeBehavior::Reply(StatusCode::OK, PROFILE_BODY));
	let outcome = sync_client(&transport).login("user", "pw");

	assert!(outcome.status());
	assert_eq!(outcome.error(), ErrorKind::Nothing);

	let profile = outcome.into_result().expect("Scenario A should succeed.");

	assert_eq!(profile.id(), 123);
	assert_eq!(profile.token().expose(), "valid_token");
	assert_eq!(profile.name(), "John Doe");
}

#[test]
fn scenario_c_transport_failure_is_timeout() {
	let transport = FakeHttpClient::new(FakeBehavior::ConnectionRefused);

	assert_eq!(
		sync_client(&transport).from_token("valid_token"),
		AuthOutcome::failure(ErrorKind::Timeout)
	);
}

#[test]
fn requests_follow_the_provider_contract() {
	let transport = FakeHttpClient::new(FakeBehavior::Reply(StatusCode::OK, PROFILE_BODY));
	let client = sync_client(&transport);
	let _ = client.login("user", "pw");
	let _ = client.from_token("valid_token");
	let requests = transport.recorded_requests();

	assert_eq!(requests.len(), 2);

	let login = &requests[0];
	let body = login.body.as_ref().expect("Login should carry a credential body.");

	assert_eq!(login.method, Method::POST);
	assert_eq!(login.url.as_str(), "http://localhost/login");
	assert_eq!(body.fields.get("username").map(String::as_str), Some("user"));
	assert_eq!(body.fields.get("password").map(String::as_str), Some("pw"));

	let token = &requests[1];

	assert_eq!(token.method, Method::GET);
	assert_eq!(token.url.as_str(), "http://localhost/token");
	assert_eq!(
		token.headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
		Some("Bearer valid_token")
	);
	assert!(token.body.is_none());
}

#[tokio::test]
async fn token_that_cannot_be_sent_never_reaches_the_transport() {
	let transport = FakeHttpClient::new(FakeBehavior::Reply(StatusCode::OK, PROFILE_BODY));
	let token = "valid_token\r\nX-Injected: 1";

	assert_eq!(
		sync_client(&transport).from_token(token),
		AuthOutcome::failure(ErrorKind::Timeout)
	);
	assert_eq!(
		async_client(&transport).from_token(token).await,
		AuthOutcome::failure(ErrorKind::Timeout)
	);
	assert!(transport.recorded_requests().is_empty());
}

#[test]
fn repeated_from_token_is_idempotent() {
	let transport = FakeHttpClient::new(FakeBehavior::Reply(StatusCode::OK, PROFILE_BODY));
	let client = sync_client(&transport);
	let first = client.from_token("valid_token");

	for _ in 0..5 {
		assert_eq!(client.from_token("valid_token"), first);
	}

	assert_eq!(transport.recorded_requests().len(), 6);
}

#[test]
fn blocking_client_is_shareable_across_threads() {
	let transport = FakeHttpClient::new(FakeBehavior::Reply(StatusCode::UNAUTHORIZED, ""));
	let client = sync_client(&transport);
	let outcomes = thread::scope(|scope| {
		let handles = (0..4)
			.map(|_| scope.spawn(|| client.login("user", "wrong")))
			.collect::<Vec<_>>();

		handles
			.into_iter()
			.map(|handle| handle.join().expect("Login thread should not panic."))
			.collect::<Vec<_>>()
	});

	assert_eq!(outcomes.len(), 4);
	assert!(
		outcomes.iter().all(|outcome| *outcome == AuthOutcome::failure(ErrorKind::Unauthorized))
	);
	assert_eq!(transport.recorded_requests().len(), 4);
}

#[tokio::test]
async fn cancellation_releases_the_exchange_and_maps_to_timeout() {
	let transport = FakeHttpClient::new(FakeBehavior::Hang);
	let client = async_client(&transport);
	let cancel = tokio::time::sleep(Duration::from_millis(20));
	let outcome = client.from_token_or_cancel("valid_token", cancel).await;

	assert_eq!(outcome, AuthOutcome::failure(ErrorKind::Timeout));
	assert!(transport.was_released(), "Cancelled exchange must be dropped.");
}

#[tokio::test]
async fn deadline_releases_the_exchange_and_maps_to_timeout() {
	let transport = FakeHttpClient::new(FakeBehavior::Hang);
	let client = async_client(&transport).with_timeout(Duration::from_millis(20));
	let outcome = client.login("user", "pw").await;

	assert_eq!(outcome, AuthOutcome::failure(ErrorKind::Timeout));
	assert!(transport.was_released(), "Timed out exchange must be dropped.");
}

#[tokio::test]
async fn completed_exchange_is_released() {
	let transport = FakeHttpClient::new(FakeBehavior::Reply(StatusCode::OK, PROFILE_BODY));
	let outcome = async_client(&transport).login("user", "pw").await;

	assert!(outcome.status());
	assert!(transport.was_released());
}

#[tokio::test]
async fn single_thread_runtime_overlaps_in_flight_calls() {
	let transport = Arc::new(GaugeHttpClient::default());
	let client: AsyncAuthClient<GaugeHttpClient> =
		AsyncAuthClient::with_http_client(descriptor(), transport.clone());
	let (a, b, c) = tokio::join!(
		client.login("user", "pw"),
		client.from_token("valid_token"),
		client.from_token("valid_token"),
	);

	assert!(a.status() && b.status() && c.status());
	assert_eq!(b, c);
	assert_eq!(transport.peak.load(Ordering::SeqCst), 3);
}

// Compile-time check: the async client can be driven from a `Send` task.
#[allow(dead_code)]
fn assert_send_future(
	client: &AsyncAuthClient<FakeHttpClient>,
) -> Pin<Box<dyn Future<Output = AuthOutcome> + Send + '_>> {
	Box::pin(client.login("user", "pw"))
}
