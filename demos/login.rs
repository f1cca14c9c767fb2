//! Demonstrates plugging a custom transport into both clients and reading their outcomes.
//!
//! 1. Implement [`AuthHttpClient`] and [`BlockingAuthHttpClient`] for a scripted transport.
//! 2. Pass it to [`AsyncAuthClient::with_http_client`] and [`SyncAuthClient::with_http_client`].
//! 3. Branch on [`ErrorKind`] instead of handling errors.
//! 4. Point the reqwest-backed client at an address nothing listens on to see a timeout outcome.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
// self
use tpauth::{
	auth::ErrorKind,
	client::{AsyncAuthClient, ReqwestAsyncAuthClient, SyncAuthClient},
	error::TransportError,
	http::{
		AuthHttpClient, AuthRequest, BlockingAuthHttpClient, HttpReply, StatusCode, TransportFuture,
	},
	provider::{ProviderDescriptor, TokenPlacement},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let descriptor = ProviderDescriptor::builder()
		.base_url_str("https://idp.example.com/api")
		.token_placement(TokenPlacement::Header("X-Session-Token".into()))
		.build()?;
	let transport = Arc::new(ScriptedHttpClient);
	let aio: AsyncAuthClient<ScriptedHttpClient> =
		AsyncAuthClient::with_http_client(descriptor.clone(), Arc::clone(&transport));
	let sync: SyncAuthClient<ScriptedHttpClient> =
		SyncAuthClient::with_http_client(descriptor, transport);

	for (username, password) in [("demo", "demo"), ("demo", "wrong"), ("outage", "demo")] {
		let outcome = aio.login(username, password).await;

		assert_eq!(outcome, sync.login(username, password));

		match outcome.error() {
			ErrorKind::Nothing => {
				let profile = outcome.data().map(|profile| profile.name()).unwrap_or_default();

				println!("{username}/{password}: signed in as {profile}.");
			},
			kind => println!("{username}/{password}: rejected with {kind}."),
		}
	}

	let unreachable = ReqwestAsyncAuthClient::connect("http://127.0.0.1:1")?;

	println!(
		"Unreachable provider reported: {}.",
		unreachable.from_token("demo-token").await.error()
	);

	Ok(())
}

/// Transport that answers from a fixed script instead of the network.
struct ScriptedHttpClient;
impl ScriptedHttpClient {
	fn respond(request: &AuthRequest) -> Result<HttpReply, TransportError> {
		let field = |name: &str| {
			request.body.as_ref().and_then(|body| body.fields.get(name)).map(String::as_str)
		};

		match (field("username"), field("password")) {
			(Some("outage"), _) =>
				Ok(HttpReply::new(StatusCode::SERVICE_UNAVAILABLE, "maintenance")),
			(Some("demo"), Some("demo")) => Ok(HttpReply::new(
				StatusCode::OK,
				r#"{"data":{"id":1,"token":"demo-token","name":"Demo User","alias":"demo","email":"demo@example.com","phone":"","roles":[1],"permissions":[]}}"#,
			)),
			_ => Ok(HttpReply::new(StatusCode::UNAUTHORIZED, "")),
		}
	}
}
impl AuthHttpClient for ScriptedHttpClient {
	fn execute(&self, request: AuthRequest) -> TransportFuture<'_> {
		Box::pin(async move { Self::respond(&request) })
	}
}
impl BlockingAuthHttpClient for ScriptedHttpClient {
	fn execute(&self, request: AuthRequest) -> Result<HttpReply, TransportError> {
		Self::respond(&request)
	}
}
