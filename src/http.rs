//! Transport primitives for identity-provider calls.
//!
//! The clients never talk to an HTTP stack directly. They build an [`AuthRequest`], hand it to an
//! injected transport, and pass whatever comes back (an [`HttpReply`] or a [`TransportError`]) to
//! the [`mapper`](crate::mapper). [`AuthHttpClient`] serves the async client and
//! [`BlockingAuthHttpClient`] the blocking one; the `reqwest` feature ships an implementation of
//! each, and tests substitute fakes.

// std
use std::collections::BTreeMap;
// crates.io
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
// self
use crate::{_prelude::*, error::TransportError, provider::CredentialEncoding};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Future returned by [`AuthHttpClient::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpReply, TransportError>> + 'a + Send>>;

/// Async transport capable of performing one request/response exchange.
///
/// Implementations must be `Send + Sync + 'static` so clients can share them behind `Arc`, and
/// the returned future must own everything the in-flight request needs. Dropping the future must
/// release the connection; the async client relies on this for deadlines and cancellation.
///
/// Once a status line has arrived the exchange has a reply. A body that then fails to arrive
/// should be handed back as an empty body rather than as a [`TransportError`].
pub trait AuthHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves once the reply (status and body) is available.
	///
	/// Failures before any status was received are reported as a [`TransportError`].
	fn execute(&self, request: AuthRequest) -> TransportFuture<'_>;
}

/// Blocking counterpart of [`AuthHttpClient`], with the same reply contract.
pub trait BlockingAuthHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and blocks the calling thread until the reply is available.
	fn execute(&self, request: AuthRequest) -> Result<HttpReply, TransportError>;
}

/// Request body with the encoding chosen by the provider descriptor.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestBody {
	/// Wire encoding of `fields`.
	pub encoding: CredentialEncoding,
	/// Flat string fields, e.g. `username` and `password`.
	pub fields: BTreeMap<String, String>,
}
impl RequestBody {
	/// Serializes the fields per `encoding`, returning the content type and payload.
	pub fn encode(&self) -> (HeaderValue, Vec<u8>) {
		match self.encoding {
			CredentialEncoding::Json => {
				let object = self
					.fields
					.iter()
					.map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
					.collect::<serde_json::Map<_, _>>();

				(
					HeaderValue::from_static("application/json"),
					serde_json::Value::Object(object).to_string().into_bytes(),
				)
			},
			CredentialEncoding::Form => {
				let mut serializer = url::form_urlencoded::Serializer::new(String::new());

				serializer.extend_pairs(self.fields.iter());

				(
					HeaderValue::from_static("application/x-www-form-urlencoded"),
					serializer.finish().into_bytes(),
				)
			},
		}
	}
}
impl Debug for RequestBody {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestBody")
			.field("encoding", &self.encoding)
			.field("fields", &self.fields.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Transport-agnostic description of one outbound call.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthRequest {
	/// HTTP method.
	pub method: Method,
	/// Fully resolved endpoint, including any query parameters.
	pub url: Url,
	/// Extra request headers. Values carrying the session token are marked sensitive.
	pub headers: HeaderMap,
	/// Optional body; the transport sets `Content-Type` from its encoding.
	pub body: Option<RequestBody>,
}
impl AuthRequest {
	/// Creates a request without headers or body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new(), body: None }
	}

	/// Appends a header.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.append(name, value);

		self
	}

	/// Sets the body.
	pub fn with_body(mut self, body: RequestBody) -> Self {
		self.body = Some(body);

		self
	}

	/// Returns the headers and encoded payload to send, with `Content-Type` set from the body.
	pub fn wire_parts(&self) -> (HeaderMap, Option<Vec<u8>>) {
		let mut headers = self.headers.clone();
		let payload = self.body.as_ref().map(|body| {
			let (content_type, payload) = body.encode();

			headers.insert(header::CONTENT_TYPE, content_type);

			payload
		});

		(headers, payload)
	}
}
impl Debug for AuthRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut url = self.url.clone();

		if url.query().is_some() {
			url.set_query(Some("<redacted>"));
		}

		f.debug_struct("AuthRequest")
			.field("method", &self.method)
			.field("url", &url.as_str())
			.field("headers", &self.headers.keys().collect::<Vec<_>>())
			.field("body", &self.body)
			.finish()
	}
}

/// Reply received from the identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
	/// HTTP status code.
	pub status: StatusCode,
	/// Raw body bytes; empty when the body could not be read.
	pub body: Vec<u8>,
}
impl HttpReply {
	/// Creates a reply from a status and body.
	pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}
}

/// Async transport backed by [`ReqwestClient`].
///
/// Configure timeouts, proxies, or TLS on the wrapped client and pass it to
/// [`ReqwestHttpClient::with_client`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests fail with a timeout after `timeout`.
	pub fn with_timeout(timeout: Duration) -> Result<Self> {
		let client =
			ReqwestClient::builder().timeout(timeout).build().map_err(ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AuthHttpClient for ReqwestHttpClient {
	fn execute(&self, request: AuthRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let (headers, payload) = request.wire_parts();
			let mut builder = client.request(request.method, request.url).headers(headers);

			if let Some(payload) = payload {
				builder = builder.body(payload);
			}

			let response = client.execute(builder.build()?).await?;
			let status = response.status();
			let body = body_or_empty(status, response.bytes().await);

			Ok::<_, TransportError>(HttpReply::new(status, body))
		})
	}
}

/// Blocking transport backed by [`reqwest::blocking::Client`].
///
/// `reqwest::blocking` starts its own runtime, so values of this type must be created and
/// dropped outside of an async context.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestBlockingHttpClient(pub reqwest::blocking::Client);
#[cfg(feature = "reqwest")]
impl ReqwestBlockingHttpClient {
	/// Builds a client with reqwest's default settings.
	pub fn new() -> Result<Self> {
		let client = reqwest::blocking::Client::builder().build().map_err(ConfigError::from)?;

		Ok(Self(client))
	}

	/// Wraps an existing blocking reqwest client.
	pub fn with_client(client: reqwest::blocking::Client) -> Self {
		Self(client)
	}

	/// Builds a client whose requests fail with a timeout after `timeout`.
	pub fn with_timeout(timeout: Duration) -> Result<Self> {
		let client = reqwest::blocking::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl BlockingAuthHttpClient for ReqwestBlockingHttpClient {
	fn execute(&self, request: AuthRequest) -> Result<HttpReply, TransportError> {
		let (headers, payload) = request.wire_parts();
		let mut builder = self.0.request(request.method, request.url).headers(headers);

		if let Some(payload) = payload {
			builder = builder.body(payload);
		}

		let response = self.0.execute(builder.build()?)?;
		let status = response.status();
		let body = body_or_empty(status, response.bytes());

		Ok(HttpReply::new(status, body))
	}
}

// The status decides the outcome, so a body lost mid-read must not turn a reply into a failure.
#[cfg(feature = "reqwest")]
fn body_or_empty<B>(status: StatusCode, read: Result<B, ReqwestError>) -> Vec<u8>
where
	B: AsRef<[u8]>,
{
	match read {
		Ok(body) => body.as_ref().to_vec(),
		Err(e) => {
			#[cfg(feature = "tracing")]
			tracing::debug!(
				status = status.as_u16(),
				error = %e,
				"identity provider reply body could not be read"
			);
			#[cfg(not(feature = "tracing"))]
			let _ = (status, e);

			Vec::new()
		},
	}
}
