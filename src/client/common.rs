//! Request construction shared by both clients.

// std
use std::collections::BTreeMap;
// crates.io
use http::{
	HeaderName, HeaderValue, Method,
	header::{ACCEPT, AUTHORIZATION},
};
// self
use crate::{
	error::TransportError,
	http::{AuthRequest, RequestBody},
	provider::{ProviderDescriptor, TokenPlacement},
};

/// Builds the credential POST for `login`.
pub(crate) fn login_request(
	descriptor: &ProviderDescriptor,
	username: &str,
	password: &str,
) -> AuthRequest {
	let fields = BTreeMap::from([
		("username".to_owned(), username.to_owned()),
		("password".to_owned(), password.to_owned()),
	]);

	AuthRequest::new(Method::POST, descriptor.endpoints.login.clone())
		.with_header(ACCEPT, HeaderValue::from_static("application/json"))
		.with_body(RequestBody { encoding: descriptor.credential_encoding, fields })
}

/// Builds the token GET for `from_token`, placing the token per the descriptor.
///
/// Fails when the token cannot travel in a header, e.g. because it contains a line break.
pub(crate) fn token_request(
	descriptor: &ProviderDescriptor,
	token: &str,
) -> Result<AuthRequest, TransportError> {
	let mut url = descriptor.endpoints.token.clone();

	if let TokenPlacement::Query(param) = &descriptor.token_placement {
		url.query_pairs_mut().append_pair(param, token);
	}

	let request = AuthRequest::new(Method::GET, url)
		.with_header(ACCEPT, HeaderValue::from_static("application/json"));

	Ok(match &descriptor.token_placement {
		TokenPlacement::Bearer =>
			request.with_header(AUTHORIZATION, sensitive_value(&format!("Bearer {token}"))?),
		TokenPlacement::Header(name) => {
			let name =
				HeaderName::from_bytes(name.as_bytes()).map_err(TransportError::invalid_request)?;

			request.with_header(name, sensitive_value(token)?)
		},
		TokenPlacement::Query(_) => request,
	})
}

fn sensitive_value(value: &str) -> Result<HeaderValue, TransportError> {
	let mut value = HeaderValue::from_str(value).map_err(TransportError::invalid_request)?;

	value.set_sensitive(true);

	Ok(value)
}
