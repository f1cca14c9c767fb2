// crates.io
use http::HeaderName;
// self
use crate::{
	_prelude::*,
	provider::{CredentialEncoding, ProviderDescriptor, ProviderEndpoints, TokenPlacement},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// No base address was supplied.
	#[error("Missing identity provider base address.")]
	MissingBaseUrl,
	/// Base address cannot be parsed.
	#[error("Identity provider base address `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Rejected input.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base address must use HTTP or HTTPS.
	#[error("Identity provider base address must use http or https, got `{scheme}`.")]
	UnsupportedScheme {
		/// Rejected scheme.
		scheme: String,
	},
	/// Endpoint path is empty.
	#[error("The {endpoint} endpoint path cannot be empty.")]
	EmptyPath {
		/// Which endpoint failed validation.
		endpoint: &'static str,
	},
	/// Endpoint path cannot be joined onto the base address.
	#[error("The {endpoint} endpoint path is invalid.")]
	InvalidEndpointPath {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint path resolves outside the base address.
	#[error("The {endpoint} endpoint `{url}` escapes the identity provider base address.")]
	EndpointOutsideBase {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Resolved address that was rejected.
		url: String,
	},
	/// Token header name is not a valid HTTP header name.
	#[error("Token header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Rejected header name.
		name: String,
	},
	/// Token query parameter name is empty.
	#[error("Token query parameter name cannot be empty.")]
	EmptyQueryParameter,
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Raw base address, parsed during [`build`](Self::build).
	pub base_url: Option<String>,
	/// Login path relative to the base address.
	pub login_path: String,
	/// Token validation path relative to the base address.
	pub token_path: String,
	/// Token transport for `from_token`.
	pub token_placement: TokenPlacement,
	/// Credential body encoding for `login`.
	pub credential_encoding: CredentialEncoding,
}
impl ProviderDescriptorBuilder {
	/// Default login path.
	pub const DEFAULT_LOGIN_PATH: &'static str = "login";
	/// Default token validation path.
	pub const DEFAULT_TOKEN_PATH: &'static str = "token";

	/// Creates a new builder with the default endpoint layout.
	pub fn new() -> Self {
		Self {
			base_url: None,
			login_path: Self::DEFAULT_LOGIN_PATH.into(),
			token_path: Self::DEFAULT_TOKEN_PATH.into(),
			token_placement: TokenPlacement::default(),
			credential_encoding: CredentialEncoding::default(),
		}
	}

	/// Sets the base address.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url.into());

		self
	}

	/// Sets the base address from an unparsed string; parsing happens in [`build`](Self::build).
	pub fn base_url_str(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());

		self
	}

	/// Overrides the login path.
	pub fn login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Overrides the token validation path.
	pub fn token_path(mut self, path: impl Into<String>) -> Self {
		self.token_path = path.into();

		self
	}

	/// Overrides how `from_token` carries the token.
	pub fn token_placement(mut self, placement: TokenPlacement) -> Self {
		self.token_placement = placement;

		self
	}

	/// Overrides the credential body encoding.
	pub fn credential_encoding(mut self, encoding: CredentialEncoding) -> Self {
		self.credential_encoding = encoding;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let raw = self.base_url.ok_or(ProviderDescriptorError::MissingBaseUrl)?;
		let base_url = parse_base_url(&raw)?;
		let endpoints = ProviderEndpoints {
			login: resolve_endpoint(&base_url, "login", &self.login_path)?,
			token: resolve_endpoint(&base_url, "token", &self.token_path)?,
		};

		validate_token_placement(&self.token_placement)?;

		Ok(ProviderDescriptor {
			base_url,
			endpoints,
			token_placement: self.token_placement,
			credential_encoding: self.credential_encoding,
		})
	}
}
impl Default for ProviderDescriptorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn parse_base_url(raw: &str) -> Result<Url, ProviderDescriptorError> {
	let mut url = Url::parse(raw.trim())
		.map_err(|source| ProviderDescriptorError::InvalidBaseUrl { url: raw.to_owned(), source })?;

	if !matches!(url.scheme(), "http" | "https") {
		return Err(ProviderDescriptorError::UnsupportedScheme { scheme: url.scheme().to_owned() });
	}
	// Relative joins replace the last path segment unless the base ends with a slash.
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}

fn resolve_endpoint(
	base: &Url,
	endpoint: &'static str,
	path: &str,
) -> Result<Url, ProviderDescriptorError> {
	let relative = path.trim().trim_start_matches('/');

	if relative.is_empty() {
		return Err(ProviderDescriptorError::EmptyPath { endpoint });
	}

	let url = base
		.join(relative)
		.map_err(|source| ProviderDescriptorError::InvalidEndpointPath { endpoint, source })?;

	// Absolute inputs and `..` segments can leave the base; the base path ends with `/`.
	if url.origin() != base.origin() || !url.path().starts_with(base.path()) {
		return Err(ProviderDescriptorError::EndpointOutsideBase { endpoint, url: url.into() });
	}

	Ok(url)
}

fn validate_token_placement(placement: &TokenPlacement) -> Result<(), ProviderDescriptorError> {
	match placement {
		TokenPlacement::Bearer => Ok(()),
		TokenPlacement::Header(name) =>
			match HeaderName::from_bytes(name.as_bytes()) {
				Ok(_) => Ok(()),
				Err(_) => Err(ProviderDescriptorError::InvalidHeaderName { name: name.clone() }),
			},
		TokenPlacement::Query(name) =>
			if name.trim().is_empty() {
				Err(ProviderDescriptorError::EmptyQueryParameter)
			} else {
				Ok(())
			},
	}
}
