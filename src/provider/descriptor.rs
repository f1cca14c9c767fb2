//! Provider descriptor data structures shared by both clients.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// How `from_token` carries the session token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum TokenPlacement {
	#[default]
	/// `Authorization: Bearer <token>`.
	Bearer,
	/// Raw token in the named header.
	Header(String),
	/// Raw token in the named query parameter.
	Query(String),
}

/// Body encoding used by `login` for the `username` and `password` fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialEncoding {
	#[default]
	/// `application/json` object.
	Json,
	/// `application/x-www-form-urlencoded` pairs.
	Form,
}

/// Endpoints resolved against the provider's base address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEndpoints {
	/// Credential login endpoint (POST).
	pub login: Url,
	/// Token validation endpoint (GET).
	pub token: Url,
}

/// Immutable provider descriptor consumed by the clients.
///
/// Serializes as a [`ProviderConfig`]. Deserializing runs the checks of
/// [`ProviderDescriptorBuilder::build`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProviderConfig", into = "ProviderConfig")]
pub struct ProviderDescriptor {
	/// Base address every endpoint is resolved against.
	pub base_url: Url,
	/// Resolved endpoints.
	pub endpoints: ProviderEndpoints,
	/// Token transport for `from_token`.
	pub token_placement: TokenPlacement,
	/// Credential body encoding for `login`.
	pub credential_encoding: CredentialEncoding,
}
impl ProviderDescriptor {
	/// Creates a new builder with the default endpoint layout.
	pub fn builder() -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new()
	}

	/// Builds a descriptor for `base_url` using every default.
	pub fn from_base_url(base_url: &str) -> Result<Self, ProviderDescriptorError> {
		Self::builder().base_url_str(base_url).build()
	}
}

/// Configuration-file form of a [`ProviderDescriptor`].
///
/// Only `base_url` is required; every other field falls back to the builder defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
	/// Base address every endpoint is resolved against.
	pub base_url: Url,
	/// Login path relative to the base address.
	#[serde(default = "default_login_path")]
	pub login_path: String,
	/// Token validation path relative to the base address.
	#[serde(default = "default_token_path")]
	pub token_path: String,
	/// Token transport for `from_token`.
	#[serde(default)]
	pub token_placement: TokenPlacement,
	/// Credential body encoding for `login`.
	#[serde(default)]
	pub credential_encoding: CredentialEncoding,
}
impl From<ProviderConfig> for ProviderDescriptorBuilder {
	fn from(config: ProviderConfig) -> Self {
		ProviderDescriptorBuilder::new()
			.base_url(config.base_url)
			.login_path(config.login_path)
			.token_path(config.token_path)
			.token_placement(config.token_placement)
			.credential_encoding(config.credential_encoding)
	}
}
impl TryFrom<ProviderConfig> for ProviderDescriptor {
	type Error = ProviderDescriptorError;

	fn try_from(config: ProviderConfig) -> Result<Self, Self::Error> {
		ProviderDescriptorBuilder::from(config).build()
	}
}
impl From<ProviderDescriptor> for ProviderConfig {
	fn from(descriptor: ProviderDescriptor) -> Self {
		let relative = |endpoint: &Url| {
			endpoint
				.as_str()
				.strip_prefix(descriptor.base_url.as_str())
				.unwrap_or(endpoint.as_str())
				.to_owned()
		};

		Self {
			login_path: relative(&descriptor.endpoints.login),
			token_path: relative(&descriptor.endpoints.token),
			base_url: descriptor.base_url,
			token_placement: descriptor.token_placement,
			credential_encoding: descriptor.credential_encoding,
		}
	}
}

fn default_login_path() -> String {
	ProviderDescriptorBuilder::DEFAULT_LOGIN_PATH.into()
}

fn default_token_path() -> String {
	ProviderDescriptorBuilder::DEFAULT_TOKEN_PATH.into()
}
