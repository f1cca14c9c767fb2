//! Crate-level error types.
//!
//! Expected authentication failures never appear here; they travel as
//! [`AuthOutcome`](crate::auth::AuthOutcome) values. [`Error`] covers construction-time
//! misconfiguration only, while [`TransportError`] is the currency between transports and the
//! response mapper.

// self
use crate::{_prelude::*, provider::ProviderDescriptorError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error returned by client constructors.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] ProviderDescriptorError),
}

/// Configuration failures raised while constructing a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised before any HTTP response was obtained.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the identity provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the identity provider.")]
	Io(#[from] std::io::Error),
	/// The request could not be turned into a valid HTTP message.
	#[error("Request to the identity provider could not be built.")]
	InvalidRequest {
		/// Transport-specific construction failure.
		#[source]
		source: BoxError,
	},
	/// The request did not complete before its deadline.
	#[error("Identity provider did not respond in time.")]
	TimedOut,
	/// The caller cancelled the in-flight request.
	#[error("Request to the identity provider was cancelled.")]
	Cancelled,
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific request construction error.
	pub fn invalid_request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::InvalidRequest { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() {
			Self::TimedOut
		} else if e.is_builder() {
			Self::invalid_request(e)
		} else {
			Self::network(e)
		}
	}
}
