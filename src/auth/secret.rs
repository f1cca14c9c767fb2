//! Redacting wrapper for session tokens issued by the identity provider.

// self
use crate::_prelude::*;

/// Session token carried by a [`UserProfile`](crate::auth::UserProfile).
///
/// `Debug` and `Display` print `<redacted>`; the raw value is only reachable via
/// [`expose`](Self::expose).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a token received from the provider or supplied by the caller.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw token, e.g. to pass it back to `from_token`.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether the provider sent an empty string as the token.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
