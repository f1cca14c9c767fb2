//! Identity record returned by the provider after a successful login or token check.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Authenticated identity decoded from the provider's `data` object.
///
/// Profiles are only produced by the response mapper and never change afterwards, so the fields
/// are private and exposed through accessors. Role and permission identifiers are kept in ordered
/// sets; duplicates in the payload collapse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	id: i64,
	token: TokenSecret,
	name: String,
	alias: String,
	email: String,
	phone: String,
	roles: BTreeSet<i64>,
	permissions: BTreeSet<i64>,
}
impl UserProfile {
	/// Provider-assigned user identifier.
	pub fn id(&self) -> i64 {
		self.id
	}

	/// Session token for subsequent [`from_token`](crate::client::SyncAuthClient::from_token)
	/// calls.
	pub fn token(&self) -> &TokenSecret {
		&self.token
	}

	/// Display name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Short alias or handle.
	pub fn alias(&self) -> &str {
		&self.alias
	}

	/// Contact email address.
	pub fn email(&self) -> &str {
		&self.email
	}

	/// Contact phone number.
	pub fn phone(&self) -> &str {
		&self.phone
	}

	/// Role identifiers granted to the user.
	pub fn roles(&self) -> &BTreeSet<i64> {
		&self.roles
	}

	/// Permission identifiers granted to the user.
	pub fn permissions(&self) -> &BTreeSet<i64> {
		&self.permissions
	}

	/// Returns `true` if the user holds `role`.
	pub fn has_role(&self, role: i64) -> bool {
		self.roles.contains(&role)
	}

	/// Returns `true` if the user holds `permission`.
	pub fn has_permission(&self, permission: i64) -> bool {
		self.permissions.contains(&permission)
	}
}
