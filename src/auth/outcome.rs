//! Closed outcome taxonomy shared by the blocking and async clients.

// self
use crate::{_prelude::*, auth::UserProfile};

/// Reason an authentication call did not succeed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
	/// The call succeeded.
	Nothing,
	/// The provider rejected the credentials or token (HTTP 401).
	Unauthorized,
	/// No response was obtained: connection failure, deadline, cancellation, or a request that
	/// could not be sent.
	Timeout,
	/// Default bucket: any status without a dedicated rule, or a success reply whose payload
	/// could not be decoded.
	ServerError,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::Nothing => "nothing",
			ErrorKind::Unauthorized => "unauthorized",
			ErrorKind::Timeout => "timeout",
			ErrorKind::ServerError => "server_error",
		}
	}

	/// Returns `true` for [`ErrorKind::Nothing`].
	pub const fn is_nothing(self) -> bool {
		matches!(self, ErrorKind::Nothing)
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Immutable result of one `login` or `from_token` call.
///
/// `status` is `true` exactly when `error` is [`ErrorKind::Nothing`] and a profile is present.
/// The fields are private and the constructors uphold that invariant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
	status: bool,
	data: Option<UserProfile>,
	error: ErrorKind,
}
impl AuthOutcome {
	/// Successful outcome carrying the decoded profile.
	pub fn success(profile: UserProfile) -> Self {
		Self { status: true, data: Some(profile), error: ErrorKind::Nothing }
	}

	/// Failed outcome.
	///
	/// A failure never reports [`ErrorKind::Nothing`]; that kind is recorded as
	/// [`ErrorKind::ServerError`].
	pub fn failure(error: ErrorKind) -> Self {
		let error = if error.is_nothing() { ErrorKind::ServerError } else { error };

		Self { status: false, data: None, error }
	}

	/// Whether the call authenticated the user.
	pub fn status(&self) -> bool {
		self.status
	}

	/// Profile of the authenticated user, present only on success.
	pub fn data(&self) -> Option<&UserProfile> {
		self.data.as_ref()
	}

	/// Failure category, [`ErrorKind::Nothing`] on success.
	pub fn error(&self) -> ErrorKind {
		self.error
	}

	/// Converts into a `Result` for callers that prefer `?`.
	pub fn into_result(self) -> Result<UserProfile, ErrorKind> {
		match self.data {
			Some(profile) if self.status => Ok(profile),
			_ => Err(self.error),
		}
	}
}
