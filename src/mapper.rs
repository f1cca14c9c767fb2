//! Translation of one HTTP attempt into an [`AuthOutcome`].
//!
//! Both clients route every exchange through [`map_outcome`], so the blocking and async paths
//! cannot disagree. Status handling is a single declarative table, [`STATUS_RULES`], with
//! [`DEFAULT_RULE`] catching every status it does not list:
//!
//! | Input                          | Outcome                      |
//! |--------------------------------|------------------------------|
//! | 200 with a decodable `data`    | success with the profile     |
//! | 200 with missing/invalid `data`| [`ErrorKind::ServerError`]   |
//! | 401                            | [`ErrorKind::Unauthorized`]  |
//! | any other status               | [`ErrorKind::ServerError`]   |
//! | [`TransportError`]             | [`ErrorKind::Timeout`]       |

// crates.io
use http::StatusCode;
// self
use crate::{
	_prelude::*,
	auth::{AuthOutcome, ErrorKind, UserProfile},
	error::TransportError,
	http::HttpReply,
};

/// What the mapper does with a reply carrying a given status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusRule {
	/// Decode the body's `data` object into a [`UserProfile`].
	DecodeProfile,
	/// Fail with the given kind, ignoring the body.
	Reject(ErrorKind),
}

/// Status codes with dedicated handling.
pub const STATUS_RULES: &[(StatusCode, StatusRule)] = &[
	(StatusCode::OK, StatusRule::DecodeProfile),
	(StatusCode::UNAUTHORIZED, StatusRule::Reject(ErrorKind::Unauthorized)),
];

/// Rule applied to every status missing from [`STATUS_RULES`].
pub const DEFAULT_RULE: StatusRule = StatusRule::Reject(ErrorKind::ServerError);

/// Success payload envelope: `{"data": {...}}`.
#[derive(Deserialize)]
struct ProfileEnvelope {
	data: UserProfile,
}

/// Looks up the rule for `status`.
pub fn rule_for(status: StatusCode) -> StatusRule {
	STATUS_RULES
		.iter()
		.find(|(code, _)| *code == status)
		.map(|(_, rule)| *rule)
		.unwrap_or(DEFAULT_RULE)
}

/// Maps the result of one transport exchange.
pub fn map_outcome(outcome: Result<HttpReply, TransportError>) -> AuthOutcome {
	match outcome {
		Ok(reply) => map_reply(&reply),
		Err(e) => map_transport_failure(&e),
	}
}

/// Maps a complete reply according to [`STATUS_RULES`].
pub fn map_reply(reply: &HttpReply) -> AuthOutcome {
	match rule_for(reply.status) {
		StatusRule::DecodeProfile => match decode_profile(&reply.body) {
			Ok(profile) => AuthOutcome::success(profile),
			Err(e) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(
					status = reply.status.as_u16(),
					path = %e.path(),
					error = %e.inner(),
					"identity provider returned a malformed success payload"
				);
				#[cfg(not(feature = "tracing"))]
				let _ = e;

				AuthOutcome::failure(ErrorKind::ServerError)
			},
		},
		StatusRule::Reject(kind) => {
			#[cfg(feature = "tracing")]
			tracing::debug!(
				status = reply.status.as_u16(),
				error = kind.as_str(),
				"identity provider rejected the call"
			);

			AuthOutcome::failure(kind)
		},
	}
}

/// Maps a failure that happened before any reply was obtained.
pub fn map_transport_failure(error: &TransportError) -> AuthOutcome {
	#[cfg(feature = "tracing")]
	tracing::warn!(error = %error, "identity provider call failed before a reply was received");
	#[cfg(not(feature = "tracing"))]
	let _ = error;

	AuthOutcome::failure(ErrorKind::Timeout)
}

fn decode_profile(
	body: &[u8],
) -> Result<UserProfile, serde_path_to_error::Error<serde_json::Error>> {
	let mut de = serde_json::Deserializer::from_slice(body);
	let envelope: ProfileEnvelope = serde_path_to_error::deserialize(&mut de)?;

	Ok(envelope.data)
}
