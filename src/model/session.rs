//! The single active session a client holds between login and logout.

// self
use crate::{
	_prelude::*,
	model::{Secret, User, timestamp},
};

/// Authenticated session: the signed-in user plus the tokens the server issued.
///
/// The server does not report an expiry for its session tokens, so `expires_at` is
/// computed client-side as [`Session::LIFETIME`] after the session was created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
	/// Signed-in user snapshot.
	pub user: User,
	/// Bearer token attached to authenticated calls.
	pub access_token: Secret,
	/// Refresh token, if the server issued one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<Secret>,
	/// Client-computed expiry instant.
	#[serde(with = "timestamp")]
	pub expires_at: OffsetDateTime,
}
impl Session {
	/// Fixed client-side session lifetime.
	pub const LIFETIME: Duration = Duration::hours(24);

	/// Creates a session issued at `issued_at`, expiring [`Session::LIFETIME`] later.
	pub fn issued_at(
		user: User,
		access_token: impl Into<Secret>,
		refresh_token: Option<Secret>,
		issued_at: OffsetDateTime,
	) -> Self {
		Self {
			user,
			access_token: access_token.into(),
			refresh_token,
			expires_at: issued_at + Self::LIFETIME,
		}
	}

	/// Creates a session issued now.
	pub fn issued_now(
		user: User,
		access_token: impl Into<Secret>,
		refresh_token: Option<Secret>,
	) -> Self {
		Self::issued_at(user, access_token, refresh_token, OffsetDateTime::now_utc())
	}

	/// Returns `true` if the session has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}

	/// Returns `true` if the session is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Time left before expiry, clamped at zero.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
