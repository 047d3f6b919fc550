//! User snapshots returned by the Authflow API.

// self
use crate::{_prelude::*, model::timestamp};

/// Authorization role attached to a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// Operator across every tenant.
	SuperAdmin,
	/// Administrator of a single tenant.
	TenantAdmin,
	/// Regular end user.
	User,
}
impl Role {
	/// Returns the wire label for the role.
	pub const fn as_str(self) -> &'static str {
		match self {
			Role::SuperAdmin => "super_admin",
			Role::TenantAdmin => "tenant_admin",
			Role::User => "user",
		}
	}
}
impl Display for Role {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Immutable user snapshot as returned by the server.
///
/// `emailVerified` and `mfaEnabled` default to `false` and `createdAt` to the decode instant
/// when the server leaves them out (the login payload does); a present but malformed
/// timestamp also decodes to the current instant. `lastLogin` is never fabricated: absent or
/// `null` stays `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	/// Server-issued identifier.
	pub id: String,
	/// Primary email address.
	pub email: String,
	/// Authorization role.
	pub role: Role,
	/// Whether the email address has been confirmed.
	#[serde(default)]
	pub email_verified: bool,
	/// Whether a second factor is enrolled.
	#[serde(default)]
	pub mfa_enabled: bool,
	/// Account creation instant.
	#[serde(default = "timestamp::now", with = "timestamp")]
	pub created_at: OffsetDateTime,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Given name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Owning tenant, absent for super admins.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tenant_id: Option<String>,
	/// Most recent successful login.
	#[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
	pub last_login: Option<OffsetDateTime>,
}
impl User {
	/// Best display label: `name`, then `first_name last_name`, then the email address.
	pub fn display_name(&self) -> String {
		if let Some(name) = self.name.as_deref().filter(|name| !name.is_empty()) {
			return name.to_owned();
		}

		let full = [self.first_name.as_deref(), self.last_name.as_deref()]
			.into_iter()
			.flatten()
			.filter(|part| !part.is_empty())
			.collect::<Vec<_>>()
			.join(" ");

		if full.is_empty() { self.email.clone() } else { full }
	}
}

/// `/auth/me` and `/oauth2/userinfo` answer either with a bare user or `{ "user": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum UserEnvelope {
	Wrapped { user: User },
	Bare(User),
}
impl From<UserEnvelope> for User {
	fn from(envelope: UserEnvelope) -> Self {
		match envelope {
			UserEnvelope::Wrapped { user } => user,
			UserEnvelope::Bare(user) => user,
		}
	}
}
