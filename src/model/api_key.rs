//! API key records and creation payloads.

// self
use crate::{
	_prelude::*,
	model::{Secret, timestamp},
};

/// Server-issued API key.
///
/// The secret `key` is only returned by the creation call; listings leave it empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
	/// Server-issued identifier used for deletion.
	pub id: String,
	/// Caller-chosen label.
	pub name: String,
	/// Secret key material; empty unless this record came from the creation call.
	#[serde(default)]
	pub key: Secret,
	/// Permissions granted to the key.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub permissions: Vec<String>,
	/// Creation instant.
	#[serde(default = "timestamp::now", with = "timestamp")]
	pub created_at: OffsetDateTime,
	/// Last time the key authenticated a request.
	#[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
	pub last_used: Option<OffsetDateTime>,
	/// Hard expiry, if one was requested.
	#[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
	pub expires_at: Option<OffsetDateTime>,
}
impl ApiKey {
	/// Returns `true` if the key has an expiry at or before `instant`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}
}

/// Payload for creating an API key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyCreateRequest {
	/// Label for the key.
	pub name: String,
	/// Optional expiry instant.
	#[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
	pub expires_at: Option<OffsetDateTime>,
	/// Permissions to grant.
	pub permissions: Vec<String>,
}
impl ApiKeyCreateRequest {
	/// Creates a request for a key named `name` with no expiry and no permissions.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), expires_at: None, permissions: Vec::new() }
	}

	/// Sets an expiry instant.
	pub fn with_expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Adds permissions to grant.
	pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.permissions.extend(permissions.into_iter().map(Into::into));

		self
	}
}
