//! Account lifecycle payloads: registration, login, magic links, password reset, passkeys.

// self
use crate::{
	_prelude::*,
	model::{Secret, timestamp},
};

/// Email + password login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginCredentials {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: Secret,
	/// Tenant to sign into; falls back to the configured tenant.
	pub tenant_slug: Option<String>,
}
impl LoginCredentials {
	/// Creates credentials without an explicit tenant.
	pub fn new(email: impl Into<String>, password: impl Into<Secret>) -> Self {
		Self { email: email.into(), password: password.into(), tenant_slug: None }
	}

	/// Targets a specific tenant.
	pub fn with_tenant_slug(mut self, slug: impl Into<String>) -> Self {
		self.tenant_slug = Some(slug.into());

		self
	}
}

/// New account registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterData {
	/// Account email.
	pub email: String,
	/// Initial password.
	pub password: Secret,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Tenant to register into; falls back to the configured tenant.
	pub tenant_slug: Option<String>,
}
impl RegisterData {
	/// Creates a registration without an explicit tenant.
	pub fn new(
		email: impl Into<String>,
		password: impl Into<Secret>,
		first_name: impl Into<String>,
		last_name: impl Into<String>,
	) -> Self {
		Self {
			email: email.into(),
			password: password.into(),
			first_name: first_name.into(),
			last_name: last_name.into(),
			tenant_slug: None,
		}
	}

	/// Targets a specific tenant.
	pub fn with_tenant_slug(mut self, slug: impl Into<String>) -> Self {
		self.tenant_slug = Some(slug.into());

		self
	}
}

/// Passwordless login link request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicLinkRequest {
	/// Recipient email.
	pub email: String,
	/// Tenant the link signs into.
	pub tenant_slug: String,
	/// Where the link should land after verification.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub redirect_url: Option<String>,
}
impl MagicLinkRequest {
	/// Creates a request without a redirect.
	pub fn new(email: impl Into<String>, tenant_slug: impl Into<String>) -> Self {
		Self { email: email.into(), tenant_slug: tenant_slug.into(), redirect_url: None }
	}

	/// Sets the post-verification redirect.
	pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
		self.redirect_url = Some(url.into());

		self
	}
}

/// Password reset link request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordResetRequest {
	/// Account email.
	pub email: String,
	/// Tenant of the account; falls back to the configured tenant.
	pub tenant_slug: Option<String>,
}
impl PasswordResetRequest {
	/// Creates a request without an explicit tenant.
	pub fn new(email: impl Into<String>) -> Self {
		Self { email: email.into(), tenant_slug: None }
	}

	/// Targets a specific tenant.
	pub fn with_tenant_slug(mut self, slug: impl Into<String>) -> Self {
		self.tenant_slug = Some(slug.into());

		self
	}
}

/// Completes a password reset with the emailed token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetComplete {
	/// Reset token from the email.
	pub token: Secret,
	/// Replacement password.
	pub new_password: Secret,
}
impl PasswordResetComplete {
	/// Creates a completion payload.
	pub fn new(token: impl Into<Secret>, new_password: impl Into<Secret>) -> Self {
		Self { token: token.into(), new_password: new_password.into() }
	}
}

/// Acknowledgement returned by fire-and-forget endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
	/// Human-readable confirmation, when the server sends one.
	#[serde(default)]
	pub message: Option<String>,
}

/// Result of the upstream breached-password lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordBreachCheck {
	/// The password appears in a known breach corpus.
	pub breached: bool,
	/// Inverse of `breached`, as reported by the server.
	pub safe: bool,
	/// Set when the upstream lookup failed and the server answered fail-open.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Registered passkey (WebAuthn) credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebAuthnCredential {
	/// Server-issued identifier used for deletion.
	pub id: String,
	/// Authenticator-issued credential ID (base64url).
	#[serde(default)]
	pub credential_id: String,
	/// Label chosen at registration.
	#[serde(default)]
	pub device_name: Option<String>,
	/// Signature counter last seen by the server.
	#[serde(default)]
	pub counter: u32,
	/// Registration instant.
	#[serde(default = "timestamp::now", with = "timestamp")]
	pub created_at: OffsetDateTime,
}
