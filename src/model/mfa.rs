//! Multi-factor enrollment and verification payloads.

// self
use crate::{_prelude::*, model::Secret};

/// Second-factor delivery method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MfaMethod {
	/// Authenticator-app one-time codes.
	#[default]
	Totp,
	/// Codes delivered by email.
	Email,
}
impl MfaMethod {
	/// Returns the path label used by the MFA endpoints.
	pub const fn as_str(self) -> &'static str {
		match self {
			MfaMethod::Totp => "totp",
			MfaMethod::Email => "email",
		}
	}
}
impl Display for MfaMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Enrollment material returned by `setup_mfa`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaSetupResponse {
	/// Shared secret (the TOTP seed).
	pub secret: Secret,
	/// QR code payload for authenticator apps.
	pub qr_code: String,
	/// One-time recovery codes, when the server issues them.
	#[serde(default)]
	pub backup_codes: Option<Vec<String>>,
}

/// Second-factor verification attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MfaVerifyRequest {
	/// Code entered by the user.
	pub code: Secret,
	/// Method the code was produced by.
	pub method: MfaMethod,
	/// Ask the server to remember this device.
	pub trust_device: bool,
}
impl MfaVerifyRequest {
	/// Creates a verification request that does not trust the device.
	pub fn new(code: impl Into<Secret>, method: MfaMethod) -> Self {
		Self { code: code.into(), method, trust_device: false }
	}

	/// Overrides the trust-device flag.
	pub fn with_trust_device(mut self, trust_device: bool) -> Self {
		self.trust_device = trust_device;

		self
	}
}
