//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `authflow.operation` with an `operation`
//!   field, a debug event per HTTP response, and a warning whenever a malformed server
//!   timestamp is replaced with the current time.
//! - Enable `metrics` to increment the `authflow_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Facade operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// `POST /auth/register`.
	Register,
	/// `POST /auth/login`.
	Login,
	/// `POST /auth/logout`.
	Logout,
	/// `GET /auth/me` for the held session.
	CurrentUser,
	/// `GET /auth/me` with an explicit token.
	VerifyToken,
	/// `POST /auth/refresh`.
	Refresh,
	/// `POST /auth/mfa/setup/{method}`.
	MfaSetup,
	/// `POST /auth/mfa/verify/{method}`.
	MfaVerify,
	/// `POST /auth/mfa/disable`.
	MfaDisable,
	/// `POST /auth/magic-link/request`.
	MagicLinkRequest,
	/// `POST /auth/magic-link/verify`.
	MagicLinkVerify,
	/// `POST /auth/forgot-password`.
	PasswordResetRequest,
	/// `POST /auth/reset-password`.
	PasswordReset,
	/// `POST /auth/check-password-breach`.
	PasswordBreachCheck,
	/// `POST /oauth2/token`.
	OAuth2Exchange,
	/// `GET /oauth2/userinfo`.
	OAuth2UserInfo,
	/// `POST /api-keys`.
	ApiKeyCreate,
	/// `GET /api-keys`.
	ApiKeyList,
	/// `DELETE /api-keys/{id}`.
	ApiKeyDelete,
	/// `GET /webauthn/credentials`.
	WebAuthnList,
	/// `DELETE /webauthn/credentials/{id}`.
	WebAuthnDelete,
	/// Caller-composed request sent through [`AuthflowClient::send`](crate::client::AuthflowClient::send).
	Raw,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Register => "register",
			Operation::Login => "login",
			Operation::Logout => "logout",
			Operation::CurrentUser => "current_user",
			Operation::VerifyToken => "verify_token",
			Operation::Refresh => "refresh",
			Operation::MfaSetup => "mfa_setup",
			Operation::MfaVerify => "mfa_verify",
			Operation::MfaDisable => "mfa_disable",
			Operation::MagicLinkRequest => "magic_link_request",
			Operation::MagicLinkVerify => "magic_link_verify",
			Operation::PasswordResetRequest => "password_reset_request",
			Operation::PasswordReset => "password_reset",
			Operation::PasswordBreachCheck => "password_breach_check",
			Operation::OAuth2Exchange => "oauth2_exchange",
			Operation::OAuth2UserInfo => "oauth2_userinfo",
			Operation::ApiKeyCreate => "api_key_create",
			Operation::ApiKeyList => "api_key_list",
			Operation::ApiKeyDelete => "api_key_delete",
			Operation::WebAuthnList => "webauthn_list",
			Operation::WebAuthnDelete => "webauthn_delete",
			Operation::Raw => "raw",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a facade operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
