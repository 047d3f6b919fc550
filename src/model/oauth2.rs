//! OAuth 2.0 authorization-code parameters and token payloads.

// self
use crate::{_prelude::*, model::Secret};

/// `response_type` requested from the authorize endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
	/// Authorization code grant.
	#[default]
	Code,
	/// Implicit grant.
	Token,
}
impl ResponseType {
	/// Returns the RFC 6749 identifier.
	pub const fn as_str(self) -> &'static str {
		match self {
			ResponseType::Code => "code",
			ResponseType::Token => "token",
		}
	}
}

/// PKCE challenge methods (RFC 7636).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeChallengeMethod {
	/// SHA-256 based challenge.
	#[default]
	S256,
	/// Verifier sent verbatim as the challenge.
	#[serde(rename = "plain")]
	Plain,
}
impl CodeChallengeMethod {
	/// Returns the RFC 7636 identifier.
	pub const fn as_str(self) -> &'static str {
		match self {
			CodeChallengeMethod::S256 => "S256",
			CodeChallengeMethod::Plain => "plain",
		}
	}
}

/// Query parameters for `{domain}/oauth2/authorize`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuth2AuthorizeParams {
	/// Registered OAuth2 client.
	pub client_id: String,
	/// Redirect URI registered for the client.
	pub redirect_uri: String,
	/// Defaults to [`ResponseType::Code`].
	pub response_type: ResponseType,
	/// Space-delimited scopes.
	pub scope: Option<String>,
	/// Opaque CSRF state echoed back to the redirect URI.
	pub state: Option<String>,
	/// PKCE challenge.
	pub code_challenge: Option<String>,
	/// Only emitted together with `code_challenge`. Defaults to [`CodeChallengeMethod::S256`].
	pub code_challenge_method: CodeChallengeMethod,
}
impl OAuth2AuthorizeParams {
	/// Creates parameters carrying only the required fields.
	pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			redirect_uri: redirect_uri.into(),
			response_type: ResponseType::default(),
			scope: None,
			state: None,
			code_challenge: None,
			code_challenge_method: CodeChallengeMethod::default(),
		}
	}

	/// Sets the requested scopes.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Sets the CSRF state.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Attaches a PKCE challenge.
	pub fn with_code_challenge(
		mut self,
		challenge: impl Into<String>,
		method: CodeChallengeMethod,
	) -> Self {
		self.code_challenge = Some(challenge.into());
		self.code_challenge_method = method;

		self
	}

	/// Overrides the response type.
	pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
		self.response_type = response_type;

		self
	}
}

/// Authorization code exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuth2TokenRequest {
	/// Code delivered to the redirect URI.
	pub code: Secret,
	/// Registered OAuth2 client.
	pub client_id: String,
	/// Redirect URI used in the authorize request.
	pub redirect_uri: String,
	/// Client secret for confidential clients.
	pub client_secret: Option<Secret>,
	/// PKCE verifier matching the authorize request's challenge.
	pub code_verifier: Option<Secret>,
}
impl OAuth2TokenRequest {
	/// Creates an exchange for a public client without PKCE.
	pub fn new(
		code: impl Into<Secret>,
		client_id: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Self {
		Self {
			code: code.into(),
			client_id: client_id.into(),
			redirect_uri: redirect_uri.into(),
			client_secret: None,
			code_verifier: None,
		}
	}

	/// Authenticates as a confidential client.
	pub fn with_client_secret(mut self, secret: impl Into<Secret>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Attaches the PKCE verifier.
	pub fn with_code_verifier(mut self, verifier: impl Into<Secret>) -> Self {
		self.code_verifier = Some(verifier.into());

		self
	}
}

/// Token endpoint response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2TokenResponse {
	/// Issued access token.
	pub access_token: Secret,
	/// Token type, normally `Bearer`.
	pub token_type: String,
	/// Lifetime in seconds.
	pub expires_in: u64,
	/// Refresh token, if issued.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<Secret>,
	/// Granted scopes, if the server narrowed or echoed them.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
}
impl OAuth2TokenResponse {
	/// Absolute expiry for a response received at `issued_at`.
	pub fn expires_at(&self, issued_at: OffsetDateTime) -> OffsetDateTime {
		let seconds = i64::try_from(self.expires_in).unwrap_or(i64::MAX);

		issued_at.checked_add(Duration::seconds(seconds)).unwrap_or(issued_at)
	}
}
