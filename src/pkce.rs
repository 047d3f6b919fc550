//! PKCE (RFC 7636) material and the authorization handshake record.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	model::{CodeChallengeMethod, OAuth2TokenRequest, Secret},
};

const STATE_LEN: usize = 32;
const PKCE_VERIFIER_LEN: usize = 64;

/// Verifier/challenge pair for one authorization attempt.
#[derive(Clone)]
pub struct PkcePair {
	verifier: Secret,
	challenge: String,
}
impl PkcePair {
	/// Generates a fresh 64-character verifier and its S256 challenge.
	pub fn generate() -> Self {
		let verifier = random_string(PKCE_VERIFIER_LEN);
		let challenge = compute_challenge(&verifier);

		Self { verifier: Secret::new(verifier), challenge }
	}

	/// Secret verifier sent with the token exchange.
	pub fn verifier(&self) -> &Secret {
		&self.verifier
	}

	/// Challenge sent with the authorize request.
	pub fn challenge(&self) -> &str {
		&self.challenge
	}

	/// Always [`CodeChallengeMethod::S256`].
	pub fn method(&self) -> CodeChallengeMethod {
		CodeChallengeMethod::S256
	}
}
impl Debug for PkcePair {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PkcePair")
			.field("verifier", &self.verifier)
			.field("challenge", &self.challenge)
			.finish()
	}
}

/// Authorization Code + PKCE handshake metadata returned by
/// [`AuthflowClient::start_authorization`](crate::client::AuthflowClient::start_authorization).
///
/// Keep it (server-side session, encrypted cookie) until the redirect comes back, then call
/// [`validate_state`](Self::validate_state) and exchange
/// [`token_request`](Self::token_request) with the returned code.
#[derive(Clone)]
pub struct AuthorizationRequest {
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Fully-formed authorize URL that callers should send end-users to.
	pub authorize_url: Url,
	/// Redirect URI embedded in the authorize URL.
	pub redirect_uri: String,
	/// OAuth2 client the request was issued for.
	pub client_id: String,
	pkce: PkcePair,
}
impl AuthorizationRequest {
	pub(crate) fn new(
		state: String,
		authorize_url: Url,
		redirect_uri: String,
		client_id: String,
		pkce: PkcePair,
	) -> Self {
		Self { state, authorize_url, redirect_uri, client_id, pkce }
	}

	/// Generates a random state value.
	pub fn generate_state() -> String {
		random_string(STATE_LEN)
	}

	/// PKCE verifier to present at the token endpoint.
	pub fn code_verifier(&self) -> &Secret {
		self.pkce.verifier()
	}

	/// PKCE challenge embedded in the authorize URL.
	pub fn code_challenge(&self) -> &str {
		self.pkce.challenge()
	}

	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::InvalidState) }
	}

	/// Builds the token exchange for the `code` delivered to the redirect URI.
	pub fn token_request(&self, code: impl Into<Secret>) -> OAuth2TokenRequest {
		OAuth2TokenRequest::new(code, self.client_id.clone(), self.redirect_uri.clone())
			.with_code_verifier(self.pkce.verifier().clone())
	}
}
impl Debug for AuthorizationRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationRequest")
			.field("state", &self.state)
			.field("authorize_url", &self.authorize_url.as_str())
			.field("redirect_uri", &self.redirect_uri)
			.field("client_id", &self.client_id)
			.field("code_challenge", &self.pkce.challenge)
			.finish()
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

fn compute_challenge(verifier: &str) -> String {
	let digest = Sha256::digest(verifier.as_bytes());

	URL_SAFE_NO_PAD.encode(digest)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn request() -> AuthorizationRequest {
		AuthorizationRequest::new(
			"state-123".into(),
			Url::parse("https://auth.example.com/oauth2/authorize")
				.expect("Authorize URL fixture should parse."),
			"https://app.example.com/callback".into(),
			"web-app".into(),
			PkcePair::generate(),
		)
	}

	#[test]
	fn challenge_matches_rfc_7636_appendix_b() {
		assert_eq!(
			compute_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
			"E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
		);
	}

	#[test]
	fn generated_material_has_expected_shape() {
		let pair = PkcePair::generate();

		assert_eq!(pair.verifier().expose().len(), PKCE_VERIFIER_LEN);
		assert_eq!(pair.challenge(), compute_challenge(pair.verifier().expose()));
		assert_eq!(pair.method(), CodeChallengeMethod::S256);
		assert_eq!(AuthorizationRequest::generate_state().len(), STATE_LEN);
		assert!(!format!("{pair:?}").contains(pair.verifier().expose()));
	}

	#[test]
	fn state_must_match() {
		let request = request();

		assert!(request.validate_state("state-123").is_ok());
		assert!(matches!(request.validate_state("forged"), Err(Error::InvalidState)));
	}

	#[test]
	fn token_request_carries_the_verifier() {
		let request = request();
		let exchange = request.token_request("code-1");

		assert_eq!(exchange.code.expose(), "code-1");
		assert_eq!(exchange.client_id, "web-app");
		assert_eq!(exchange.redirect_uri, "https://app.example.com/callback");
		assert_eq!(exchange.code_verifier.as_ref(), Some(request.code_verifier()));
		assert_eq!(exchange.client_secret, None);
	}
}
