//! OAuth 2.0 authorization-code flow and hosted login pages.
//!
//! The URL builders never touch the network. [`AuthflowClient::exchange_code_for_token`]
//! returns the token response as-is; it does not install a session, because OAuth2 tokens
//! belong to the relying party rather than to this client's logged-in user.

// self
use crate::{
	_prelude::*,
	client::AuthflowClient,
	error::ConfigError,
	http::HttpClient,
	model::{
		OAuth2AuthorizeParams, OAuth2TokenRequest, OAuth2TokenResponse, Secret, User,
		UserEnvelope,
	},
	obs::Operation,
	pkce::{AuthorizationRequest, PkcePair},
	transport::{self, ApiRequest},
};

#[derive(Serialize)]
struct TokenPayload<'a> {
	grant_type: &'static str,
	code: &'a str,
	client_id: &'a str,
	redirect_uri: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	client_secret: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	code_verifier: Option<&'a str>,
}

impl<C> AuthflowClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Builds `{domain}/oauth2/authorize` for `params`.
	///
	/// Optional parameters are omitted when unset or empty, and `code_challenge_method` only appears
	/// next to a `code_challenge`.
	pub fn get_oauth2_authorize_url(&self, params: &OAuth2AuthorizeParams) -> Url {
		let mut url = self.config().page_url("/oauth2/authorize");

		{
			let mut pairs = url.query_pairs_mut();

			pairs.append_pair("client_id", &params.client_id);
			pairs.append_pair("redirect_uri", &params.redirect_uri);
			pairs.append_pair("response_type", params.response_type.as_str());

			if let Some(scope) = params.scope.as_deref().filter(|scope| !scope.is_empty()) {
				pairs.append_pair("scope", scope);
			}
			if let Some(state) = params.state.as_deref().filter(|state| !state.is_empty()) {
				pairs.append_pair("state", state);
			}
			if let Some(challenge) =
				params.code_challenge.as_deref().filter(|challenge| !challenge.is_empty())
			{
				pairs.append_pair("code_challenge", challenge);
				pairs.append_pair("code_challenge_method", params.code_challenge_method.as_str());
			}
		}

		url
	}

	/// Starts an Authorization Code + PKCE handshake for the configured client.
	///
	/// Generates the state and S256 pair and returns everything needed to finish the exchange
	/// once the redirect comes back.
	pub fn start_authorization(&self, scope: Option<&str>) -> Result<AuthorizationRequest> {
		let config = self.config();
		let client_id = config.client_id().ok_or(ConfigError::MissingClientId)?.to_owned();
		let redirect_uri = config.redirect_uri().ok_or(ConfigError::MissingRedirectUri)?.to_owned();
		let state = AuthorizationRequest::generate_state();
		let pkce = PkcePair::generate();
		let mut params = OAuth2AuthorizeParams::new(client_id.clone(), redirect_uri.clone())
			.with_state(state.clone())
			.with_code_challenge(pkce.challenge(), pkce.method());

		if let Some(scope) = scope {
			params = params.with_scope(scope);
		}

		let authorize_url = self.get_oauth2_authorize_url(&params);

		Ok(AuthorizationRequest::new(state, authorize_url, redirect_uri, client_id, pkce))
	}

	/// Exchanges an authorization code at `POST /oauth2/token`.
	pub async fn exchange_code_for_token(
		&self,
		request: &OAuth2TokenRequest,
	) -> Result<OAuth2TokenResponse> {
		self.observe(Operation::OAuth2Exchange, async {
			let payload = TokenPayload {
				grant_type: "authorization_code",
				code: request.code.expose(),
				client_id: &request.client_id,
				redirect_uri: &request.redirect_uri,
				client_secret: request.client_secret.as_ref().map(Secret::expose),
				code_verifier: request.code_verifier.as_ref().map(Secret::expose),
			};
			let value = self.call(ApiRequest::post("/oauth2/token").json(&payload)?).await?;

			transport::decode(value)
		})
		.await
	}

	/// Fetches `/oauth2/userinfo` with the held session's bearer.
	pub async fn get_oauth2_user_info(&self) -> Result<User> {
		self.observe(Operation::OAuth2UserInfo, async {
			let value = self.call(ApiRequest::get("/oauth2/userinfo")).await?;

			transport::decode::<UserEnvelope>(value).map(User::from)
		})
		.await
	}

	/// Fetches `/oauth2/userinfo` for an access token obtained from
	/// [`exchange_code_for_token`](Self::exchange_code_for_token).
	pub async fn get_oauth2_user_info_with(&self, access_token: &Secret) -> Result<User> {
		self.observe(Operation::OAuth2UserInfo, async {
			let request = ApiRequest::get("/oauth2/userinfo").bearer(access_token.expose())?;
			let value = self.transport.send(request, None).await?;

			transport::decode::<UserEnvelope>(value).map(User::from)
		})
		.await
	}

	/// Hosted login page: `{domain}/auth/universal-login?tenant=..&redirect_uri=..`.
	pub fn get_universal_login_url(&self, tenant_slug: &str, return_to: Option<&str>) -> Url {
		self.universal_url("/auth/universal-login", tenant_slug, return_to)
	}

	/// Hosted sign-up page: `{domain}/auth/universal-register?tenant=..&redirect_uri=..`.
	pub fn get_universal_register_url(&self, tenant_slug: &str, return_to: Option<&str>) -> Url {
		self.universal_url("/auth/universal-register", tenant_slug, return_to)
	}

	fn universal_url(&self, path: &str, tenant_slug: &str, return_to: Option<&str>) -> Url {
		let mut url = self.config().page_url(path);

		{
			let mut pairs = url.query_pairs_mut();

			pairs.append_pair("tenant", tenant_slug);

			if let Some(return_to) = return_to.filter(|return_to| !return_to.is_empty()) {
				pairs.append_pair("redirect_uri", return_to);
			}
		}

		url
	}
}
