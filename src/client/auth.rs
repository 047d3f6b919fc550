//! Registration, password login, logout, current user, and token refresh.

// self
use crate::{
	_prelude::*,
	client::{AuthResponse, AuthflowClient, non_empty_token},
	http::HttpClient,
	model::{LoginCredentials, RegisterData, Secret, Session, User, UserEnvelope},
	obs::Operation,
	transport::{self, ApiRequest},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterPayload<'a> {
	email: &'a str,
	password: &'a str,
	first_name: &'a str,
	last_name: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	tenant_slug: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload<'a> {
	email: &'a str,
	password: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	tenant_slug: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshPayload<'a> {
	refresh_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
	#[serde(deserialize_with = "non_empty_token")]
	token: Secret,
	#[serde(default)]
	refresh_token: Option<Secret>,
}

impl<C> AuthflowClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates an account and returns the new user. No session is established.
	///
	/// The configured tenant is used when `data` does not name one.
	pub async fn register(&self, data: &RegisterData) -> Result<User> {
		self.observe(Operation::Register, async {
			let payload = RegisterPayload {
				email: &data.email,
				password: data.password.expose(),
				first_name: &data.first_name,
				last_name: &data.last_name,
				tenant_slug: self.tenant_or_default(data.tenant_slug.clone()),
			};
			let value = self.call(ApiRequest::post("/auth/register").json(&payload)?).await?;

			transport::decode::<UserEnvelope>(value).map(User::from)
		})
		.await
	}

	/// Logs in with email and password, replacing the held session.
	///
	/// The session expires [`Session::LIFETIME`] after this call returns, whatever the server
	/// says about token lifetimes.
	pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session> {
		self.observe(Operation::Login, async {
			let payload = LoginPayload {
				email: &credentials.email,
				password: credentials.password.expose(),
				tenant_slug: self.tenant_or_default(credentials.tenant_slug.clone()),
			};
			let value = self.call(ApiRequest::post("/auth/login").json(&payload)?).await?;
			let response = transport::decode::<AuthResponse>(value)?;
			let session = Session::issued_now(response.user, response.token, response.refresh_token);

			self.replace_session(session.clone());

			Ok(session)
		})
		.await
	}

	/// Logs out remotely and clears the held session.
	///
	/// The session is cleared even when the remote call fails; the failure is still returned.
	pub async fn logout(&self) -> Result<()> {
		self.observe(Operation::Logout, async {
			let result = self.call(ApiRequest::post("/auth/logout")).await;

			self.clear_session();

			result.map(|_| ())
		})
		.await
	}

	/// Fetches the authenticated user and refreshes the held session's copy of it.
	pub async fn get_current_user(&self) -> Result<User> {
		self.observe(Operation::CurrentUser, async {
			let value = self.call(ApiRequest::get("/auth/me")).await?;
			let user = User::from(transport::decode::<UserEnvelope>(value)?);

			if let Some(session) = self.session.write().as_mut() {
				session.user = user.clone();
			}

			Ok(user)
		})
		.await
	}

	/// Resolves the user behind an arbitrary access token without touching the held session.
	pub async fn verify_token(&self, token: &str) -> Result<User> {
		self.observe(Operation::VerifyToken, async {
			let request = ApiRequest::get("/auth/me").bearer(token)?;
			let value = self.transport.send(request, None).await?;

			transport::decode::<UserEnvelope>(value).map(User::from)
		})
		.await
	}

	/// Exchanges the held refresh token for a new session.
	///
	/// Fails with [`Error::MissingRefreshToken`] before any network call when no session or no
	/// refresh token is held. The previous refresh token is kept when the server does not
	/// rotate it, and the user carries over. If the session was replaced or cleared while the
	/// call was in flight, the new tokens are discarded and [`Error::SessionChanged`] returned.
	pub async fn refresh_token(&self) -> Result<Session> {
		self.observe(Operation::Refresh, async {
			let expected = self.held_refresh_token()?;
			let payload = RefreshPayload { refresh_token: expected.expose() };
			let value = self.call(ApiRequest::post("/auth/refresh").json(&payload)?).await?;
			let response = transport::decode::<RefreshResponse>(value)?;
			let rotated = response.refresh_token.filter(|token| !token.is_empty());
			let mut guard = self.session.write();
			let current = guard
				.as_ref()
				.filter(|session| session.refresh_token.as_ref() == Some(&expected))
				.ok_or(Error::SessionChanged)?;
			let session = Session::issued_now(
				current.user.clone(),
				response.token,
				Some(rotated.unwrap_or(expected)),
			);

			*guard = Some(session.clone());

			Ok(session)
		})
		.await
	}

	fn held_refresh_token(&self) -> Result<Secret> {
		self.session
			.read()
			.as_ref()
			.and_then(|session| session.refresh_token.clone())
			.filter(|token| !token.is_empty())
			.ok_or(Error::MissingRefreshToken)
	}
}
