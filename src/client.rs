//! Stateful facade over the Authflow REST API.
//!
//! [`AuthflowClient`] holds at most one [`Session`]. Operations that authenticate (login, MFA
//! verification, magic-link verification, refresh) replace it wholesale, `logout` clears it,
//! and every request made while it is held carries its access token as a bearer. One `impl`
//! block per API area lives in the child modules.
//!
//! The session sits behind a [`RwLock`] that is never held across an `.await`, so one client
//! can be shared between tasks. Concurrent operations still race the way any last-writer-wins
//! cache does; only [`refresh_token`](AuthflowClient::refresh_token) checks that the session
//! it started from is still current before writing.

mod api_keys;
mod auth;
mod magic_link;
mod mfa;
mod oauth2;
mod password;
mod webauthn;

// crates.io
use serde::{Deserializer, de::Error as _};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	config::AuthflowConfig,
	http::HttpClient,
	model::{Secret, Session, User},
	obs::{self, Operation, OperationSpan, Outcome},
	transport::{ApiRequest, Transport},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestAuthflowClient = AuthflowClient<ReqwestHttpClient>;

/// Authflow API client holding the active session.
pub struct AuthflowClient<C>
where
	C: ?Sized + HttpClient,
{
	transport: Transport<C>,
	session: RwLock<Option<Session>>,
}
impl<C> AuthflowClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: AuthflowConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { transport: Transport::new(config, http_client), session: RwLock::new(None) }
	}

	/// Configuration the client was built with.
	pub fn config(&self) -> &AuthflowConfig {
		self.transport.config()
	}

	/// Snapshot of the active session.
	pub fn get_session(&self) -> Option<Session> {
		self.session.read().clone()
	}

	/// User of the active session.
	pub fn get_user(&self) -> Option<User> {
		self.session.read().as_ref().map(|session| session.user.clone())
	}

	/// Whether a session is held. Expiry is not checked; see [`Session::is_expired`].
	pub fn is_authenticated(&self) -> bool {
		self.session.read().is_some()
	}

	/// Installs a session obtained elsewhere (e.g. restored from a cookie).
	pub fn set_session(&self, session: Session) {
		*self.session.write() = Some(session);
	}

	/// Drops the active session without contacting the server.
	pub fn clear_session(&self) {
		*self.session.write() = None;
	}

	/// Sends a caller-composed request with the session bearer and returns the raw JSON.
	pub async fn send(&self, request: ApiRequest) -> Result<Value> {
		self.observe(Operation::Raw, self.call(request)).await
	}

	async fn call(&self, request: ApiRequest) -> Result<Value> {
		let token = self.access_token();

		self.transport.send(request, token.as_ref()).await
	}

	fn access_token(&self) -> Option<Secret> {
		self.session.read().as_ref().map(|session| session.access_token.clone())
	}

	fn replace_session(&self, session: Session) {
		*self.session.write() = Some(session);
	}

	fn tenant_or_default(&self, tenant_slug: Option<String>) -> Option<String> {
		tenant_slug.or_else(|| self.config().tenant_slug().map(ToOwned::to_owned))
	}

	async fn observe<T, F>(&self, operation: Operation, fut: F) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		let span = OperationSpan::new(operation);

		obs::record_operation_outcome(operation, Outcome::Attempt);

		let result = span.instrument(fut).await;

		obs::record_operation_outcome(
			operation,
			if result.is_ok() { Outcome::Success } else { Outcome::Failure },
		);

		result
	}
}
#[cfg(feature = "reqwest")]
impl AuthflowClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: AuthflowConfig) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for AuthflowClient<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthflowClient")
			.field("domain", &self.config().domain().as_str())
			.field("authenticated", &self.is_authenticated())
			.finish()
	}
}

/// Login, MFA verification, and magic-link verification all answer with this shape.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
	user: User,
	#[serde(deserialize_with = "non_empty_token")]
	token: Secret,
	#[serde(default)]
	refresh_token: Option<Secret>,
}

/// A held session must carry a usable bearer, so an empty `token` fails the decode.
fn non_empty_token<'de, D>(deserializer: D) -> Result<Secret, D::Error>
where
	D: Deserializer<'de>,
{
	let token = Secret::deserialize(deserializer)?;

	if token.is_empty() {
		return Err(D::Error::custom("token must not be empty"));
	}

	Ok(token)
}
