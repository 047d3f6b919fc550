//! Passwordless login by emailed link.

// self
use crate::{
	_prelude::*,
	client::{AuthResponse, AuthflowClient},
	http::HttpClient,
	model::{MagicLinkRequest, MessageResponse, Secret, Session},
	obs::Operation,
	transport::{self, ApiRequest},
};

#[derive(Serialize)]
struct VerifyPayload<'a> {
	token: &'a str,
}

impl<C> AuthflowClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Emails a login link.
	pub async fn request_magic_link(&self, request: &MagicLinkRequest) -> Result<MessageResponse> {
		self.observe(Operation::MagicLinkRequest, async {
			let value = self.call(ApiRequest::post("/auth/magic-link/request").json(request)?).await?;

			transport::decode(value)
		})
		.await
	}

	/// Redeems a link token and replaces the held session (without a refresh token).
	pub async fn verify_magic_link(&self, token: impl Into<Secret>) -> Result<Session> {
		let token = token.into();

		self.observe(Operation::MagicLinkVerify, async {
			let payload = VerifyPayload { token: token.expose() };
			let value = self.call(ApiRequest::post("/auth/magic-link/verify").json(&payload)?).await?;
			let response = transport::decode::<AuthResponse>(value)?;
			let session = Session::issued_now(response.user, response.token, None);

			self.replace_session(session.clone());

			Ok(session)
		})
		.await
	}
}
