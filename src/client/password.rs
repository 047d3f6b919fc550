//! Password recovery and breach screening.

// self
use crate::{
	_prelude::*,
	client::AuthflowClient,
	http::HttpClient,
	model::{
		MessageResponse, PasswordBreachCheck, PasswordResetComplete, PasswordResetRequest, Secret,
	},
	obs::Operation,
	transport::{self, ApiRequest},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForgotPayload<'a> {
	email: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	tenant_slug: Option<String>,
}

#[derive(Serialize)]
struct BreachPayload<'a> {
	password: &'a str,
}

impl<C> AuthflowClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Emails a password reset link, defaulting to the configured tenant.
	pub async fn request_password_reset(
		&self,
		request: &PasswordResetRequest,
	) -> Result<MessageResponse> {
		self.observe(Operation::PasswordResetRequest, async {
			let payload = ForgotPayload {
				email: &request.email,
				tenant_slug: self.tenant_or_default(request.tenant_slug.clone()),
			};
			let value = self.call(ApiRequest::post("/auth/forgot-password").json(&payload)?).await?;

			transport::decode(value)
		})
		.await
	}

	/// Sets a new password using the token from the reset link.
	pub async fn reset_password(&self, request: &PasswordResetComplete) -> Result<MessageResponse> {
		self.observe(Operation::PasswordReset, async {
			let value = self.call(ApiRequest::post("/auth/reset-password").json(request)?).await?;

			transport::decode(value)
		})
		.await
	}

	/// Asks the server whether `password` appears in known breaches.
	///
	/// The raw password travels in the request body; hashing and k-anonymity are the
	/// server's business.
	pub async fn check_password_breach(
		&self,
		password: impl Into<Secret>,
	) -> Result<PasswordBreachCheck> {
		let password = password.into();

		self.observe(Operation::PasswordBreachCheck, async {
			let payload = BreachPayload { password: password.expose() };
			let value =
				self.call(ApiRequest::post("/auth/check-password-breach").json(&payload)?).await?;

			transport::decode(value)
		})
		.await
	}
}
