//! Multi-factor enrollment and verification.

// self
use crate::{
	_prelude::*,
	client::{AuthResponse, AuthflowClient},
	http::HttpClient,
	model::{MfaMethod, MfaSetupResponse, MfaVerifyRequest, Session},
	obs::Operation,
	transport::{self, ApiRequest},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyPayload<'a> {
	code: &'a str,
	trust_device: bool,
}

impl<C> AuthflowClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Starts enrollment of `method` for the authenticated user.
	pub async fn setup_mfa(&self, method: MfaMethod) -> Result<MfaSetupResponse> {
		self.observe(Operation::MfaSetup, async {
			let request = ApiRequest::post("/auth/mfa/setup").segment(method.as_str());

			transport::decode(self.call(request).await?)
		})
		.await
	}

	/// Completes an MFA challenge and replaces the held session.
	///
	/// The new session never carries a refresh token, even if the previous one did.
	pub async fn verify_mfa(&self, request: &MfaVerifyRequest) -> Result<Session> {
		self.observe(Operation::MfaVerify, async {
			let payload =
				VerifyPayload { code: request.code.expose(), trust_device: request.trust_device };
			let api_request =
				ApiRequest::post("/auth/mfa/verify").segment(request.method.as_str()).json(&payload)?;
			let response = transport::decode::<AuthResponse>(self.call(api_request).await?)?;
			let session = Session::issued_now(response.user, response.token, None);

			self.replace_session(session.clone());

			Ok(session)
		})
		.await
	}

	/// Turns MFA off for the authenticated user.
	pub async fn disable_mfa(&self) -> Result<()> {
		self.observe(Operation::MfaDisable, async {
			self.call(ApiRequest::post("/auth/mfa/disable")).await.map(|_| ())
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::{Value, json};
	// self
	use super::*;
	use crate::{_preludet::*, model::Secret};

	#[tokio::test]
	async fn verify_replaces_the_session_without_a_refresh_token() {
		let http = Arc::new(ScriptedHttpClient::default());
		let client = scripted_client(http.clone());

		client.set_session(Session::issued_now(sample_user(), "old", Some(Secret::new("old-r"))));
		http.respond(
			200,
			r#"{"user":{"id":"user-1","email":"ada@example.com","role":"user"},"token":"mfa-token","refreshToken":"ignored"}"#,
		);

		let session = client
			.verify_mfa(&MfaVerifyRequest::new("123456", MfaMethod::Totp).with_trust_device(true))
			.await
			.expect("MFA verification should succeed.");
		let sent = http.last_request().expect("A request should have been recorded.");
		let body: Value = serde_json::from_slice(sent.body()).expect("Verify body should be JSON.");

		assert_eq!(sent.uri(), "https://auth.example.com/api/auth/mfa/verify/totp");
		assert_eq!(body, json!({ "code": "123456", "trustDevice": true }));
		assert_eq!(session.access_token.expose(), "mfa-token");
		assert_eq!(session.refresh_token, None);
		assert_eq!(client.get_session(), Some(session));
	}

	#[tokio::test]
	async fn setup_decodes_the_enrollment_payload() {
		let http = Arc::new(ScriptedHttpClient::default());
		let client = scripted_client(http.clone());

		http.respond(200, r#"{"secret":"JBSWY3DP","qrCode":"data:image/png;base64,AA=="}"#);

		let setup = client.setup_mfa(MfaMethod::Email).await.expect("Setup should succeed.");
		let sent = http.last_request().expect("A request should have been recorded.");

		assert_eq!(sent.uri(), "https://auth.example.com/api/auth/mfa/setup/email");
		assert_eq!(setup.secret.expose(), "JBSWY3DP");
		assert_eq!(setup.backup_codes, None);
	}
}
