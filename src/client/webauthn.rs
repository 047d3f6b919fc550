//! Passkey credential management. Registration and assertion ceremonies run in the browser.

// self
use crate::{
	_prelude::*,
	client::AuthflowClient,
	http::HttpClient,
	model::WebAuthnCredential,
	obs::Operation,
	transport::{self, ApiRequest},
};

impl<C> AuthflowClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Lists the authenticated user's registered passkeys.
	pub async fn list_webauthn_credentials(&self) -> Result<Vec<WebAuthnCredential>> {
		self.observe(Operation::WebAuthnList, async {
			transport::decode(self.call(ApiRequest::get("/webauthn/credentials")).await?)
		})
		.await
	}

	/// Removes the passkey with identifier `id`.
	pub async fn delete_webauthn_credential(&self, id: &str) -> Result<()> {
		self.observe(Operation::WebAuthnDelete, async {
			self.call(ApiRequest::delete("/webauthn/credentials").segment(id))
				.await
				.map(|_| ())
		})
		.await
	}
}
