//! API key management for the authenticated user.

// self
use crate::{
	_prelude::*,
	client::AuthflowClient,
	http::HttpClient,
	model::{ApiKey, ApiKeyCreateRequest},
	obs::Operation,
	transport::{self, ApiRequest},
};

impl<C> AuthflowClient<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates a key. The returned [`ApiKey::key`] is the only time the secret is shown.
	pub async fn create_api_key(&self, request: &ApiKeyCreateRequest) -> Result<ApiKey> {
		self.observe(Operation::ApiKeyCreate, async {
			let value = self.call(ApiRequest::post("/api-keys").json(request)?).await?;

			transport::decode(value)
		})
		.await
	}

	/// Lists keys; secrets are not included.
	pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>> {
		self.observe(Operation::ApiKeyList, async {
			transport::decode(self.call(ApiRequest::get("/api-keys")).await?)
		})
		.await
	}

	/// Revokes the key with identifier `id`.
	pub async fn delete_api_key(&self, id: &str) -> Result<()> {
		self.observe(Operation::ApiKeyDelete, async {
			self.call(ApiRequest::delete("/api-keys").segment(id)).await.map(|_| ())
		})
		.await
	}
}
