#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
use serde_json::{Value, json};
// self
use authflow::{AuthflowConfig, ReqwestAuthflowClient};

pub const TENANT: &str = "acme";

pub fn config(server: &MockServer) -> AuthflowConfig {
	AuthflowConfig::builder(server.base_url())
		.tenant_slug(TENANT)
		.client_id("web-app")
		.redirect_uri("https://app.example.com/callback")
		.build()
		.expect("Mock server URL should be a valid domain.")
}

pub fn client(server: &MockServer) -> ReqwestAuthflowClient {
	ReqwestAuthflowClient::new(config(server))
}

/// User record as the server returns it from `/auth/me`.
pub fn user_json(id: &str) -> Value {
	json!({
		"id": id,
		"email": "ada@example.com",
		"role": "user",
		"emailVerified": true,
		"mfaEnabled": false,
		"createdAt": "2025-01-01T00:00:00.000Z",
		"firstName": "Ada",
		"lastName": "Lovelace",
		"tenantId": "tenant-1",
	})
}

/// User record as the login route returns it (no flags, no timestamps).
pub fn login_user_json(id: &str) -> Value {
	json!({
		"id": id,
		"email": "ada@example.com",
		"firstName": "Ada",
		"lastName": "Lovelace",
		"role": "user",
		"tenantId": "tenant-1",
	})
}
