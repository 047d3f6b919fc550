#![cfg(feature = "reqwest")]

mod common;

// std
use std::net::TcpListener;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use authflow::{ApiRequest, AuthflowConfig, ReqwestAuthflowClient};

#[tokio::test]
async fn unparsable_error_bodies_fall_back_to_the_status() {
	let server = MockServer::start_async().await;
	let client = common::client(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me");
			then.status(502).header("content-type", "text/html").body("<h1>Bad Gateway</h1>");
		})
		.await;

	let err = client.get_current_user().await.expect_err("502 should fail.");

	assert!(err.message().contains("502"), "Unexpected message: {}.", err.message());
	assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn connection_failures_have_no_status() -> color_eyre::Result<()> {
	let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
	let config = AuthflowConfig::builder(format!("http://127.0.0.1:{port}")).build()?;
	let client = ReqwestAuthflowClient::new(config);
	let err = client.get_current_user().await.expect_err("Closed port should refuse.");

	assert_eq!(err.status(), None);
	assert!(
		err.message().starts_with("Request failed: "),
		"Unexpected message: {}.",
		err.message()
	);

	Ok(())
}

#[tokio::test]
async fn raw_requests_keep_caller_headers() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let client = common::client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/tenants/acme/invites")
				.header("content-type", "application/json")
				.header("x-request-id", "req-7")
				.header("authorization", "Bearer service-token")
				.json_body(json!({ "email": "grace@example.com" }));
			then.status(201).json_body(json!({ "id": "invite-1" }));
		})
		.await;
	let request = ApiRequest::post("/tenants")
		.segment("acme")
		.segment("invites")
		.header("x-request-id".parse()?, "req-7".parse()?)
		.bearer("service-token")?
		.json(&json!({ "email": "grace@example.com" }))?;
	let value = client.send(request).await?;

	mock.assert_async().await;

	assert_eq!(value["id"], "invite-1");

	Ok(())
}

#[tokio::test]
async fn empty_success_bodies_decode_as_empty_objects() {
	let server = MockServer::start_async().await;
	let client = common::client(&server);

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/mfa/disable");
			then.status(200);
		})
		.await;

	let value = client
		.send(ApiRequest::post("/auth/mfa/disable"))
		.await
		.expect("Empty 200 should decode.");

	assert_eq!(value, json!({}));
}
