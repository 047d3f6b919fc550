#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::{Duration, OffsetDateTime};
// self
use authflow::{
	Error,
	model::{LoginCredentials, MfaMethod, MfaVerifyRequest, Secret, Session},
};

async fn logged_in(server: &MockServer) -> authflow::ReqwestAuthflowClient {
	let client = common::client(server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200).json_body(json!({
				"user": common::login_user_json("user-1"),
				"token": "access-1",
				"refreshToken": "refresh-1",
			}));
		})
		.await;

	client
		.login(&LoginCredentials::new("ada@example.com", "hunter2"))
		.await
		.expect("Login should succeed.");
	mock.delete_async().await;

	client
}

#[tokio::test]
async fn login_installs_a_session_expiring_in_24_hours() {
	let server = MockServer::start_async().await;
	let client = common::client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/login")
				.header("content-type", "application/json")
				.header_missing("authorization")
				.json_body(json!({
					"email": "ada@example.com",
					"password": "hunter2",
					"tenantSlug": "other",
				}));
			then.status(200).json_body(json!({
				"user": common::login_user_json("user-1"),
				"token": "access-1",
				"refreshToken": "refresh-1",
				"expiresAt": "2030-01-01T00:00:00Z",
			}));
		})
		.await;
	let before = OffsetDateTime::now_utc();
	let session = client
		.login(&LoginCredentials::new("ada@example.com", "hunter2").with_tenant_slug("other"))
		.await
		.expect("Login should succeed.");
	let after = OffsetDateTime::now_utc();

	mock.assert_async().await;

	assert!(session.expires_at >= before + Duration::hours(24));
	assert!(session.expires_at <= after + Duration::hours(24));
	assert_eq!(session.user.id, "user-1");
	assert!(!session.user.email_verified);
	assert_eq!(session.access_token.expose(), "access-1");
	assert_eq!(session.refresh_token, Some(Secret::new("refresh-1")));
	assert_eq!(client.get_session(), Some(session));
	assert!(client.is_authenticated());
}

#[tokio::test]
async fn login_failure_carries_the_server_message_and_status() {
	let server = MockServer::start_async().await;
	let client = common::client(&server);

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(401).json_body(json!({ "error": "bad creds" }));
		})
		.await;

	let err = client
		.login(&LoginCredentials::new("ada@example.com", "wrong"))
		.await
		.expect_err("Login with bad credentials should fail.");

	assert_eq!(err.message(), "bad creds");
	assert_eq!(err.status(), Some(401));
	assert!(!client.is_authenticated());
}

#[tokio::test]
async fn logout_clears_the_session_even_when_the_server_fails() {
	let server = MockServer::start_async().await;
	let client = logged_in(&server).await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/logout").header("authorization", "Bearer access-1");
			then.status(500).body("upstream exploded");
		})
		.await;
	let err = client.logout().await.expect_err("Logout should surface the server failure.");

	mock.assert_async().await;

	assert_eq!(err.status(), Some(500));
	assert!(err.message().contains("500"));
	assert_eq!(client.get_session(), None);
}

#[tokio::test]
async fn current_user_refreshes_the_session_copy() {
	let server = MockServer::start_async().await;
	let client = logged_in(&server).await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me").header("authorization", "Bearer access-1");
			then.status(200).json_body(json!({ "user": common::user_json("user-1") }));
		})
		.await;

	let user = client.get_current_user().await.expect("Current user lookup should succeed.");

	assert!(user.email_verified);
	assert_eq!(user.created_at, time::macros::datetime!(2025-01-01 00:00 UTC));
	assert_eq!(client.get_user(), Some(user));
}

#[tokio::test]
async fn current_user_without_a_session_is_sent_unauthenticated() {
	let server = MockServer::start_async().await;
	let client = common::client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me").header_missing("authorization");
			then.status(401).json_body(json!({ "error": "Not authenticated" }));
		})
		.await;
	let err = client.get_current_user().await.expect_err("Anonymous lookup should fail.");

	mock.assert_async().await;

	assert_eq!(err.status(), Some(401));
	assert_eq!(client.get_session(), None);
}

#[tokio::test]
async fn refresh_rotates_tokens_and_keeps_the_user() {
	let server = MockServer::start_async().await;
	let client = logged_in(&server).await;
	let original = client.get_session().expect("Session should be installed.");
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/refresh")
				.json_body(json!({ "refreshToken": "refresh-1" }));
			then.status(200).json_body(json!({ "token": "access-2", "refreshToken": "refresh-2" }));
		})
		.await;
	let session = client.refresh_token().await.expect("Refresh should succeed.");

	mock.assert_async().await;

	assert_eq!(session.user, original.user);
	assert_eq!(session.access_token.expose(), "access-2");
	assert_eq!(session.refresh_token, Some(Secret::new("refresh-2")));
	assert!(session.expires_at >= original.expires_at);
	assert_eq!(client.get_session(), Some(session));
}

#[tokio::test]
async fn refresh_without_a_session_fails_locally() {
	let server = MockServer::start_async().await;
	let client = common::client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "token": "never" }));
		})
		.await;
	let err = client.refresh_token().await.expect_err("Refresh without a session should fail.");

	assert!(matches!(err, Error::MissingRefreshToken));
	assert_eq!(err.status(), None);

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn refresh_failure_leaves_the_session_alone() {
	let server = MockServer::start_async().await;
	let client = logged_in(&server).await;
	let original = client.get_session();

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(401).json_body(json!({ "error": "Invalid refresh token" }));
		})
		.await;

	let err = client.refresh_token().await.expect_err("Rejected refresh should fail.");

	assert_eq!(err.message(), "Invalid refresh token");
	assert_eq!(client.get_session(), original);
}

#[tokio::test]
async fn mfa_verification_replaces_the_session_without_refresh_token() {
	let server = MockServer::start_async().await;
	let client = logged_in(&server).await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/mfa/verify/totp")
				.json_body(json!({ "code": "123456", "trustDevice": false }));
			then.status(200)
				.json_body(json!({ "user": common::user_json("user-1"), "token": "access-mfa" }));
		})
		.await;
	let session = client
		.verify_mfa(&MfaVerifyRequest::new("123456", MfaMethod::Totp))
		.await
		.expect("MFA verification should succeed.");

	mock.assert_async().await;

	assert_eq!(session.access_token.expose(), "access-mfa");
	assert_eq!(session.refresh_token, None);
	assert!(matches!(client.refresh_token().await, Err(Error::MissingRefreshToken)));
}

#[tokio::test]
async fn mfa_setup_and_disable() {
	let server = MockServer::start_async().await;
	let client = logged_in(&server).await;
	let setup = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/mfa/setup/totp");
			then.status(200).json_body(json!({
				"secret": "JBSWY3DPEHPK3PXP",
				"qrCode": "data:image/png;base64,AAAA",
				"backupCodes": ["a1b2", "c3d4"],
			}));
		})
		.await;
	let disable = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/mfa/disable");
			then.status(204);
		})
		.await;
	let response = client.setup_mfa(MfaMethod::Totp).await.expect("MFA setup should succeed.");

	client.disable_mfa().await.expect("MFA disable should succeed.");
	setup.assert_async().await;
	disable.assert_async().await;

	assert_eq!(response.secret.expose(), "JBSWY3DPEHPK3PXP");
	assert_eq!(response.backup_codes, Some(vec!["a1b2".into(), "c3d4".into()]));
}

#[tokio::test]
async fn magic_link_round_trip() {
	let server = MockServer::start_async().await;
	let client = common::client(&server);
	let request = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/magic-link/request").json_body(json!({
				"email": "ada@example.com",
				"tenantSlug": "acme",
				"redirectUrl": "https://app.example.com/welcome",
			}));
			then.status(200).json_body(json!({ "message": "Magic link sent" }));
		})
		.await;
	let verify = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/magic-link/verify")
				.json_body(json!({ "token": "link-token" }));
			then.status(200)
				.json_body(json!({ "user": common::user_json("user-1"), "token": "access-link" }));
		})
		.await;
	let ack = client
		.request_magic_link(
			&authflow::model::MagicLinkRequest::new("ada@example.com", "acme")
				.with_redirect_url("https://app.example.com/welcome"),
		)
		.await
		.expect("Magic link request should succeed.");
	let session: Session =
		client.verify_magic_link("link-token").await.expect("Magic link should verify.");

	request.assert_async().await;
	verify.assert_async().await;

	assert_eq!(ack.message.as_deref(), Some("Magic link sent"));
	assert_eq!(session.refresh_token, None);
	assert_eq!(client.get_session(), Some(session));
}
