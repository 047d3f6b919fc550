//! Typed async client for the Authflow authentication API: password and passwordless login,
//! MFA, OAuth 2.0 + PKCE, API keys, and an in-memory session behind one facade.
//!
//! ```no_run
//! # async fn run() -> authflow::error::Result<()> {
//! use authflow::{AuthflowClient, AuthflowConfig, model::LoginCredentials};
//!
//! let config = AuthflowConfig::builder("https://auth.example.com").tenant_slug("acme").build()?;
//! let client = AuthflowClient::new(config);
//! let session = client.login(&LoginCredentials::new("ada@example.com", "hunter2")).await?;
//!
//! println!("Signed in as {}.", session.user.display_name());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod pkce;
pub mod transport;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	pub use crate::{client::AuthflowClient, config::AuthflowConfig};
	use crate::{
		http::{HttpClient, HttpFuture, HttpRequest, HttpResponse},
		model::{Role, User},
	};

	/// Error returned by [`ScriptedHttpClient`] when scripted to fail.
	#[derive(Debug, ThisError)]
	#[error("{0}")]
	pub struct ScriptedTransportError(pub String);

	#[derive(Clone, Debug)]
	enum Script {
		Respond { status: u16, body: String },
		Fail(String),
	}

	/// In-process [`HttpClient`] that records requests and replays a scripted outcome.
	///
	/// The scripted outcome sticks until replaced, so loops can reuse one response.
	#[derive(Debug, Default)]
	pub struct ScriptedHttpClient {
		script: Mutex<Option<Script>>,
		requests: Mutex<Vec<HttpRequest>>,
		executed: AtomicUsize,
	}
	impl ScriptedHttpClient {
		/// Answers every following request with `status` and `body`.
		pub fn respond(&self, status: u16, body: &str) {
			*self.script.lock() = Some(Script::Respond { status, body: body.to_owned() });
		}

		/// Fails every following request with a transport error displaying `message`.
		pub fn fail(&self, message: &str) {
			*self.script.lock() = Some(Script::Fail(message.to_owned()));
		}

		/// Removes and returns the most recent request.
		pub fn last_request(&self) -> Option<HttpRequest> {
			self.requests.lock().pop()
		}

		/// Number of requests executed so far.
		pub fn request_count(&self) -> usize {
			self.executed.load(Ordering::SeqCst)
		}
	}
	impl HttpClient for ScriptedHttpClient {
		type TransportError = ScriptedTransportError;

		fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
			let script = self.script.lock().clone();

			self.executed.fetch_add(1, Ordering::SeqCst);
			self.requests.lock().push(request);

			Box::pin(async move {
				match script {
					Some(Script::Respond { status, body }) => {
						let mut response = HttpResponse::new(body.into_bytes());

						*response.status_mut() = ::http::StatusCode::from_u16(status)
							.map_err(|e| ScriptedTransportError(e.to_string()))?;

						Ok(response)
					},
					Some(Script::Fail(message)) => Err(ScriptedTransportError(message)),
					None => Err(ScriptedTransportError("No scripted response.".into())),
				}
			})
		}
	}

	/// Client bound to `https://auth.example.com` with default tenant `acme`.
	#[cfg(test)]
	pub fn scripted_client(http: Arc<ScriptedHttpClient>) -> AuthflowClient<ScriptedHttpClient> {
		let config = AuthflowConfig::builder("https://auth.example.com")
			.tenant_slug("acme")
			.build()
			.expect("Scripted client config should be valid.");

		AuthflowClient::with_http_client(config, http)
	}

	/// Fixture user `user-1` / `ada@example.com`.
	pub fn sample_user() -> User {
		User {
			id: "user-1".into(),
			email: "ada@example.com".into(),
			role: Role::User,
			email_verified: true,
			mfa_enabled: false,
			created_at: time::macros::datetime!(2025-01-01 00:00 UTC),
			name: Some("Ada Lovelace".into()),
			first_name: Some("Ada".into()),
			last_name: Some("Lovelace".into()),
			tenant_id: Some("tenant-1".into()),
			last_login: None,
		}
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use client::ReqwestAuthflowClient;
pub use client::AuthflowClient;
pub use config::{AuthflowConfig, AuthflowConfigBuilder};
pub use error::Error;
pub use pkce::AuthorizationRequest;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use transport::ApiRequest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
