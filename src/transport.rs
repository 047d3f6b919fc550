//! Request composition and uniform error translation for the Authflow REST API.
//!
//! [`Transport`] turns an [`ApiRequest`] into an [`HttpRequest`] against `{domain}/api`,
//! hands it to the configured [`HttpClient`], and maps the outcome:
//!
//! - 2xx: the body decoded as JSON; `204` or a blank body becomes an empty object.
//! - non-2xx: [`Error::Api`] with the body's `error` field or a message naming the status.
//! - no response at all: [`Error::Transport`], which never carries a status.
//!
//! There are no retries and no timeouts beyond whatever the transport itself enforces.

// crates.io
use http::{
	HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	config::AuthflowConfig,
	error::{ConfigError, TransportError},
	http::{HttpClient, HttpRequest},
	model::Secret,
	obs,
};

/// A single call against the Authflow REST API, relative to `{domain}/api`.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	method: Method,
	path: String,
	segments: Vec<String>,
	body: Option<Vec<u8>>,
	headers: HeaderMap,
}
impl ApiRequest {
	/// Creates a request for `path` (which must start with `/`, e.g. `/auth/me`).
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			segments: Vec::new(),
			body: None,
			headers: HeaderMap::new(),
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// Shorthand for a `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// Shorthand for a `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Appends one path segment, percent-encoding it (identifiers, MFA methods).
	pub fn segment(mut self, segment: impl Into<String>) -> Self {
		self.segments.push(segment.into());

		self
	}

	/// Encodes `body` as the JSON request body.
	pub fn json<T>(mut self, body: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let bytes =
			serde_json::to_vec(body).map_err(|source| ConfigError::RequestEncode { source })?;

		self.body = Some(bytes);

		Ok(self)
	}

	/// Adds a caller-supplied header.
	///
	/// Caller headers are applied after the default `Content-Type`, and an explicit
	/// `Authorization` header suppresses the session bearer token.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.append(name, value);

		self
	}

	/// Sets `Authorization: Bearer <token>` explicitly, overriding any session token.
	pub fn bearer(self, token: &str) -> Result<Self> {
		let value = bearer_value(token)?;

		Ok(self.header(AUTHORIZATION, value))
	}

	/// HTTP method of the request.
	pub fn method(&self) -> &Method {
		&self.method
	}

	/// Path relative to `{domain}/api`, before any appended segments.
	pub fn path(&self) -> &str {
		&self.path
	}
}

/// Composes URLs, headers, and bodies and translates responses into [`Result`]s.
pub struct Transport<C>
where
	C: ?Sized + HttpClient,
{
	http_client: Arc<C>,
	config: AuthflowConfig,
}
impl<C> Transport<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates a transport bound to `config`'s domain.
	pub fn new(config: AuthflowConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config }
	}

	/// Configuration the transport composes URLs from.
	pub fn config(&self) -> &AuthflowConfig {
		&self.config
	}

	/// Shared HTTP client handle.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}

	/// Sends `request`, injecting `session_token` as a bearer unless the caller set
	/// `Authorization` already, and decodes the JSON response.
	pub async fn send(&self, request: ApiRequest, session_token: Option<&Secret>) -> Result<Value> {
		let method = request.method.clone();
		let url = self.url_for(&request)?;
		let http_request = self.build(request, &url, session_token)?;
		let response =
			self.http_client.execute(http_request).await.map_err(TransportError::network)?;
		let status = response.status();

		obs::log_response(&method, &url, status.as_u16());

		let body = response.into_body();

		if !status.is_success() {
			return Err(Error::from_response(status.as_u16(), &body));
		}

		decode_body(status, &body)
	}

	fn url_for(&self, request: &ApiRequest) -> Result<Url> {
		let mut url = self.config.api_url(&request.path);

		if !request.segments.is_empty() {
			let mut segments = url.path_segments_mut().map_err(|_| {
				ConfigError::DomainNotHierarchical { domain: self.config.domain().to_string() }
			})?;

			segments.extend(&request.segments);
		}

		Ok(url)
	}

	fn build(
		&self,
		request: ApiRequest,
		url: &Url,
		session_token: Option<&Secret>,
	) -> Result<HttpRequest> {
		let mut headers = HeaderMap::new();

		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.extend(request.headers);

		if let Some(token) = session_token.filter(|token| !token.expose().is_empty()) {
			if !headers.contains_key(AUTHORIZATION) {
				headers.insert(AUTHORIZATION, bearer_value(token.expose())?);
			}
		}

		let uri = Uri::try_from(url.as_str()).map_err(|e| ConfigError::from(http::Error::from(e)))?;
		let mut http_request = HttpRequest::new(request.body.unwrap_or_default());

		*http_request.method_mut() = request.method;
		*http_request.uri_mut() = uri;
		*http_request.headers_mut() = headers;

		Ok(http_request)
	}
}
impl<C> Debug for Transport<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Transport").field("domain", &self.config.domain().as_str()).finish()
	}
}

/// Decodes a JSON value into a typed response, naming the failing path on mismatch.
pub(crate) fn decode<T>(value: Value) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(value).map_err(Error::from)
}

fn decode_body(status: StatusCode, body: &[u8]) -> Result<Value> {
	if status == StatusCode::NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Object(Map::new()));
	}

	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(Error::from)
}

fn bearer_value(token: &str) -> Result<HeaderValue> {
	let mut value = HeaderValue::try_from(format!("Bearer {token}"))
		.map_err(|e| ConfigError::from(http::Error::from(e)))?;

	value.set_sensitive(true);

	Ok(value)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	fn transport(http: Arc<ScriptedHttpClient>) -> Transport<ScriptedHttpClient> {
		let config = AuthflowConfig::builder("https://auth.example.com")
			.build()
			.expect("Config fixture should be valid.");

		Transport::new(config, http)
	}

	#[tokio::test]
	async fn sets_json_content_type_and_session_bearer() {
		let http = Arc::new(ScriptedHttpClient::default());

		http.respond(200, r#"{"ok":true}"#);

		let token = Secret::new("session-token");
		let value = transport(http.clone())
			.send(ApiRequest::get("/auth/me"), Some(&token))
			.await
			.expect("Scripted request should succeed.");
		let sent = http.last_request().expect("A request should have been recorded.");

		assert_eq!(value, serde_json::json!({ "ok": true }));
		assert_eq!(sent.uri(), "https://auth.example.com/api/auth/me");
		assert_eq!(sent.headers()[CONTENT_TYPE], "application/json");
		assert_eq!(sent.headers()[AUTHORIZATION], "Bearer session-token");
		assert!(sent.body().is_empty());
	}

	#[tokio::test]
	async fn caller_headers_survive_the_merge() {
		let http = Arc::new(ScriptedHttpClient::default());

		http.respond(200, "{}");

		let token = Secret::new("session-token");
		let request = ApiRequest::get("/auth/me")
			.header(HeaderName::from_static("x-request-id"), HeaderValue::from_static("abc"))
			.bearer("explicit-token")
			.expect("Bearer fixture should be a valid header.");

		transport(http.clone())
			.send(request, Some(&token))
			.await
			.expect("Scripted request should succeed.");

		let sent = http.last_request().expect("A request should have been recorded.");

		assert_eq!(sent.headers()["x-request-id"], "abc");
		assert_eq!(sent.headers()[AUTHORIZATION], "Bearer explicit-token");
		assert_eq!(sent.headers().get_all(AUTHORIZATION).iter().count(), 1);
	}

	#[tokio::test]
	async fn empty_token_is_not_sent() {
		let http = Arc::new(ScriptedHttpClient::default());

		http.respond(200, "{}");

		let token = Secret::new("");

		transport(http.clone())
			.send(ApiRequest::post("/auth/logout"), Some(&token))
			.await
			.expect("Scripted request should succeed.");

		let sent = http.last_request().expect("A request should have been recorded.");

		assert!(!sent.headers().contains_key(AUTHORIZATION));
	}

	#[tokio::test]
	async fn no_content_and_blank_bodies_become_empty_objects() {
		let http = Arc::new(ScriptedHttpClient::default());
		let transport = transport(http.clone());

		for (status, body) in [(204, ""), (200, ""), (200, "  \n"), (201, "")] {
			http.respond(status, body);

			let value = transport
				.send(ApiRequest::post("/auth/mfa/disable"), None)
				.await
				.expect("Empty responses should decode.");

			assert_eq!(value, Value::Object(Map::new()));
		}
	}

	#[tokio::test]
	async fn segments_are_percent_encoded() {
		let http = Arc::new(ScriptedHttpClient::default());

		http.respond(204, "");
		transport(http.clone())
			.send(ApiRequest::delete("/api-keys").segment("key 1/2"), None)
			.await
			.expect("Scripted request should succeed.");

		let sent = http.last_request().expect("A request should have been recorded.");

		assert_eq!(sent.method(), Method::DELETE);
		assert_eq!(sent.uri(), "https://auth.example.com/api/api-keys/key%201%2F2");
	}

	#[tokio::test]
	async fn json_bodies_are_encoded() {
		let http = Arc::new(ScriptedHttpClient::default());

		http.respond(200, "{}");

		let request = ApiRequest::post("/auth/refresh")
			.json(&serde_json::json!({ "refreshToken": "r-1" }))
			.expect("JSON fixture should encode.");

		transport(http.clone()).send(request, None).await.expect("Scripted request should succeed.");

		let sent = http.last_request().expect("A request should have been recorded.");
		let body: Value =
			serde_json::from_slice(sent.body()).expect("Recorded body should be JSON.");

		assert_eq!(body, serde_json::json!({ "refreshToken": "r-1" }));
	}

	#[tokio::test]
	async fn error_statuses_become_api_errors() {
		let http = Arc::new(ScriptedHttpClient::default());
		let transport = transport(http.clone());

		http.respond(401, r#"{"error":"bad creds"}"#);

		let err = transport
			.send(ApiRequest::post("/auth/login"), None)
			.await
			.expect_err("401 should fail.");

		assert_eq!(err.to_string(), "bad creds");
		assert_eq!(err.status(), Some(401));

		http.respond(503, "upstream unavailable");

		let err = transport
			.send(ApiRequest::post("/auth/login"), None)
			.await
			.expect_err("503 should fail.");

		assert!(err.to_string().contains("503"));
		assert_eq!(err.status(), Some(503));
	}

	#[tokio::test]
	async fn malformed_success_bodies_fail_to_decode() {
		let http = Arc::new(ScriptedHttpClient::default());

		http.respond(200, "<html></html>");

		let err = transport(http)
			.send(ApiRequest::get("/auth/me"), None)
			.await
			.expect_err("HTML bodies should not decode.");

		assert!(matches!(err, Error::Decode { .. }));
		assert_eq!(err.status(), None);
	}

	#[tokio::test]
	async fn network_failures_have_no_status() {
		let http = Arc::new(ScriptedHttpClient::default());

		http.fail("connection refused");

		let err = transport(http)
			.send(ApiRequest::get("/auth/me"), None)
			.await
			.expect_err("Transport failure should surface.");

		assert!(matches!(err, Error::Transport(_)));
		assert_eq!(err.status(), None);
		assert_eq!(err.to_string(), "Request failed: connection refused");
	}
}
