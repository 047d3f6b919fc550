//! Transport primitives for Authflow API calls.
//!
//! [`HttpClient`] is the client's only dependency on an HTTP stack. It speaks plain
//! [`http`] request/response values with owned byte bodies, so a custom transport (a
//! different client library, a recording fake in tests) only has to move bytes. Header
//! composition, JSON encoding, and error translation all live in [`crate::transport`].

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;

/// Outgoing request handed to an [`HttpClient`].
pub type HttpRequest = http::Request<Vec<u8>>;
/// Raw response returned by an [`HttpClient`].
pub type HttpResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing Authflow API calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many
/// [`AuthflowClient`](crate::client::AuthflowClient) instances (for example one per
/// incoming request in a server) behind an `Arc`. Any HTTP status, including 4xx and 5xx,
/// is a successful `execute`; only failures to obtain a response at all (DNS, connect,
/// TLS, timeout, body read) are reported as [`HttpClient::TransportError`].
pub trait HttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the full response, body included.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Timeouts, proxies, and TLS roots are whatever the wrapped client was built with; the
/// Authflow client adds no retry or timeout policy of its own.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
