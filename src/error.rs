//! Client-level error types shared by the transport, facade, and configuration layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Callers that only care about the uniform "message + optional status" view can use
/// [`Error::message`] and [`Error::status`]; only [`Error::Api`] carries an HTTP status.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The API answered with a non-2xx status.
	#[error("{message}")]
	Api {
		/// Server-supplied `error` field, or a generic message naming the status.
		message: String,
		/// HTTP status code of the failed response.
		status: u16,
	},
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A successful response body did not match the expected shape.
	#[error("Response body could not be decoded: {source}.")]
	Decode {
		/// Structured parsing failure naming the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},

	/// No session or no refresh token is held.
	#[error("No refresh token available.")]
	MissingRefreshToken,
	/// The session was replaced while a refresh was in flight.
	#[error("Session changed while the token refresh was in flight.")]
	SessionChanged,
	/// The `state` returned to the redirect handler does not match the issued one.
	#[error("Authorization state mismatch.")]
	InvalidState,
}
impl Error {
	/// HTTP status code of the failed response, when the server answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Human-readable message, identical to the [`Display`] output.
	pub fn message(&self) -> String {
		self.to_string()
	}

	/// Builds an [`Error::Api`] from a failed response's status and raw body.
	///
	/// The body's `error` field wins when it decodes; otherwise the message falls back to a
	/// generic one that names the status code.
	pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
		let message = serde_json::from_slice::<serde_json::Value>(body)
			.ok()
			.and_then(|value| match value.get("error") {
				Some(serde_json::Value::String(message)) => Some(message.to_owned()),
				Some(serde_json::Value::Null) | None => None,
				Some(other) => Some(other.to_string()),
			})
			.unwrap_or_else(|| format!("Request failed with status {status}"));

		Self::Api { message, status }
	}
}
impl From<serde_path_to_error::Error<serde_json::Error>> for Error {
	fn from(source: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::Decode { source }
	}
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Request body could not be encoded as JSON.
	#[error("Request body could not be encoded as JSON.")]
	RequestEncode {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Domain cannot be parsed as a URL.
	#[error("Domain `{domain}` is not a valid URL.")]
	InvalidDomain {
		/// Domain as supplied by the caller.
		domain: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Domain parses but cannot carry path segments (e.g. `mailto:`).
	#[error("Domain `{domain}` cannot be used as a base URL.")]
	DomainNotHierarchical {
		/// Domain as supplied by the caller.
		domain: String,
	},

	/// `start_authorization` needs a client identifier in the configuration.
	#[error("Configuration is missing an OAuth2 client_id.")]
	MissingClientId,
	/// `start_authorization` needs a redirect URI in the configuration.
	#[error("Configuration is missing an OAuth2 redirect_uri.")]
	MissingRedirectUri,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO). These never carry an HTTP status.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Request failed: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
