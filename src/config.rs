//! Client configuration and URL composition.
//!
//! [`AuthflowConfig`] is the only place where the Authflow domain is parsed. Every other module
//! asks it for [`api_url`](AuthflowConfig::api_url) (REST calls under `{domain}/api`) or
//! [`page_url`](AuthflowConfig::page_url) (browser-facing pages served from the domain root).

// self
use crate::{_prelude::*, error::ConfigError};

/// Validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthflowConfigBuilder")]
pub struct AuthflowConfig {
	domain: Url,
	#[serde(skip_serializing_if = "Option::is_none")]
	tenant_slug: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	client_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	redirect_uri: Option<String>,
}
impl AuthflowConfig {
	/// Creates a new builder for the provided Authflow domain (e.g. `https://auth.example.com`).
	pub fn builder(domain: impl Into<String>) -> AuthflowConfigBuilder {
		AuthflowConfigBuilder::new(domain)
	}

	/// Normalized domain without a trailing slash, query, or fragment.
	pub fn domain(&self) -> &Url {
		&self.domain
	}

	/// Default tenant applied when a request does not name one.
	pub fn tenant_slug(&self) -> Option<&str> {
		self.tenant_slug.as_deref()
	}

	/// OAuth2 client identifier used by [`start_authorization`](crate::client::AuthflowClient::start_authorization).
	pub fn client_id(&self) -> Option<&str> {
		self.client_id.as_deref()
	}

	/// OAuth2 redirect URI used by [`start_authorization`](crate::client::AuthflowClient::start_authorization).
	pub fn redirect_uri(&self) -> Option<&str> {
		self.redirect_uri.as_deref()
	}

	/// REST endpoint URL: `{domain}/api{path}`.
	pub fn api_url(&self, path: &str) -> Url {
		self.join(&format!("/api{path}"))
	}

	/// Browser-facing page URL: `{domain}{path}`.
	pub fn page_url(&self, path: &str) -> Url {
		self.join(path)
	}

	fn join(&self, path: &str) -> Url {
		let mut url = self.domain.clone();
		let base = self.domain.path().trim_end_matches('/');

		url.set_path(&format!("{base}{path}"));

		url
	}
}
impl TryFrom<AuthflowConfigBuilder> for AuthflowConfig {
	type Error = ConfigError;

	fn try_from(builder: AuthflowConfigBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

/// Builder for [`AuthflowConfig`] values.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthflowConfigBuilder {
	/// Authflow domain, scheme included.
	pub domain: String,
	/// Default tenant slug.
	#[serde(default)]
	pub tenant_slug: Option<String>,
	/// OAuth2 client identifier.
	#[serde(default)]
	pub client_id: Option<String>,
	/// OAuth2 redirect URI.
	#[serde(default)]
	pub redirect_uri: Option<String>,
}
impl AuthflowConfigBuilder {
	/// Creates a new builder seeded with the provided domain.
	pub fn new(domain: impl Into<String>) -> Self {
		Self { domain: domain.into(), tenant_slug: None, client_id: None, redirect_uri: None }
	}

	/// Sets the default tenant slug.
	pub fn tenant_slug(mut self, slug: impl Into<String>) -> Self {
		self.tenant_slug = Some(slug.into());

		self
	}

	/// Sets the OAuth2 client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the OAuth2 redirect URI.
	pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(redirect_uri.into());

		self
	}

	/// Consumes the builder and validates the domain.
	pub fn build(self) -> Result<AuthflowConfig, ConfigError> {
		let raw = self.domain.trim();
		let mut domain = Url::parse(raw)
			.map_err(|source| ConfigError::InvalidDomain { domain: raw.to_owned(), source })?;

		if domain.cannot_be_a_base() {
			return Err(ConfigError::DomainNotHierarchical { domain: raw.to_owned() });
		}

		let path = domain.path().trim_end_matches('/').to_owned();

		domain.set_path(&path);
		domain.set_query(None);
		domain.set_fragment(None);

		Ok(AuthflowConfig {
			domain,
			tenant_slug: self.tenant_slug.filter(|slug| !slug.is_empty()),
			client_id: self.client_id,
			redirect_uri: self.redirect_uri,
		})
	}
}
