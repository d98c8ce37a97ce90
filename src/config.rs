//! Upstream endpoint configuration and client credentials.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Base URL of the upstream test environment, used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const SEARCH_PATH: &str = "/v2/shopping/flight-offers";

/// Redacted client secret wrapper keeping credential material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);
impl ClientSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ClientSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ClientSecret").field(&"<redacted>").finish()
	}
}
impl Display for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Client credentials used for the OAuth 2.0 client-credentials exchange.
#[derive(Clone, Debug)]
pub struct ApiCredentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret; never logged or echoed in errors.
	pub client_secret: ClientSecret,
}
impl ApiCredentials {
	/// Creates credentials from their raw parts.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: ClientSecret::new(client_secret) }
	}

	/// Returns `true` when either part is missing.
	pub fn is_incomplete(&self) -> bool {
		self.client_id.trim().is_empty() || self.client_secret.expose().trim().is_empty()
	}
}

/// Upstream API configuration: base URL, derived endpoints, and credentials.
///
/// Endpoints are derived once at construction so later accessors are total.
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
	/// Base URL of the upstream API.
	pub base_url: Url,
	/// Credentials for the token endpoint.
	pub credentials: ApiCredentials,
	token_endpoint: Url,
	search_endpoint: Url,
}
impl UpstreamConfig {
	/// Creates a config rooted at the given base URL.
	pub fn new(base_url: &str, credentials: ApiCredentials) -> Result<Self, ConfigError> {
		let base_url = Url::parse(base_url)
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;
		let token_endpoint = base_url
			.join(TOKEN_PATH)
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;
		let search_endpoint = base_url
			.join(SEARCH_PATH)
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Ok(Self { base_url, credentials, token_endpoint, search_endpoint })
	}

	/// Reads configuration from `AMADEUS_BASE_URL`, `AMADEUS_CLIENT_ID`, and
	/// `AMADEUS_CLIENT_SECRET`, falling back to [`DEFAULT_BASE_URL`].
	pub fn from_env() -> Result<Self, ConfigError> {
		let base_url =
			env::var("AMADEUS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
		let client_id =
			env::var("AMADEUS_CLIENT_ID").map_err(|_| ConfigError::MissingCredentials)?;
		let client_secret =
			env::var("AMADEUS_CLIENT_SECRET").map_err(|_| ConfigError::MissingCredentials)?;

		Self::new(&base_url, ApiCredentials::new(client_id, client_secret))
	}

	/// `POST` target for the client-credentials exchange.
	pub fn token_endpoint(&self) -> &Url {
		&self.token_endpoint
	}

	/// `GET` target for the flight-offers search.
	pub fn search_endpoint(&self) -> &Url {
		&self.search_endpoint
	}
}
