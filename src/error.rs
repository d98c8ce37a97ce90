//! Error types shared across the token provider and the search pipeline.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Search query failed validation; no upstream call was made.
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// Credential exchange was rejected by the upstream authorization endpoint.
	#[error("Token request failed: {status} {body}.")]
	UpstreamAuth {
		/// HTTP status returned by the authorization endpoint.
		status: u16,
		/// Response body text returned by the authorization endpoint.
		body: String,
	},
	/// Search call was rejected after a valid token was obtained.
	#[error("Flight search failed: {status} {body}.")]
	UpstreamSearch {
		/// HTTP status returned by the search endpoint.
		status: u16,
		/// Response body text returned by the search endpoint.
		body: String,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the upstream API.")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Upstream responded with malformed JSON that could not be parsed.
	#[error("Upstream returned malformed JSON.")]
	Decode(
		#[from]
		#[source]
		serde_path_to_error::Error<serde_json::Error>,
	),
}
impl Error {
	/// Wraps a transport-specific network error.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}

	/// HTTP-equivalent status for the serving collaborator.
	///
	/// Validation maps to 400 and a failed search forwards the upstream status as-is;
	/// everything else (configuration, authorization, transport, decoding) surfaces as
	/// a generic 500.
	pub fn status_code(&self) -> u16 {
		match self {
			Self::Validation(_) => 400,
			Self::UpstreamSearch { status, .. } => *status,
			_ => 500,
		}
	}
}
impl From<reqwest::Error> for Error {
	fn from(e: reqwest::Error) -> Self {
		Self::transport(e)
	}
}

/// Configuration failures raised before any upstream call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Required client credentials are absent. The message names the variables without
	/// echoing any value.
	#[error("Missing AMADEUS_CLIENT_ID or AMADEUS_CLIENT_SECRET.")]
	MissingCredentials,
	/// Upstream base URL cannot be parsed.
	#[error("Upstream base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Query validation failures; always surfaced as HTTP 400.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// A required query field is empty.
	#[error("The {field} field is required.")]
	MissingField {
		/// Wire-format name of the offending field.
		field: &'static str,
	},
	/// Origin and destination must differ.
	#[error("Origin and destination must be different.")]
	SameLocation,
}
