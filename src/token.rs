//! Credential-token acquisition and caching for the upstream API.
//!
//! The provider keeps one [`CachedToken`] per process and hands it out until the
//! recorded expiry instant, so repeated searches share a single credential exchange.
//! Expiry is shortened by [`EXPIRY_MARGIN`] so a token is never presented right as it
//! expires mid-request. Refreshes are serialized through a singleflight guard; cold-
//! cache callers piggy-back on the in-flight exchange instead of stampeding the token
//! endpoint.

// self
use crate::{
	_prelude::*,
	config::UpstreamConfig,
	error::ConfigError,
	http::{self, HttpClient},
	obs::{Stage, StageSpan},
};

/// Safety margin subtracted from the provider-declared lifetime.
pub const EXPIRY_MARGIN: Duration = Duration::seconds(60);
/// Lifetime in seconds assumed when the provider omits `expires_in` or sends a value
/// that is not a positive number of seconds.
pub const DEFAULT_LIFETIME_SECS: i64 = 1799;

/// Redacted access token wrapper keeping credential material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Immutable cached credential: the token plus its effective expiry instant.
///
/// Records are replaced wholesale on refresh, never mutated in place.
#[derive(Clone, Debug)]
pub struct CachedToken {
	/// Access token secret.
	pub access_token: AccessToken,
	/// Expiry instant, already shortened by [`EXPIRY_MARGIN`].
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Returns `true` while `instant` is strictly before the recorded expiry.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}
}

/// Clock abstraction so expiry arithmetic is testable at exact boundaries.
pub trait Clock
where
	Self: 'static + Send + Sync,
{
	/// Returns the current instant.
	fn now(&self) -> OffsetDateTime;
}

/// Clock backed by the system's UTC time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

/// Manually driven clock for tests; clones share the same instant.
#[derive(Clone, Debug)]
pub struct ManualClock(Arc<RwLock<OffsetDateTime>>);
impl ManualClock {
	/// Creates a clock frozen at `start`.
	pub fn new(start: OffsetDateTime) -> Self {
		Self(Arc::new(RwLock::new(start)))
	}

	/// Moves the clock forward by `delta`.
	pub fn advance(&self, delta: Duration) {
		*self.0.write() += delta;
	}

	/// Jumps the clock to an absolute instant.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.0.write() = instant;
	}
}
impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.0.read()
	}
}

/// Wire shape of the authorization endpoint's success response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
	access_token: String,
	#[serde(default, deserialize_with = "lenient_seconds")]
	expires_in: Option<i64>,
}

/// Acquires and caches bearer tokens for the upstream API.
///
/// The cached record is process-wide state shared by every clone of the provider;
/// clones see each other's refreshes.
#[derive(Clone)]
pub struct TokenProvider {
	config: UpstreamConfig,
	http_client: HttpClient,
	clock: Arc<dyn Clock>,
	cached: Arc<RwLock<Option<CachedToken>>>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl TokenProvider {
	/// Creates a provider with the system clock.
	pub fn new(config: UpstreamConfig, http_client: HttpClient) -> Self {
		Self::with_clock(config, http_client, Arc::new(SystemClock))
	}

	/// Creates a provider with an injected clock.
	pub fn with_clock(
		config: UpstreamConfig,
		http_client: HttpClient,
		clock: Arc<dyn Clock>,
	) -> Self {
		Self {
			config,
			http_client,
			clock,
			cached: Arc::new(RwLock::new(None)),
			refresh_guard: Arc::new(AsyncMutex::new(())),
		}
	}

	/// Returns the cached record, if any, regardless of validity.
	pub fn cached(&self) -> Option<CachedToken> {
		self.cached.read().clone()
	}

	/// Returns a valid bearer token, refreshing it first when the cache is empty or
	/// past its effective expiry.
	pub async fn token(&self) -> Result<AccessToken> {
		if let Some(current) = self.valid_cached() {
			return Ok(current);
		}

		let span = StageSpan::new(Stage::Token);

		span.instrument(async move {
			let _refresh = self.refresh_guard.lock().await;

			// A concurrent caller may have refreshed while this one waited on the guard.
			if let Some(current) = self.valid_cached() {
				return Ok(current);
			}

			self.refresh().await
		})
		.await
	}

	fn valid_cached(&self) -> Option<AccessToken> {
		let now = self.clock.now();

		self.cached
			.read()
			.as_ref()
			.filter(|token| token.is_valid_at(now))
			.map(|token| token.access_token.clone())
	}

	async fn refresh(&self) -> Result<AccessToken> {
		let credentials = &self.config.credentials;

		if credentials.is_incomplete() {
			return Err(ConfigError::MissingCredentials.into());
		}

		let form = [
			("grant_type", "client_credentials"),
			("client_id", credentials.client_id.as_str()),
			("client_secret", credentials.client_secret.expose()),
		];
		let response = self
			.http_client
			.post(self.config.token_endpoint().clone())
			.form(&form)
			.send()
			.await?;

		if !response.status().is_success() {
			let (status, body) = http::failure_parts(response).await?;

			return Err(Error::UpstreamAuth { status, body });
		}

		let issued_at = self.clock.now();
		let bytes = response.bytes().await?;
		let parsed: TokenResponse = http::decode_json(&bytes)?;
		let lifetime = Duration::seconds(parsed.expires_in.unwrap_or(DEFAULT_LIFETIME_SECS));
		let record = CachedToken {
			access_token: AccessToken::new(parsed.access_token),
			expires_at: issued_at + (lifetime - EXPIRY_MARGIN),
		};

		tracing::debug!(expires_at = %record.expires_at, "refreshed upstream access token");

		*self.cached.write() = Some(record.clone());

		Ok(record.access_token)
	}
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let value = Option::<serde_json::Value>::deserialize(deserializer)?;

	Ok(value
		.and_then(|value| match value {
			serde_json::Value::Number(number) => number.as_i64(),
			serde_json::Value::String(raw) => raw.trim().parse().ok(),
			_ => None,
		})
		.filter(|secs| *secs > 0))
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn validity_is_strictly_before_expiry() {
		let token = CachedToken {
			access_token: AccessToken::new("token"),
			expires_at: datetime!(2025-06-01 12:00 UTC),
		};

		assert!(token.is_valid_at(datetime!(2025-06-01 11:59:59 UTC)));
		assert!(!token.is_valid_at(datetime!(2025-06-01 12:00 UTC)));
		assert!(!token.is_valid_at(datetime!(2025-06-01 12:00:01 UTC)));
	}

	#[test]
	fn manual_clock_clones_share_the_instant() {
		let clock = ManualClock::new(datetime!(2025-06-01 00:00 UTC));
		let observer = clock.clone();

		clock.advance(Duration::minutes(5));

		assert_eq!(observer.now(), datetime!(2025-06-01 00:05 UTC));

		clock.set(datetime!(2025-06-02 00:00 UTC));

		assert_eq!(observer.now(), datetime!(2025-06-02 00:00 UTC));
	}

	#[test]
	fn expires_in_tolerates_the_wire_variants() {
		let parse = |payload: &str| {
			serde_json::from_str::<TokenResponse>(payload)
				.expect("Token response fixture should decode.")
				.expires_in
		};

		assert_eq!(parse(r#"{"access_token":"t","expires_in":1799}"#), Some(1799));
		assert_eq!(parse(r#"{"access_token":"t","expires_in":"900"}"#), Some(900));
		assert_eq!(parse(r#"{"access_token":"t"}"#), None);
		assert_eq!(parse(r#"{"access_token":"t","expires_in":"soon"}"#), None);
		assert_eq!(parse(r#"{"access_token":"t","expires_in":-5}"#), None);
		assert_eq!(parse(r#"{"access_token":"t","expires_in":null}"#), None);
	}

	#[test]
	fn token_formatters_redact() {
		let token = AccessToken::new("super-secret");

		assert_eq!(format!("{token:?}"), "AccessToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
	}
}
