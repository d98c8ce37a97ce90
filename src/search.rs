//! Search pipeline entry point: validate, authenticate, query upstream, normalize.

// self
use crate::{
	_prelude::*,
	config::UpstreamConfig,
	http::{self, HttpClient},
	obs::{Stage, StageSpan},
	offer::{self, NormalizedOffer, SearchResponse},
	query::SearchQuery,
	token::TokenProvider,
};

/// Fixed upstream query knobs: one adult, connections allowed, USD pricing, and at
/// most 12 results per search.
const FIXED_PARAMS: [(&str, &str); 4] =
	[("adults", "1"), ("nonStop", "false"), ("currencyCode", "USD"), ("max", "12")];

/// Round-trip flight offer search client.
///
/// Composes the token provider and the upstream search call into one linear pipeline
/// per request. The only state shared across requests is the cached credential inside
/// [`TokenProvider`]; search results are never cached and no call is retried.
#[derive(Clone)]
pub struct SearchClient {
	config: UpstreamConfig,
	http_client: HttpClient,
	tokens: TokenProvider,
}
impl SearchClient {
	/// Creates a client with the system clock and a fresh HTTP connection pool.
	pub fn new(config: UpstreamConfig) -> Self {
		Self::with_http_client(config, HttpClient::default())
	}

	/// Creates a client reusing an existing HTTP client.
	pub fn with_http_client(config: UpstreamConfig, http_client: HttpClient) -> Self {
		let tokens = TokenProvider::new(config.clone(), http_client.clone());

		Self::with_token_provider(config, http_client, tokens)
	}

	/// Creates a client with an injected token provider (used with manual clocks).
	pub fn with_token_provider(
		config: UpstreamConfig,
		http_client: HttpClient,
		tokens: TokenProvider,
	) -> Self {
		Self { config, http_client, tokens }
	}

	/// Access to the underlying token provider.
	pub fn token_provider(&self) -> &TokenProvider {
		&self.tokens
	}

	/// Runs one search: validate the query, obtain a bearer token, call the upstream
	/// search endpoint, and return the normalized offers sorted ascending by price.
	pub async fn search(&self, query: &SearchQuery) -> Result<Vec<NormalizedOffer>> {
		query.validate()?;

		let token = self.tokens.token().await?;
		let span = StageSpan::new(Stage::Search);

		span.instrument(async move {
			let response = self
				.http_client
				.get(self.config.search_endpoint().clone())
				.query(&[
					("originLocationCode", query.origin.as_str()),
					("destinationLocationCode", query.destination.as_str()),
					("departureDate", query.departure_date.as_str()),
					("returnDate", query.return_date.as_str()),
				])
				.query(&FIXED_PARAMS)
				.bearer_auth(token.expose())
				.send()
				.await?;

			if !response.status().is_success() {
				let (status, body) = http::failure_parts(response).await?;

				return Err(Error::UpstreamSearch { status, body });
			}

			let bytes = response.bytes().await?;
			let parsed: SearchResponse = http::decode_json(&bytes)?;
			let offers = offer::normalize_and_sort(parsed.data);

			tracing::debug!(count = offers.len(), "normalized upstream offers");

			Ok(offers)
		})
		.await
	}
}
