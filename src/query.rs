//! Round-trip search query shape and validation.

// self
use crate::{_prelude::*, error::ValidationError};

/// Round-trip search parameters supplied by the caller.
///
/// Field names mirror the upstream wire format so the serving collaborator can
/// deserialize request bodies directly into this type.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
	/// Origin location code (IATA).
	pub origin: String,
	/// Destination location code (IATA).
	pub destination: String,
	/// Outbound departure date (`YYYY-MM-DD`).
	pub departure_date: String,
	/// Inbound departure date (`YYYY-MM-DD`).
	pub return_date: String,
}
impl SearchQuery {
	/// Convenience constructor covering the four required fields.
	pub fn new(
		origin: impl Into<String>,
		destination: impl Into<String>,
		departure_date: impl Into<String>,
		return_date: impl Into<String>,
	) -> Self {
		Self {
			origin: origin.into(),
			destination: destination.into(),
			departure_date: departure_date.into(),
			return_date: return_date.into(),
		}
	}

	/// Checks that every field is present and that origin differs from destination.
	///
	/// The pipeline calls this before obtaining a token, so an invalid query never
	/// reaches the network.
	pub fn validate(&self) -> Result<(), ValidationError> {
		for (field, value) in [
			("origin", &self.origin),
			("destination", &self.destination),
			("departureDate", &self.departure_date),
			("returnDate", &self.return_date),
		] {
			if value.trim().is_empty() {
				return Err(ValidationError::MissingField { field });
			}
		}
		if self.origin == self.destination {
			return Err(ValidationError::SameLocation);
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn complete_round_trip_passes() {
		let query = SearchQuery::new("JFK", "LAX", "2025-06-01", "2025-06-10");

		assert_eq!(query.validate(), Ok(()));
	}

	#[test]
	fn each_missing_field_is_named() {
		let base = SearchQuery::new("JFK", "LAX", "2025-06-01", "2025-06-10");
		let cases = [
			(SearchQuery { origin: String::new(), ..base.clone() }, "origin"),
			(SearchQuery { destination: "  ".into(), ..base.clone() }, "destination"),
			(SearchQuery { departure_date: String::new(), ..base.clone() }, "departureDate"),
			(SearchQuery { return_date: String::new(), ..base }, "returnDate"),
		];

		for (query, field) in cases {
			assert_eq!(query.validate(), Err(ValidationError::MissingField { field }));
		}
	}

	#[test]
	fn identical_endpoints_are_rejected() {
		let query = SearchQuery::new("JFK", "JFK", "2025-06-01", "2025-06-10");

		assert_eq!(query.validate(), Err(ValidationError::SameLocation));
	}

	#[test]
	fn wire_field_names_are_camel_case() {
		let query: SearchQuery = serde_json::from_str(
			r#"{"origin":"JFK","destination":"LAX","departureDate":"2025-06-01","returnDate":"2025-06-10"}"#,
		)
		.expect("Wire-format query should deserialize.");

		assert_eq!(query.departure_date, "2025-06-01");
	}
}
