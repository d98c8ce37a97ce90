//! Raw upstream offer shapes and their normalized, display-ready form.

// std
use std::cmp::Ordering;
// self
use crate::_prelude::*;

/// Top-level payload returned by the upstream search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
	/// Raw offers; an absent list is treated as empty.
	#[serde(default)]
	pub data: Vec<RawOffer>,
}

/// One upstream flight offer, opaque except for the fields consumed here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
	/// Upstream offer identifier.
	#[serde(default)]
	pub id: Option<String>,
	/// Outbound and optional inbound itineraries, in that order.
	#[serde(default)]
	pub itineraries: Vec<Itinerary>,
	/// Total price with currency.
	#[serde(default)]
	pub price: Option<RawPrice>,
	/// Airlines validating the offer.
	#[serde(default)]
	pub validating_airline_codes: Vec<String>,
}

/// One direction of travel composed of one or more segments.
#[derive(Debug, Default, Deserialize)]
pub struct Itinerary {
	/// Upstream duration encoding (ISO 8601), passed through untouched.
	#[serde(default)]
	pub duration: Option<String>,
	/// Ordered flown segments.
	#[serde(default)]
	pub segments: Vec<Segment>,
}

/// A single flown leg within an itinerary (one takeoff, one landing).
#[derive(Debug, Default, Deserialize)]
pub struct Segment {
	/// Departure endpoint.
	#[serde(default)]
	pub departure: Option<SegmentEndpoint>,
	/// Arrival endpoint.
	#[serde(default)]
	pub arrival: Option<SegmentEndpoint>,
}

/// Airport and timestamp at one end of a segment.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentEndpoint {
	/// Airport code (IATA).
	#[serde(default)]
	pub iata_code: Option<String>,
	/// Local timestamp in the upstream encoding.
	#[serde(default)]
	pub at: Option<String>,
}

/// Total price as quoted upstream.
#[derive(Debug, Default, Deserialize)]
pub struct RawPrice {
	/// Numeric-as-string grand total.
	#[serde(default)]
	pub total: Option<String>,
	/// Currency code of the total.
	#[serde(default)]
	pub currency: Option<String>,
}

/// Simplified, display-ready representation of one upstream offer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOffer {
	/// Upstream offer identifier.
	pub id: Option<String>,
	/// Total price as quoted upstream, kept verbatim for display.
	pub price: Option<String>,
	/// Price parsed once at normalization time for ordering; `None` when the quoted
	/// string is not numeric.
	#[serde(skip)]
	pub price_value: Option<f64>,
	/// Currency code of the quoted price.
	pub currency: Option<String>,
	/// Validating airline codes; empty when upstream omits them.
	pub validating_airline_codes: Vec<String>,
	/// Outbound leg summary.
	pub outbound: FlightLeg,
	/// Inbound leg summary; every field absent when upstream returned no second
	/// itinerary.
	pub inbound: FlightLeg,
}
impl NormalizedOffer {
	/// Derives the normalized form from one raw upstream offer.
	pub fn from_raw(raw: &RawOffer) -> Self {
		let price = raw.price.as_ref().and_then(|price| price.total.clone());
		let price_value = price.as_deref().and_then(parse_price);

		Self {
			id: raw.id.clone(),
			price,
			price_value,
			currency: raw.price.as_ref().and_then(|price| price.currency.clone()),
			validating_airline_codes: raw.validating_airline_codes.clone(),
			outbound: FlightLeg::from_itinerary(raw.itineraries.first()),
			inbound: FlightLeg::from_itinerary(raw.itineraries.get(1)),
		}
	}
}

/// Summary of one direction of travel.
///
/// Every field except `stops` is independently optional: when the itinerary or its
/// segments are absent upstream, the whole leg stays absent rather than zero-filled,
/// and `stops` falls back to 0.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightLeg {
	/// Departure airport code of the first segment.
	pub departure_airport: Option<String>,
	/// Departure time of the first segment.
	pub departure_time: Option<String>,
	/// Arrival airport code of the last segment.
	pub arrival_airport: Option<String>,
	/// Arrival time of the last segment.
	pub arrival_time: Option<String>,
	/// Total duration in the upstream encoding.
	pub duration: Option<String>,
	/// Intermediate stops: segment count minus one, floored at 0.
	pub stops: usize,
}
impl FlightLeg {
	/// Total extraction over an optional itinerary; the absent branches are explicit
	/// so a missing itinerary can never be mistaken for a zero-filled one.
	pub fn from_itinerary(itinerary: Option<&Itinerary>) -> Self {
		let Some(itinerary) = itinerary else {
			return Self::default();
		};
		let (Some(first), Some(last)) = (itinerary.segments.first(), itinerary.segments.last())
		else {
			return Self::default();
		};

		Self {
			departure_airport: first.departure.as_ref().and_then(|end| end.iata_code.clone()),
			departure_time: first.departure.as_ref().and_then(|end| end.at.clone()),
			arrival_airport: last.arrival.as_ref().and_then(|end| end.iata_code.clone()),
			arrival_time: last.arrival.as_ref().and_then(|end| end.at.clone()),
			duration: itinerary.duration.clone(),
			stops: itinerary.segments.len().saturating_sub(1),
		}
	}
}

/// Normalizes every raw offer and sorts ascending by numeric price.
///
/// Offers whose price fails numeric interpretation sort last; ties keep their
/// upstream order (stable sort).
pub fn normalize_and_sort(raw: Vec<RawOffer>) -> Vec<NormalizedOffer> {
	let mut offers = raw.iter().map(NormalizedOffer::from_raw).collect::<Vec<_>>();

	offers.sort_by(|a, b| match (a.price_value, b.price_value) {
		(Some(a), Some(b)) => a.total_cmp(&b),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	});

	offers
}

fn parse_price(raw: &str) -> Option<f64> {
	raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn endpoint(code: &str, at: &str) -> Option<SegmentEndpoint> {
		Some(SegmentEndpoint { iata_code: Some(code.into()), at: Some(at.into()) })
	}

	fn segment(from: (&str, &str), to: (&str, &str)) -> Segment {
		Segment { departure: endpoint(from.0, from.1), arrival: endpoint(to.0, to.1) }
	}

	fn priced(total: &str) -> RawOffer {
		RawOffer {
			price: Some(RawPrice { total: Some(total.into()), currency: Some("USD".into()) }),
			..RawOffer::default()
		}
	}

	#[test]
	fn leg_spans_first_departure_to_last_arrival() {
		let itinerary = Itinerary {
			duration: Some("PT8H30M".into()),
			segments: vec![
				segment(("JFK", "2025-06-01T08:00:00"), ("ORD", "2025-06-01T10:00:00")),
				segment(("ORD", "2025-06-01T11:00:00"), ("LAX", "2025-06-01T13:30:00")),
			],
		};
		let leg = FlightLeg::from_itinerary(Some(&itinerary));

		assert_eq!(leg.departure_airport.as_deref(), Some("JFK"));
		assert_eq!(leg.departure_time.as_deref(), Some("2025-06-01T08:00:00"));
		assert_eq!(leg.arrival_airport.as_deref(), Some("LAX"));
		assert_eq!(leg.arrival_time.as_deref(), Some("2025-06-01T13:30:00"));
		assert_eq!(leg.duration.as_deref(), Some("PT8H30M"));
		assert_eq!(leg.stops, 1);
	}

	#[test]
	fn absent_itinerary_leaves_every_field_absent() {
		let leg = FlightLeg::from_itinerary(None);

		assert_eq!(leg.departure_airport, None);
		assert_eq!(leg.departure_time, None);
		assert_eq!(leg.arrival_airport, None);
		assert_eq!(leg.arrival_time, None);
		assert_eq!(leg.duration, None);
		assert_eq!(leg.stops, 0);
	}

	#[test]
	fn empty_segments_behave_like_an_absent_itinerary() {
		let itinerary = Itinerary { duration: Some("PT1H".into()), segments: Vec::new() };
		let leg = FlightLeg::from_itinerary(Some(&itinerary));

		assert_eq!(leg.duration, None);
		assert_eq!(leg.stops, 0);
	}

	#[test]
	fn single_segment_leg_has_zero_stops() {
		let itinerary = Itinerary {
			duration: Some("PT6H".into()),
			segments: vec![segment(("LAX", "2025-06-10T09:00:00"), ("JFK", "2025-06-10T17:00:00"))],
		};

		assert_eq!(FlightLeg::from_itinerary(Some(&itinerary)).stops, 0);
	}

	#[test]
	fn missing_inbound_itinerary_yields_an_absent_leg() {
		let raw = RawOffer {
			id: Some("1".into()),
			itineraries: vec![Itinerary {
				duration: Some("PT5H".into()),
				segments: vec![segment(
					("JFK", "2025-06-01T08:00:00"),
					("LAX", "2025-06-01T11:00:00"),
				)],
			}],
			..RawOffer::default()
		};
		let offer = NormalizedOffer::from_raw(&raw);

		assert_eq!(offer.outbound.stops, 0);
		assert_eq!(offer.inbound.departure_airport, None);
		assert_eq!(offer.inbound.arrival_time, None);
		assert_eq!(offer.inbound.stops, 0);
	}

	#[test]
	fn airline_codes_default_to_empty() {
		let offer = NormalizedOffer::from_raw(&RawOffer::default());

		assert!(offer.validating_airline_codes.is_empty());
		assert_eq!(offer.price, None);
		assert_eq!(offer.price_value, None);
	}

	#[test]
	fn offers_sort_ascending_by_numeric_price() {
		let sorted = normalize_and_sort(vec![priced("250.00"), priced("99.50"), priced("400.10")]);
		let prices = sorted.iter().filter_map(|offer| offer.price.as_deref()).collect::<Vec<_>>();

		assert_eq!(prices, ["99.50", "250.00", "400.10"]);
	}

	#[test]
	fn unparsable_prices_sort_last() {
		let sorted = normalize_and_sort(vec![
			priced("not-a-price"),
			priced("250.00"),
			priced("99.50"),
		]);
		let prices = sorted.iter().filter_map(|offer| offer.price.as_deref()).collect::<Vec<_>>();

		assert_eq!(prices, ["99.50", "250.00", "not-a-price"]);
	}

	#[test]
	fn absent_data_list_is_treated_as_empty() {
		let response: SearchResponse =
			serde_json::from_str("{}").expect("Empty payload should decode.");

		assert!(response.data.is_empty());
	}

	#[test]
	fn normalized_wire_shape_is_camel_case() {
		let raw: RawOffer = serde_json::from_str(
			r#"{
				"id": "42",
				"price": { "total": "310.25", "currency": "USD" },
				"validatingAirlineCodes": ["AA"],
				"itineraries": [
					{
						"duration": "PT8H30M",
						"segments": [
							{
								"departure": { "iataCode": "JFK", "at": "2025-06-01T08:00:00" },
								"arrival": { "iataCode": "LAX", "at": "2025-06-01T13:30:00" }
							}
						]
					}
				]
			}"#,
		)
		.expect("Raw offer fixture should decode.");
		let json = serde_json::to_value(NormalizedOffer::from_raw(&raw))
			.expect("Normalized offer should serialize.");

		assert_eq!(json["validatingAirlineCodes"][0], "AA");
		assert_eq!(json["outbound"]["departureAirport"], "JFK");
		assert_eq!(json["outbound"]["stops"], 0);
		assert_eq!(json["price"], "310.25");
		assert!(json.get("priceValue").is_none());
	}
}
