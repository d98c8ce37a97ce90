//! Thin HTTP transport wrapper shared by the token provider and the search pipeline.

// std
use std::ops::Deref;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Both pipeline stages clone this wrapper, which keeps one connection pool per
/// process regardless of how many clients are constructed from it.
#[derive(Clone, Default)]
pub struct HttpClient(pub ReqwestClient);
impl HttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for HttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for HttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Splits a non-success response into its status code and body text so errors can
/// carry both for diagnosis.
pub(crate) async fn failure_parts(response: reqwest::Response) -> Result<(u16, String)> {
	let status = response.status().as_u16();
	let body = response.text().await?;

	Ok((status, body))
}

/// Decodes a JSON payload, reporting the failing path on malformed bodies.
pub(crate) fn decode_json<T>(bytes: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	Ok(serde_path_to_error::deserialize(&mut deserializer)?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, Deserialize)]
	struct Probe {
		value: u32,
	}

	#[test]
	fn decode_json_surfaces_the_failing_path() {
		let err = decode_json::<Probe>(br#"{"value":"nope"}"#)
			.expect_err("Mistyped field should fail to decode.");
		let Error::Decode(source) = err else {
			panic!("Decode failures should map to Error::Decode.");
		};

		assert_eq!(source.path().to_string(), "value");
	}

	#[test]
	fn decode_json_accepts_well_formed_payloads() {
		let probe: Probe =
			decode_json(br#"{"value":7}"#).expect("Well-formed payload should decode.");

		assert_eq!(probe.value, 7);
	}
}
