//! Tracing helpers for the pipeline stages.
//!
//! Each upstream call runs inside a span named `fare_search.stage` tagged with the
//! `stage` field, so serving layers can correlate token refreshes with the searches
//! that triggered them.

// self
use crate::_prelude::*;

/// Pipeline stages observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
	/// Credential exchange against the authorization endpoint.
	Token,
	/// Authenticated flight-offers search.
	Search,
}
impl Stage {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Stage::Token => "token",
			Stage::Search => "search",
		}
	}
}
impl Display for Stage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A span builder used by pipeline stages.
#[derive(Clone, Debug)]
pub struct StageSpan {
	span: tracing::Span,
}
impl StageSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: Stage) -> Self {
		Self { span: tracing::info_span!("fare_search.stage", stage = stage.as_str()) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> tracing::instrument::Instrumented<Fut>
	where
		Fut: Future,
	{
		use tracing::Instrument;

		fut.instrument(self.span.clone())
	}
}
