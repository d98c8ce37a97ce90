//! Round-trip flight offer search client—cached OAuth 2.0 credentials, upstream query
//! construction, and price-sorted offer normalization in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod offer;
pub mod query;
pub mod search;
pub mod token;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use time;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
