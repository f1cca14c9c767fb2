//! Identity-provider login client with matching blocking and async call paths.
//!
//! Both [`client::SyncAuthClient`] and [`client::AsyncAuthClient`] fold every failure (rejected
//! credentials, unreachable provider, provider outage, malformed payload) into an
//! [`auth::AuthOutcome`], so callers branch on [`auth::ErrorKind`] instead of handling errors.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod mapper;
pub mod obs;
pub mod provider;

mod _prelude {
	pub use std::{
		collections::BTreeSet,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::Result;
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, parking_lot as _};
