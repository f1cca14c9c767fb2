//! Blocking and async authentication clients.
//!
//! Both clients own a [`ProviderDescriptor`] and an injected transport, build the same requests
//! through the shared helpers in `common`, and hand every exchange to
//! [`mapper::map_outcome`](crate::mapper::map_outcome). Neither keeps state between calls.

pub mod blocking;
pub mod nonblocking;

mod common;

pub use blocking::*;
pub use nonblocking::*;

#[cfg(feature = "reqwest")]
use crate::http::{ReqwestBlockingHttpClient, ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Blocking client specialized for the crate's default reqwest transport.
pub type ReqwestSyncAuthClient = SyncAuthClient<ReqwestBlockingHttpClient>;
#[cfg(feature = "reqwest")]
/// Async client specialized for the crate's default reqwest transport.
pub type ReqwestAsyncAuthClient = AsyncAuthClient<ReqwestHttpClient>;
