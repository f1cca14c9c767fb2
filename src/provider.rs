//! Identity-provider configuration.
//!
//! `descriptor` exposes the validated [`ProviderDescriptor`]: the base address the client is
//! constructed with, the resolved login and token-validation endpoints, and how credentials and
//! tokens travel on the wire.

pub mod descriptor;

pub use descriptor::*;
