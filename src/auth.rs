//! Authentication data model: parsed profiles, redacted secrets, and call outcomes.

pub mod outcome;
pub mod profile;
pub mod secret;

pub use outcome::*;
pub use profile::*;
pub use secret::*;
