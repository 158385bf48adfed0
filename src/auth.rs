//! Credential material and strongly typed Ads API identifiers.

pub mod credentials;
pub mod id;

pub use credentials::*;
pub use id::*;
