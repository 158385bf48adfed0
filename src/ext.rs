//! Extension contracts for signing requests built by foreign HTTP clients.

pub mod request_signer;

pub use request_signer::*;
