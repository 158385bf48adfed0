//! Nonce and timestamp generation.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

/// Raw nonce length used by [`SystemNonceSource::default`].
pub const DEFAULT_NONCE_LEN: usize = 32;

/// Supplies the per-call freshness values of a signature.
pub trait NonceSource
where
	Self: Send + Sync,
{
	/// Returns a raw nonce; the signer base64-encodes it before use.
	fn nonce(&self) -> String;

	/// Returns the Unix timestamp, in seconds, as a decimal string.
	fn timestamp(&self) -> String;
}

/// Draws nonces from the thread-local CSPRNG and timestamps from the system clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemNonceSource {
	/// Raw nonce length in characters.
	pub len: usize,
}
impl SystemNonceSource {
	/// Creates a source producing `len`-character raw nonces.
	pub fn with_len(len: usize) -> Self {
		Self { len }
	}
}
impl Default for SystemNonceSource {
	fn default() -> Self {
		Self::with_len(DEFAULT_NONCE_LEN)
	}
}
impl NonceSource for SystemNonceSource {
	fn nonce(&self) -> String {
		random_nonce(self.len)
	}

	fn timestamp(&self) -> String {
		unix_timestamp()
	}
}

/// Replays a fixed nonce and timestamp; used to reproduce known signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedNonceSource {
	nonce: String,
	timestamp: String,
}
impl FixedNonceSource {
	/// Creates a source that always returns `nonce` (raw) and `timestamp`.
	pub fn new(nonce: impl Into<String>, timestamp: impl Into<String>) -> Self {
		Self { nonce: nonce.into(), timestamp: timestamp.into() }
	}
}
impl NonceSource for FixedNonceSource {
	fn nonce(&self) -> String {
		self.nonce.clone()
	}

	fn timestamp(&self) -> String {
		self.timestamp.clone()
	}
}

/// Returns `len` characters drawn uniformly from `[a-zA-Z0-9]`.
///
/// `rand::rng()` is a thread-local ChaCha generator seeded from the OS, so concurrent callers
/// never share state and never reseed from the clock.
pub fn random_nonce(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

/// Current UTC Unix time in whole seconds.
pub fn unix_timestamp() -> String {
	OffsetDateTime::now_utc().unix_timestamp().to_string()
}

/// Base64-encodes a raw nonce into the form carried by `oauth_nonce`.
pub fn encode_nonce(raw: &str) -> String {
	STANDARD.encode(raw)
}
