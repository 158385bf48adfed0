//! OAuth 1.0a request signing with a bit-exact HMAC-SHA1 `Authorization` header, plus a signed
//! Ads API client and spend reporter built on top of it.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod ads;
pub mod auth;
pub mod config;
pub mod error;
pub mod ext;
pub mod http;
pub mod obs;
pub mod report;
pub mod sign;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		ads::AdsApi,
		auth::Credentials,
		http::ReqwestHttpClient,
		sign::{FixedNonceSource, Oauth1Signer},
	};

	/// Consumer key from the Twitter signature documentation.
	pub const TEST_CONSUMER_KEY: &str = "xvz1evFS4wEEPTGEFPHBog";
	/// Consumer secret from the Twitter signature documentation.
	pub const TEST_CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
	/// Access token from the Twitter signature documentation.
	pub const TEST_ACCESS_TOKEN: &str = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb";
	/// Access token secret from the Twitter signature documentation.
	pub const TEST_ACCESS_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
	/// Raw 32-character nonce used by deterministic signing fixtures.
	pub const TEST_RAW_NONCE: &str = "abc123def456ghi789jkl012mno345pq";
	/// Unix timestamp used by deterministic signing fixtures.
	pub const TEST_TIMESTAMP: &str = "1318622958";

	/// Credentials shared by signing and client tests.
	pub fn test_credentials() -> Credentials {
		Credentials::new(
			TEST_CONSUMER_KEY,
			TEST_CONSUMER_SECRET,
			TEST_ACCESS_TOKEN,
			TEST_ACCESS_SECRET,
		)
	}

	/// Signer that always emits [`TEST_RAW_NONCE`] and [`TEST_TIMESTAMP`].
	pub fn test_fixed_signer() -> Oauth1Signer {
		Oauth1Signer::with_nonce_source(FixedNonceSource::new(TEST_RAW_NONCE, TEST_TIMESTAMP))
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs an [`AdsApi`] pointed at `base_url`, signing with the fixed test signer and the
	/// reqwest transport used across integration tests.
	pub fn build_reqwest_test_api(base_url: &str) -> AdsApi<ReqwestHttpClient> {
		let base_url = Url::parse(base_url).expect("Mock API base URL should parse successfully.");

		AdsApi::with_http_client(
			test_reqwest_http_client(),
			Arc::new(test_fixed_signer()),
			test_credentials(),
			base_url,
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Date, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tracing_subscriber as _};
