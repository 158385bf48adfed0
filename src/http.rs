//! Transport primitives for signed API calls.
//!
//! [`ApiHttpClient`] is the crate's only dependency on an HTTP stack. The Ads client hands it a
//! fully prepared [`ApiRequest`] (URL with the signed query string already attached, plus the
//! `Authorization` value) and receives the raw status and body back, so custom transports never
//! need to know anything about OAuth.

// std
#[cfg(feature = "reqwest")] use std::{ops::Deref, time::Duration};
// crates.io
#[cfg(feature = "reqwest")] use reqwest::{Method, header::AUTHORIZATION};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing signed API requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by several
/// clients behind an `Arc`.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves with the response status and body.
	///
	/// Non-success statuses are not errors at this layer; only failures to obtain a response
	/// at all are.
	fn execute(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse>;
}

/// Outbound request after signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: String,
	/// Full URL including the query string that was signed.
	pub url: Url,
	/// Value for the `Authorization` header.
	pub authorization: String,
}

/// Raw response handed back by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests give up after `timeout`.
	pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
		ReqwestClient::builder()
			.timeout(timeout)
			.build()
			.map(Self)
			.map_err(ConfigError::http_client_build)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn execute(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse> {
		Box::pin(async move {
			let ApiRequest { method, url, authorization } = request;
			let method = Method::from_bytes(method.as_bytes())
				.map_err(|_| ConfigError::InvalidMethod { method })?;
			let response = self
				.0
				.request(method, url)
				.header(AUTHORIZATION, authorization)
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}
