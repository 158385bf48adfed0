//! Demonstrates plugging a non-reqwest transport into the Ads API client.
//!
//! 1. Implement [`ApiHttpClient`] so the transport answers with a raw status and body.
//! 2. Wrap it in an [`AdsApi`] together with a signer, credentials, and the API root.
//! 3. Call an endpoint; the transport sees the fully signed request.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use parking_lot::Mutex;
use url::Url;
// self
use oauth1_signer::{
	ads::{AdsApi, DEFAULT_API_BASE_URL},
	auth::{AdAccountId, Credentials},
	http::{ApiHttpClient, ApiRequest, ApiResponse, HttpFuture},
	sign::Oauth1Signer,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let transport = Arc::new(CannedHttpClient::default());
	let api: AdsApi<CannedHttpClient> = AdsApi::with_http_client(
		Arc::clone(&transport),
		Arc::new(Oauth1Signer::default()),
		Credentials::new("demo-key", "demo-secret", "demo-token", "demo-token-secret"),
		Url::parse(DEFAULT_API_BASE_URL)?,
	);
	let account = AdAccountId::new("18ce54d4x5t")?;
	let active = api.active_entities(&account, "2026-10-17", "2026-10-18").await?;

	println!("Active campaigns reported by the canned transport: {}.", active.data.len());

	for request in transport.seen.lock().iter() {
		println!("{} {}", request.method, request.url);
		println!("Authorization: {}", request.authorization);
	}

	Ok(())
}

/// Transport that never touches the network.
#[derive(Default)]
struct CannedHttpClient {
	seen: Mutex<Vec<ApiRequest>>,
}
impl ApiHttpClient for CannedHttpClient {
	fn execute(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse> {
		self.seen.lock().push(request);

		Box::pin(async {
			Ok(ApiResponse {
				status: 200,
				body: br#"{"data": [{"entity_id": "8wku2"}, {"entity_id": "9xlv3"}]}"#.to_vec(),
			})
		})
	}
}
