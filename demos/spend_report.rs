//! Runs the daily spend report against a local mock of the Ads API, logging JSON records.
//!
//! Point `TWITTER_ADS_API_BASE_URL` at a real deployment and drop the mock to report live
//! spend; everything else stays the same.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use tracing_subscriber::EnvFilter;
// self
use oauth1_signer::{
	config::{
		Config, ENV_ACCESS_SECRET, ENV_ACCESS_TOKEN, ENV_AD_ACCOUNT_ID, ENV_AD_ACCOUNT_NAME,
		ENV_API_BASE_URL, ENV_API_KEY, ENV_API_SECRET,
	},
	ads::ReqwestAdsApi,
	http::ReqwestHttpClient,
	report::SpendReporter,
	reqwest::Client,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.json()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
		.init();

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/12/stats/accounts/18ce54d4x5t/active_entities");
			then.status(200).body(r#"{"data": [{"entity_id": "8wku2"}]}"#);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/12/stats/accounts/18ce54d4x5t");
			then.status(200).body(
				r#"{"data_type": "stats", "data": [{"id": "8wku2", "id_data": [{"metrics": {"billed_charge_local_micro": [48210000]}}]}]}"#,
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/12/accounts/18ce54d4x5t/campaigns/8wku2");
			then.status(200)
				.body(r#"{"data": {"id": "8wku2", "name": "Autumn Launch", "currency": "USD"}}"#);
		})
		.await;

	let base_url = server.url("/12");
	let vars = HashMap::from([
		(ENV_API_KEY, "demo-key"),
		(ENV_API_SECRET, "demo-secret"),
		(ENV_ACCESS_TOKEN, "demo-token"),
		(ENV_ACCESS_SECRET, "demo-token-secret"),
		(ENV_AD_ACCOUNT_NAME, "Acme"),
		(ENV_AD_ACCOUNT_ID, "18ce54d4x5t"),
		(ENV_API_BASE_URL, base_url.as_str()),
	]);
	let config = Config::from_lookup(|name| vars.get(name).map(|value| value.to_string()))?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let api: ReqwestAdsApi = config.ads_api(http_client)?;
	let summary = SpendReporter::new(api, config.ad_accounts.clone()).run_yesterday().await?;

	println!(
		"Processed {} account(s), {} failed, {} record(s).",
		summary.processed_accounts,
		summary.failed_accounts.len(),
		summary.records.len()
	);

	Ok(())
}
