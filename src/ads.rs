//! Signed Ads API client.
//!
//! Every call follows the same path: build the base URL and parameter map, sign them with
//! [`Oauth1Signer`], attach the identical parameters to the URL via
//! [`sign::canonicalize`], send through the configured [`ApiHttpClient`], then decode the
//! JSON body (or the API's error body for non-success statuses).

pub mod models;

pub use models::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{AdAccountId, Credentials, EntityId},
	error::{ApiError, ConfigError, DecodeError},
	http::{ApiHttpClient, ApiRequest, ApiResponse},
	obs::{self, ApiCallKind, CallOutcome, CallSpan},
	sign::{self, Oauth1Signer, SignatureRequest},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Production Ads API root, versioned.
pub const DEFAULT_API_BASE_URL: &str = "https://ads-api.twitter.com/12/";

/// Entity type the client queries stats for.
pub const CAMPAIGN_ENTITY: &str = "CAMPAIGN";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestAdsApi = AdsApi<ReqwestHttpClient>;

/// Signs and issues Ads API requests for one set of credentials.
pub struct AdsApi<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Transport used for every request.
	pub http_client: Arc<C>,
	/// Signer producing the `Authorization` header.
	pub signer: Arc<Oauth1Signer>,
	/// Credentials every request is signed with.
	pub credentials: Credentials,
	/// Versioned API root; endpoint paths are joined onto it.
	pub base_url: Url,
}
impl<C> AdsApi<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client around a caller-provided transport.
	pub fn with_http_client(
		http_client: impl Into<Arc<C>>,
		signer: Arc<Oauth1Signer>,
		credentials: Credentials,
		base_url: Url,
	) -> Self {
		Self { http_client: http_client.into(), signer, credentials, base_url }
	}

	/// Lists campaigns with activity between `start_time` and `end_time` (`YYYY-MM-DD`).
	pub async fn active_entities(
		&self,
		account: &AdAccountId,
		start_time: &str,
		end_time: &str,
	) -> Result<ActiveEntitiesResponse> {
		let path = format!("stats/accounts/{account}/active_entities");
		let params = BTreeMap::from([
			("entity", CAMPAIGN_ENTITY),
			("start_time", start_time),
			("end_time", end_time),
		]);

		self.get(ApiCallKind::ActiveEntities, &path, params).await
	}

	/// Fetches billing totals for one campaign between `start_time` and `end_time`.
	pub async fn spend_stats(
		&self,
		account: &AdAccountId,
		entity: &EntityId,
		start_time: &str,
		end_time: &str,
	) -> Result<SpendStats> {
		let path = format!("stats/accounts/{account}");
		let params = BTreeMap::from([
			("entity", CAMPAIGN_ENTITY),
			("entity_ids", entity.as_ref()),
			("start_time", start_time),
			("end_time", end_time),
			("granularity", "TOTAL"),
			("placement", "ALL_ON_TWITTER"),
			("metric_groups", "BILLING"),
		]);

		self.get(ApiCallKind::SpendStats, &path, params).await
	}

	/// Fetches a single campaign.
	pub async fn campaign(
		&self,
		account: &AdAccountId,
		campaign: &EntityId,
	) -> Result<CampaignInfo> {
		let path = format!("accounts/{account}/campaigns/{campaign}");

		self.get(ApiCallKind::Campaign, &path, BTreeMap::new()).await
	}

	/// Builds the signed request for `path` + `params` without sending it.
	pub fn prepare_get(&self, path: &str, params: &BTreeMap<&str, &str>) -> Result<ApiRequest> {
		let mut url =
			self.base_url.join(path).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		url.set_query(None);
		url.set_fragment(None);

		let signature_request =
			SignatureRequest::new("GET", url.as_str(), self.credentials.clone())
				.params(params.iter().map(|(k, v)| (*k, *v)));
		let authorization = self.signer.authorization_header(&signature_request)?;

		if !params.is_empty() {
			url.set_query(Some(&sign::canonicalize(params.iter().map(|(k, v)| (*k, *v)))));
		}

		Ok(ApiRequest { method: "GET".into(), url, authorization })
	}

	async fn get<T>(
		&self,
		kind: ApiCallKind,
		path: &str,
		params: BTreeMap<&str, &str>,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let span = CallSpan::new(kind, "GET", path);

		obs::record_api_call(kind, CallOutcome::Attempt);

		let result = span
			.instrument(async {
				let request = self.prepare_get(path, &params)?;
				let response = self.http_client.execute(request).await?;

				span.record_status(response.status);
				obs::record_api_status(kind, response.status);

				decode_response(response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_api_call(kind, CallOutcome::Success),
			Err(_) => obs::record_api_call(kind, CallOutcome::Failure),
		}

		result
	}
}
impl<C> Clone for AdsApi<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			signer: Arc::clone(&self.signer),
			credentials: self.credentials.clone(),
			base_url: self.base_url.clone(),
		}
	}
}
impl<C> Debug for AdsApi<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AdsApi")
			.field("base_url", &self.base_url.as_str())
			.field("consumer_key", &self.credentials.consumer_key)
			.finish()
	}
}

/// Decodes a successful body into `T`, or the error body into [`ApiError`].
pub fn decode_response<T>(response: ApiResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let ApiResponse { status, body } = response;

	if !(200..300).contains(&status) {
		let errors = serde_json::from_slice::<ErrorResponse>(&body)
			.map(|parsed| parsed.errors)
			.unwrap_or_default();

		return Err(ApiError { status, errors }.into());
	}

	let mut deserializer = serde_json::Deserializer::from_slice(&body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::Json { source, status }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		error::SignError,
		http::HttpFuture,
		sign::{FixedNonceSource, header::AUTHORIZATION_SCHEME},
	};

	#[derive(Default)]
	struct RecordingHttpClient {
		requests: Mutex<Vec<ApiRequest>>,
		response: Mutex<Option<ApiResponse>>,
	}
	impl RecordingHttpClient {
		fn answering(status: u16, body: &str) -> Self {
			Self {
				requests: Mutex::default(),
				response: Mutex::new(Some(ApiResponse { status, body: body.as_bytes().to_vec() })),
			}
		}
	}
	impl ApiHttpClient for RecordingHttpClient {
		fn execute(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse> {
			self.requests.lock().push(request);

			let response = self
				.response
				.lock()
				.clone()
				.unwrap_or(ApiResponse { status: 200, body: b"{}".to_vec() });

			Box::pin(async move { Ok(response) })
		}
	}

	fn account() -> AdAccountId {
		AdAccountId::new("18ce54d4x5t").expect("Account fixture should be valid.")
	}

	fn api(client: RecordingHttpClient) -> AdsApi<RecordingHttpClient> {
		AdsApi::with_http_client(
			client,
			Arc::new(Oauth1Signer::with_nonce_source(FixedNonceSource::new(
				"abc123def456ghi789jkl012mno345pq",
				"1318622958",
			))),
			Credentials::new(
				"xvz1evFS4wEEPTGEFPHBog",
				"kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
				"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
				"LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
			),
			Url::parse(DEFAULT_API_BASE_URL).expect("Default base URL should parse."),
		)
	}

	#[test]
	fn prepare_get_signs_base_url_and_sends_same_params() {
		let api = api(RecordingHttpClient::default());
		let params = BTreeMap::from([
			("entity", CAMPAIGN_ENTITY),
			("start_time", "2026-10-17"),
			("end_time", "2026-10-18"),
		]);
		let request = api
			.prepare_get("stats/accounts/18ce54d4x5t/active_entities", &params)
			.expect("Request should be prepared.");

		assert_eq!(
			request.url.as_str(),
			"https://ads-api.twitter.com/12/stats/accounts/18ce54d4x5t/active_entities\
			 ?end_time=2026-10-18&entity=CAMPAIGN&start_time=2026-10-17"
		);
		assert!(request.authorization.starts_with(AUTHORIZATION_SCHEME));
		assert!(
			request.authorization.ends_with("oauth_signature=\"nNGWYRjO09DnR3nCRMxSlE0AtFE%3D\"")
		);
	}

	#[tokio::test]
	async fn campaign_call_has_no_query() {
		let client = RecordingHttpClient::answering(
			200,
			r#"{"data": {"id": "8wku2", "name": "Launch", "currency": "USD"}}"#,
		);
		let api = api(client);
		let campaign = EntityId::new("8wku2").expect("Campaign fixture should be valid.");
		let info =
			api.campaign(&account(), &campaign).await.expect("Campaign call should succeed.");
		let requests = api.http_client.requests.lock().clone();

		assert_eq!(info.data.currency, "USD");
		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].method, "GET");
		assert_eq!(
			requests[0].url.as_str(),
			"https://ads-api.twitter.com/12/accounts/18ce54d4x5t/campaigns/8wku2"
		);
	}

	#[tokio::test]
	async fn non_success_maps_to_api_error() {
		let api = api(RecordingHttpClient::answering(
			401,
			r#"{"errors": [{"code": "UNAUTHORIZED_ACCESS", "message": "Not authenticated"}]}"#,
		));
		let err = api
			.active_entities(&account(), "2026-10-17", "2026-10-18")
			.await
			.expect_err("401 should surface as an API error.");

		match err {
			Error::Api(api_error) => {
				assert!(api_error.is_unauthorized());
				assert_eq!(api_error.errors[0].code, "UNAUTHORIZED_ACCESS");
			},
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	#[tokio::test]
	async fn malformed_body_reports_json_path() {
		let api = api(RecordingHttpClient::answering(200, r#"{"data": [{"entity_id": 7}]}"#));
		let err = api
			.active_entities(&account(), "2026-10-17", "2026-10-18")
			.await
			.expect_err("Malformed body should fail to decode.");

		match err {
			Error::Decode(DecodeError::Json { source, status }) => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "data[0].entity_id");
			},
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	#[tokio::test]
	async fn empty_credentials_fail_before_sending() {
		let mut api = api(RecordingHttpClient::default());

		api.credentials.access_token.clear();

		let err = api
			.spend_stats(
				&account(),
				&EntityId::new("8wku2").expect("Entity fixture should be valid."),
				"2026-10-17",
				"2026-10-18",
			)
			.await
			.expect_err("Empty token should be rejected.");

		assert!(matches!(err, Error::Sign(SignError::EmptyInput { field: "access_token" })));
		assert!(api.http_client.requests.lock().is_empty());
	}

	#[cfg(feature = "reqwest")]
	#[tokio::test]
	async fn reqwest_transport_sends_signed_header_and_query() {
		// crates.io
		use httpmock::prelude::*;
		// self
		use crate::_preludet::{build_reqwest_test_api, test_credentials, test_fixed_signer};

		let server = MockServer::start_async().await;
		let endpoint = server.url("/12/stats/accounts/18ce54d4x5t/active_entities");
		let expected = test_fixed_signer()
			.authorization_header(
				&SignatureRequest::new("GET", endpoint.as_str(), test_credentials()).params([
					("entity", CAMPAIGN_ENTITY),
					("start_time", "2026-10-17"),
					("end_time", "2026-10-18"),
				]),
			)
			.expect("Expected header should be computed.");
		let mock = server
			.mock_async(|when, then| {
				when.method(GET)
					.path("/12/stats/accounts/18ce54d4x5t/active_entities")
					.query_param("entity", CAMPAIGN_ENTITY)
					.query_param("start_time", "2026-10-17")
					.query_param("end_time", "2026-10-18")
					.header("authorization", expected.as_str());
				then.status(200)
					.header("content-type", "application/json")
					.body(r#"{"data": [{"entity_id": "8wku2"}]}"#);
			})
			.await;
		let api = build_reqwest_test_api(&server.url("/12/"));
		let active = api
			.active_entities(&account(), "2026-10-17", "2026-10-18")
			.await
			.expect("Mocked call should succeed.");

		mock.assert_async().await;
		assert_eq!(active.data[0].entity_id.as_ref(), "8wku2");
	}
}
