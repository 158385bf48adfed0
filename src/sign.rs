//! OAuth 1.0a request signing.
//!
//! [`Oauth1Signer`] turns a [`SignatureRequest`] into the value of an `Authorization` header:
//!
//! 1. [`nonce`] draws a fresh nonce + timestamp (through a [`NonceSource`]).
//! 2. [`params`] merges protocol and request parameters into the canonical parameter string.
//! 3. [`signature`] builds the signature base string and signing key and runs HMAC-SHA1.
//! 4. [`header`] renders the seven `oauth_*` fields in their fixed order.
//!
//! Every step is a pure function over strings, so a signer can be shared freely across
//! threads and tasks.

pub mod header;
pub mod nonce;
pub mod params;
pub mod signature;

pub use header::*;
pub use nonce::*;
pub use params::*;
pub use signature::*;

// self
use crate::{_prelude::*, auth::Credentials, error::SignError};

/// Signature method advertised in `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Protocol version advertised in `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// `oauth_consumer_key` parameter name.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// `oauth_token` parameter name.
pub const OAUTH_TOKEN: &str = "oauth_token";
/// `oauth_signature_method` parameter name.
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
/// `oauth_timestamp` parameter name.
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
/// `oauth_nonce` parameter name.
pub const OAUTH_NONCE: &str = "oauth_nonce";
/// `oauth_version` parameter name.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// `oauth_signature` parameter name.
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
/// Parameter carrying the request body on endpoints that sign it.
pub const BODY_PARAM: &str = "status";

/// Parameter names callers may not supply themselves.
pub const RESERVED_PARAMS: [&str; 7] = [
	OAUTH_CONSUMER_KEY,
	OAUTH_NONCE,
	OAUTH_SIGNATURE,
	OAUTH_SIGNATURE_METHOD,
	OAUTH_TIMESTAMP,
	OAUTH_TOKEN,
	OAUTH_VERSION_KEY,
];

/// Inputs needed to sign one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureRequest {
	/// HTTP method, used verbatim in the base string (uppercase expected).
	pub method: String,
	/// Target URL without query string or fragment.
	pub url: String,
	/// Query or form parameters, unencoded.
	pub params: BTreeMap<String, String>,
	/// Request body signed as the `status` parameter when non-empty.
	pub body: Option<String>,
	/// Consumer + access-token credentials.
	pub credentials: Credentials,
}
impl SignatureRequest {
	/// Creates a request without parameters or body.
	pub fn new(
		method: impl Into<String>,
		url: impl Into<String>,
		credentials: Credentials,
	) -> Self {
		Self {
			method: method.into(),
			url: url.into(),
			params: BTreeMap::new(),
			body: None,
			credentials,
		}
	}

	/// Adds (or replaces) a single parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(key.into(), value.into());

		self
	}

	/// Adds (or replaces) several parameters.
	pub fn params<I, K, V>(mut self, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.params.extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));

		self
	}

	/// Sets the request body.
	pub fn body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Returns the body when it takes part in the signature.
	pub fn body_param(&self) -> Option<&str> {
		self.body.as_deref().filter(|body| !body.is_empty())
	}

	/// Checks the inputs the signer refuses to sign over.
	pub fn validate(&self) -> Result<(), SignError> {
		if self.url.is_empty() {
			return Err(SignError::EmptyInput { field: "url" });
		}
		if let Some(field) = self.credentials.first_empty() {
			return Err(SignError::EmptyInput { field });
		}
		if let Some(name) = self.params.keys().find(|key| RESERVED_PARAMS.contains(&key.as_str()))
		{
			return Err(SignError::ReservedParameter { name: name.clone() });
		}

		Ok(())
	}
}

/// The per-call protocol values merged into the parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtocolParams<'a> {
	/// `oauth_consumer_key`.
	pub consumer_key: &'a str,
	/// `oauth_nonce`, already base64-encoded.
	pub nonce: &'a str,
	/// `oauth_timestamp`.
	pub timestamp: &'a str,
	/// `oauth_token`.
	pub token: &'a str,
}
impl<'a> ProtocolParams<'a> {
	/// The six protocol parameters as unencoded name/value pairs.
	pub fn pairs(&self) -> [(&'static str, &'a str); 6] {
		[
			(OAUTH_CONSUMER_KEY, self.consumer_key),
			(OAUTH_NONCE, self.nonce),
			(OAUTH_SIGNATURE_METHOD, SIGNATURE_METHOD),
			(OAUTH_TIMESTAMP, self.timestamp),
			(OAUTH_TOKEN, self.token),
			(OAUTH_VERSION_KEY, OAUTH_VERSION),
		]
	}
}

/// Output of [`Oauth1Signer::sign`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
	/// Value for the `Authorization` header.
	pub authorization: String,
	/// Base64-encoded nonce that was signed.
	pub nonce: String,
	/// Unix timestamp that was signed.
	pub timestamp: String,
	/// Base64 HMAC-SHA1 signature.
	pub signature: String,
}

/// Produces OAuth 1.0a `Authorization` headers.
#[derive(Clone)]
pub struct Oauth1Signer {
	nonce_source: Arc<dyn NonceSource>,
}
impl Oauth1Signer {
	/// Creates a signer backed by [`SystemNonceSource`] with the default nonce length.
	pub fn new() -> Self {
		Self::with_nonce_source(SystemNonceSource::default())
	}

	/// Creates a signer drawing nonces and timestamps from `source`.
	pub fn with_nonce_source(source: impl 'static + NonceSource) -> Self {
		Self { nonce_source: Arc::new(source) }
	}

	/// Signs the request and returns the header along with the values it was built from.
	pub fn sign(&self, request: &SignatureRequest) -> Result<SignedRequest, SignError> {
		request.validate()?;

		let nonce = encode_nonce(&self.nonce_source.nonce());
		let timestamp = self.nonce_source.timestamp();
		let credentials = &request.credentials;
		let protocol = ProtocolParams {
			consumer_key: &credentials.consumer_key,
			nonce: &nonce,
			timestamp: &timestamp,
			token: &credentials.access_token,
		};
		let signature = compute_signature(request, &protocol);
		let authorization = format_authorization_header(&[
			protocol.consumer_key,
			protocol.token,
			SIGNATURE_METHOD,
			protocol.timestamp,
			protocol.nonce,
			OAUTH_VERSION,
			signature.as_str(),
		]);

		#[cfg(feature = "tracing")]
		tracing::trace!(
			method = %request.method,
			url = %request.url,
			%timestamp,
			"Signed request."
		);

		Ok(SignedRequest { authorization, nonce, timestamp, signature })
	}

	/// Signs the request and returns only the `Authorization` header value.
	pub fn authorization_header(&self, request: &SignatureRequest) -> Result<String, SignError> {
		self.sign(request).map(|signed| signed.authorization)
	}
}
impl Default for Oauth1Signer {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for Oauth1Signer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Oauth1Signer(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const URL: &str = "https://example.com/1.1/statuses/update.json";
	const RAW_NONCE: &str = "abc123def456ghi789jkl012mno345pq";
	const TIMESTAMP: &str = "1318622958";

	fn credentials() -> Credentials {
		Credentials::new(
			"xvz1evFS4wEEPTGEFPHBog",
			"kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
			"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
			"LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
		)
	}

	fn fixed_signer() -> Oauth1Signer {
		Oauth1Signer::with_nonce_source(FixedNonceSource::new(RAW_NONCE, TIMESTAMP))
	}

	#[test]
	fn signs_known_status_update() {
		let request = SignatureRequest::new("POST", URL, credentials()).body("Hello Twitter");
		let signed = fixed_signer().sign(&request).expect("Valid request should sign.");

		assert_eq!(signed.nonce, "YWJjMTIzZGVmNDU2Z2hpNzg5amtsMDEybW5vMzQ1cHE=");
		assert_eq!(signed.timestamp, TIMESTAMP);
		assert_eq!(signed.signature, "c5+okkQC8d0Kf8EIqIUkUCDyCq4=");
		assert_eq!(
			signed.authorization,
			"OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\",\
			 oauth_token=\"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb\",\
			 oauth_signature_method=\"HMAC-SHA1\",\
			 oauth_timestamp=\"1318622958\",\
			 oauth_nonce=\"YWJjMTIzZGVmNDU2Z2hpNzg5amtsMDEybW5vMzQ1cHE%3D\",\
			 oauth_version=\"1.0\",\
			 oauth_signature=\"c5%2BokkQC8d0Kf8EIqIUkUCDyCq4%3D\""
		);
	}

	#[test]
	fn body_as_status_param_matches_body_field() {
		let via_body = SignatureRequest::new("POST", URL, credentials()).body("Hello Twitter");
		let via_param =
			SignatureRequest::new("POST", URL, credentials()).param(BODY_PARAM, "Hello Twitter");
		let signer = fixed_signer();

		assert_eq!(
			signer.sign(&via_body).expect("Body request should sign.").signature,
			signer.sign(&via_param).expect("Param request should sign.").signature,
		);
	}

	#[test]
	fn empty_body_is_omitted() {
		let signer = fixed_signer();
		let with_body = SignatureRequest::new("POST", URL, credentials()).body("Hello Twitter");
		let empty_body = SignatureRequest::new("POST", URL, credentials()).body("");
		let no_body = SignatureRequest::new("POST", URL, credentials());
		let with_body = signer.sign(&with_body).expect("Request should sign.").signature;
		let empty_body = signer.sign(&empty_body).expect("Request should sign.").signature;
		let no_body = signer.sign(&no_body).expect("Request should sign.").signature;

		assert_ne!(with_body, empty_body);
		assert_eq!(empty_body, no_body);
		assert_eq!(no_body, "sk9CYLL8s5W+6o2S5xydatN3wx8=");
	}

	#[test]
	fn signing_is_deterministic_for_fixed_freshness() {
		let request = SignatureRequest::new("GET", URL, credentials()).param("count", "5");
		let signer = fixed_signer();
		let first = signer.authorization_header(&request).expect("Request should sign.");

		for _ in 0..8 {
			assert_eq!(signer.authorization_header(&request).expect("Request should sign."), first);
		}
	}

	#[test]
	fn system_signer_varies_nonce_per_call() {
		let request = SignatureRequest::new("GET", URL, credentials());
		let signer = Oauth1Signer::default();
		let first = signer.sign(&request).expect("Request should sign.");
		let second = signer.sign(&request).expect("Request should sign.");

		assert_ne!(first.nonce, second.nonce);
		assert_ne!(first.signature, second.signature);
		assert_eq!(first.signature.len(), 28);
	}

	#[test]
	fn empty_inputs_are_rejected() {
		let signer = fixed_signer();
		let no_url = SignatureRequest::new("GET", "", credentials());

		assert_eq!(signer.sign(&no_url), Err(SignError::EmptyInput { field: "url" }));

		let no_secret = SignatureRequest::new(
			"GET",
			URL,
			Credentials::new("ck", "", "token", "token-secret"),
		);

		assert_eq!(
			signer.sign(&no_secret),
			Err(SignError::EmptyInput { field: "consumer_secret" })
		);
	}

	#[test]
	fn reserved_parameter_names_are_rejected() {
		let request =
			SignatureRequest::new("GET", URL, credentials()).param(OAUTH_NONCE, "chosen-by-caller");
		let err = fixed_signer().sign(&request).expect_err("Reserved names must be rejected.");

		assert_eq!(err, SignError::ReservedParameter { name: OAUTH_NONCE.into() });
	}

	#[test]
	fn signer_is_shareable_across_threads() {
		let signer = Arc::new(Oauth1Signer::default());
		let request = Arc::new(SignatureRequest::new("GET", URL, credentials()));
		let nonces = std::thread::scope(|scope| {
			let handles = (0..4)
				.map(|_| {
					let signer = Arc::clone(&signer);
					let request = Arc::clone(&request);

					scope.spawn(move || {
						(0..64)
							.map(|_| signer.sign(&request).expect("Request should sign.").nonce)
							.collect::<Vec<_>>()
					})
				})
				.collect::<Vec<_>>();

			handles
				.into_iter()
				.flat_map(|handle| handle.join().expect("Signing thread should not panic."))
				.collect::<std::collections::HashSet<_>>()
		});

		assert_eq!(nonces.len(), 4 * 64);
	}
}
