//! Signing contract for requests built outside the crate's own clients.

// std
#[cfg(feature = "reqwest")] use std::collections::btree_map::Entry;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
#[cfg(feature = "reqwest")] use url::form_urlencoded;
// self
use crate::{_prelude::*, auth::Credentials};
#[cfg(feature = "reqwest")]
use crate::{
	error::SignError,
	sign::{Oauth1Signer, SignatureRequest},
};

/// Media type whose body pairs join the signed parameter set.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Describes how to attach an OAuth 1.0a `Authorization` header to an outbound request
/// without constraining the HTTP client type.
///
/// Generic over both the request and error types so implementers can target any client
/// builder; the crate ships an implementation for [`reqwest::Request`] behind the `reqwest`
/// feature.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Signs `request` with `credentials` and returns it with the header attached.
	fn sign_request(&self, request: Request, credentials: &Credentials) -> Result<Request, Error>;
}

/// Signs the query pairs plus, for [`FORM_URLENCODED`] requests, the decoded body pairs.
///
/// Any other body stays out of the signature; endpoints that sign a raw body as `status` go
/// through [`SignatureRequest::body`] instead. A name appearing twice across query and body
/// fails with [`SignError::DuplicateParameter`].
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::Request, SignError> for Oauth1Signer {
	fn sign_request(
		&self,
		mut request: reqwest::Request,
		credentials: &Credentials,
	) -> Result<reqwest::Request, SignError> {
		let authorization =
			self.authorization_header(&signature_request(&request, credentials)?)?;
		let value =
			HeaderValue::from_str(&authorization).map_err(|_| SignError::InvalidHeaderValue)?;

		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(request)
	}
}

#[cfg(feature = "reqwest")]
fn signature_request(
	request: &reqwest::Request,
	credentials: &Credentials,
) -> Result<SignatureRequest, SignError> {
	let mut url = request.url().clone();
	let mut params = BTreeMap::new();

	collect_pairs(&mut params, url.query_pairs())?;

	let form_body =
		request.body().and_then(|body| body.as_bytes()).filter(|_| is_form_encoded(request));

	if let Some(body) = form_body {
		collect_pairs(&mut params, form_urlencoded::parse(body))?;
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(SignatureRequest::new(request.method().as_str(), url.as_str(), credentials.clone())
		.params(params))
}

#[cfg(feature = "reqwest")]
fn collect_pairs(
	params: &mut BTreeMap<String, String>,
	pairs: form_urlencoded::Parse<'_>,
) -> Result<(), SignError> {
	for (key, value) in pairs {
		match params.entry(key.into_owned()) {
			Entry::Occupied(entry) =>
				return Err(SignError::DuplicateParameter { name: entry.key().clone() }),
			Entry::Vacant(entry) => {
				entry.insert(value.into_owned());
			},
		}
	}

	Ok(())
}

#[cfg(feature = "reqwest")]
fn is_form_encoded(request: &reqwest::Request) -> bool {
	request
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.split(';').next())
		.is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use reqwest::Method;
	// self
	use super::*;
	use crate::_preludet::{test_credentials, test_fixed_signer};

	fn authorization(request: &reqwest::Request) -> &str {
		request
			.headers()
			.get(AUTHORIZATION)
			.expect("Signed request should carry an Authorization header.")
			.to_str()
			.expect("Authorization header should be ASCII.")
	}

	fn status_post(body: &'static str) -> reqwest::Request {
		let url = Url::parse("https://example.com/1.1/statuses/update.json")
			.expect("Fixture URL should parse.");
		let mut request = reqwest::Request::new(Method::POST, url);

		*request.body_mut() = Some(body.into());

		request
	}

	#[test]
	fn form_body_pairs_are_signed() {
		let mut request = status_post("status=Hello%20Twitter");

		request
			.headers_mut()
			.insert(CONTENT_TYPE, HeaderValue::from_static("application/x-www-form-urlencoded"));

		let signed = test_fixed_signer()
			.sign_request(request, &test_credentials())
			.expect("Request should be signed.");

		assert_eq!(
			authorization(&signed),
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
	fn non_form_body_is_left_out() {
		let signed = test_fixed_signer()
			.sign_request(status_post("Hello Twitter"), &test_credentials())
			.expect("Request should be signed.");

		assert!(
			authorization(&signed).ends_with("oauth_signature=\"sk9CYLL8s5W%2B6o2S5xydatN3wx8%3D\"")
		);
	}

	#[test]
	fn repeated_parameter_names_are_rejected() {
		let url = Url::parse("https://example.com/r?a=1&a=2").expect("Fixture URL should parse.");
		let err = test_fixed_signer()
			.sign_request(reqwest::Request::new(Method::GET, url), &test_credentials())
			.expect_err("Repeated query keys should be rejected.");

		assert_eq!(err, SignError::DuplicateParameter { name: "a".into() });

		let url = Url::parse("https://example.com/1.1/statuses/update.json?status=a")
			.expect("Fixture URL should parse.");
		let mut request = reqwest::Request::new(Method::POST, url);

		*request.body_mut() = Some("status=b".into());
		request.headers_mut().insert(
			CONTENT_TYPE,
			HeaderValue::from_static("application/x-www-form-urlencoded; charset=utf-8"),
		);

		let err = test_fixed_signer()
			.sign_request(request, &test_credentials())
			.expect_err("A body key repeating a query key should be rejected.");

		assert_eq!(err, SignError::DuplicateParameter { name: "status".into() });
	}

	#[test]
	fn query_parameters_are_signed() {
		let url = Url::parse(
			"https://ads-api.twitter.com/12/stats/accounts/18ce54d4x5t/active_entities\
			 ?entity=CAMPAIGN&start_time=2026-10-17&end_time=2026-10-18",
		)
		.expect("Fixture URL should parse.");
		let signed = test_fixed_signer()
			.sign_request(reqwest::Request::new(Method::GET, url), &test_credentials())
			.expect("Request should be signed.");

		assert!(
			authorization(&signed).ends_with("oauth_signature=\"nNGWYRjO09DnR3nCRMxSlE0AtFE%3D\"")
		);
		assert_eq!(
			signed.url().query(),
			Some("entity=CAMPAIGN&start_time=2026-10-17&end_time=2026-10-18")
		);
	}

	#[test]
	fn reserved_query_parameter_is_rejected() {
		let url = Url::parse("https://example.com/resource?oauth_nonce=forged")
			.expect("Fixture URL should parse.");
		let err = test_fixed_signer()
			.sign_request(reqwest::Request::new(Method::GET, url), &test_credentials())
			.expect_err("Reserved names should be rejected.");

		assert_eq!(err, SignError::ReservedParameter { name: "oauth_nonce".into() });
	}
}
