//! Signature base string, signing key, and HMAC-SHA1 digest.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
// self
use crate::sign::{ProtocolParams, SignatureRequest, params};

type HmacSha1 = Hmac<Sha1>;

/// `METHOD&enc(url)&enc(canonical_params)`; the method is taken verbatim.
pub fn signature_base_string(method: &str, url: &str, canonical_params: &str) -> String {
	let url = params::percent_encode(url);
	let canonical_params = params::percent_encode(canonical_params);

	join_with_ampersand(&[method, url.as_str(), canonical_params.as_str()])
}

/// `enc(consumer_secret)&enc(token_secret)`.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
	let consumer_secret = params::percent_encode(consumer_secret);
	let token_secret = params::percent_encode(token_secret);

	join_with_ampersand(&[consumer_secret.as_str(), token_secret.as_str()])
}

/// Base64 of the HMAC-SHA1 digest of `message` under `key`.
pub fn hmac_sha1_base64(key: &str, message: &str) -> String {
	let mut mac =
		HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take a key of any size.");

	mac.update(message.as_bytes());

	STANDARD.encode(mac.finalize().into_bytes())
}

/// Computes the `oauth_signature` value for `request` under the given protocol values.
pub fn compute_signature(request: &SignatureRequest, protocol: &ProtocolParams) -> String {
	let canonical = params::canonical_parameters(request, protocol);
	let base = signature_base_string(&request.method, &request.url, &canonical);
	let key = signing_key(
		request.credentials.consumer_secret.expose(),
		request.credentials.access_token_secret.expose(),
	);

	hmac_sha1_base64(&key, &base)
}

fn join_with_ampersand(parts: &[&str]) -> String {
	let mut buf = String::with_capacity(parts.iter().map(|part| part.len() + 1).sum());

	for (idx, part) in parts.iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(part);
	}

	buf
}
