//! `Authorization` header rendering.

// self
use crate::sign::{
	OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD, OAUTH_TIMESTAMP,
	OAUTH_TOKEN, OAUTH_VERSION_KEY, params,
};

/// Prefix of every rendered header, trailing space included.
pub const AUTHORIZATION_SCHEME: &str = "OAuth ";

/// Order in which the seven fields are written.
pub const AUTHORIZATION_FIELD_ORDER: [&str; 7] = [
	OAUTH_CONSUMER_KEY,
	OAUTH_TOKEN,
	OAUTH_SIGNATURE_METHOD,
	OAUTH_TIMESTAMP,
	OAUTH_NONCE,
	OAUTH_VERSION_KEY,
	OAUTH_SIGNATURE,
];

/// Renders `OAuth k1="v1",k2="v2",...` with `values` matched to [`AUTHORIZATION_FIELD_ORDER`].
///
/// Keys and values both pass through [`params::percent_encode`]; pairs are separated by a
/// bare comma.
pub fn format_authorization_header(values: &[&str; 7]) -> String {
	let mut buf = String::with_capacity(
		AUTHORIZATION_SCHEME.len()
			+ AUTHORIZATION_FIELD_ORDER.iter().map(|key| key.len() + 4).sum::<usize>()
			+ values.iter().map(|value| value.len() * 3).sum::<usize>(),
	);

	buf.push_str(AUTHORIZATION_SCHEME);

	for (idx, (key, value)) in AUTHORIZATION_FIELD_ORDER.iter().zip(values).enumerate() {
		if idx > 0 {
			buf.push(',');
		}

		buf.push_str(&params::percent_encode(key));
		buf.push_str("=\"");
		buf.push_str(&params::percent_encode(value));
		buf.push('"');
	}

	buf
}
