//! Percent-encoding and parameter canonicalization.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
// self
use crate::sign::{ProtocolParams, SignatureRequest, BODY_PARAM};

// https://tools.ietf.org/html/rfc5849#section-3.6
// ALPHA, DIGIT, '-', '.', '_', '~' stay literal; every other byte becomes uppercase `%XX`.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes `value` with the RFC 3986 unreserved set (space becomes `%20`).
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, ENCODE_SET).to_string()
}

/// Encodes every pair, sorts by encoded key then encoded value, and joins as `k=v&k=v`.
///
/// The same routine builds the signed parameter string and the query string sent on the
/// wire, so the two can never drift apart.
pub fn canonicalize<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut encoded = pairs
		.into_iter()
		.map(|(key, value)| (percent_encode(key), percent_encode(value)))
		.collect::<Vec<_>>();

	encoded.sort();

	let mut buf = String::new();

	for (idx, (key, value)) in encoded.iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(key);
		buf.push('=');
		buf.push_str(value);
	}

	buf
}

/// Builds the normalized parameter string for `request` under the given protocol values.
///
/// The body joins the set as `status` only when it is non-empty.
pub fn canonical_parameters(request: &SignatureRequest, protocol: &ProtocolParams) -> String {
	let caller = request.params.iter().map(|(key, value)| (key.as_str(), value.as_str()));
	let body = request.body_param().map(|body| (BODY_PARAM, body));

	canonicalize(caller.chain(protocol.pairs()).chain(body))
}
