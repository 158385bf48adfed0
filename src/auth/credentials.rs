//! Consumer + access-token credentials with redacted secrets.

// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping sensitive material out of logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the secret holds no characters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for Secret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<&str> for Secret {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for Secret {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// The four strings an OAuth 1.0a signature is bound to.
///
/// The consumer key and access token travel in the clear inside the `Authorization` header;
/// the two secrets only ever feed the signing key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Application (consumer) key, sent as `oauth_consumer_key`.
	pub consumer_key: String,
	/// Application (consumer) secret.
	pub consumer_secret: Secret,
	/// User access token, sent as `oauth_token`.
	pub access_token: String,
	/// User access token secret.
	pub access_token_secret: Secret,
}
impl Credentials {
	/// Bundles the consumer and access-token pairs.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<Secret>,
		access_token: impl Into<String>,
		access_token_secret: impl Into<Secret>,
	) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			consumer_secret: consumer_secret.into(),
			access_token: access_token.into(),
			access_token_secret: access_token_secret.into(),
		}
	}

	/// Returns the name of the first empty credential, if any.
	pub fn first_empty(&self) -> Option<&'static str> {
		if self.consumer_key.is_empty() {
			Some("consumer_key")
		} else if self.consumer_secret.is_empty() {
			Some("consumer_secret")
		} else if self.access_token.is_empty() {
			Some("access_token")
		} else if self.access_token_secret.is_empty() {
			Some("access_token_secret")
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = Secret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "Secret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(secret.expose(), "super-secret");
	}

	#[test]
	fn credentials_debug_hides_secrets() {
		let credentials = Credentials::new("ck", "cs-value", "at", "ats-value");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("ck"));
		assert!(!rendered.contains("cs-value"));
		assert!(!rendered.contains("ats-value"));
	}

	#[test]
	fn first_empty_reports_in_declaration_order() {
		assert_eq!(Credentials::new("ck", "cs", "at", "ats").first_empty(), None);
		assert_eq!(Credentials::new("", "", "at", "ats").first_empty(), Some("consumer_key"));
		assert_eq!(
			Credentials::new("ck", "cs", "at", "").first_empty(),
			Some("access_token_secret")
		);
	}

	#[test]
	fn secret_deserializes_from_plain_string() {
		let secret: Secret =
			serde_json::from_str("\"from-json\"").expect("Secret should deserialize from a string.");

		assert_eq!(secret.expose(), "from-json");
	}
}
