//! Crate-level error types shared across signing, transport, configuration, and reporting.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Signing inputs were rejected before any digest was computed.
	#[error(transparent)]
	Sign(#[from] SignError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded into the expected model.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Remote API answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// A report date could not be rendered for the API.
	#[error("Report date could not be formatted.")]
	DateFormat(#[from] time::error::Format),
}

/// Signing input failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SignError {
	/// A credential or the target URL was empty.
	#[error("Signing input `{field}` must not be empty.")]
	EmptyInput {
		/// Name of the empty input.
		field: &'static str,
	},
	/// A caller parameter used a name reserved for the OAuth protocol.
	#[error("Parameter `{name}` is reserved for the OAuth protocol.")]
	ReservedParameter {
		/// Offending parameter name.
		name: String,
	},
	/// A parameter name appeared more than once in the signed parameter set.
	#[error("Parameter `{name}` appears more than once.")]
	DuplicateParameter {
		/// Repeated parameter name.
		name: String,
	},
	/// The signed `Authorization` value could not be attached to a request.
	#[error("Authorization value is not a valid HTTP header value.")]
	InvalidHeaderValue,
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// One or more of the four credentials is empty.
	#[error("Config is not valid: API key, API secret, access token, and access secret are required.")]
	MissingCredentials,
	/// A required environment variable is not set.
	#[error("Environment variable `{name}` is not set.")]
	MissingVariable {
		/// Variable name.
		name: &'static str,
	},
	/// Ad account entries failed validation.
	#[error("Ad account `{name}` is invalid.")]
	InvalidAccounts {
		/// Display name of the offending account.
		name: String,
		/// Underlying identifier failure.
		#[source]
		source: crate::auth::IdentifierError,
	},
	/// The API base URL cannot be parsed or joined.
	#[error("API base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Config file could not be read.
	#[error("Config file could not be read.")]
	Read(#[from] std::io::Error),
	/// Config file is not valid JSON for [`crate::config::Config`].
	#[error("Config file is malformed.")]
	Parse(#[from] serde_path_to_error::Error<serde_json::Error>),
	/// HTTP method string is not a valid token.
	#[error("HTTP method `{method}` is invalid.")]
	InvalidMethod {
		/// Rejected method string.
		method: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// The API responded with JSON that does not match the expected model.
	#[error("API returned malformed JSON.")]
	Json {
		/// Structured parsing failure including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}

/// Non-success response returned by the remote API.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("API responded with status {status}: {}.", summarize(.errors))]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// Error entries reported by the API, if the body could be parsed.
	pub errors: Vec<ApiErrorDetail>,
}
impl ApiError {
	/// Returns `true` when the API rejected the request's OAuth signature or credentials.
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}
}

/// Single error entry returned in an API error body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
	/// Machine-readable error code.
	pub code: String,
	/// Human-readable message.
	pub message: String,
}

fn summarize(errors: &[ApiErrorDetail]) -> String {
	if errors.is_empty() {
		return "no error details".into();
	}

	errors.iter().map(|e| format!("{} ({})", e.message, e.code)).collect::<Vec<_>>().join("; ")
}
