//! Optional observability helpers for API calls and spend reports.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth1_signer.api_call` with the `call`
//!   (endpoint), `method`, `path` and `status` fields, plus report progress events.
//! - Enable `metrics` to increment the `oauth1_signer_api_call_total` counter for every
//!   attempt/success/failure (labeled by `call` + `outcome`) and the
//!   `oauth1_signer_api_response_total` counter per answered request (labeled by `call` +
//!   `status` class).

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Ads API endpoints observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiCallKind {
	/// `stats/accounts/{account}/active_entities`.
	ActiveEntities,
	/// `stats/accounts/{account}`.
	SpendStats,
	/// `accounts/{account}/campaigns/{campaign}`.
	Campaign,
}
impl ApiCallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiCallKind::ActiveEntities => "active_entities",
			ApiCallKind::SpendStats => "spend_stats",
			ApiCallKind::Campaign => "campaign",
		}
	}
}
impl Display for ApiCallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Collapses an HTTP status into its class label (`2xx`, `4xx`, ...).
pub const fn status_class(status: u16) -> &'static str {
	match status {
		100..=199 => "1xx",
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_classes_cover_api_answers() {
		assert_eq!(status_class(200), "2xx");
		assert_eq!(status_class(401), "4xx");
		assert_eq!(status_class(429), "4xx");
		assert_eq!(status_class(503), "5xx");
		assert_eq!(status_class(42), "other");
	}
}
