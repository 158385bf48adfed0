// self
#[cfg(feature = "metrics")] use crate::obs::status_class;
use crate::obs::{ApiCallKind, CallOutcome};

/// Records an API call outcome via the global metrics recorder (when enabled).
pub fn record_api_call(kind: ApiCallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth1_signer_api_call_total",
			"call" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Counts API responses by endpoint and status class (when enabled).
pub fn record_api_status(kind: ApiCallKind, status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth1_signer_api_response_total",
			"call" => kind.as_str(),
			"status" => status_class(status)
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, status);
	}
}
