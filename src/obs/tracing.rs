// self
use crate::{_prelude::*, obs::ApiCallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Span covering one signed Ads API request.
///
/// Carries the endpoint kind, HTTP method and the path relative to the API root; the response
/// status is filled in once the transport answers.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Opens a span for `method` on `path` (relative to the API root).
	pub fn new(kind: ApiCallKind, method: &'static str, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth1_signer.api_call",
				call = kind.as_str(),
				method,
				path,
				status = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, method, path);

			Self {}
		}
	}

	/// Records the HTTP status the API answered with.
	pub fn record_status(&self, status: u16) {
		#[cfg(feature = "tracing")]
		self.span.record("status", status);
		#[cfg(not(feature = "tracing"))]
		let _ = status;
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Progress events emitted while a spend report runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportEvent {
	/// Processing of an account started.
	AccountStarted,
	/// The account reported no active entities for the day.
	NoActiveEntities,
	/// An active entity had no billed spend.
	NoStats,
	/// The account failed; the run continues with the next one.
	AccountFailed,
}
impl ReportEvent {
	/// Human-readable message attached to the event.
	pub const fn message(self) -> &'static str {
		match self {
			ReportEvent::AccountStarted => "start process account",
			ReportEvent::NoActiveEntities => "no data for selected account, skipping",
			ReportEvent::NoStats => "no stats data for selected account, skipping",
			ReportEvent::AccountFailed => "can't process account",
		}
	}
}

/// Emits a report progress event for `account` (when tracing is enabled).
pub fn report_event(event: ReportEvent, account: &str, error: Option<&dyn StdError>) {
	#[cfg(feature = "tracing")]
	{
		match (event, error) {
			(ReportEvent::AccountFailed, Some(error)) => {
				tracing::warn!(account, error = %error, "{}", event.message())
			},
			(ReportEvent::AccountFailed, None) => tracing::warn!(account, "{}", event.message()),
			_ => tracing::info!(account, "{}", event.message()),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (event, account, error);
	}
}
