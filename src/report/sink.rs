//! Destinations for spend records.

// self
use crate::{_prelude::*, report::Spend};

/// Receives every [`Spend`] record as soon as it is computed.
pub trait SpendSink
where
	Self: Send + Sync,
{
	/// Accepts one record.
	fn record(&self, spend: &Spend);
}

/// Logs each record as a structured `processed` event (when tracing is enabled).
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;
impl SpendSink for TracingSink {
	fn record(&self, spend: &Spend) {
		#[cfg(feature = "tracing")]
		tracing::info!(
			date = %spend.date,
			ad_account = %spend.ad_account,
			campaign = %spend.campaign,
			spend = spend.spend,
			currency = %spend.currency,
			"processed"
		);
		#[cfg(not(feature = "tracing"))]
		let _ = spend;
	}
}

/// Keeps records in memory; handy for tests and for callers that post-process a run.
#[derive(Debug, Default)]
pub struct MemorySink {
	records: Mutex<Vec<Spend>>,
}
impl MemorySink {
	/// Returns a copy of every record received so far.
	pub fn records(&self) -> Vec<Spend> {
		self.records.lock().clone()
	}

	/// Drains the received records.
	pub fn take(&self) -> Vec<Spend> {
		std::mem::take(&mut *self.records.lock())
	}
}
impl SpendSink for MemorySink {
	fn record(&self, spend: &Spend) {
		self.records.lock().push(spend.clone());
	}
}
