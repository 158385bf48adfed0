//! Daily spend report over the configured ad accounts.
//!
//! For every account the reporter lists yesterday's active campaigns, fetches their billed
//! spend, and resolves each campaign's name and currency. Accounts fail independently: an
//! error is logged and the run moves on to the next account.

pub mod sink;

pub use sink::*;

// crates.io
use time::{format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{
	_prelude::*,
	ads::AdsApi,
	config::AdAccount,
	http::ApiHttpClient,
	obs::{self, ReportEvent},
};

/// Ads API spend values are expressed in millionths of the account currency.
pub const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Date form taken by the stats endpoints and written into [`Spend`] records.
pub const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, ISO_DATE);

/// Spend of one campaign on one day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spend {
	/// Day the spend was billed for.
	#[serde(with = "iso_date")]
	pub date: Date,
	/// Display name of the ad account.
	pub ad_account: String,
	/// Campaign name.
	pub campaign: String,
	/// Amount in account currency units.
	pub spend: f64,
	/// ISO 4217 currency code.
	pub currency: String,
}

/// Outcome of [`SpendReporter::run`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportSummary {
	/// Accounts processed without error.
	pub processed_accounts: usize,
	/// Display names of accounts that failed.
	pub failed_accounts: Vec<String>,
	/// Every record produced by the run.
	pub records: Vec<Spend>,
}

/// The report window for `today`: the day being reported plus the `start_time` / `end_time`
/// query values (`YYYY-MM-DD`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportWindow {
	/// Day the spend is attributed to (the day before `today`).
	pub date: Date,
	/// Inclusive window start.
	pub start_time: String,
	/// Exclusive window end.
	pub end_time: String,
}
impl ReportWindow {
	/// Builds the window covering the day before `today`.
	pub fn for_day_before(today: Date) -> Result<Self> {
		let date = today.saturating_sub(time::Duration::DAY);

		Ok(Self { date, start_time: date.format(ISO_DATE)?, end_time: today.format(ISO_DATE)? })
	}
}

/// Walks ad accounts and turns their billing stats into [`Spend`] records.
pub struct SpendReporter<C>
where
	C: ?Sized + ApiHttpClient,
{
	api: AdsApi<C>,
	accounts: Vec<AdAccount>,
	sink: Arc<dyn SpendSink>,
}
impl<C> SpendReporter<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a reporter that logs records through [`TracingSink`].
	pub fn new(api: AdsApi<C>, accounts: Vec<AdAccount>) -> Self {
		Self { api, accounts, sink: Arc::new(TracingSink) }
	}

	/// Replaces the record sink.
	pub fn with_sink(mut self, sink: Arc<dyn SpendSink>) -> Self {
		self.sink = sink;

		self
	}

	/// Reports the day before the current UTC date.
	pub async fn run_yesterday(&self) -> Result<ReportSummary> {
		self.run(OffsetDateTime::now_utc().date()).await
	}

	/// Reports the day before `today` for every configured account.
	///
	/// Only a window that cannot be built fails the run; account failures are logged and
	/// counted in the summary.
	pub async fn run(&self, today: Date) -> Result<ReportSummary> {
		let window = ReportWindow::for_day_before(today)?;
		let mut summary = ReportSummary::default();

		for account in &self.accounts {
			obs::report_event(ReportEvent::AccountStarted, &account.name, None);

			match self.process_account(account, &window).await {
				Ok(records) => {
					summary.processed_accounts += 1;
					summary.records.extend(records);
				},
				Err(e) => {
					obs::report_event(
						ReportEvent::AccountFailed,
						&account.name,
						Some(&e as &dyn StdError),
					);
					summary.failed_accounts.push(account.name.clone());
				},
			}
		}

		Ok(summary)
	}

	/// Produces the records of a single account for `window`.
	pub async fn process_account(
		&self,
		account: &AdAccount,
		window: &ReportWindow,
	) -> Result<Vec<Spend>> {
		let active = self
			.api
			.active_entities(&account.id, &window.start_time, &window.end_time)
			.await?;

		if active.data.is_empty() {
			obs::report_event(ReportEvent::NoActiveEntities, &account.name, None);

			return Ok(Vec::new());
		}

		let mut records = Vec::with_capacity(active.data.len());

		for entity in &active.data {
			let stats = self
				.api
				.spend_stats(&account.id, &entity.entity_id, &window.start_time, &window.end_time)
				.await?;
			let Some(micros) = stats.billed_charge_local_micro() else {
				obs::report_event(ReportEvent::NoStats, &account.name, None);

				continue;
			};
			let campaign = self.api.campaign(&account.id, &entity.entity_id).await?.data;
			let spend = Spend {
				date: window.date,
				ad_account: account.name.clone(),
				campaign: campaign.name,
				spend: micros as f64 / MICROS_PER_UNIT,
				currency: campaign.currency,
			};

			self.sink.record(&spend);
			records.push(spend);
		}

		Ok(records)
	}
}
impl<C> Debug for SpendReporter<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SpendReporter")
			.field("api", &self.api)
			.field("accounts", &self.accounts)
			.finish()
	}
}
