//! Response bodies returned by the Ads API endpoints the client calls.

// self
use crate::{
	_prelude::*,
	auth::{AdAccountId, EntityId},
	error::ApiErrorDetail,
};

/// Body of `GET stats/accounts/{account}/active_entities`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveEntitiesResponse {
	/// Echo of the request parameters.
	#[serde(default)]
	pub request: ActiveEntitiesRequest,
	/// Entities with activity inside the window.
	#[serde(default)]
	pub data: Vec<ActiveEntity>,
}

/// Request echo attached to [`ActiveEntitiesResponse`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEntitiesRequest {
	/// Parameters as understood by the API.
	#[serde(default)]
	pub params: ActiveEntitiesParams,
}

/// Parameters echoed in [`ActiveEntitiesRequest`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEntitiesParams {
	/// Account the query ran against.
	pub account_id: Option<AdAccountId>,
	/// Entity type, e.g. `CAMPAIGN`.
	pub entity: Option<String>,
	/// Window start.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub start_time: Option<OffsetDateTime>,
	/// Window end.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub end_time: Option<OffsetDateTime>,
}

/// Entity with activity in the requested window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveEntity {
	/// Entity identifier.
	pub entity_id: EntityId,
	/// First activity inside the window.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub activity_start_time: Option<OffsetDateTime>,
	/// Last activity inside the window.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub activity_end_time: Option<OffsetDateTime>,
	/// Placements the entity served on.
	#[serde(default)]
	pub placements: Vec<String>,
}

/// Body of `GET stats/accounts/{account}` with `metric_groups=BILLING`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpendStats {
	/// Data granularity descriptor, e.g. `stats`.
	#[serde(default)]
	pub data_type: String,
	/// One entry per requested entity.
	#[serde(default)]
	pub data: Vec<SpendStatsEntry>,
	/// Echo of the request parameters.
	#[serde(default)]
	pub request: SpendStatsRequest,
}
impl SpendStats {
	/// First billed charge of the first segment, in micros of the account currency.
	pub fn billed_charge_local_micro(&self) -> Option<i64> {
		self.data
			.first()?
			.id_data
			.first()?
			.metrics
			.billed_charge_local_micro
			.as_ref()?
			.first()
			.copied()
	}
}

/// Per-entity stats entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpendStatsEntry {
	/// Entity identifier.
	pub id: EntityId,
	/// Segments (a single one when no segmentation was requested).
	#[serde(default)]
	pub id_data: Vec<SpendStatsSegment>,
}

/// Metrics for one segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpendStatsSegment {
	/// Metric values.
	pub metrics: BillingMetrics,
}

/// The `BILLING` metric group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingMetrics {
	/// Billed charge per granularity bucket; `null` when nothing was billed.
	#[serde(default)]
	pub billed_charge_local_micro: Option<Vec<i64>>,
}

/// Request echo attached to [`SpendStats`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendStatsRequest {
	/// Parameters as understood by the API.
	#[serde(default)]
	pub params: SpendStatsParams,
}

/// Parameters echoed in [`SpendStatsRequest`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendStatsParams {
	/// Country segment, when requested.
	#[serde(default)]
	pub country: Option<serde_json::Value>,
	/// Placement the stats cover.
	#[serde(default)]
	pub placement: Option<String>,
	/// Granularity, e.g. `TOTAL`.
	#[serde(default)]
	pub granularity: Option<String>,
	/// Platform segment, when requested.
	#[serde(default)]
	pub platform: Option<serde_json::Value>,
}

/// Body of `GET accounts/{account}/campaigns/{campaign}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CampaignInfo {
	/// Campaign details.
	pub data: Campaign,
}

/// Campaign details.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
	/// Campaign identifier.
	pub id: EntityId,
	/// Display name.
	pub name: String,
	/// ISO 4217 currency of the account.
	pub currency: String,
	/// Scheduled start.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub start_time: Option<OffsetDateTime>,
	/// Scheduled end.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub end_time: Option<OffsetDateTime>,
	/// Whether the campaign can currently serve.
	#[serde(default)]
	pub servable: Option<bool>,
	/// Derived delivery status.
	#[serde(default)]
	pub effective_status: Option<String>,
	/// Configured status (`ACTIVE`, `PAUSED`, ...).
	#[serde(default)]
	pub entity_status: Option<String>,
	/// Daily budget in micros.
	#[serde(default)]
	pub daily_budget_amount_local_micro: Option<i64>,
	/// Funding instrument backing the campaign.
	#[serde(default)]
	pub funding_instrument_id: Option<String>,
	/// Creation time.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Last update time.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
}

/// Error body returned alongside non-success statuses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Individual errors.
	#[serde(default)]
	pub errors: Vec<ApiErrorDetail>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn active_entities_decode() {
		let body = r#"{
			"request": {"params": {
				"account_id": "18ce54d4x5t",
				"entity": "CAMPAIGN",
				"start_time": "2026-10-17T00:00:00Z",
				"end_time": "2026-10-18T00:00:00Z"
			}},
			"data": [{
				"entity_id": "8wku2",
				"activity_start_time": "2026-10-17T03:10:00Z",
				"activity_end_time": "2026-10-17T21:42:00Z",
				"placements": ["ALL_ON_TWITTER"]
			}]
		}"#;
		let parsed: ActiveEntitiesResponse =
			serde_json::from_str(body).expect("Active entities fixture should decode.");

		assert_eq!(parsed.data.len(), 1);
		assert_eq!(parsed.data[0].entity_id.as_ref(), "8wku2");
		assert_eq!(parsed.data[0].placements, ["ALL_ON_TWITTER"]);
		assert_eq!(parsed.request.params.entity.as_deref(), Some("CAMPAIGN"));
	}

	#[test]
	fn spend_stats_expose_first_billed_charge() {
		let body = r#"{
			"data_type": "stats",
			"data": [{"id": "8wku2", "id_data": [{"metrics": {"billed_charge_local_micro": [12340000]}}]}],
			"request": {"params": {"country": null, "placement": "ALL_ON_TWITTER", "granularity": "TOTAL", "platform": null}}
		}"#;
		let parsed: SpendStats = serde_json::from_str(body).expect("Stats fixture should decode.");

		assert_eq!(parsed.billed_charge_local_micro(), Some(12_340_000));

		let empty: SpendStats = serde_json::from_str(
			r#"{"data_type": "stats", "data": [{"id": "8wku2", "id_data": [{"metrics": {"billed_charge_local_micro": null}}]}]}"#,
		)
		.expect("Stats fixture with null metrics should decode.");

		assert_eq!(empty.billed_charge_local_micro(), None);
	}

	#[test]
	fn campaign_tolerates_null_end_time() {
		let body = r#"{"data": {
			"id": "8wku2",
			"name": "Launch",
			"currency": "USD",
			"start_time": "2026-10-01T00:00:00Z",
			"end_time": null,
			"servable": true,
			"daily_budget_amount_local_micro": 50000000
		}}"#;
		let parsed: CampaignInfo =
			serde_json::from_str(body).expect("Campaign fixture should decode.");

		assert_eq!(parsed.data.name, "Launch");
		assert_eq!(parsed.data.end_time, None);
		assert_eq!(parsed.data.daily_budget_amount_local_micro, Some(50_000_000));
	}
}
