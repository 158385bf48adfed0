//! Credential and account configuration.
//!
//! A [`Config`] comes either from the process environment ([`Config::from_env`]) or from a JSON
//! file ([`Config::from_path`]). Neither loader checks the credentials; call
//! [`Config::validate`] before building a client so an incomplete setup fails up front instead
//! of producing requests the API rejects.

// std
use std::{fs, path::Path};
// self
use crate::{
	_prelude::*,
	ads::{AdsApi, DEFAULT_API_BASE_URL},
	auth::{AdAccountId, Credentials, Secret},
	error::ConfigError,
	http::ApiHttpClient,
	sign::Oauth1Signer,
};

/// Consumer key variable.
pub const ENV_API_KEY: &str = "TWITTER_API_KEY";
/// Consumer secret variable.
pub const ENV_API_SECRET: &str = "TWITTER_API_SECRET";
/// Access token variable.
pub const ENV_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
/// Access token secret variable.
pub const ENV_ACCESS_SECRET: &str = "TWITTER_ACCESS_SECRET";
/// Ad account display name variable.
pub const ENV_AD_ACCOUNT_NAME: &str = "TWITTER_AD_ACCOUNT_NAME";
/// Ad account identifier variable.
pub const ENV_AD_ACCOUNT_ID: &str = "TWITTER_AD_ACCOUNT_ID";
/// Optional API base URL override.
pub const ENV_API_BASE_URL: &str = "TWITTER_ADS_API_BASE_URL";

/// Ad account the spend report iterates over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdAccount {
	/// Display name used in logs and spend records.
	pub name: String,
	/// Ads API account identifier.
	pub id: AdAccountId,
}

/// Credentials plus the accounts to report on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
	/// Consumer key.
	pub api_key: String,
	/// Consumer secret.
	pub api_secret: Secret,
	/// Access token.
	pub access_token: String,
	/// Access token secret.
	pub access_secret: Secret,
	/// Accounts to process.
	#[serde(default)]
	pub ad_accounts: Vec<AdAccount>,
	/// Versioned API root.
	#[serde(default = "default_api_base_url")]
	pub api_base_url: Url,
}
impl Config {
	/// Reads the configuration from the `TWITTER_*` environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Builds the configuration from an arbitrary variable lookup.
	///
	/// Missing credential variables read as empty strings (rejected later by
	/// [`Config::validate`]); a missing account id is an error right away.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |name: &str| lookup(name).unwrap_or_default();
		let account_id = lookup(ENV_AD_ACCOUNT_ID)
			.filter(|value| !value.is_empty())
			.ok_or(ConfigError::MissingVariable { name: ENV_AD_ACCOUNT_ID })?;
		let account_name = lookup(ENV_AD_ACCOUNT_NAME)
			.filter(|value| !value.is_empty())
			.unwrap_or_else(|| account_id.clone());
		let id = AdAccountId::new(&account_id)
			.map_err(|source| ConfigError::InvalidAccounts { name: account_name.clone(), source })?;
		let api_base_url = match lookup(ENV_API_BASE_URL).filter(|value| !value.is_empty()) {
			Some(raw) => parse_base_url(&raw)?,
			None => default_api_base_url(),
		};

		Ok(Self {
			api_key: read(ENV_API_KEY),
			api_secret: Secret::new(read(ENV_API_SECRET)),
			access_token: read(ENV_ACCESS_TOKEN),
			access_secret: Secret::new(read(ENV_ACCESS_SECRET)),
			ad_accounts: vec![AdAccount { name: account_name, id }],
			api_base_url,
		})
	}

	/// Loads a JSON configuration file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let raw = fs::read_to_string(path)?;
		let mut deserializer = serde_json::Deserializer::from_str(&raw);

		Ok(serde_path_to_error::deserialize(&mut deserializer)?)
	}

	/// Rejects configurations with any empty credential.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.credentials().first_empty().is_some() {
			return Err(ConfigError::MissingCredentials);
		}

		Ok(())
	}

	/// Credentials requests are signed with.
	pub fn credentials(&self) -> Credentials {
		Credentials::new(
			self.api_key.clone(),
			self.api_secret.clone(),
			self.access_token.clone(),
			self.access_secret.clone(),
		)
	}

	/// Validates the configuration and builds a client on top of `http_client`.
	pub fn ads_api<C>(&self, http_client: impl Into<Arc<C>>) -> Result<AdsApi<C>, ConfigError>
	where
		C: ?Sized + ApiHttpClient,
	{
		self.validate()?;

		Ok(AdsApi::with_http_client(
			http_client,
			Arc::new(Oauth1Signer::default()),
			self.credentials(),
			self.api_base_url.clone(),
		))
	}
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
	let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

	// `Url::join` drops the last segment unless the root ends with a slash.
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}

fn default_api_base_url() -> Url {
	Url::parse(DEFAULT_API_BASE_URL).expect("Default API base URL must parse.")
}
