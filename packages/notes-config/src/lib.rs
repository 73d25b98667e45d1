mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, DEFAULT_ONYX_BASE_URL, Notes, Onyx, Service};

use std::{env, fs, path::Path};

const ENV_BASE_URL: &str = "ONYX_BASE_URL";
const ENV_DATABASE_ID: &str = "ONYX_DATABASE_ID";
const ENV_API_KEY: &str = "ONYX_API_KEY";
const ENV_API_SECRET: &str = "ONYX_API_SECRET";

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);
	apply_env(&mut cfg.onyx, |key| env::var(key).ok());

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.onyx.base_url.trim().is_empty() {
		return Err(Error::Validation { message: "onyx.base_url must be non-empty.".to_string() });
	}
	if cfg.onyx.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "onyx.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.notes.table.trim().is_empty() {
		return Err(Error::Validation { message: "notes.table must be non-empty.".to_string() });
	}
	if cfg.notes.max_limit == 0 {
		return Err(Error::Validation {
			message: "notes.max_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.notes.default_limit == 0 || cfg.notes.default_limit > cfg.notes.max_limit {
		return Err(Error::Validation {
			message: "notes.default_limit must be between 1 and notes.max_limit.".to_string(),
		});
	}

	Ok(())
}

/// Fills Onyx settings left empty by the config file from the environment.
///
/// `lookup` resolves an environment variable name to its value.
pub fn apply_env<F>(onyx: &mut Onyx, lookup: F)
where
	F: Fn(&str) -> Option<String>,
{
	let from_env = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

	if onyx.database_id.is_none() {
		onyx.database_id = from_env(ENV_DATABASE_ID);
	}
	if onyx.api_key.is_none() {
		onyx.api_key = from_env(ENV_API_KEY);
	}
	if onyx.api_secret.is_none() {
		onyx.api_secret = from_env(ENV_API_SECRET);
	}
	if onyx.base_url == DEFAULT_ONYX_BASE_URL
		&& let Some(base_url) = from_env(ENV_BASE_URL)
	{
		onyx.base_url = base_url.trim().trim_end_matches('/').to_string();
	}
}

fn normalize(cfg: &mut Config) {
	for value in [&mut cfg.onyx.database_id, &mut cfg.onyx.api_key, &mut cfg.onyx.api_secret] {
		if value.as_deref().map(|raw| raw.trim().is_empty()).unwrap_or(false) {
			*value = None;
		}
	}

	cfg.onyx.base_url = cfg.onyx.base_url.trim().trim_end_matches('/').to_string();

	if cfg.onyx.base_url.is_empty() {
		cfg.onyx.base_url = DEFAULT_ONYX_BASE_URL.to_string();
	}

	cfg.notes.table = cfg.notes.table.trim().to_string();
}
