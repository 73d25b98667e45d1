use std::time::Duration;

use reqwest::{
	Method, Response, StatusCode, Url,
	header::{HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;

use crate::{Error, Query, Result};

const HEADER_KEY: HeaderName = HeaderName::from_static("x-onyx-key");
const HEADER_SECRET: HeaderName = HeaderName::from_static("x-onyx-secret");

/// Handle on one Onyx database.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct Client {
	http: reqwest::Client,
	base_url: Url,
	database_id: String,
}
impl Client {
	pub fn new(cfg: &notes_config::Onyx) -> Result<Self> {
		let database_id = required(cfg.database_id.as_deref(), "database_id")?;
		let api_key = required(cfg.api_key.as_deref(), "api_key")?;
		let api_secret = required(cfg.api_secret.as_deref(), "api_secret")?;
		let base_url = Url::parse(&cfg.base_url).map_err(|err| Error::Config {
			message: format!("Onyx base_url {:?} is invalid: {err}.", cfg.base_url),
		})?;

		if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
			return Err(Error::Config {
				message: format!("Onyx base_url {:?} must be an http(s) URL.", cfg.base_url),
			});
		}

		let http = reqwest::Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(auth_headers(api_key, api_secret)?)
			.build()
			.map_err(|err| Error::Config {
				message: format!("Failed to build the Onyx HTTP client: {err}"),
			})?;

		Ok(Self { http, base_url, database_id: database_id.to_string() })
	}

	/// Starts a query against `table`.
	pub fn from_table(&self, table: &str) -> Query<'_> {
		Query::new(self, table)
	}

	/// Fetches one record by primary key. A missing record is `None`, not an error.
	pub async fn find_by_id(&self, table: &str, id: &str) -> Result<Option<Value>> {
		let url = self.endpoint(&[table, id])?;
		let response = self.http.get(url).send().await?;

		if response.status() == StatusCode::NOT_FOUND {
			return Ok(None);
		}

		read_optional_json(check(response).await?).await
	}

	/// Inserts or replaces `record` and returns the stored entity when Onyx echoes it back.
	pub async fn save(&self, table: &str, record: &Value) -> Result<Option<Value>> {
		let url = self.endpoint(&[table])?;
		let response = self.http.put(url).json(record).send().await?;

		read_optional_json(check(response).await?).await
	}

	/// Deletes one record. Returns whether Onyx reported that it existed.
	pub async fn delete(&self, table: &str, id: &str) -> Result<bool> {
		let url = self.endpoint(&[table, id])?;
		let response = self.http.delete(url).send().await?;

		if response.status() == StatusCode::NOT_FOUND {
			return Ok(false);
		}

		// Any success body other than a literal `false` means the record existed.
		let body = check(response).await?.text().await.unwrap_or_default();
		let existed = !matches!(serde_json::from_str::<Value>(&body), Ok(Value::Bool(false)));

		Ok(existed)
	}

	pub(crate) async fn send_json(
		&self,
		method: Method,
		segments: &[&str],
		params: &[(&str, String)],
		body: &Value,
	) -> Result<Option<Value>> {
		let url = self.endpoint(segments)?;
		let response = self.http.request(method, url).query(params).json(body).send().await?;

		read_optional_json(check(response).await?).await
	}

	fn endpoint(&self, segments: &[&str]) -> Result<Url> {
		let mut url = self.base_url.clone();

		{
			let mut path = url.path_segments_mut().map_err(|_| Error::Config {
				message: "Onyx base_url cannot be used as a base URL.".to_string(),
			})?;

			path.pop_if_empty().push("data").push(&self.database_id).extend(segments);
		}

		Ok(url)
	}
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
	match value.map(str::trim) {
		Some(value) if !value.is_empty() => Ok(value),
		_ => Err(Error::Config {
			message: format!(
				"Onyx is not configured: {name} is missing. Set onyx.{name} or ONYX_{}.",
				name.to_ascii_uppercase()
			),
		}),
	}
}

fn auth_headers(api_key: &str, api_secret: &str) -> Result<HeaderMap> {
	let mut key = HeaderValue::from_str(api_key)?;
	let mut secret = HeaderValue::from_str(api_secret)?;

	key.set_sensitive(true);
	secret.set_sensitive(true);

	let mut headers = HeaderMap::new();

	headers.insert(HEADER_KEY, key);
	headers.insert(HEADER_SECRET, secret);

	Ok(headers)
}

async fn check(response: Response) -> Result<Response> {
	let status = response.status();

	if status.is_success() {
		return Ok(response);
	}

	let body = response.text().await.unwrap_or_default();
	let message = error_message(status, &body);

	tracing::debug!(status = status.as_u16(), %message, "Onyx returned an error status.");

	Err(Error::Http { status: Some(status.as_u16()), message })
}

async fn read_optional_json(response: Response) -> Result<Option<Value>> {
	let body = response.text().await?;

	if body.trim().is_empty() {
		return Ok(None);
	}

	match serde_json::from_str(&body)? {
		Value::Null => Ok(None),
		value => Ok(Some(value)),
	}
}

fn error_message(status: StatusCode, body: &str) -> String {
	let detail = serde_json::from_str::<Value>(body)
		.ok()
		.and_then(|json| {
			json.pointer("/error/message")
				.or_else(|| json.get("message"))
				.or_else(|| json.get("error"))
				.and_then(Value::as_str)
				.map(str::to_string)
		})
		.unwrap_or_else(|| body.trim().to_string());

	if detail.is_empty() {
		format!("Onyx request failed with status {status}.")
	} else {
		format!("Onyx request failed with status {status}: {detail}")
	}
}
