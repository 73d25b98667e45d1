use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Client, Error, Result};

/// One page of query results.
#[derive(Debug, Clone)]
pub struct Page<T> {
	pub records: Vec<T>,
	/// Opaque cursor for the following page; absent on the last page.
	pub next_page: Option<String>,
}
impl<T> Default for Page<T> {
	fn default() -> Self {
		Self { records: Vec::new(), next_page: None }
	}
}
impl<'de, T> Deserialize<'de> for Page<T>
where
	T: Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = RawPage::<T>::deserialize(deserializer)?;
		let next_page = [raw.next_page_camel, raw.next_page_snake]
			.into_iter()
			.flatten()
			.find(|token| !token.is_empty());

		Ok(Self { records: raw.records, next_page })
	}
}

/// Wire shape of a page. The cursor may arrive as `nextPage` or `next_page`; the first non-empty
/// one wins.
#[derive(Deserialize)]
struct RawPage<T> {
	#[serde(default = "Vec::new")]
	records: Vec<T>,
	#[serde(default, rename = "nextPage")]
	next_page_camel: Option<String>,
	#[serde(default, rename = "next_page")]
	next_page_snake: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectQuery<'a> {
	#[serde(rename = "type")]
	kind: &'static str,
	table: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	limit: Option<u32>,
	distinct: bool,
}

/// A select query on one table, built with [`Client::from_table`].
#[derive(Debug)]
pub struct Query<'a> {
	client: &'a Client,
	table: String,
	limit: Option<u32>,
}
impl<'a> Query<'a> {
	pub(crate) fn new(client: &'a Client, table: &str) -> Self {
		Self { client, table: table.to_string(), limit: None }
	}

	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Runs the query and returns one page, decoding each record as `T`.
	///
	/// `next_page` is the cursor returned by the previous page; `None` starts from the beginning.
	pub async fn page<T>(self, page_size: u32, next_page: Option<&str>) -> Result<Page<T>>
	where
		T: DeserializeOwned,
	{
		let body = serde_json::to_value(SelectQuery {
			kind: "SelectQuery",
			table: &self.table,
			limit: self.limit,
			distinct: false,
		})?;
		let mut params = vec![("pageSize", page_size.to_string())];

		if let Some(token) = next_page.filter(|token| !token.is_empty()) {
			params.push(("nextPage", token.to_string()));
		}

		let response = self
			.client
			.send_json(Method::PUT, &["query", self.table.as_str()], &params, &body)
			.await?
			.unwrap_or_else(|| Value::Object(Default::default()));

		if !response.is_object() {
			return Err(Error::Http {
				status: None,
				message: "Onyx returned a query page that is not a JSON object.".to_string(),
			});
		}

		Ok(serde_json::from_value(response)?)
	}
}
