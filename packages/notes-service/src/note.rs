use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::{Error, Record, Result, time_serde};

pub const FIELD_ID: &str = "id";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// A note as returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
	pub id: String,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
	#[serde(
		rename = "createdAt",
		default,
		with = "crate::time_serde::option",
		skip_serializing_if = "Option::is_none"
	)]
	pub created_at: Option<OffsetDateTime>,
	#[serde(
		rename = "updatedAt",
		default,
		with = "crate::time_serde::option",
		skip_serializing_if = "Option::is_none"
	)]
	pub updated_at: Option<OffsetDateTime>,
}
impl Note {
	/// Projects a stored record onto the note fields.
	///
	/// Extra attributes are ignored. Timestamps that cannot be read are dropped.
	pub fn from_record(record: &Record) -> Result<Self> {
		let id = required_text(record, FIELD_ID)?;
		let title = required_text(record, FIELD_TITLE)?;
		let content = match record.get(FIELD_CONTENT) {
			None | Some(Value::Null) => None,
			Some(Value::String(text)) => Some(text.clone()),
			Some(Value::Number(number)) => Some(number.to_string()),
			Some(other) => {
				tracing::warn!(id, value = %other, "Dropping non-text content from Onyx record.");

				None
			},
		};

		Ok(Self {
			created_at: timestamp(record, &id, FIELD_CREATED_AT),
			updated_at: timestamp(record, &id, FIELD_UPDATED_AT),
			id,
			title,
			content,
		})
	}
}

/// Turns a remote value into a record with `null` attributes removed.
///
/// Anything other than a JSON object is a malformed upstream response.
pub fn normalize(value: Value) -> Result<Record> {
	match value {
		Value::Object(mut record) => {
			record.retain(|_, value| !value.is_null());

			Ok(record)
		},
		other => Err(Error::Upstream {
			message: format!("Onyx returned a note that is not a JSON object: {other}"),
		}),
	}
}

fn required_text(record: &Record, field: &str) -> Result<String> {
	match record.get(field) {
		Some(Value::String(text)) => Ok(text.clone()),
		Some(Value::Number(number)) => Ok(number.to_string()),
		_ => Err(Error::Upstream {
			message: format!("Onyx returned a note without a valid {field}."),
		}),
	}
}

fn timestamp(record: &Record, id: &str, field: &str) -> Option<OffsetDateTime> {
	let value = record.get(field)?;
	let parsed = time_serde::from_json(value);

	if parsed.is_none() {
		tracing::warn!(id, field, %value, "Dropping unreadable timestamp from Onyx record.");
	}

	parsed
}
