use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Note, NoteService, Record, Result, note,
	note::{FIELD_CREATED_AT, FIELD_ID, FIELD_UPDATED_AT},
	payload::{self, WriteMode},
};

impl NoteService {
	pub async fn create(&self, body: &Value) -> Result<Note> {
		let mut record = payload::validate_payload(body, WriteMode::Full)?;

		if !record.contains_key(FIELD_ID) {
			record.insert(FIELD_ID.to_string(), Value::String(Uuid::new_v4().to_string()));
		}
		if self.cfg.stamp_timestamps {
			let now = stamp_now()?;

			for field in [FIELD_CREATED_AT, FIELD_UPDATED_AT] {
				if !record.contains_key(field) {
					record.insert(field.to_string(), now.clone());
				}
			}
		}

		let saved = self
			.store
			.save(self.table(), &record)
			.await
			.map_err(|err| crate::upstream("create", err))?;

		respond(saved, record)
	}
}

/// The current time as a stored timestamp value.
pub(crate) fn stamp_now() -> Result<Value> {
	stamp(OffsetDateTime::now_utc())
}

fn stamp(at: OffsetDateTime) -> Result<Value> {
	Ok(Value::String(crate::time_serde::format(&at)?))
}

/// Builds the response from what the remote echoed, or from what was sent when it echoed nothing.
pub(crate) fn respond(saved: Option<Value>, sent: Record) -> Result<Note> {
	let record = match saved {
		Some(value) if !value.is_null() => note::normalize(value)?,
		_ => note::normalize(Value::Object(sent))?,
	};

	Note::from_record(&record)
}
