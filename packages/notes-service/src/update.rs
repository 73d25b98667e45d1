use serde_json::Value;

use crate::{
	Note, NoteService, Result,
	create::{respond, stamp_now},
	note::{FIELD_ID, FIELD_UPDATED_AT},
	payload::{self, WriteMode},
};

impl NoteService {
	/// Read-merge-write update of a stored note.
	///
	/// The stored record is loaded first, so an unknown id is reported before the body is
	/// checked. Accepted fields are laid over the stored ones and `id` always comes from `id`.
	pub async fn update(&self, id: &str, body: &Value, mode: WriteMode) -> Result<Note> {
		let mut merged = self.find_record("update", id).await?;
		let changes = payload::validate_payload(body, mode)?;
		let stamp = self.cfg.stamp_timestamps && !changes.contains_key(FIELD_UPDATED_AT);

		merged.extend(changes);

		if stamp {
			merged.insert(FIELD_UPDATED_AT.to_string(), stamp_now()?);
		}

		merged.insert(FIELD_ID.to_string(), Value::String(id.to_string()));

		let saved = self
			.store
			.save(self.table(), &merged)
			.await
			.map_err(|err| crate::upstream("update", err))?;

		respond(saved, merged)
	}
}
