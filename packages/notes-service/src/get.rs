use crate::{Error, Note, NoteService, Record, Result, note};

impl NoteService {
	pub async fn get(&self, id: &str) -> Result<Note> {
		let record = self.find_record("get", id).await?;

		Note::from_record(&record)
	}

	/// Loads a stored record with `null` attributes removed.
	pub(crate) async fn find_record(&self, operation: &'static str, id: &str) -> Result<Record> {
		let found = self
			.store
			.find_by_id(self.table(), id)
			.await
			.map_err(|err| crate::upstream(operation, err))?;

		match found {
			Some(value) if !value.is_null() => note::normalize(value),
			_ => Err(Error::NotFound { message: "Not found".to_string() }),
		}
	}
}
