use crate::{NoteService, Result};

impl NoteService {
	/// Removes a note. Deleting an id that never existed succeeds.
	pub async fn delete(&self, id: &str) -> Result<()> {
		let removed = self
			.store
			.delete(self.table(), id)
			.await
			.map_err(|err| crate::upstream("delete", err))?;

		if !removed {
			tracing::debug!(id, "Delete targeted a note that does not exist.");
		}

		Ok(())
	}
}
