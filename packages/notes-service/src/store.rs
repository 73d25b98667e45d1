use serde_json::Value;

use crate::{BoxFuture, NoteStore, Record};
use notes_onyx::{Client, Page};

/// [`NoteStore`] backed by the Onyx Cloud Database.
///
/// A client that cannot be built (usually missing credentials) is kept as an error and reported
/// on every call, so the service still starts and answers with an upstream failure.
pub struct OnyxStore {
	client: Result<Client, String>,
}
impl OnyxStore {
	pub fn new(cfg: &notes_config::Onyx) -> Self {
		let client = notes_onyx::init(cfg).map_err(|err| {
			tracing::warn!(error = %err, "Onyx client is not configured. Requests will fail.");

			err.to_string()
		});

		Self { client }
	}

	fn client(&self) -> notes_onyx::Result<&Client> {
		self.client.as_ref().map_err(|message| notes_onyx::Error::Config { message: message.clone() })
	}
}

impl NoteStore for OnyxStore {
	fn page<'a>(
		&'a self,
		table: &'a str,
		page_size: u32,
		next_page: Option<&'a str>,
	) -> BoxFuture<'a, notes_onyx::Result<Page<Value>>> {
		Box::pin(async move {
			self.client()?.from_table(table).limit(page_size).page(page_size, next_page).await
		})
	}

	fn find_by_id<'a>(
		&'a self,
		table: &'a str,
		id: &'a str,
	) -> BoxFuture<'a, notes_onyx::Result<Option<Value>>> {
		Box::pin(async move { self.client()?.find_by_id(table, id).await })
	}

	fn save<'a>(
		&'a self,
		table: &'a str,
		record: &'a Record,
	) -> BoxFuture<'a, notes_onyx::Result<Option<Value>>> {
		Box::pin(async move {
			let body = Value::Object(record.clone());

			self.client()?.save(table, &body).await
		})
	}

	fn delete<'a>(&'a self, table: &'a str, id: &'a str) -> BoxFuture<'a, notes_onyx::Result<bool>> {
		Box::pin(async move { self.client()?.delete(table, id).await })
	}
}
