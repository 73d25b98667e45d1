//! Note CRUD operations over a remote Onyx table.
//!
//! [`NoteService`] validates payloads, merges updates over stored records, and talks to storage
//! only through the [`NoteStore`] seam.

pub mod create;
pub mod delete;
pub mod error;
pub mod get;
pub mod list;
pub mod note;
pub mod payload;
pub mod store;
pub mod time_serde;
pub mod update;

pub use error::{Error, FieldErrors, NON_FIELD_ERRORS, Result};
pub use list::{ListRequest, ListResponse};
pub use note::Note;
pub use payload::WriteMode;
pub use store::OnyxStore;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::{Map, Value};

use notes_config::{Config, Notes};
use notes_onyx::Page;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A stored note as a loose JSON object.
pub type Record = Map<String, Value>;

/// Remote storage for note records.
pub trait NoteStore
where
	Self: Send + Sync,
{
	fn page<'a>(
		&'a self,
		table: &'a str,
		page_size: u32,
		next_page: Option<&'a str>,
	) -> BoxFuture<'a, notes_onyx::Result<Page<Value>>>;

	fn find_by_id<'a>(
		&'a self,
		table: &'a str,
		id: &'a str,
	) -> BoxFuture<'a, notes_onyx::Result<Option<Value>>>;

	/// Upserts a record and returns what the remote stored, if it echoed anything.
	fn save<'a>(
		&'a self,
		table: &'a str,
		record: &'a Record,
	) -> BoxFuture<'a, notes_onyx::Result<Option<Value>>>;

	/// Returns whether a record was removed.
	fn delete<'a>(&'a self, table: &'a str, id: &'a str) -> BoxFuture<'a, notes_onyx::Result<bool>>;
}

pub struct NoteService {
	pub cfg: Notes,
	pub store: Arc<dyn NoteStore>,
}
impl NoteService {
	pub fn new(cfg: Notes, store: Arc<dyn NoteStore>) -> Self {
		Self { cfg, store }
	}

	pub fn with_onyx(config: &Config) -> Self {
		Self::new(config.notes.clone(), Arc::new(OnyxStore::new(&config.onyx)))
	}

	pub(crate) fn table(&self) -> &str {
		&self.cfg.table
	}
}

/// Logs a remote failure and converts it into a service error.
pub(crate) fn upstream(operation: &'static str, err: notes_onyx::Error) -> Error {
	tracing::warn!(operation, status = ?err.status(), error = %err, "Onyx call failed.");

	Error::from(err)
}
