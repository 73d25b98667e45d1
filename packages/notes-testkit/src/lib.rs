//! Test doubles for [`NoteStore`].

use std::{
	collections::BTreeMap,
	sync::{Mutex, MutexGuard},
};

use serde_json::Value;

use notes_config::{Config, Notes, Onyx, Service};
use notes_onyx::{Error, Page, Result};
use notes_service::{BoxFuture, NoteStore, Record};

/// In-memory store keyed by table and id.
///
/// Page tokens are decimal offsets into the id-ordered records.
#[derive(Default)]
pub struct MemoryStore {
	records: Mutex<BTreeMap<(String, String), Value>>,
	page_sizes: Mutex<Vec<u32>>,
	silent_saves: bool,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// A store whose `save` returns an empty body, like a remote that does not echo writes.
	pub fn silent() -> Self {
		Self { silent_saves: true, ..Self::default() }
	}

	pub fn insert(&self, table: &str, record: Value) {
		let id = record.get("id").and_then(Value::as_str).unwrap_or_default().to_string();

		lock(&self.records).insert((table.to_string(), id), record);
	}

	pub fn get(&self, table: &str, id: &str) -> Option<Value> {
		lock(&self.records).get(&(table.to_string(), id.to_string())).cloned()
	}

	pub fn len(&self) -> usize {
		lock(&self.records).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Page sizes requested so far, in call order.
	pub fn page_sizes(&self) -> Vec<u32> {
		lock(&self.page_sizes).clone()
	}
}

impl NoteStore for MemoryStore {
	fn page<'a>(
		&'a self,
		table: &'a str,
		page_size: u32,
		next_page: Option<&'a str>,
	) -> BoxFuture<'a, Result<Page<Value>>> {
		Box::pin(async move {
			lock(&self.page_sizes).push(page_size);

			let offset = match next_page {
				Some(token) => token.parse::<usize>().map_err(|_| Error::Http {
					status: Some(400),
					message: format!("Onyx request failed with status 400: invalid page token {token}"),
				})?,
				None => 0,
			};
			let records = lock(&self.records)
				.iter()
				.filter(|((record_table, _), _)| record_table == table)
				.map(|(_, value)| value.clone())
				.collect::<Vec<_>>();
			let end = offset.saturating_add(page_size as usize).min(records.len());
			let next_page = (end < records.len()).then(|| end.to_string());
			let records = records.get(offset..end).map(<[Value]>::to_vec).unwrap_or_default();

			Ok(Page { records, next_page })
		})
	}

	fn find_by_id<'a>(&'a self, table: &'a str, id: &'a str) -> BoxFuture<'a, Result<Option<Value>>> {
		Box::pin(async move { Ok(self.get(table, id)) })
	}

	fn save<'a>(&'a self, table: &'a str, record: &'a Record) -> BoxFuture<'a, Result<Option<Value>>> {
		Box::pin(async move {
			let value = Value::Object(record.clone());

			self.insert(table, value.clone());

			Ok((!self.silent_saves).then_some(value))
		})
	}

	fn delete<'a>(&'a self, table: &'a str, id: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move {
			Ok(lock(&self.records).remove(&(table.to_string(), id.to_string())).is_some())
		})
	}
}

/// Which remote failure a [`FailingStore`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
	Config,
	Http,
}

/// Store that fails every call with the same error.
pub struct FailingStore {
	kind: FailureKind,
	message: String,
}
impl FailingStore {
	pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
		Self { kind, message: message.into() }
	}

	/// An outage as seen through the HTTP client.
	pub fn outage(message: impl Into<String>) -> Self {
		Self::new(FailureKind::Http, message)
	}

	fn error(&self) -> Error {
		match self.kind {
			FailureKind::Config => Error::Config { message: self.message.clone() },
			FailureKind::Http => Error::Http { status: Some(503), message: self.message.clone() },
		}
	}
}

impl NoteStore for FailingStore {
	fn page<'a>(
		&'a self,
		_table: &'a str,
		_page_size: u32,
		_next_page: Option<&'a str>,
	) -> BoxFuture<'a, Result<Page<Value>>> {
		Box::pin(async move { Err(self.error()) })
	}

	fn find_by_id<'a>(
		&'a self,
		_table: &'a str,
		_id: &'a str,
	) -> BoxFuture<'a, Result<Option<Value>>> {
		Box::pin(async move { Err(self.error()) })
	}

	fn save<'a>(
		&'a self,
		_table: &'a str,
		_record: &'a Record,
	) -> BoxFuture<'a, Result<Option<Value>>> {
		Box::pin(async move { Err(self.error()) })
	}

	fn delete<'a>(&'a self, _table: &'a str, _id: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { Err(self.error()) })
	}
}

/// A complete config pointing at an unconfigured Onyx account.
pub fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		onyx: Onyx::default(),
		notes: Notes::default(),
	}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|err| err.into_inner())
}
