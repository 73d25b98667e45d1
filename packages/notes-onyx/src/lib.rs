//! Minimal client for the Onyx Cloud Database REST API.
//!
//! Only the calls a single-table CRUD service needs are covered: paged select, find by id,
//! save, and delete.

pub mod client;
pub mod error;
pub mod query;

pub use client::Client;
pub use error::{Error, Result};
pub use query::{Page, Query};

/// Builds a client from config, failing with [`Error::Config`] when credentials are missing.
pub fn init(cfg: &notes_config::Onyx) -> Result<Client> {
	Client::new(cfg)
}
