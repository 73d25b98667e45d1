use std::sync::Arc;

use notes_config::{Config, Notes};
use notes_service::{NoteService, NoteStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<NoteService>,
}
impl AppState {
	pub fn new(config: &Config) -> Self {
		Self { service: Arc::new(NoteService::with_onyx(config)) }
	}

	pub fn with_store(cfg: Notes, store: Arc<dyn NoteStore>) -> Self {
		Self { service: Arc::new(NoteService::new(cfg, store)) }
	}
}
