use std::collections::BTreeMap;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key for errors that concern the payload as a whole rather than one field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Validation failed for {}.", .fields.keys().cloned().collect::<Vec<_>>().join(", "))]
	Validation { fields: FieldErrors },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("{message}")]
	Upstream { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl Error {
	pub fn field(name: &str, message: impl Into<String>) -> Self {
		Self::Validation { fields: FieldErrors::from([(name.to_string(), vec![message.into()])]) }
	}
}

impl From<notes_onyx::Error> for Error {
	fn from(err: notes_onyx::Error) -> Self {
		Self::Upstream { message: err.to_string() }
	}
}

impl From<time::error::Format> for Error {
	fn from(err: time::error::Format) -> Self {
		Self::Internal { message: format!("Failed to format timestamp: {err}.") }
	}
}
