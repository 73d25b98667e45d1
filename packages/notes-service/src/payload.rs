use serde_json::Value;

use crate::{
	Error, FieldErrors, NON_FIELD_ERRORS, Record, Result,
	note::{FIELD_CONTENT, FIELD_CREATED_AT, FIELD_ID, FIELD_TITLE, FIELD_UPDATED_AT},
	time_serde,
};

const MSG_REQUIRED: &str = "This field is required.";
const MSG_NULL: &str = "This field may not be null.";
const MSG_BLANK: &str = "This field may not be blank.";
const MSG_NOT_STRING: &str = "Not a valid string.";
const MSG_DATETIME: &str = "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";

/// How strictly a write payload is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
	/// Create or full update: `title` must be present.
	Full,
	/// Partial update: any subset of fields.
	Partial,
}

#[derive(Debug, Clone, Copy)]
enum Kind {
	Text { required: bool, allow_null: bool, allow_blank: bool },
	Timestamp,
}

const FIELDS: [(&str, Kind); 5] = [
	(FIELD_ID, Kind::Text { required: false, allow_null: false, allow_blank: false }),
	(FIELD_TITLE, Kind::Text { required: true, allow_null: false, allow_blank: false }),
	(FIELD_CONTENT, Kind::Text { required: false, allow_null: true, allow_blank: true }),
	(FIELD_CREATED_AT, Kind::Timestamp),
	(FIELD_UPDATED_AT, Kind::Timestamp),
];

/// Checks a request body against the note schema and returns the accepted fields.
///
/// Strings are trimmed, numbers are accepted as strings, and timestamps are rewritten as
/// RFC 3339 in UTC. Explicit `null` values are kept so they can clear stored fields. Unknown
/// keys are dropped.
pub fn validate_payload(body: &Value, mode: WriteMode) -> Result<Record> {
	let Value::Object(input) = body else {
		let message =
			format!("Invalid data. Expected a dictionary, but got {}.", json_type_name(body));

		return Err(Error::field(NON_FIELD_ERRORS, message));
	};
	let mut accepted = Record::new();
	let mut errors = FieldErrors::new();

	for (name, kind) in FIELDS {
		let Some(value) = input.get(name) else {
			if mode == WriteMode::Full && matches!(kind, Kind::Text { required: true, .. }) {
				errors.entry(name.to_string()).or_default().push(MSG_REQUIRED.to_string());
			}

			continue;
		};

		match check_field(value, kind) {
			Ok(value) => {
				accepted.insert(name.to_string(), value);
			},
			Err(message) => errors.entry(name.to_string()).or_default().push(message.to_string()),
		}
	}

	if errors.is_empty() { Ok(accepted) } else { Err(Error::Validation { fields: errors }) }
}

fn check_field(value: &Value, kind: Kind) -> std::result::Result<Value, &'static str> {
	match (kind, value) {
		(Kind::Text { allow_null: true, .. } | Kind::Timestamp, Value::Null) => Ok(Value::Null),
		(Kind::Text { .. }, Value::Null) => Err(MSG_NULL),
		(Kind::Text { allow_blank, .. }, value) => {
			let text = match value {
				Value::String(text) => text.trim().to_string(),
				Value::Number(number) => number.to_string(),
				_ => return Err(MSG_NOT_STRING),
			};

			if text.is_empty() && !allow_blank {
				return Err(MSG_BLANK);
			}

			Ok(Value::String(text))
		},
		(Kind::Timestamp, Value::String(raw)) => time_serde::parse(raw)
			.and_then(|ts| time_serde::format(&ts).ok())
			.map(Value::String)
			.ok_or(MSG_DATETIME),
		(Kind::Timestamp, _) => Err(MSG_DATETIME),
	}
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "NoneType",
		Value::Bool(_) => "bool",
		Value::Number(number) if number.is_f64() => "float",
		Value::Number(_) => "int",
		Value::String(_) => "str",
		Value::Array(_) => "list",
		Value::Object(_) => "dict",
	}
}
