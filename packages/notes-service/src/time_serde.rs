pub mod option;

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use time::{
	OffsetDateTime, PrimitiveDateTime, UtcOffset,
	format_description::{
		BorrowedFormatItem,
		well_known::{Iso8601, Rfc3339},
	},
	macros::format_description,
};

/// ISO timestamps with a `+HHMM` offset, as emitted by JVM services.
const COMPACT_OFFSET: &[BorrowedFormatItem<'_>] = format_description!(
	"[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory][offset_minute]"
);
const NAIVE: &[BorrowedFormatItem<'_>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&format(value).map_err(serde::ser::Error::custom)?)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp {raw:?}")))
}

/// Renders a timestamp as RFC 3339 in UTC.
pub fn format(value: &OffsetDateTime) -> Result<String, time::error::Format> {
	value.to_offset(UtcOffset::UTC).format(&Rfc3339)
}

/// Parses an ISO 8601 timestamp. Values without an offset are taken as UTC.
pub fn parse(raw: &str) -> Option<OffsetDateTime> {
	let raw = raw.trim();

	OffsetDateTime::parse(raw, &Rfc3339)
		.or_else(|_| OffsetDateTime::parse(raw, &Iso8601::PARSING))
		.or_else(|_| OffsetDateTime::parse(raw, COMPACT_OFFSET))
		.or_else(|_| PrimitiveDateTime::parse(raw, NAIVE).map(PrimitiveDateTime::assume_utc))
		.ok()
}

/// Reads a timestamp stored by Onyx, which may be an ISO string or epoch milliseconds.
pub fn from_json(value: &Value) -> Option<OffsetDateTime> {
	match value {
		Value::String(raw) => parse(raw),
		Value::Number(number) => {
			let millis = number.as_i64()?;

			OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
		},
		_ => None,
	}
}
