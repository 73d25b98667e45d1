use serde::{Deserialize, Serialize};

use crate::{Error, Note, NoteService, Result, note};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRequest {
	/// Raw `limit` query value. Parsed here so a bad value maps to a service error.
	pub limit: Option<String>,
	/// Opaque cursor from a previous `nextPage`.
	pub page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
	pub results: Vec<Note>,
	#[serde(rename = "nextPage")]
	pub next_page: Option<String>,
}

impl NoteService {
	pub async fn list(&self, req: ListRequest) -> Result<ListResponse> {
		let limit = match req.limit.as_deref() {
			Some(raw) => parse_limit(raw)?,
			None => i64::from(self.cfg.default_limit),
		};
		let limit = clamp_limit(limit, self.cfg.max_limit);
		let cursor = req.page.as_deref().filter(|token| !token.trim().is_empty());
		let page = self
			.store
			.page(self.table(), limit, cursor)
			.await
			.map_err(|err| crate::upstream("list", err))?;
		let results = page
			.records
			.into_iter()
			.map(|value| note::normalize(value).and_then(|record| Note::from_record(&record)))
			.collect::<Result<Vec<_>>>()?;

		Ok(ListResponse { results, next_page: page.next_page.filter(|token| !token.is_empty()) })
	}
}

/// Parses a decimal integer. Literals beyond the `i64` range saturate.
fn parse_limit(raw: &str) -> Result<i64> {
	let raw = raw.trim();
	let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);

	if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
		return Err(Error::InvalidRequest { message: "limit must be an integer".to_string() });
	}

	Ok(raw.parse::<i64>().unwrap_or(if raw.starts_with('-') { i64::MIN } else { i64::MAX }))
}

fn clamp_limit(limit: i64, max_limit: u32) -> u32 {
	let max_limit = max_limit.max(1);

	limit.clamp(1, i64::from(max_limit)) as u32
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_signed_and_padded_integers() {
		assert_eq!(parse_limit(" 25 ").expect("Expected integer."), 25);
		assert_eq!(parse_limit("+7").expect("Expected integer."), 7);
		assert_eq!(parse_limit("-3").expect("Expected integer."), -3);
	}

	#[test]
	fn saturates_huge_literals() {
		assert_eq!(parse_limit("99999999999999999999999").expect("Expected integer."), i64::MAX);
		assert_eq!(parse_limit("-99999999999999999999999").expect("Expected integer."), i64::MIN);
	}

	#[test]
	fn rejects_non_integers() {
		for raw in ["", "abc", "1.5", "10x", "-"] {
			assert!(matches!(parse_limit(raw), Err(Error::InvalidRequest { .. })), "{raw:?}");
		}
	}

	#[test]
	fn clamps_into_range() {
		assert_eq!(clamp_limit(0, 200), 1);
		assert_eq!(clamp_limit(-5, 200), 1);
		assert_eq!(clamp_limit(500, 200), 200);
		assert_eq!(clamp_limit(i64::MAX, 200), 200);
		assert_eq!(clamp_limit(42, 200), 42);
	}
}
