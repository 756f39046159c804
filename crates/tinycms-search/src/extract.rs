//! Search payload extraction.
//!
//! [`extract`] turns a [`FormSnapshot`] into the `search_data` object sent
//! to the search endpoint:
//!
//! - free-text controls become scalars and are dropped when blank,
//! - every other control kind becomes a list in encounter order,
//! - range and date-range fields collapse their `_min`/`_max` inputs into a
//!   single `[min, max]` pair under the field name.
//!
//! ```
//! use tinycms_search::extract::extract;
//! use tinycms_search::field::{FieldDescriptor, FieldKind};
//! use tinycms_search::form::{ControlKind, FormSnapshot};
//!
//! let snapshot = FormSnapshot::new()
//! 	.entry("q", " lamp ", ControlKind::Search)
//! 	.entry("price_min", "10", ControlKind::Hidden)
//! 	.entry("price_max", "250", ControlKind::Hidden)
//! 	.field(FieldDescriptor::new("price", FieldKind::Range));
//!
//! assert_eq!(
//! 	serde_json::to_string(&extract(&snapshot)).unwrap(),
//! 	r#"{"q":" lamp ","price":[10,250]}"#
//! );
//! ```

use crate::field::FieldKind;
use crate::form::FormSnapshot;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tinycms_pages::number::{number_to_json, parse_number};

// Day, month and year of a `DD.MM.YYYY` date.
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(\d{2})\.(\d{2})\.(\d{4})$").expect("DATE_REGEX: invalid regex pattern")
});

/// Field name to value mapping submitted as `search_data`.
///
/// Keys keep their first-encounter order when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchPayload(Map<String, Value>);

impl SearchPayload {
	/// Creates an empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Returns whether `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Number of keys.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns whether the payload has no keys.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Keys in serialization order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Converts the payload into a JSON object.
	pub fn into_value(self) -> Value {
		Value::Object(self.0)
	}

	fn append(&mut self, key: &str, value: &str, scalar: bool) {
		match self.0.get_mut(key) {
			None => {
				let value = Value::String(value.to_string());
				let value = if scalar { value } else { Value::Array(vec![value]) };
				self.0.insert(key.to_string(), value);
			}
			Some(Value::Array(items)) => items.push(Value::String(value.to_string())),
			Some(existing) => {
				let first = existing.take();
				*existing = Value::Array(vec![first, Value::String(value.to_string())]);
			}
		}
	}

	fn last_scalar(&self, key: &str) -> Option<&str> {
		match self.0.get(key)? {
			Value::Array(items) => items.last().and_then(Value::as_str),
			other => other.as_str(),
		}
	}

	fn merge_pair(&mut self, name: &str, parse: fn(&str) -> Value) {
		let min_key = format!("{name}_min");
		let max_key = format!("{name}_max");
		let min = self.last_scalar(&min_key).map(parse).unwrap_or(Value::Null);
		let max = self.last_scalar(&max_key).map(parse).unwrap_or(Value::Null);

		if min.is_null() && max.is_null() {
			return;
		}
		self.0.shift_remove(&min_key);
		self.0.shift_remove(&max_key);
		self.0.insert(name.to_string(), Value::Array(vec![min, max]));
	}
}

impl From<SearchPayload> for Value {
	fn from(payload: SearchPayload) -> Self {
		payload.into_value()
	}
}

/// Builds the search payload of a form snapshot.
pub fn extract(snapshot: &FormSnapshot) -> SearchPayload {
	let mut payload = SearchPayload::new();

	for entry in &snapshot.entries {
		if entry.value.trim().is_empty() {
			continue;
		}
		payload.append(&entry.name, &entry.value, entry.kind.is_text_like());
	}

	for field in snapshot.fields.iter().filter(|f| f.kind == FieldKind::Range) {
		payload.merge_pair(&field.name, parse_range_value);
	}
	for field in snapshot
		.fields
		.iter()
		.filter(|f| f.kind == FieldKind::DateRange)
	{
		payload.merge_pair(&field.name, parse_date_value);
	}

	tracing::debug!("extracted search payload with {} keys", payload.len());
	payload
}

/// Parses one side of a numeric range.
///
/// Blank and non-numeric input yield `null`.
pub fn parse_range_value(raw: &str) -> Value {
	parse_number(raw).map(number_to_json).unwrap_or(Value::Null)
}

/// Parses one side of a date range.
///
/// Valid `DD.MM.YYYY` dates become `YYYY-MM-DD`; otherwise numeric input
/// becomes a number and anything else stays the trimmed string. Blank input
/// yields `null`.
pub fn parse_date_value(raw: &str) -> Value {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return Value::Null;
	}
	if let Some(date) = normalize_date(trimmed) {
		return Value::String(date);
	}
	match parse_number(trimmed) {
		Some(n) => number_to_json(n),
		None => Value::String(trimmed.to_string()),
	}
}

/// Converts a `DD.MM.YYYY` calendar date into `YYYY-MM-DD`.
///
/// Returns `None` for other formats and for dates that do not exist
/// (`31.02.2024`).
pub fn normalize_date(raw: &str) -> Option<String> {
	let caps = DATE_REGEX.captures(raw)?;
	let day: u32 = caps[1].parse().ok()?;
	let month: u32 = caps[2].parse().ok()?;
	let year: i32 = caps[3].parse().ok()?;

	NaiveDate::from_ymd_opt(year, month, day).map(|date| date.format("%Y-%m-%d").to_string())
}
