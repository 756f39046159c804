//! Typed access to `data-*` attribute maps.
//!
//! Widgets are configured from the attributes of their container element.
//! A host collects those attributes once into a [`Dataset`] and each widget
//! turns it into an explicit configuration struct at initialization.
//!
//! Keys are stored without the `data-` prefix in kebab case
//! (`data-config-id` is looked up as `config-id`).

use crate::error::ConfigError;
use crate::number::parse_int_prefix;
use std::collections::BTreeMap;

/// The `data-*` attributes of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
	values: BTreeMap<String, String>,
}

impl Dataset {
	/// Creates an empty dataset.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a dataset from raw element attributes.
	///
	/// Only `data-*` attributes are kept; the prefix is stripped and names
	/// are lower-cased as the HTML parser does.
	pub fn from_attributes<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: AsRef<str>,
		V: Into<String>,
	{
		let values = attributes
			.into_iter()
			.filter_map(|(name, value)| {
				let name = name.as_ref().to_ascii_lowercase();
				name.strip_prefix("data-")
					.map(|key| (key.to_string(), value.into()))
			})
			.collect();
		Self { values }
	}

	/// Sets a value, replacing any previous one.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.values.insert(key.into(), value.into());
		self
	}

	/// Returns the raw value of `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.values.get(key).map(String::as_str)
	}

	/// Returns the trimmed value of `key`, treating blank values as absent.
	pub fn get_non_empty(&self, key: &str) -> Option<&str> {
		self.get(key).map(str::trim).filter(|v| !v.is_empty())
	}

	/// Returns the trimmed value of `key` or a [`ConfigError::MissingAttribute`].
	pub fn require(&self, key: &str) -> Result<&str, ConfigError> {
		self.get_non_empty(key)
			.ok_or_else(|| ConfigError::MissingAttribute(key.to_string()))
	}

	/// Parses `key` as a leading integer, falling back to `default`.
	pub fn int_or(&self, key: &str, default: i64) -> i64 {
		self.get(key).and_then(parse_int_prefix).unwrap_or(default)
	}

	/// Parses `key` as a boolean flag (`"true"` only), falling back to `default`.
	pub fn flag_or(&self, key: &str, default: bool) -> bool {
		match self.get_non_empty(key) {
			Some(value) => value == "true",
			None => default,
		}
	}

	/// Splits `key` on commas into trimmed, non-empty items.
	pub fn list(&self, key: &str) -> Vec<String> {
		self.get(key)
			.map(|value| {
				value
					.split(',')
					.map(str::trim)
					.filter(|item| !item.is_empty())
					.map(str::to_string)
					.collect()
			})
			.unwrap_or_default()
	}
}
