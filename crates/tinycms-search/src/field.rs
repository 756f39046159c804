//! Search field descriptors.
//!
//! Each search field is declared in markup (`data-field-name`,
//! `data-field-type`, `data-field-id`, `data-label`, `data-selected`) and
//! read once into a [`FieldDescriptor`] when the widget initializes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tinycms_pages::{ConfigError, Dataset};

/// Kind of a search field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
	/// Free text
	Text,
	/// Single or multiple select
	Select,
	/// Radio group
	Radio,
	/// Numeric range backed by a slider (`<name>_min`/`<name>_max`)
	Range,
	/// Date range backed by two date pickers (`<name>_min`/`<name>_max`)
	DateRange,
}

impl FieldKind {
	/// Returns the canonical markup name.
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldKind::Text => "text",
			FieldKind::Select => "select",
			FieldKind::Radio => "radio",
			FieldKind::Range => "range",
			FieldKind::DateRange => "date-range",
		}
	}

	/// Returns whether the field submits a `[min, max]` pair.
	pub fn is_ranged(&self) -> bool {
		matches!(self, FieldKind::Range | FieldKind::DateRange)
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FieldKind {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"text" => Ok(FieldKind::Text),
			"select" | "select_multiple" => Ok(FieldKind::Select),
			"radio" => Ok(FieldKind::Radio),
			"range" => Ok(FieldKind::Range),
			// Date-range groups are marked `date` in the search templates.
			"date" | "date-range" | "date_range" => Ok(FieldKind::DateRange),
			other => Err(ConfigError::InvalidValue {
				attribute: "field-type".to_string(),
				value: other.to_string(),
			}),
		}
	}
}

/// A search field as declared in markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
	/// Submitted field name
	pub name: String,
	/// Field kind
	pub kind: FieldKind,
	/// Backend id used to load dynamic choices
	#[serde(default)]
	pub field_id: Option<String>,
	/// Label shown above radio groups
	#[serde(default)]
	pub label: Option<String>,
	/// Values preselected by the server
	#[serde(default)]
	pub selected: Vec<String>,
}

impl FieldDescriptor {
	/// Creates a descriptor without an id, label or preselection.
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			kind,
			field_id: None,
			label: None,
			selected: Vec::new(),
		}
	}

	/// Sets the backend field id.
	pub fn with_field_id(mut self, field_id: impl Into<String>) -> Self {
		self.field_id = Some(field_id.into());
		self
	}

	/// Sets the preselected values.
	pub fn with_selected(mut self, selected: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.selected = selected.into_iter().map(Into::into).collect();
		self
	}

	/// Reads a descriptor from the field element's dataset.
	pub fn from_dataset(dataset: &Dataset) -> Result<Self, ConfigError> {
		let name = dataset.require("field-name")?.to_string();
		let kind = dataset.require("field-type")?.parse()?;
		Ok(Self {
			name,
			kind,
			field_id: dataset.get_non_empty("field-id").map(str::to_string),
			label: dataset.get_non_empty("label").map(str::to_string),
			selected: dataset.list("selected"),
		})
	}

	/// Name of the lower-bound input of a ranged field.
	pub fn min_key(&self) -> String {
		format!("{}_min", self.name)
	}

	/// Name of the upper-bound input of a ranged field.
	pub fn max_key(&self) -> String {
		format!("{}_max", self.name)
	}

	/// Names of the inputs this field owns.
	pub fn input_names(&self) -> Vec<String> {
		if self.kind.is_ranged() {
			vec![self.min_key(), self.max_key()]
		} else {
			vec![self.name.clone()]
		}
	}

	/// Returns whether the field loads its choices from the backend.
	pub fn has_dynamic_choices(&self) -> bool {
		matches!(self.kind, FieldKind::Select | FieldKind::Radio) && self.field_id.is_some()
	}
}
