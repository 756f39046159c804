//! Search form model.
//!
//! [`SearchForm`] mirrors the controls of one search form in document order.
//! The host keeps it in sync with user edits; the widget reads a
//! [`FormSnapshot`] from it for extraction and resets it on clear.

use crate::choices::{RadioGroupControl, SelectControl};
use crate::date_range::DateRangePicker;
use crate::field::FieldDescriptor;
use crate::range::{RangeReconciler, ResetNotification};
use serde::{Deserialize, Serialize};

/// Kind of the control an entry was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
	/// `<input type="text">`
	Text,
	/// `<input type="search">`
	Search,
	/// `<textarea>`
	Textarea,
	/// `<select>`
	Select,
	/// `<select multiple>`
	SelectMultiple,
	/// `<input type="checkbox">`
	Checkbox,
	/// `<input type="radio">`
	Radio,
	/// `<input type="hidden">`
	Hidden,
	/// `<input type="number">`
	Number,
	/// Any other `<input>` type (`email`, `tel`, `url`, `date`, ...)
	Other,
}

impl ControlKind {
	/// Maps an element's `type` (or tag name for selects and textareas).
	///
	/// Only `text`, `search` and textareas count as free text; every other
	/// input type (`email`, `tel`, `date`, ...) is collected as a list.
	pub fn from_type(element_type: &str) -> Self {
		match element_type.to_ascii_lowercase().as_str() {
			"search" => ControlKind::Search,
			"textarea" => ControlKind::Textarea,
			"select" | "select-one" => ControlKind::Select,
			"select-multiple" => ControlKind::SelectMultiple,
			"checkbox" => ControlKind::Checkbox,
			"radio" => ControlKind::Radio,
			"hidden" => ControlKind::Hidden,
			"number" => ControlKind::Number,
			"text" => ControlKind::Text,
			_ => ControlKind::Other,
		}
	}

	/// Returns whether the control holds a single free-text value.
	pub fn is_text_like(&self) -> bool {
		matches!(
			self,
			ControlKind::Text | ControlKind::Search | ControlKind::Textarea
		)
	}
}

/// One `(name, value)` pair a form submission would carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntry {
	/// Control name
	pub name: String,
	/// Raw control value
	pub value: String,
	/// Kind of the control
	pub kind: ControlKind,
}

/// The submission entries of a form plus its field descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
	/// Entries in document order
	pub entries: Vec<FormEntry>,
	/// Declared search fields
	#[serde(default)]
	pub fields: Vec<FieldDescriptor>,
}

impl FormSnapshot {
	/// Creates an empty snapshot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends an entry.
	pub fn entry(mut self, name: impl Into<String>, value: impl Into<String>, kind: ControlKind) -> Self {
		self.push(name, value, kind);
		self
	}

	/// Declares a field.
	pub fn field(mut self, field: FieldDescriptor) -> Self {
		self.fields.push(field);
		self
	}

	/// Appends an entry in place.
	pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>, kind: ControlKind) {
		self.entries.push(FormEntry {
			name: name.into(),
			value: value.into(),
			kind,
		});
	}
}

/// A single-value input (text, search, textarea, hidden or number).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputControl {
	/// Control name
	pub name: String,
	/// Control kind
	pub kind: ControlKind,
	/// Current value
	pub value: String,
	/// Value from the markup
	pub default_value: String,
}

impl InputControl {
	/// Creates an input whose markup value is `value`.
	pub fn new(name: impl Into<String>, kind: ControlKind, value: impl Into<String>) -> Self {
		let value = value.into();
		Self {
			name: name.into(),
			kind,
			default_value: value.clone(),
			value,
		}
	}
}

/// A checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxControl {
	/// Control name
	pub name: String,
	/// Submitted value when checked
	pub value: String,
	/// Whether the box is checked
	pub checked: bool,
	/// Checked state from the markup
	pub default_checked: bool,
}

impl CheckboxControl {
	/// Creates a checkbox.
	pub fn new(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			checked,
			default_checked: checked,
		}
	}
}

/// A control of the search form.
#[derive(Debug, Clone)]
pub enum Control {
	/// Single-value input
	Input(InputControl),
	/// Select or multi-select
	Select(SelectControl),
	/// Checkbox
	Checkbox(CheckboxControl),
	/// Radio group
	RadioGroup(RadioGroupControl),
	/// Range slider with its text inputs and hidden fields
	Range(RangeReconciler),
	/// Pair of date pickers
	DateRange(DateRangePicker),
}

/// A collapsible accordion section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
	/// Element id of the collapse
	pub id: String,
	/// Whether the section is expanded
	pub expanded: bool,
}

/// Controls of one search form.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
	fields: Vec<FieldDescriptor>,
	controls: Vec<Control>,
	accordions: Vec<Accordion>,
}

impl SearchForm {
	/// Creates an empty form.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a field.
	pub fn with_field(mut self, field: FieldDescriptor) -> Self {
		self.fields.push(field);
		self
	}

	/// Appends a control.
	pub fn with_control(mut self, control: Control) -> Self {
		self.controls.push(control);
		self
	}

	/// Appends a control in place.
	pub fn push_control(&mut self, control: Control) {
		self.controls.push(control);
	}

	/// Appends an accordion section.
	pub fn with_accordion(mut self, id: impl Into<String>, expanded: bool) -> Self {
		self.accordions.push(Accordion {
			id: id.into(),
			expanded,
		});
		self
	}

	/// Declared fields.
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Controls in document order.
	pub fn controls(&self) -> &[Control] {
		&self.controls
	}

	/// Accordion sections.
	pub fn accordions(&self) -> &[Accordion] {
		&self.accordions
	}

	/// Expands or collapses an accordion section.
	pub fn set_accordion(&mut self, id: &str, expanded: bool) {
		if let Some(accordion) = self.accordions.iter_mut().find(|a| a.id == id) {
			accordion.expanded = expanded;
		}
	}

	/// Returns the single-value input named `name`.
	pub fn input_mut(&mut self, name: &str) -> Option<&mut InputControl> {
		self.controls.iter_mut().find_map(|c| match c {
			Control::Input(input) if input.name == name => Some(input),
			_ => None,
		})
	}

	/// Returns the select named `name`.
	pub fn select_mut(&mut self, name: &str) -> Option<&mut SelectControl> {
		self.controls.iter_mut().find_map(|c| match c {
			Control::Select(select) if select.name == name => Some(select),
			_ => None,
		})
	}

	/// Returns the radio group named `name`.
	pub fn radio_group_mut(&mut self, name: &str) -> Option<&mut RadioGroupControl> {
		self.controls.iter_mut().find_map(|c| match c {
			Control::RadioGroup(group) if group.name == name => Some(group),
			_ => None,
		})
	}

	/// Returns the checkbox named `name` with value `value`.
	pub fn checkbox_mut(&mut self, name: &str, value: &str) -> Option<&mut CheckboxControl> {
		self.controls.iter_mut().find_map(|c| match c {
			Control::Checkbox(checkbox) if checkbox.name == name && checkbox.value == value => {
				Some(checkbox)
			}
			_ => None,
		})
	}

	/// Returns the range slider of field `name`.
	pub fn range_mut(&mut self, name: &str) -> Option<&mut RangeReconciler> {
		self.controls.iter_mut().find_map(|c| match c {
			Control::Range(range) if range.name() == name => Some(range),
			_ => None,
		})
	}

	/// Returns the date-range pickers of field `name`.
	pub fn date_range_mut(&mut self, name: &str) -> Option<&mut DateRangePicker> {
		self.controls.iter_mut().find_map(|c| match c {
			Control::DateRange(picker) if picker.name() == name => Some(picker),
			_ => None,
		})
	}

	/// Reads the entries a native submission would carry.
	pub fn snapshot(&self) -> FormSnapshot {
		let mut snapshot = FormSnapshot {
			entries: Vec::new(),
			fields: self.fields.clone(),
		};
		for control in &self.controls {
			match control {
				Control::Input(input) => snapshot.push(&input.name, &input.value, input.kind),
				Control::Select(select) => {
					let kind = if select.multiple {
						ControlKind::SelectMultiple
					} else {
						ControlKind::Select
					};
					for value in select.selected_values() {
						snapshot.push(&select.name, value, kind);
					}
				}
				Control::Checkbox(checkbox) => {
					if checkbox.checked {
						snapshot.push(&checkbox.name, &checkbox.value, ControlKind::Checkbox);
					}
				}
				Control::RadioGroup(group) => {
					if let Some(value) = group.checked_value() {
						snapshot.push(&group.name, value, ControlKind::Radio);
					}
				}
				Control::Range(range) => {
					for (name, value) in range.hidden_entries() {
						snapshot.push(name, value, ControlKind::Hidden);
					}
				}
				Control::DateRange(picker) => {
					for (name, value) in picker.entries() {
						snapshot.push(name, value, ControlKind::Text);
					}
				}
			}
		}
		snapshot
	}

	/// Resets every control for a fresh search.
	///
	/// Free-text inputs are emptied rather than restored to their markup
	/// value. Sliders return to their limits (their reset notifications are
	/// returned), date pickers are cleared, selects drop their selection and
	/// accordions collapse.
	pub fn clear(&mut self) -> Vec<ResetNotification> {
		let mut resets = Vec::new();
		for control in &mut self.controls {
			match control {
				Control::Input(input) => {
					if input.kind.is_text_like() {
						input.value.clear();
					} else {
						input.value = input.default_value.clone();
					}
				}
				Control::Select(select) => select.reset(),
				Control::Checkbox(checkbox) => checkbox.checked = checkbox.default_checked,
				Control::RadioGroup(group) => group.reset(),
				Control::Range(range) => resets.push(range.reset()),
				Control::DateRange(picker) => picker.clear(),
			}
		}
		for accordion in &mut self.accordions {
			accordion.expanded = false;
		}
		resets
	}

	/// Blanks the hidden fields of sliders left at their limits.
	///
	/// Returns how many sliders were blanked.
	pub fn normalize_ranges_for_submit(&mut self) -> usize {
		self.controls
			.iter_mut()
			.filter_map(|c| match c {
				Control::Range(range) => Some(range.normalize_for_submit()),
				_ => None,
			})
			.filter(|blanked| *blanked)
			.count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::choices::SelectOption;
	use crate::field::FieldKind;
	use crate::range::RangeConfig;
	use rstest::rstest;

	fn sample_form() -> SearchForm {
		SearchForm::new()
			.with_field(FieldDescriptor::new("price", FieldKind::Range))
			.with_control(Control::Input(InputControl::new(
				"q",
				ControlKind::Search,
				"preset",
			)))
			.with_control(Control::Input(InputControl::new(
				"page_size",
				ControlKind::Hidden,
				"20",
			)))
			.with_control(Control::Select(SelectControl::new(
				"color",
				false,
				vec![
					SelectOption::new("", "Any"),
					SelectOption::new("red", "Red").selected(true),
				],
			)))
			.with_control(Control::Checkbox(CheckboxControl::new("in_stock", "1", false)))
			.with_control(Control::Range(RangeReconciler::new(
				0,
				"price",
				RangeConfig::new(0, 100),
			)))
			.with_accordion("collapse-price", true)
	}

	#[rstest]
	#[case("text", ControlKind::Text)]
	#[case("email", ControlKind::Other)]
	#[case("date", ControlKind::Other)]
	#[case("select-multiple", ControlKind::SelectMultiple)]
	#[case("HIDDEN", ControlKind::Hidden)]
	fn test_control_kind_from_type(#[case] raw: &str, #[case] expected: ControlKind) {
		assert_eq!(ControlKind::from_type(raw), expected);
	}

	#[rstest]
	fn test_snapshot_follows_document_order() {
		let mut form = sample_form();
		form.checkbox_mut("in_stock", "1").unwrap().checked = true;

		let names: Vec<_> = form
			.snapshot()
			.entries
			.into_iter()
			.map(|e| (e.name, e.value))
			.collect();

		assert_eq!(
			names,
			vec![
				("q".to_string(), "preset".to_string()),
				("page_size".to_string(), "20".to_string()),
				("color".to_string(), "red".to_string()),
				("in_stock".to_string(), "1".to_string()),
				("price_min".to_string(), "0".to_string()),
				("price_max".to_string(), "100".to_string()),
			]
		);
	}

	#[rstest]
	fn test_clear_resets_controls() {
		let mut form = sample_form();
		form.range_mut("price").unwrap().drag_to(crate::range::Handle::Min, 40.0);
		form.checkbox_mut("in_stock", "1").unwrap().checked = true;

		let resets = form.clear();
		assert_eq!(resets.len(), 1);

		let snapshot = form.snapshot();
		let value_of = |name: &str| {
			snapshot
				.entries
				.iter()
				.find(|e| e.name == name)
				.map(|e| e.value.clone())
		};
		assert_eq!(value_of("q"), Some(String::new()));
		assert_eq!(value_of("page_size"), Some("20".to_string()));
		assert_eq!(value_of("color"), Some(String::new()));
		assert_eq!(value_of("in_stock"), None);
		assert_eq!(value_of("price_min"), Some("0".to_string()));
		assert!(form.accordions().iter().all(|a| !a.expanded));
	}

	#[rstest]
	fn test_normalize_ranges_for_submit() {
		let mut form = sample_form();
		assert_eq!(form.normalize_ranges_for_submit(), 1);

		let snapshot = form.snapshot();
		assert!(
			snapshot
				.entries
				.iter()
				.filter(|e| e.name.starts_with("price_"))
				.all(|e| e.value.is_empty())
		);
	}
}
