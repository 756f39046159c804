//! Select and radio controls with server-provided choices.

use serde::{Deserialize, Deserializer, Serialize};
use tinycms_pages::View;

/// Label of a radio group without `data-label`.
pub const DEFAULT_RADIO_LABEL: &str = "Choose";

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match serde_json::Value::deserialize(deserializer)? {
		serde_json::Value::String(s) => Ok(s),
		serde_json::Value::Null => Ok(String::new()),
		other => Ok(other.to_string()),
	}
}

/// A choice returned by the field-choices endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
	/// Submitted value; numeric values are kept in their JSON spelling
	#[serde(deserialize_with = "string_or_number")]
	pub value: String,
	/// Display label
	#[serde(deserialize_with = "string_or_number")]
	pub label: String,
}

impl Choice {
	/// Creates a choice.
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
		}
	}
}

/// An `<option>` of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
	/// Option value
	pub value: String,
	/// Option label
	pub label: String,
	/// Whether the option is selected
	pub selected: bool,
}

impl SelectOption {
	/// Creates an unselected option.
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
			selected: false,
		}
	}

	/// Sets the selected flag.
	pub fn selected(mut self, selected: bool) -> Self {
		self.selected = selected;
		self
	}
}

/// A select or multi-select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControl {
	/// Control name
	pub name: String,
	/// Whether several options may be selected
	pub multiple: bool,
	/// Options in document order; the first is usually a placeholder
	pub options: Vec<SelectOption>,
}

impl SelectControl {
	/// Creates a select.
	pub fn new(name: impl Into<String>, multiple: bool, options: Vec<SelectOption>) -> Self {
		Self {
			name: name.into(),
			multiple,
			options,
		}
	}

	/// Values a submission would carry.
	///
	/// A single select without a selected option submits its first option,
	/// as browsers do.
	pub fn selected_values(&self) -> Vec<&str> {
		let selected: Vec<&str> = self
			.options
			.iter()
			.filter(|o| o.selected)
			.map(|o| o.value.as_str())
			.collect();
		if self.multiple {
			return selected;
		}
		match selected.last() {
			Some(value) => vec![*value],
			None => self
				.options
				.first()
				.map(|o| vec![o.value.as_str()])
				.unwrap_or_default(),
		}
	}

	/// Selects exactly the options whose value is in `values`.
	pub fn select(&mut self, values: &[&str]) {
		for option in &mut self.options {
			option.selected = values.contains(&option.value.as_str());
		}
	}

	/// Replaces every option but the first with `choices`.
	///
	/// Choices whose value is listed in `selected` start selected.
	pub fn populate(&mut self, choices: &[Choice], selected: &[String]) {
		self.options.truncate(1);
		self.options.extend(choices.iter().map(|choice| {
			SelectOption::new(&choice.value, &choice.label)
				.selected(selected.iter().any(|s| *s == choice.value))
		}));
	}

	/// Drops the selection: none for multi-selects, the first option otherwise.
	pub fn reset(&mut self) {
		for (i, option) in self.options.iter_mut().enumerate() {
			option.selected = !self.multiple && i == 0;
		}
	}

	/// Renders the `<select>` element.
	pub fn render(&self) -> View {
		View::element("select")
			.attr("name", self.name.clone())
			.attr("class", if self.multiple { "select_multiple" } else { "select" })
			.attr_if(self.multiple, "multiple", "")
			.children(self.options.iter().map(|option| {
				View::element("option")
					.attr("value", option.value.clone())
					.attr_if(option.selected, "selected", "")
					.child(option.label.clone())
			}))
			.into()
	}
}

/// A radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioGroupControl {
	/// Control name
	pub name: String,
	/// Backend field id used for input ids
	pub field_id: String,
	/// Group label
	pub label: String,
	/// Choices in document order
	pub choices: Vec<Choice>,
	/// Value of the checked radio
	pub checked: Option<String>,
	default_checked: Option<String>,
}

impl RadioGroupControl {
	/// Creates a radio group; `label` falls back to [`DEFAULT_RADIO_LABEL`].
	pub fn new(name: impl Into<String>, field_id: impl Into<String>, label: Option<String>) -> Self {
		Self {
			name: name.into(),
			field_id: field_id.into(),
			label: label.unwrap_or_else(|| DEFAULT_RADIO_LABEL.to_string()),
			choices: Vec::new(),
			checked: None,
			default_checked: None,
		}
	}

	/// Sets the choices present in the markup.
	pub fn with_choices(mut self, choices: Vec<Choice>, checked: Option<String>) -> Self {
		self.choices = choices;
		self.default_checked = checked.clone();
		self.checked = checked;
		self
	}

	/// Checks the radio with `value`, if it exists.
	pub fn check(&mut self, value: &str) -> bool {
		if self.choices.iter().any(|c| c.value == value) {
			self.checked = Some(value.to_string());
			true
		} else {
			false
		}
	}

	/// Value a submission would carry.
	pub fn checked_value(&self) -> Option<&str> {
		self.checked.as_deref()
	}

	/// Rebuilds the group from `choices`; nothing stays checked.
	pub fn populate(&mut self, choices: &[Choice]) {
		self.choices = choices.to_vec();
		self.checked = None;
		self.default_checked = None;
	}

	/// Restores the markup's checked radio.
	pub fn reset(&mut self) {
		self.checked = self.default_checked.clone();
	}

	/// Renders the label followed by one `.form-check` per choice.
	pub fn render(&self) -> View {
		let label = View::element("label")
			.attr("class", "form-label")
			.child(self.label.clone());
		let radios = self.choices.iter().enumerate().map(|(index, choice)| {
			let radio_id = format!("field_{}_{}", self.field_id, index);
			View::element("div")
				.attr("class", "form-check")
				.child(
					View::element("input")
						.attr("class", "form-check-input")
						.attr("type", "radio")
						.attr("name", self.name.clone())
						.attr("value", choice.value.clone())
						.attr("id", radio_id.clone())
						.attr_if(
							self.checked.as_deref() == Some(choice.value.as_str()),
							"checked",
							"",
						),
				)
				.child(
					View::element("label")
						.attr("class", "form-check-label")
						.attr("for", radio_id)
						.child(choice.label.clone()),
				)
		});
		View::fragment(std::iter::once(label).chain(radios))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_choice_accepts_numeric_values() {
		let choices: Vec<Choice> =
			serde_json::from_str(r#"[{"value": 3, "label": "Three"}, {"value": "x", "label": "X"}]"#)
				.unwrap();

		assert_eq!(choices, vec![Choice::new("3", "Three"), Choice::new("x", "X")]);
	}

	#[rstest]
	fn test_populate_select_keeps_placeholder_and_marks_selected() {
		let mut select = SelectControl::new(
			"brand",
			true,
			vec![
				SelectOption::new("", "Any"),
				SelectOption::new("old", "Old"),
			],
		);

		select.populate(
			&[Choice::new("1", "Acme"), Choice::new("2", "Globex"), Choice::new("3", "Initech")],
			&["1".to_string(), "3".to_string()],
		);

		let labels: Vec<_> = select.options.iter().map(|o| o.label.as_str()).collect();
		assert_eq!(labels, vec!["Any", "Acme", "Globex", "Initech"]);
		assert_eq!(select.selected_values(), vec!["1", "3"]);
	}

	#[rstest]
	fn test_single_select_defaults_to_first_option() {
		let mut select = SelectControl::new(
			"color",
			false,
			vec![SelectOption::new("", "Any"), SelectOption::new("red", "Red")],
		);
		assert_eq!(select.selected_values(), vec![""]);

		select.select(&["red"]);
		assert_eq!(select.selected_values(), vec!["red"]);

		select.reset();
		assert_eq!(select.selected_values(), vec![""]);
	}

	#[rstest]
	fn test_render_radio_group_escapes() {
		let mut group = RadioGroupControl::new("size", "7", None);
		group.populate(&[Choice::new("s", "<S>")]);

		assert_eq!(
			group.render().render_to_string(),
			"<label class=\"form-label\">Choose</label>\
			<div class=\"form-check\">\
			<input class=\"form-check-input\" type=\"radio\" name=\"size\" value=\"s\" id=\"field_7_0\" />\
			<label class=\"form-check-label\" for=\"field_7_0\">&lt;S&gt;</label>\
			</div>"
		);
	}

	#[rstest]
	fn test_radio_check_and_reset() {
		let mut group = RadioGroupControl::new("size", "7", Some("Size".to_string()))
			.with_choices(vec![Choice::new("s", "S"), Choice::new("m", "M")], Some("m".to_string()));

		assert!(group.check("s"));
		assert!(!group.check("xl"));
		assert_eq!(group.checked_value(), Some("s"));

		group.reset();
		assert_eq!(group.checked_value(), Some("m"));
	}

	#[rstest]
	fn test_render_select_marks_selected() {
		let select = SelectControl::new(
			"color",
			false,
			vec![SelectOption::new("", "Any"), SelectOption::new("red", "Red").selected(true)],
		);

		assert_eq!(
			select.render().render_to_string(),
			"<select name=\"color\" class=\"select\">\
			<option value=\"\">Any</option>\
			<option value=\"red\" selected=\"\">Red</option>\
			</select>"
		);
	}
}
