//! Linked start/end date pickers.
//!
//! Picking a start date sets the earliest date the end picker offers and
//! picking an end date sets the latest date the start picker offers. Inputs
//! hold dates in `dd.mm.yyyy` format.

use chrono::NaiveDate;
use thiserror::Error;

/// Display format of the date inputs.
pub const DATE_INPUT_FORMAT: &str = "%d.%m.%Y";

/// A rejected pick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
	/// The start date lies after the picked end date
	#[error("start date {start} is after end date {end}")]
	StartAfterEnd {
		/// Rejected start
		start: NaiveDate,
		/// Current end
		end: NaiveDate,
	},

	/// The end date lies before the picked start date
	#[error("end date {end} is before start date {start}")]
	EndBeforeStart {
		/// Current start
		start: NaiveDate,
		/// Rejected end
		end: NaiveDate,
	},
}

/// Formats a date for the picker inputs.
pub fn format_input_date(date: NaiveDate) -> String {
	date.format(DATE_INPUT_FORMAT).to_string()
}

/// Parses a picker input value.
pub fn parse_input_date(text: &str) -> Option<NaiveDate> {
	NaiveDate::parse_from_str(text.trim(), DATE_INPUT_FORMAT).ok()
}

/// The start and end pickers of one date-range field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangePicker {
	name: String,
	start: Option<NaiveDate>,
	end: Option<NaiveDate>,
	start_text: String,
	end_text: String,
}

impl DateRangePicker {
	/// Creates empty pickers for field `name`.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			start: None,
			end: None,
			start_text: String::new(),
			end_text: String::new(),
		}
	}

	/// Field name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Picked start date.
	pub fn start(&self) -> Option<NaiveDate> {
		self.start
	}

	/// Picked end date.
	pub fn end(&self) -> Option<NaiveDate> {
		self.end
	}

	/// Earliest date the end picker offers.
	pub fn end_min_date(&self) -> Option<NaiveDate> {
		self.start
	}

	/// Latest date the start picker offers.
	pub fn start_max_date(&self) -> Option<NaiveDate> {
		self.end
	}

	/// Picks the start date.
	pub fn pick_start(&mut self, date: NaiveDate) -> Result<(), DateRangeError> {
		if let Some(end) = self.end
			&& date > end
		{
			return Err(DateRangeError::StartAfterEnd { start: date, end });
		}
		self.start = Some(date);
		self.start_text = format_input_date(date);
		Ok(())
	}

	/// Picks the end date.
	pub fn pick_end(&mut self, date: NaiveDate) -> Result<(), DateRangeError> {
		if let Some(start) = self.start
			&& date < start
		{
			return Err(DateRangeError::EndBeforeStart { start, end: date });
		}
		self.end = Some(date);
		self.end_text = format_input_date(date);
		Ok(())
	}

	/// Applies text typed into the start input.
	///
	/// Text that parses as a date is picked; other text is kept as typed and
	/// lifts the bound it used to impose on the end picker.
	pub fn type_start(&mut self, text: &str) -> Result<(), DateRangeError> {
		match parse_input_date(text) {
			Some(date) => {
				self.pick_start(date)?;
				self.start_text = text.to_string();
			}
			None => {
				self.start = None;
				self.start_text = text.to_string();
			}
		}
		Ok(())
	}

	/// Applies text typed into the end input.
	pub fn type_end(&mut self, text: &str) -> Result<(), DateRangeError> {
		match parse_input_date(text) {
			Some(date) => {
				self.pick_end(date)?;
				self.end_text = text.to_string();
			}
			None => {
				self.end = None;
				self.end_text = text.to_string();
			}
		}
		Ok(())
	}

	/// Empties both inputs and lifts both bounds.
	pub fn clear(&mut self) {
		self.start = None;
		self.end = None;
		self.start_text.clear();
		self.end_text.clear();
	}

	/// The `(name, value)` pairs of both inputs.
	pub fn entries(&self) -> [(String, String); 2] {
		[
			(format!("{}_min", self.name), self.start_text.clone()),
			(format!("{}_max", self.name), self.end_text.clone()),
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[rstest]
	fn test_start_constrains_end() {
		let mut picker = DateRangePicker::new("created");
		picker.pick_start(date(2024, 3, 10)).unwrap();

		assert_eq!(picker.end_min_date(), Some(date(2024, 3, 10)));
		assert_eq!(
			picker.pick_end(date(2024, 3, 9)),
			Err(DateRangeError::EndBeforeStart {
				start: date(2024, 3, 10),
				end: date(2024, 3, 9),
			})
		);
		assert!(picker.pick_end(date(2024, 3, 10)).is_ok());
	}

	#[rstest]
	fn test_end_constrains_start() {
		let mut picker = DateRangePicker::new("created");
		picker.pick_end(date(2024, 1, 31)).unwrap();

		assert_eq!(picker.start_max_date(), Some(date(2024, 1, 31)));
		assert!(picker.pick_start(date(2024, 2, 1)).is_err());
		assert_eq!(picker.start(), None);
	}

	#[rstest]
	fn test_entries_use_input_format() {
		let mut picker = DateRangePicker::new("created");
		picker.pick_start(date(2024, 2, 5)).unwrap();

		assert_eq!(
			picker.entries(),
			[
				("created_min".to_string(), "05.02.2024".to_string()),
				("created_max".to_string(), String::new()),
			]
		);
	}

	#[rstest]
	fn test_typed_text() {
		let mut picker = DateRangePicker::new("created");
		picker.type_start("01.06.2024").unwrap();
		assert_eq!(picker.start(), Some(date(2024, 6, 1)));

		picker.type_start("soon").unwrap();
		assert_eq!(picker.start(), None);
		assert_eq!(picker.entries()[0].1, "soon");

		picker.pick_end(date(2024, 1, 1)).unwrap();
		assert!(picker.type_start("02.01.2024").is_err());
		assert_eq!(picker.entries()[0].1, "soon");
	}

	#[rstest]
	fn test_clear() {
		let mut picker = DateRangePicker::new("created");
		picker.pick_start(date(2024, 1, 1)).unwrap();
		picker.pick_end(date(2024, 1, 2)).unwrap();

		picker.clear();

		assert_eq!(picker.end_min_date(), None);
		assert_eq!(picker.start_max_date(), None);
		assert!(picker.entries().iter().all(|(_, v)| v.is_empty()));
	}
}
