//! Comment form model and client-side validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tinycms_pages::View;

/// Default `maxlength` of the comment text.
pub const DEFAULT_MAX_LENGTH: usize = 2000;

/// Minimum comment length after trimming.
pub const MIN_TEXT_LENGTH: usize = 10;

/// Remaining characters below which the counter warns.
pub const WARNING_REMAINING: i64 = 50;

/// Remaining characters below which the counter turns red.
pub const ERROR_REMAINING: i64 = 10;

/// Message shown when no rating was picked.
pub const RATING_REQUIRED_MESSAGE: &str = "Choose a rating from 1 to 5 stars";

/// Message shown when a required name is blank.
pub const NAME_REQUIRED_MESSAGE: &str = "Enter your name";

/// Message shown when the comment is too short.
pub const TEXT_TOO_SHORT_MESSAGE: &str = "The comment must be at least 10 characters long";

/// The values of the comment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
	/// Picked rating, `None` until a star is clicked
	pub rating: Option<u8>,
	/// Author name
	pub name: String,
	/// Author e-mail
	pub email: String,
	/// Comment text
	pub text: String,
	/// Whether the name input is required (anonymous visitors)
	pub name_required: bool,
}

impl CommentDraft {
	/// Creates an empty draft.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the rating.
	pub fn with_rating(mut self, rating: u8) -> Self {
		self.rating = Some(rating);
		self
	}

	/// Sets the author name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	/// Sets the author e-mail.
	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = email.into();
		self
	}

	/// Sets the comment text.
	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = text.into();
		self
	}

	/// Marks the name as required.
	pub fn name_required(mut self) -> Self {
		self.name_required = true;
		self
	}

	/// Clears the values as a form reset does; `name_required` is markup
	/// and survives.
	pub fn reset(&mut self) {
		*self = Self {
			name_required: self.name_required,
			..Self::default()
		};
	}

	/// Checks the draft before it is sent.
	pub fn validate(&self) -> Result<(), ValidationErrors> {
		let mut errors = ValidationErrors::default();

		if !self.rating.is_some_and(|r| (1..=5).contains(&r)) {
			errors.push(RATING_REQUIRED_MESSAGE);
		}
		if self.name_required && self.name.trim().is_empty() {
			errors.push(NAME_REQUIRED_MESSAGE);
		}
		if self.text.trim().chars().count() < MIN_TEXT_LENGTH {
			errors.push(TEXT_TOO_SHORT_MESSAGE);
		}

		if errors.is_empty() { Ok(()) } else { Err(errors) }
	}

	/// Form fields as posted to the submit endpoint.
	pub fn form_fields(&self) -> Vec<(String, String)> {
		vec![
			("name".to_string(), self.name.clone()),
			("email".to_string(), self.email.clone()),
			(
				"rating".to_string(),
				self.rating.map(|r| r.to_string()).unwrap_or_default(),
			),
			("text".to_string(), self.text.clone()),
		]
	}
}

/// Validation failures of a comment draft, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .messages.join("\n"))]
pub struct ValidationErrors {
	messages: Vec<String>,
}

impl ValidationErrors {
	/// Adds a message.
	pub fn push(&mut self, message: impl Into<String>) {
		self.messages.push(message.into());
	}

	/// The collected messages.
	pub fn messages(&self) -> &[String] {
		&self.messages
	}

	/// Whether nothing failed.
	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}
}

/// Severity of the character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
	/// Plenty of room left
	Normal,
	/// Fewer than 50 characters left
	Warning,
	/// Fewer than 10 characters left
	Error,
}

/// Character counter under the comment textarea.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
	/// Characters typed
	pub length: usize,
	/// The textarea's `maxlength`
	pub max_length: usize,
}

impl CharCounter {
	/// Counts `text` against `max_length`.
	pub fn new(text: &str, max_length: usize) -> Self {
		Self {
			length: text.chars().count(),
			max_length,
		}
	}

	/// Characters left; negative when over the limit.
	pub fn remaining(&self) -> i64 {
		self.max_length as i64 - self.length as i64
	}

	/// Counter severity.
	pub fn level(&self) -> CounterLevel {
		let remaining = self.remaining();
		if remaining < ERROR_REMAINING {
			CounterLevel::Error
		} else if remaining < WARNING_REMAINING {
			CounterLevel::Warning
		} else {
			CounterLevel::Normal
		}
	}

	/// Counter text, `length/max`.
	pub fn text(&self) -> String {
		format!("{}/{}", self.length, self.max_length)
	}

	/// Renders the counter. An error counter also carries the warning
	/// class.
	pub fn render(&self) -> View {
		let class = match self.level() {
			CounterLevel::Normal => "char-counter",
			CounterLevel::Warning => "char-counter warning",
			CounterLevel::Error => "char-counter warning error",
		};
		View::element("div")
			.attr("class", class)
			.child(self.text())
			.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn valid_draft() -> CommentDraft {
		CommentDraft::new()
			.with_rating(4)
			.with_name("Ann")
			.with_text("Works as advertised")
			.name_required()
	}

	#[rstest]
	fn test_valid_draft_passes() {
		assert_eq!(valid_draft().validate(), Ok(()));
	}

	#[rstest]
	fn test_missing_rating_is_reported() {
		let draft = CommentDraft {
			rating: None,
			..valid_draft()
		};

		let errors = draft.validate().unwrap_err();
		assert_eq!(errors.messages(), [RATING_REQUIRED_MESSAGE]);
	}

	#[rstest]
	#[case(0)]
	#[case(6)]
	fn test_rating_out_of_range(#[case] rating: u8) {
		assert!(valid_draft().with_rating(rating).validate().is_err());
	}

	#[rstest]
	fn test_errors_are_aggregated_in_form_order() {
		let draft = CommentDraft::new()
			.with_name("   ")
			.with_text("  short   ")
			.name_required();

		let errors = draft.validate().unwrap_err();

		assert_eq!(
			errors.messages(),
			[RATING_REQUIRED_MESSAGE, NAME_REQUIRED_MESSAGE, TEXT_TOO_SHORT_MESSAGE]
		);
		assert_eq!(
			errors.to_string(),
			format!("{RATING_REQUIRED_MESSAGE}\n{NAME_REQUIRED_MESSAGE}\n{TEXT_TOO_SHORT_MESSAGE}")
		);
	}

	#[rstest]
	fn test_optional_name_may_be_blank() {
		let draft = CommentDraft {
			name: String::new(),
			name_required: false,
			..valid_draft()
		};
		assert_eq!(draft.validate(), Ok(()));
	}

	#[rstest]
	fn test_text_length_counts_characters() {
		let draft = valid_draft().with_text("ёжик ёжик!");
		assert_eq!(draft.validate(), Ok(()));
	}

	#[rstest]
	fn test_reset_keeps_markup_flags() {
		let mut draft = valid_draft();
		draft.reset();

		assert_eq!(draft, CommentDraft::new().name_required());
	}

	#[rstest]
	fn test_form_fields() {
		let fields = valid_draft().with_email("ann@example.com").form_fields();
		assert_eq!(
			fields,
			vec![
				("name".to_string(), "Ann".to_string()),
				("email".to_string(), "ann@example.com".to_string()),
				("rating".to_string(), "4".to_string()),
				("text".to_string(), "Works as advertised".to_string()),
			]
		);
	}

	#[rstest]
	#[case(0, CounterLevel::Normal)]
	#[case(1950, CounterLevel::Normal)]
	#[case(1951, CounterLevel::Warning)]
	#[case(1990, CounterLevel::Warning)]
	#[case(1991, CounterLevel::Error)]
	#[case(2000, CounterLevel::Error)]
	fn test_counter_levels(#[case] length: usize, #[case] expected: CounterLevel) {
		let counter = CharCounter::new(&"x".repeat(length), DEFAULT_MAX_LENGTH);
		assert_eq!(counter.level(), expected);
	}

	#[rstest]
	fn test_counter_render() {
		let counter = CharCounter::new(&"x".repeat(1995), DEFAULT_MAX_LENGTH);
		assert_eq!(
			counter.render().render_to_string(),
			"<div class=\"char-counter warning error\">1995/2000</div>"
		);
	}
}
