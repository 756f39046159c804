//! Property-based tests for comment validation and star rendering
//!
//! Uses proptest to verify:
//! 1. A draft without a rating never validates
//! 2. Text validation depends only on the trimmed length
//! 3. Average stars always fill `floor(rating)` stars and at most one half
//! 4. The character counter level follows the remaining characters

use proptest::prelude::*;
use tinycms_comments::stars::{StarKind, star_kinds};
use tinycms_comments::validation::{
	CharCounter, CommentDraft, CounterLevel, DEFAULT_MAX_LENGTH, MIN_TEXT_LENGTH,
	RATING_REQUIRED_MESSAGE, TEXT_TOO_SHORT_MESSAGE,
};

// ============================================================================
// Validation
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(100))]

	/// Property: a missing rating is always reported
	#[test]
	fn test_missing_rating_never_validates(name in "[A-Za-z ]{0,12}", text in ".{0,40}") {
		let draft = CommentDraft::new().with_name(name).with_text(text);

		let errors = draft.validate().unwrap_err();

		prop_assert_eq!(errors.messages()[0].as_str(), RATING_REQUIRED_MESSAGE);
	}

	/// Property: surrounding whitespace never counts towards the length
	#[test]
	fn test_text_length_is_trimmed(
		core in "[a-z]{1,20}",
		padding in "[ \t\n]{0,15}",
		rating in 1u8..=5,
	) {
		let draft = CommentDraft::new()
			.with_rating(rating)
			.with_text(format!("{padding}{core}{padding}"));

		let too_short = draft
			.validate()
			.err()
			.is_some_and(|e| e.messages().iter().any(|m| m == TEXT_TOO_SHORT_MESSAGE));

		prop_assert_eq!(too_short, core.len() < MIN_TEXT_LENGTH);
	}
}

// ============================================================================
// Stars
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	/// Property: filled stars equal the whole part, half stars appear once at most
	#[test]
	fn test_star_kinds_match_rating(rating in 0.0f64..=5.0) {
		let stars = star_kinds(rating);

		let filled = stars.iter().filter(|s| **s == StarKind::Filled).count();
		let halves = stars.iter().filter(|s| **s == StarKind::Half).count();

		prop_assert_eq!(filled, rating.floor() as usize);
		prop_assert_eq!(halves, usize::from(rating.fract() >= 0.5));
	}

	/// Property: the counter warns exactly when few characters remain
	#[test]
	fn test_counter_level(length in 0usize..=2100) {
		let counter = CharCounter::new(&"a".repeat(length), DEFAULT_MAX_LENGTH);
		let remaining = DEFAULT_MAX_LENGTH as i64 - length as i64;

		let expected = if remaining < 10 {
			CounterLevel::Error
		} else if remaining < 50 {
			CounterLevel::Warning
		} else {
			CounterLevel::Normal
		};
		prop_assert_eq!(counter.level(), expected);
		prop_assert_eq!(counter.text(), format!("{length}/{DEFAULT_MAX_LENGTH}"));
	}
}
