//! Property-based tests for search payload extraction and range sliders
//!
//! Uses proptest to verify:
//! 1. Valid `DD.MM.YYYY` dates normalize to the same calendar date
//! 2. Text values that trim to empty never reach the payload
//! 3. Any sequence of slider interactions keeps the range consistent
//! 4. Pasted values are clamped into the limits

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use tinycms_search::extract::{extract, normalize_date, parse_date_value};
use tinycms_search::form::{ControlKind, FormSnapshot};
use tinycms_search::range::{Handle, RangeConfig, RangeReconciler};

// ============================================================================
// Date normalization
// ============================================================================

fn valid_date() -> impl Strategy<Value = NaiveDate> {
	(1000i32..=9999, 1u32..=12, 1u32..=31)
		.prop_filter_map("calendar date", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	/// Property: a valid DD.MM.YYYY date keeps its year, month and day
	#[test]
	fn test_valid_dates_normalize_to_iso(date in valid_date()) {
		let input = format!("{:02}.{:02}.{:04}", date.day(), date.month(), date.year());

		let normalized = normalize_date(&input);

		prop_assert_eq!(
			normalized.clone(),
			Some(format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()))
		);
		prop_assert_eq!(
			parse_date_value(&format!("  {input} ")),
			serde_json::Value::String(normalized.unwrap_or_default())
		);
	}

	/// Property: impossible dates are never normalized
	#[test]
	fn test_impossible_dates_are_rejected(year in 1000i32..=9999, month in 13u32..=99, day in 1u32..=28) {
		let input = format!("{day:02}.{month:02}.{year:04}");
		prop_assert_eq!(normalize_date(&input), None);
	}
}

// ============================================================================
// Text trimming
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(100))]

	/// Property: whitespace-only text values are excluded
	#[test]
	fn test_blank_text_is_excluded(blank in "[ \t\n\r]{0,8}", kind in prop_oneof![
		Just(ControlKind::Text),
		Just(ControlKind::Search),
		Just(ControlKind::Textarea),
		Just(ControlKind::Select),
		Just(ControlKind::Checkbox),
	]) {
		let snapshot = FormSnapshot::new().entry("field", blank, kind);
		prop_assert!(extract(&snapshot).is_empty());
	}

	/// Property: non-blank text is kept verbatim as a scalar
	#[test]
	fn test_text_is_kept_verbatim(text in " {0,2}[a-z0-9]{1,12} {0,2}") {
		let snapshot = FormSnapshot::new().entry("title", text.clone(), ControlKind::Text);
		let payload = extract(&snapshot);
		prop_assert_eq!(payload.get("title"), Some(&serde_json::Value::String(text)));
	}
}

// ============================================================================
// Range invariant
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
	Drag(Handle, f64),
	Focus(Handle),
	Input(Handle, String),
	Blur(Handle),
	Paste(Handle, String),
	Reset,
}

fn handle() -> impl Strategy<Value = Handle> {
	prop_oneof![Just(Handle::Min), Just(Handle::Max)]
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		(handle(), -500.0f64..1500.0).prop_map(|(h, p)| Op::Drag(h, p)),
		handle().prop_map(Op::Focus),
		(handle(), "-?[0-9]{0,5}[a-z]?").prop_map(|(h, t)| Op::Input(h, t)),
		handle().prop_map(Op::Blur),
		(handle(), "[ -]?[0-9a-z]{0,6}").prop_map(|(h, t)| Op::Paste(h, t)),
		Just(Op::Reset),
	]
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	/// Property: min_limit <= min <= max <= max_limit after every interaction
	#[test]
	fn test_range_invariant_holds(
		min_limit in -1000i64..1000,
		span in 0i64..2000,
		step in 1i64..50,
		ops in proptest::collection::vec(op(), 0..40),
	) {
		let config = RangeConfig::new(min_limit, min_limit + span).with_step(step);
		let mut slider = RangeReconciler::new(0, "price", config);

		for op in ops {
			match op {
				Op::Drag(h, p) => slider.drag_to(h, p),
				Op::Focus(h) => slider.focus(h),
				Op::Input(h, t) => slider.input(h, &t),
				Op::Blur(h) => slider.blur(h),
				Op::Paste(h, t) => {
					slider.paste(h, &t);
				}
				Op::Reset => {
					slider.reset();
				}
			}
			let state = slider.state();
			prop_assert!(state.is_consistent(), "inconsistent state {:?}", state);

			let view = slider.view();
			prop_assert_eq!(view.min_hidden, state.min.to_string());
			prop_assert_eq!(view.max_hidden, state.max.to_string());
		}
	}

	/// Property: pasted numbers end up clamped into the limits
	#[test]
	fn test_paste_clamps(value in -10_000i64..10_000) {
		let mut slider = RangeReconciler::new(0, "price", RangeConfig::new(0, 100));
		slider.focus(Handle::Max);

		prop_assert!(slider.paste(Handle::Max, &value.to_string()));
		prop_assert_eq!(slider.state().max, value.clamp(0, 100));
	}
}

#[test]
fn test_paste_150_into_max_stores_100() {
	let mut slider = RangeReconciler::new(0, "price", RangeConfig::new(0, 100));
	slider.focus(Handle::Max);

	assert!(slider.paste(Handle::Max, "150"));

	assert_eq!(slider.state().max, 100);
	assert_eq!(slider.view().max_input, "100");
	assert_eq!(slider.view().max_hidden, "100");
}
