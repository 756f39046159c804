//! Range slider reconciliation.
//!
//! A range field is shown as a two-handle slider, a pair of text inputs, a
//! pair of display labels and a pair of hidden inputs that are actually
//! submitted. [`RangeReconciler`] owns the committed [`RangeState`] and keeps
//! every one of those views consistent with it while the user drags, types,
//! pastes or resets.
//!
//! The committed state always satisfies
//! `min_limit <= min <= max <= max_limit`.

use serde::{Deserialize, Serialize};
use tinycms_pages::number::parse_int_prefix;
use tinycms_pages::{ConfigError, Dataset};

const DEFAULT_MIN_LIMIT: i64 = 0;
const DEFAULT_MAX_LIMIT: i64 = 100;
const DEFAULT_STEP: i64 = 1;

/// Keys accepted besides ASCII digits while typing into a range input.
pub const ALLOWED_KEYS: &[&str] = &[
	"Backspace",
	"Delete",
	"Tab",
	"ArrowLeft",
	"ArrowRight",
	"ArrowUp",
	"ArrowDown",
	"Home",
	"End",
	"Enter",
	"Escape",
	".",
	",",
];

fn default_max_limit() -> i64 {
	DEFAULT_MAX_LIMIT
}

fn default_step() -> i64 {
	DEFAULT_STEP
}

/// Slider configuration read from the wrapper's `data-*` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
	/// Lowest selectable value (`data-min`, default 0)
	#[serde(default)]
	pub min_limit: i64,
	/// Highest selectable value (`data-max`, default 100)
	#[serde(default = "default_max_limit")]
	pub max_limit: i64,
	/// Initial lower value (`data-start-min`, defaults to the lower limit)
	#[serde(default)]
	pub start_min: Option<i64>,
	/// Initial upper value (`data-start-max`, defaults to the upper limit)
	#[serde(default)]
	pub start_max: Option<i64>,
	/// Handle step (`data-step`, default 1)
	#[serde(default = "default_step")]
	pub step: i64,
}

impl Default for RangeConfig {
	fn default() -> Self {
		Self::new(DEFAULT_MIN_LIMIT, DEFAULT_MAX_LIMIT)
	}
}

impl RangeConfig {
	/// Creates a configuration spanning `[min_limit, max_limit]` with step 1.
	pub fn new(min_limit: i64, max_limit: i64) -> Self {
		Self {
			min_limit,
			max_limit,
			start_min: None,
			start_max: None,
			step: DEFAULT_STEP,
		}
	}

	/// Sets the initial values.
	pub fn with_start(mut self, start_min: i64, start_max: i64) -> Self {
		self.start_min = Some(start_min);
		self.start_max = Some(start_max);
		self
	}

	/// Sets the handle step.
	pub fn with_step(mut self, step: i64) -> Self {
		self.step = step;
		self
	}

	/// Reads the configuration from the slider wrapper's dataset.
	///
	/// Attributes that do not parse fall back to their defaults. Limits in
	/// the wrong order are rejected.
	pub fn from_dataset(dataset: &Dataset) -> Result<Self, ConfigError> {
		let min_limit = dataset.int_or("min", DEFAULT_MIN_LIMIT);
		let max_limit = dataset.int_or("max", DEFAULT_MAX_LIMIT);
		if min_limit > max_limit {
			return Err(ConfigError::InvalidValue {
				attribute: "max".to_string(),
				value: max_limit.to_string(),
			});
		}
		Ok(Self {
			min_limit,
			max_limit,
			start_min: dataset.get("start-min").and_then(parse_int_prefix),
			start_max: dataset.get("start-max").and_then(parse_int_prefix),
			step: dataset.int_or("step", DEFAULT_STEP),
		})
	}

	fn initial_state(&self) -> RangeState {
		let (min_limit, max_limit) = if self.min_limit <= self.max_limit {
			(self.min_limit, self.max_limit)
		} else {
			(self.max_limit, self.min_limit)
		};
		let min = self.start_min.unwrap_or(min_limit).clamp(min_limit, max_limit);
		let max = self.start_max.unwrap_or(max_limit).clamp(min, max_limit);
		RangeState {
			min,
			max,
			min_limit,
			max_limit,
			step: self.step.max(1),
		}
	}
}

/// Committed values of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeState {
	/// Lower handle
	pub min: i64,
	/// Upper handle
	pub max: i64,
	/// Lowest selectable value
	pub min_limit: i64,
	/// Highest selectable value
	pub max_limit: i64,
	/// Handle step
	pub step: i64,
}

impl RangeState {
	/// Returns whether `min_limit <= min <= max <= max_limit`.
	pub fn is_consistent(&self) -> bool {
		self.min_limit <= self.min && self.min <= self.max && self.max <= self.max_limit
	}

	/// Returns whether both handles sit on the limits.
	pub fn is_default(&self) -> bool {
		self.min == self.min_limit && self.max == self.max_limit
	}

	/// Returns the value of `handle`.
	pub fn get(&self, handle: Handle) -> i64 {
		match handle {
			Handle::Min => self.min,
			Handle::Max => self.max,
		}
	}

	fn clamp_to_limits(&self, value: i64) -> i64 {
		value.clamp(self.min_limit, self.max_limit)
	}

	fn within_limits(&self, value: i64) -> bool {
		(self.min_limit..=self.max_limit).contains(&value)
	}

	/// Rounds a slider position onto the step grid within the limits.
	fn snap(&self, position: f64) -> i64 {
		if !position.is_finite() {
			return self.min_limit;
		}
		let steps = ((position - self.min_limit as f64) / self.step as f64).round();
		let snapped = self.min_limit as f64 + steps * self.step as f64;
		self.clamp_to_limits(snapped.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
	}

	/// Moves one handle without letting it pass the other.
	fn set_bounded(&mut self, handle: Handle, value: i64) {
		let value = self.clamp_to_limits(value);
		match handle {
			Handle::Min => self.min = value.min(self.max),
			Handle::Max => self.max = value.max(self.min),
		}
	}

	/// Moves one handle; passing the other collapses both onto `value`.
	fn set_collapsing(&mut self, handle: Handle, value: i64) {
		let value = self.clamp_to_limits(value);
		match handle {
			Handle::Min if value > self.max => {
				self.min = value;
				self.max = value;
			}
			Handle::Max if value < self.min => {
				self.min = value;
				self.max = value;
			}
			Handle::Min => self.min = value,
			Handle::Max => self.max = value,
		}
	}
}

/// One of the two slider handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
	/// Lower handle
	Min,
	/// Upper handle
	Max,
}

impl Handle {
	fn index(self) -> usize {
		match self {
			Handle::Min => 0,
			Handle::Max => 1,
		}
	}
}

/// What the user is currently doing with a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
	/// Nothing in progress
	Idle,
	/// A handle is being dragged
	DraggingHandle(Handle),
	/// A text input has keyboard focus
	EditingText(Handle),
}

/// Verdict of the keystroke filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
	/// Let the key through
	Accept,
	/// Prevent the key's default action
	Suppress,
}

/// Notification published when a slider returns to its limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetNotification {
	/// Lower value after reset
	pub min: i64,
	/// Upper value after reset
	pub max: i64,
	/// Position of the slider in its form
	pub slider_index: usize,
}

/// HTML attributes of a range text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAttributes {
	/// `min`
	pub min: i64,
	/// `max`
	pub max: i64,
	/// `step`
	pub step: i64,
	/// `placeholder`, e.g. `0-100`
	pub placeholder: String,
	/// `title` hint
	pub title: String,
}

/// Everything a host reflects into the slider's markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeView {
	/// Handle positions
	pub slider: (i64, i64),
	/// Text of the lower display label
	pub min_display: String,
	/// Text of the upper display label
	pub max_display: String,
	/// Content of the lower text input
	pub min_input: String,
	/// Content of the upper text input
	pub max_input: String,
	/// Value of the lower hidden input
	pub min_hidden: String,
	/// Value of the upper hidden input
	pub max_hidden: String,
}

/// Reconciles a slider, its text inputs and its hidden fields.
#[derive(Debug, Clone)]
pub struct RangeReconciler {
	index: usize,
	name: String,
	initial: RangeState,
	state: RangeState,
	interaction: InteractionState,
	inputs: [String; 2],
	hidden: [String; 2],
	rollback: Option<i64>,
}

impl RangeReconciler {
	/// Creates the reconciler of slider `index` for field `name`.
	pub fn new(index: usize, name: impl Into<String>, config: RangeConfig) -> Self {
		let state = config.initial_state();
		let mut reconciler = Self {
			index,
			name: name.into(),
			initial: state,
			state,
			interaction: InteractionState::Idle,
			inputs: [String::new(), String::new()],
			hidden: [String::new(), String::new()],
			rollback: None,
		};
		reconciler.publish();
		tracing::debug!(
			"range slider {} ({}) initialized at {}..{}",
			index,
			reconciler.name,
			state.min,
			state.max
		);
		reconciler
	}

	/// Field name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Position of the slider in its form.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Committed state.
	pub fn state(&self) -> RangeState {
		self.state
	}

	/// Current interaction.
	pub fn interaction(&self) -> InteractionState {
		self.interaction
	}

	/// Values the host shows.
	pub fn view(&self) -> RangeView {
		RangeView {
			slider: (self.state.min, self.state.max),
			min_display: self.state.min.to_string(),
			max_display: self.state.max.to_string(),
			min_input: self.inputs[0].clone(),
			max_input: self.inputs[1].clone(),
			min_hidden: self.hidden[0].clone(),
			max_hidden: self.hidden[1].clone(),
		}
	}

	/// The hidden `(name, value)` pairs submitted with the form.
	pub fn hidden_entries(&self) -> [(String, String); 2] {
		[
			(format!("{}_min", self.name), self.hidden[0].clone()),
			(format!("{}_max", self.name), self.hidden[1].clone()),
		]
	}

	/// Attributes of the text input of `handle`.
	pub fn input_attributes(&self, _handle: Handle) -> InputAttributes {
		let RangeState {
			min_limit,
			max_limit,
			step,
			..
		} = self.state;
		InputAttributes {
			min: min_limit,
			max: max_limit,
			step,
			placeholder: format!("{min_limit}-{max_limit}"),
			title: format!("Enter a value from {min_limit} to {max_limit}"),
		}
	}

	/// Starts dragging `handle`.
	///
	/// Grabbing the slider takes focus away from a text input, which commits
	/// it first.
	pub fn begin_drag(&mut self, handle: Handle) {
		if let InteractionState::EditingText(editing) = self.interaction {
			self.blur(editing);
		}
		self.interaction = InteractionState::DraggingHandle(handle);
	}

	/// Moves `handle` to a raw slider position.
	///
	/// The position is rounded, snapped to the step and clamped to the
	/// limits and to the other handle.
	pub fn drag_to(&mut self, handle: Handle, position: f64) {
		if !matches!(self.interaction, InteractionState::DraggingHandle(_)) {
			self.begin_drag(handle);
		}
		let value = self.state.snap(position);
		self.state.set_bounded(handle, value);
		self.publish();
	}

	/// Releases the dragged handle.
	pub fn end_drag(&mut self) {
		if matches!(self.interaction, InteractionState::DraggingHandle(_)) {
			self.interaction = InteractionState::Idle;
		}
	}

	/// Gives keyboard focus to the text input of `handle`.
	pub fn focus(&mut self, handle: Handle) {
		match self.interaction {
			InteractionState::EditingText(current) if current == handle => return,
			InteractionState::EditingText(current) => self.blur(current),
			_ => {}
		}
		self.rollback = Some(self.state.get(handle));
		self.interaction = InteractionState::EditingText(handle);
	}

	/// Filters a keystroke by its `KeyboardEvent.key`.
	pub fn key_down(&self, key: &str) -> KeyDecision {
		let is_digit = key.len() == 1 && key.bytes().all(|b| b.is_ascii_digit());
		if is_digit || ALLOWED_KEYS.contains(&key) {
			KeyDecision::Accept
		} else {
			KeyDecision::Suppress
		}
	}

	/// Applies live text input of `handle`.
	///
	/// Blank, non-numeric and out-of-limit text is kept in the input but not
	/// applied. Applied values never let the handles cross.
	pub fn input(&mut self, handle: Handle, text: &str) {
		self.inputs[handle.index()] = text.to_string();

		let trimmed = text.trim();
		if trimmed.is_empty() {
			return;
		}
		let Some(value) = parse_int_prefix(trimmed) else {
			return;
		};
		if !self.state.within_limits(value) {
			return;
		}
		self.state.set_bounded(handle, value);
		self.publish();
	}

	/// Commits the text input of `handle` when it loses focus.
	///
	/// Blank or non-numeric text rolls back to the value cached on focus,
	/// out-of-limit values clamp to the nearest limit, and a value past the
	/// other handle collapses both handles onto it.
	pub fn blur(&mut self, handle: Handle) {
		let text = self.inputs[handle.index()].trim().to_string();
		let parsed = if text.is_empty() {
			None
		} else {
			parse_int_prefix(&text)
		};

		match parsed {
			Some(value) => self.state.set_collapsing(handle, value),
			None => {
				let previous = self.rollback.unwrap_or_else(|| self.state.get(handle));
				tracing::debug!(
					"range slider {}: rolled back {:?} input {:?} to {}",
					self.index,
					handle,
					text,
					previous
				);
				self.state.set_bounded(handle, previous);
			}
		}

		self.rollback = None;
		if self.interaction == InteractionState::EditingText(handle) {
			self.interaction = InteractionState::Idle;
		}
		self.publish();
	}

	/// Pastes clipboard text into the input of `handle`.
	///
	/// The text bypasses the keystroke filter: its leading integer is clamped
	/// to the limits and applied at once. Returns `false` when the text holds
	/// no number, in which case nothing changes.
	pub fn paste(&mut self, handle: Handle, text: &str) -> bool {
		let Some(value) = parse_int_prefix(text) else {
			return false;
		};
		let value = self.state.clamp_to_limits(value);
		self.inputs[handle.index()] = value.to_string();
		self.state.set_collapsing(handle, value);
		self.publish();
		true
	}

	/// Moves both handles back to the limits.
	pub fn reset(&mut self) -> ResetNotification {
		self.state.min = self.state.min_limit;
		self.state.max = self.state.max_limit;
		self.interaction = InteractionState::Idle;
		self.rollback = None;
		self.publish_all();
		tracing::debug!("range slider {} reset to defaults", self.index);
		ResetNotification {
			min: self.state.min,
			max: self.state.max,
			slider_index: self.index,
		}
	}

	/// Blanks the hidden fields when both handles sit on the limits.
	///
	/// Returns whether the fields were blanked.
	pub fn normalize_for_submit(&mut self) -> bool {
		let at_limits = self.hidden[0].trim() == self.state.min_limit.to_string()
			&& self.hidden[1].trim() == self.state.max_limit.to_string();
		if at_limits {
			self.hidden = [String::new(), String::new()];
		}
		at_limits
	}

	/// Returns whether the state differs from the markup's start values.
	pub fn is_modified(&self) -> bool {
		self.state.min != self.initial.min || self.state.max != self.initial.max
	}

	fn publish(&mut self) {
		self.hidden = [self.state.min.to_string(), self.state.max.to_string()];
		for handle in [Handle::Min, Handle::Max] {
			if self.interaction != InteractionState::EditingText(handle) {
				self.inputs[handle.index()] = self.state.get(handle).to_string();
			}
		}
	}

	fn publish_all(&mut self) {
		self.hidden = [self.state.min.to_string(), self.state.max.to_string()];
		self.inputs = [self.state.min.to_string(), self.state.max.to_string()];
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn slider() -> RangeReconciler {
		RangeReconciler::new(0, "price", RangeConfig::new(0, 100).with_step(5))
	}

	#[rstest]
	fn test_config_from_dataset() {
		let dataset = Dataset::new()
			.with("min", "10")
			.with("max", "500")
			.with("start-min", "20")
			.with("step", "abc");

		let config = RangeConfig::from_dataset(&dataset).unwrap();

		assert_eq!(config.min_limit, 10);
		assert_eq!(config.max_limit, 500);
		assert_eq!(config.start_min, Some(20));
		assert_eq!(config.start_max, None);
		assert_eq!(config.step, 1);
	}

	#[rstest]
	fn test_config_rejects_inverted_limits() {
		let dataset = Dataset::new().with("min", "50").with("max", "10");
		assert!(RangeConfig::from_dataset(&dataset).is_err());
	}

	#[rstest]
	fn test_zero_start_is_kept() {
		let config = RangeConfig::new(-10, 10).with_start(0, 0);
		let slider = RangeReconciler::new(0, "t", config);

		assert_eq!((slider.state().min, slider.state().max), (0, 0));
	}

	#[rstest]
	fn test_initial_view(slider: RangeReconciler) {
		let view = slider.view();

		assert_eq!(view.slider, (0, 100));
		assert_eq!(view.min_input, "0");
		assert_eq!(view.max_hidden, "100");
		assert_eq!(slider.interaction(), InteractionState::Idle);
	}

	#[rstest]
	#[case(12.4, 10)]
	#[case(12.5, 15)]
	#[case(-40.0, 0)]
	#[case(140.0, 100)]
	fn test_drag_snaps_and_clamps(
		mut slider: RangeReconciler,
		#[case] position: f64,
		#[case] expected: i64,
	) {
		slider.drag_to(Handle::Min, position);

		assert_eq!(slider.state().min, expected.min(slider.state().max));
		assert_eq!(slider.view().min_display, slider.state().min.to_string());
		assert_eq!(slider.interaction(), InteractionState::DraggingHandle(Handle::Min));
	}

	#[rstest]
	fn test_drag_cannot_cross(mut slider: RangeReconciler) {
		slider.drag_to(Handle::Max, 30.0);
		slider.drag_to(Handle::Min, 80.0);
		slider.end_drag();

		assert_eq!((slider.state().min, slider.state().max), (30, 30));
		assert_eq!(slider.interaction(), InteractionState::Idle);
	}

	#[rstest]
	#[case("7", KeyDecision::Accept)]
	#[case("Backspace", KeyDecision::Accept)]
	#[case(",", KeyDecision::Accept)]
	#[case("ArrowUp", KeyDecision::Accept)]
	#[case("e", KeyDecision::Suppress)]
	#[case("-", KeyDecision::Suppress)]
	#[case("F5", KeyDecision::Suppress)]
	fn test_key_filter(slider: RangeReconciler, #[case] key: &str, #[case] expected: KeyDecision) {
		assert_eq!(slider.key_down(key), expected);
	}

	#[rstest]
	fn test_live_input_keeps_focused_text(mut slider: RangeReconciler) {
		slider.focus(Handle::Min);
		slider.input(Handle::Min, "42 ");

		let view = slider.view();
		assert_eq!(slider.state().min, 42);
		assert_eq!(view.min_input, "42 ");
		assert_eq!(view.min_hidden, "42");
		assert_eq!(view.min_display, "42");
	}

	#[rstest]
	#[case("")]
	#[case("abc")]
	#[case("150")]
	fn test_live_input_ignores_invalid(mut slider: RangeReconciler, #[case] text: &str) {
		slider.focus(Handle::Max);
		slider.input(Handle::Max, text);

		assert_eq!(slider.state().max, 100);
		assert_eq!(slider.view().max_input, text);
	}

	#[rstest]
	fn test_live_input_cannot_cross(mut slider: RangeReconciler) {
		slider.drag_to(Handle::Max, 40.0);
		slider.end_drag();
		slider.focus(Handle::Min);
		slider.input(Handle::Min, "60");

		assert_eq!((slider.state().min, slider.state().max), (40, 40));
	}

	#[rstest]
	fn test_blur_rolls_back_blank_input(mut slider: RangeReconciler) {
		slider.focus(Handle::Min);
		slider.input(Handle::Min, "30");
		slider.input(Handle::Min, "");
		slider.blur(Handle::Min);

		assert_eq!(slider.state().min, 0);
		assert_eq!(slider.view().min_input, "0");
		assert_eq!(slider.interaction(), InteractionState::Idle);
	}

	#[rstest]
	fn test_blur_clamps_out_of_limit(mut slider: RangeReconciler) {
		slider.focus(Handle::Max);
		slider.input(Handle::Max, "250");
		slider.blur(Handle::Max);

		assert_eq!(slider.state().max, 100);
		assert_eq!(slider.view().max_input, "100");
	}

	#[rstest]
	fn test_blur_collapses_crossed_handles(mut slider: RangeReconciler) {
		slider.drag_to(Handle::Max, 50.0);
		slider.end_drag();

		slider.focus(Handle::Min);
		slider.input(Handle::Min, "70");
		slider.blur(Handle::Min);

		assert_eq!((slider.state().min, slider.state().max), (70, 70));
		assert_eq!(slider.view().max_input, "70");
	}

	#[rstest]
	fn test_paste_clamps_and_applies(mut slider: RangeReconciler) {
		assert!(slider.paste(Handle::Max, "150"));
		assert_eq!(slider.state().max, 100);
		assert_eq!(slider.view().max_input, "100");

		assert!(!slider.paste(Handle::Max, "lots"));
		assert_eq!(slider.state().max, 100);
	}

	#[rstest]
	fn test_reset_republishes_and_notifies(mut slider: RangeReconciler) {
		slider.drag_to(Handle::Min, 20.0);
		slider.end_drag();
		slider.focus(Handle::Max);
		slider.input(Handle::Max, "6");

		let notification = slider.reset();

		assert_eq!(
			notification,
			ResetNotification {
				min: 0,
				max: 100,
				slider_index: 0
			}
		);
		assert_eq!(slider.view().max_input, "100");
		assert_eq!(slider.interaction(), InteractionState::Idle);
	}

	#[rstest]
	fn test_input_attributes(slider: RangeReconciler) {
		let attrs = slider.input_attributes(Handle::Min);

		assert_eq!(attrs.placeholder, "0-100");
		assert_eq!(attrs.step, 5);
		assert_eq!(attrs.title, "Enter a value from 0 to 100");
	}

	#[rstest]
	fn test_normalize_for_submit(mut slider: RangeReconciler) {
		assert!(slider.normalize_for_submit());
		assert_eq!(slider.view().min_hidden, "");

		slider.drag_to(Handle::Min, 10.0);
		assert!(!slider.normalize_for_submit());
		assert_eq!(slider.view().min_hidden, "10");
		assert!(slider.is_modified());
	}
}
