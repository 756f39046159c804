//! Star ratings.
//!
//! Averages are drawn as five stars that are filled, half filled or empty.
//! The form's [`StarSelector`] is the interactive five-button picker.

use tinycms_pages::View;

/// Number of stars in a rating.
pub const STAR_COUNT: u8 = 5;

const FILLED: &str = "★";
const EMPTY: &str = "☆";

/// How one star of an average is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarKind {
	/// Completely filled
	Filled,
	/// Half filled
	Half,
	/// Outline only
	Empty,
}

/// Splits an average rating into five stars.
///
/// Whole points are filled; the next star is half filled when the fraction
/// is at least one half.
pub fn star_kinds(rating: f64) -> [StarKind; 5] {
	let full = rating.floor();
	let half = rating - full >= 0.5;
	let mut stars = [StarKind::Empty; 5];
	for (i, star) in stars.iter_mut().enumerate() {
		let position = (i + 1) as f64;
		if position <= full {
			*star = StarKind::Filled;
		} else if position == full + 1.0 && half {
			*star = StarKind::Half;
		}
	}
	stars
}

/// Renders an average as star spans. A zero or missing average renders
/// nothing.
pub fn render_stars(rating: f64) -> View {
	if !rating.is_finite() || rating == 0.0 {
		return View::empty();
	}
	View::fragment(star_kinds(rating).into_iter().map(|kind| {
		let (class, glyph) = match kind {
			StarKind::Filled => ("star filled", FILLED),
			StarKind::Half => ("star half", FILLED),
			StarKind::Empty => ("star", EMPTY),
		};
		View::element("span").attr("class", class).child(glyph)
	}))
}

/// A whole rating as a five-glyph string, e.g. `★★★☆☆`.
pub fn rating_glyphs(rating: u8) -> String {
	(1..=STAR_COUNT)
		.map(|i| if i <= rating { FILLED } else { EMPTY })
		.collect()
}

/// Interactive star picker of the comment form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarSelector {
	value: Option<u8>,
	hover: Option<u8>,
}

impl StarSelector {
	/// Creates a picker without a rating.
	pub fn new() -> Self {
		Self::default()
	}

	/// Picked rating, written to the hidden `rating` input.
	pub fn value(&self) -> Option<u8> {
		self.value
	}

	/// Picks `value` stars. Values outside 1..=5 are ignored.
	pub fn click(&mut self, value: u8) -> Option<u8> {
		if (1..=STAR_COUNT).contains(&value) {
			self.value = Some(value);
		}
		self.value
	}

	/// Previews `value` stars while the pointer is over them.
	pub fn hover(&mut self, value: u8) {
		self.hover = Some(value.min(STAR_COUNT));
	}

	/// Ends the preview.
	pub fn leave(&mut self) {
		self.hover = None;
	}

	/// Forgets the rating.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	/// Whether star `index` (1-based) is active.
	pub fn is_active(&self, index: u8) -> bool {
		self.value.is_some_and(|value| index <= value)
	}

	/// Whether star `index` (1-based) is previewed.
	pub fn is_previewed(&self, index: u8) -> bool {
		self.hover.is_some_and(|hover| index <= hover)
	}

	/// Renders the buttons and the hidden input.
	pub fn render(&self) -> View {
		let buttons = (1..=STAR_COUNT).map(|i| {
			let class = if self.is_active(i) { "star-btn active" } else { "star-btn" };
			View::element("button")
				.attr("type", "button")
				.attr("class", class)
				.attr("data-value", i.to_string())
				.attr_if(self.is_previewed(i), "style", "opacity: 0.7")
				.child(FILLED)
		});
		View::element("div")
			.attr("class", "rating-input")
			.child(View::element("div").attr("class", "stars-selector").children(buttons))
			.child(
				View::element("input")
					.attr("type", "hidden")
					.attr("name", "rating")
					.attr(
						"value",
						self.value.map(|v| v.to_string()).unwrap_or_default(),
					),
			)
			.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use super::StarKind::*;
	use rstest::rstest;

	#[rstest]
	#[case(4.0, [Filled, Filled, Filled, Filled, Empty])]
	#[case(3.5, [Filled, Filled, Filled, Half, Empty])]
	#[case(3.49, [Filled, Filled, Filled, Empty, Empty])]
	#[case(0.5, [Half, Empty, Empty, Empty, Empty])]
	#[case(5.0, [Filled, Filled, Filled, Filled, Filled])]
	fn test_star_kinds(#[case] rating: f64, #[case] expected: [StarKind; 5]) {
		assert_eq!(star_kinds(rating), expected);
	}

	#[rstest]
	fn test_render_stars() {
		assert_eq!(
			render_stars(1.5).render_to_string(),
			"<span class=\"star filled\">★</span><span class=\"star half\">★</span>\
			 <span class=\"star\">☆</span><span class=\"star\">☆</span><span class=\"star\">☆</span>"
		);
		assert_eq!(render_stars(0.0), View::empty());
	}

	#[rstest]
	#[case(0, "☆☆☆☆☆")]
	#[case(3, "★★★☆☆")]
	#[case(5, "★★★★★")]
	fn test_rating_glyphs(#[case] rating: u8, #[case] expected: &str) {
		assert_eq!(rating_glyphs(rating), expected);
	}

	#[rstest]
	fn test_selector_click_and_hover() {
		let mut selector = StarSelector::new();

		assert_eq!(selector.click(3), Some(3));
		assert!(selector.is_active(3));
		assert!(!selector.is_active(4));

		assert_eq!(selector.click(9), Some(3));

		selector.hover(4);
		assert!(selector.is_previewed(4));
		selector.leave();
		assert!(!selector.is_previewed(1));

		selector.reset();
		assert_eq!(selector.value(), None);
	}

	#[rstest]
	fn test_selector_render() {
		let mut selector = StarSelector::new();
		selector.click(2);

		let view = selector.render();

		assert_eq!(view.find_by_class("active").len(), 2);
		assert!(view.render_to_string().contains("name=\"rating\" value=\"2\""));
	}
}
