//! Search panel placement.
//!
//! On narrow viewports the search panel moves to the top of the main
//! wrapper. On desktop it stays in its offcanvas host, positioned around the
//! site header, and the main wrapper is padded so the panel does not cover
//! content. [`compute_layout`] is pure: the host measures the DOM, calls it,
//! and applies the returned styles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest viewport (in CSS pixels) laid out as mobile.
pub const MOBILE_BREAKPOINT_PX: f64 = 991.98;

/// Width of `start`/`end` panels on desktop.
pub const DESKTOP_SIDE_WIDTH_PX: i64 = 460;

/// Smallest height of `top`/`bottom` panels.
pub const MIN_PANEL_HEIGHT_PX: i64 = 200;

/// Height kept free for page content below a `top` panel.
pub const TOP_CONTENT_RESERVE_PX: i64 = 200;

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
	/// `innerWidth`
	pub width: f64,
	/// `innerHeight`
	pub height: f64,
}

impl Viewport {
	/// Returns whether the viewport uses the mobile layout.
	pub fn is_mobile(&self) -> bool {
		self.width <= MOBILE_BREAKPOINT_PX
	}
}

/// Measured site header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderRect {
	/// Computed `position` is `fixed`
	pub fixed: bool,
	/// Bounding rect left
	pub left: f64,
	/// Bounding rect top
	pub top: f64,
	/// Bounding rect width
	pub width: f64,
	/// Bounding rect height
	pub height: f64,
}

/// Where a panel is docked on desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
	/// Left edge
	#[default]
	Start,
	/// Right edge
	End,
	/// Below the header
	Top,
	/// Bottom edge
	Bottom,
}

impl Placement {
	/// Reads `data-search-placement`; absent means `start` and unknown
	/// values mean `top`.
	pub fn from_attribute(value: Option<&str>) -> Self {
		match value {
			None | Some("start") => Placement::Start,
			Some("end") => Placement::End,
			Some("bottom") => Placement::Bottom,
			Some(_) => Placement::Top,
		}
	}

	/// Offcanvas class of the placement.
	pub fn class(&self) -> &'static str {
		match self {
			Placement::Start => "offcanvas-start",
			Placement::End => "offcanvas-end",
			Placement::Top => "offcanvas-top",
			Placement::Bottom => "offcanvas-bottom",
		}
	}

	fn is_side(&self) -> bool {
		matches!(self, Placement::Start | Placement::End)
	}
}

/// A CSS length set inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssLength {
	/// `<n>px`
	Px(i64),
	/// `calc(100% - <n>px)`
	FullMinusPx(i64),
}

impl fmt::Display for CssLength {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CssLength::Px(n) => write!(f, "{n}px"),
			CssLength::FullMinusPx(n) => write!(f, "calc(100% - {n}px)"),
		}
	}
}

/// One desktop panel to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelInput {
	/// Docking edge
	pub placement: Placement,
	/// Content height with `height: auto`
	pub scroll_height: i64,
}

/// Inline styles of a placed panel; `None` means unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelStyle {
	/// Docking edge
	pub placement: Placement,
	/// `left`
	pub left: Option<CssLength>,
	/// `top`
	pub top: Option<CssLength>,
	/// `width`
	pub width: Option<CssLength>,
	/// `height`
	pub height: Option<CssLength>,
}

/// Padding pushed onto the main wrapper; `None` means unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapperPadding {
	/// `padding-left`
	pub left: Option<i64>,
	/// `padding-right`
	pub right: Option<i64>,
	/// `padding-top`
	pub top: Option<i64>,
	/// `padding-bottom`
	pub bottom: Option<i64>,
}

/// Which host holds the panel content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHost {
	/// The mobile panel at the top of the main wrapper
	Mobile,
	/// The desktop offcanvas
	Desktop,
}

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
	/// Host of the panel content
	pub host: PanelHost,
	/// Styles of the desktop panels, in input order
	pub panels: Vec<PanelStyle>,
	/// Padding of the main wrapper
	pub wrapper_padding: WrapperPadding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeaderMetrics {
	is_sidebar: bool,
	width: i64,
	height: i64,
}

impl HeaderMetrics {
	fn measure(viewport: &Viewport, header: Option<&HeaderRect>) -> Self {
		let Some(rect) = header else {
			return Self {
				is_sidebar: false,
				width: 0,
				height: 0,
			};
		};
		// A fixed header glued to the top-left corner spanning the viewport
		// height is a left sidebar, not a top bar.
		let is_sidebar = !viewport.is_mobile()
			&& rect.fixed
			&& rect.left.abs() < 1.0
			&& rect.top.abs() < 1.0
			&& rect.height >= viewport.height - 1.0
			&& rect.width > 0.0;
		Self {
			is_sidebar,
			width: rect.width.round() as i64,
			height: rect.height.round() as i64,
		}
	}

	fn top_height(&self) -> i64 {
		if self.is_sidebar { 0 } else { self.height }
	}
}

/// Computes the placement of every search panel.
pub fn compute_layout(viewport: Viewport, header: Option<HeaderRect>, panels: &[PanelInput]) -> Layout {
	if viewport.is_mobile() {
		return Layout {
			host: PanelHost::Mobile,
			panels: Vec::new(),
			wrapper_padding: WrapperPadding::default(),
		};
	}

	let metrics = HeaderMetrics::measure(&viewport, header.as_ref());
	let top_header = metrics.top_height();
	let mut wrapper_padding = WrapperPadding::default();
	let mut styles = Vec::with_capacity(panels.len());

	for panel in panels {
		let placement = panel.placement;
		let mut style = PanelStyle {
			placement,
			left: None,
			top: None,
			width: None,
			height: None,
		};

		if metrics.is_sidebar {
			match placement {
				Placement::Start => style.left = Some(CssLength::Px(metrics.width)),
				Placement::Top | Placement::Bottom => {
					style.left = Some(CssLength::Px(metrics.width));
					style.width = Some(CssLength::FullMinusPx(metrics.width));
				}
				Placement::End => {}
			}
		}

		if placement == Placement::Top {
			style.top = Some(CssLength::Px(top_header));
		}

		let rendered_height = if placement.is_side() {
			style.width = Some(CssLength::Px(DESKTOP_SIDE_WIDTH_PX));
			if !metrics.is_sidebar {
				style.top = Some(CssLength::Px(top_header));
			}
			None
		} else {
			let top_offset = if placement == Placement::Top { top_header } else { 0 };
			let available = MIN_PANEL_HEIGHT_PX.max(viewport.height.round() as i64 - top_offset);
			let max_height = if placement == Placement::Top {
				MIN_PANEL_HEIGHT_PX.max(available - TOP_CONTENT_RESERVE_PX)
			} else {
				available
			};
			let height = panel.scroll_height.min(max_height);
			style.height = Some(CssLength::Px(height));
			Some(height)
		};

		// Each panel replaces the padding pushed by the previous one.
		wrapper_padding = match placement {
			Placement::Start => WrapperPadding {
				left: Some(DESKTOP_SIDE_WIDTH_PX),
				..Default::default()
			},
			Placement::End => WrapperPadding {
				right: Some(DESKTOP_SIDE_WIDTH_PX),
				..Default::default()
			},
			Placement::Top => WrapperPadding {
				top: rendered_height,
				..Default::default()
			},
			Placement::Bottom => WrapperPadding {
				bottom: rendered_height,
				..Default::default()
			},
		};

		styles.push(style);
	}

	tracing::debug!(
		"laid out {} search panels (sidebar header: {})",
		styles.len(),
		metrics.is_sidebar
	);

	Layout {
		host: PanelHost::Desktop,
		panels: styles,
		wrapper_padding,
	}
}

/// Coalesces resize events into at most one layout per animation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameThrottle {
	scheduled: bool,
}

impl FrameThrottle {
	/// Creates an idle throttle.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a resize; returns whether the host must request a frame.
	pub fn request(&mut self) -> bool {
		if self.scheduled {
			return false;
		}
		self.scheduled = true;
		true
	}

	/// Called from the animation frame; returns whether to run a layout.
	pub fn on_frame(&mut self) -> bool {
		std::mem::take(&mut self.scheduled)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	const DESKTOP: Viewport = Viewport {
		width: 1440.0,
		height: 900.0,
	};

	const TOP_BAR: HeaderRect = HeaderRect {
		fixed: false,
		left: 0.0,
		top: 0.0,
		width: 1440.0,
		height: 72.4,
	};

	const SIDEBAR: HeaderRect = HeaderRect {
		fixed: true,
		left: 0.0,
		top: 0.0,
		width: 280.0,
		height: 900.0,
	};

	fn panel(placement: Placement, scroll_height: i64) -> PanelInput {
		PanelInput {
			placement,
			scroll_height,
		}
	}

	#[rstest]
	#[case(991.98, true)]
	#[case(992.0, false)]
	fn test_breakpoint(#[case] width: f64, #[case] mobile: bool) {
		assert_eq!(
			Viewport {
				width,
				height: 800.0
			}
			.is_mobile(),
			mobile
		);
	}

	#[rstest]
	fn test_mobile_moves_panel_without_padding() {
		let layout = compute_layout(
			Viewport {
				width: 390.0,
				height: 844.0,
			},
			Some(SIDEBAR),
			&[panel(Placement::Start, 500)],
		);

		assert_eq!(layout.host, PanelHost::Mobile);
		assert!(layout.panels.is_empty());
		assert_eq!(layout.wrapper_padding, WrapperPadding::default());
	}

	#[rstest]
	#[case(None, Placement::Start)]
	#[case(Some("end"), Placement::End)]
	#[case(Some("bottom"), Placement::Bottom)]
	#[case(Some("sideways"), Placement::Top)]
	fn test_placement_from_attribute(#[case] raw: Option<&str>, #[case] expected: Placement) {
		assert_eq!(Placement::from_attribute(raw), expected);
	}

	#[rstest]
	fn test_start_panel_below_top_bar() {
		let layout = compute_layout(DESKTOP, Some(TOP_BAR), &[panel(Placement::Start, 0)]);
		let style = &layout.panels[0];

		assert_eq!(layout.host, PanelHost::Desktop);
		assert_eq!(style.width, Some(CssLength::Px(460)));
		assert_eq!(style.top, Some(CssLength::Px(72)));
		assert_eq!(style.left, None);
		assert_eq!(layout.wrapper_padding.left, Some(460));
	}

	#[rstest]
	fn test_start_panel_beside_sidebar() {
		let layout = compute_layout(DESKTOP, Some(SIDEBAR), &[panel(Placement::Start, 0)]);
		let style = &layout.panels[0];

		assert_eq!(style.left, Some(CssLength::Px(280)));
		assert_eq!(style.top, None);
	}

	#[rstest]
	fn test_top_panel_height_reserves_content() {
		let layout = compute_layout(DESKTOP, Some(TOP_BAR), &[panel(Placement::Top, 2_000)]);
		let style = &layout.panels[0];

		// 900 - 72 = 828 available, minus the 200 px reserve.
		assert_eq!(style.height, Some(CssLength::Px(628)));
		assert_eq!(style.top, Some(CssLength::Px(72)));
		assert_eq!(layout.wrapper_padding.top, Some(628));
	}

	#[rstest]
	fn test_bottom_panel_with_sidebar() {
		let layout = compute_layout(DESKTOP, Some(SIDEBAR), &[panel(Placement::Bottom, 150)]);
		let style = &layout.panels[0];

		assert_eq!(style.left, Some(CssLength::Px(280)));
		assert_eq!(
			style.width.map(|w| w.to_string()),
			Some("calc(100% - 280px)".to_string())
		);
		assert_eq!(style.height, Some(CssLength::Px(150)));
		assert_eq!(layout.wrapper_padding.bottom, Some(150));
	}

	#[rstest]
	fn test_short_viewport_keeps_minimum_height() {
		let viewport = Viewport {
			width: 1200.0,
			height: 250.0,
		};
		let layout = compute_layout(viewport, Some(TOP_BAR), &[panel(Placement::Top, 900)]);

		assert_eq!(layout.panels[0].height, Some(CssLength::Px(MIN_PANEL_HEIGHT_PX)));
	}

	#[rstest]
	fn test_frame_throttle_coalesces() {
		let mut throttle = FrameThrottle::new();

		assert!(throttle.request());
		assert!(!throttle.request());
		assert!(throttle.on_frame());
		assert!(!throttle.on_frame());
		assert!(throttle.request());
	}
}
