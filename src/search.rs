//! Faceted search widget
//!
//! Re-exports tinycms-search: payload extraction, range sliders, linked
//! date ranges, dynamic choices, the debounced auto-search and the
//! responsive panel layout.
//!
//! ## Example
//!
//! ```
//! use tinycms::search::extract::extract;
//! use tinycms::search::form::{ControlKind, FormSnapshot};
//!
//! let snapshot = FormSnapshot::new()
//! 	.entry("q", "lamp", ControlKind::Search)
//! 	.entry("created_min", "01.03.2024", ControlKind::Text);
//!
//! let payload = extract(&snapshot);
//! assert_eq!(payload.get("q"), Some(&serde_json::json!("lamp")));
//! ```

pub use tinycms_search::*;
