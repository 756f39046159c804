//! tinycms Search - faceted search form behaviour
//!
//! ## Architecture
//!
//! - [`field`]: Field descriptors read from markup
//! - [`form`]: Form model and submission snapshots
//! - [`extract`]: Search payload extraction and value normalization
//! - [`range`]: Range slider reconciliation
//! - [`date_range`]: Linked start/end date pickers
//! - [`choices`]: Select and radio controls with server-provided choices
//! - [`api`]: Client of the search endpoints
//! - [`results`]: Results panel rendering and click events
//! - [`debounce`]: Auto-search debounce
//! - [`widget`]: The search widget tying the above together
//! - [`layout`]: Responsive search panel placement
//!
//! ## Example
//!
//! ```
//! use tinycms_search::range::{Handle, RangeConfig, RangeReconciler};
//!
//! let mut price = RangeReconciler::new(0, "price", RangeConfig::new(0, 100));
//! price.focus(Handle::Max);
//! assert!(price.paste(Handle::Max, "150"));
//! assert_eq!(price.state().max, 100);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod choices;
pub mod date_range;
pub mod debounce;
pub mod extract;
pub mod field;
pub mod form;
pub mod layout;
pub mod range;
pub mod results;
pub mod widget;

pub use api::{SearchApi, SearchRequest, SearchResponse, SearchResult};
pub use date_range::{DateRangeError, DateRangePicker};
pub use extract::{SearchPayload, extract};
pub use field::{FieldDescriptor, FieldKind};
pub use form::{Control, ControlKind, FormEntry, FormSnapshot, SearchForm};
pub use layout::{Layout, Placement, compute_layout};
pub use range::{Handle, RangeConfig, RangeReconciler, RangeState};
pub use results::{ResultClick, ResultsPanel};
pub use widget::{SearchConfig, SearchOutcome, SearchWidget};
