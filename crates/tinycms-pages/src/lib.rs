//! tinycms Pages - shared plumbing for the site widgets
//!
//! The search and comments widgets are plain state objects. They never touch
//! the DOM directly: a host feeds events in and applies the views they
//! publish. This crate holds what both widgets share.
//!
//! ## Architecture
//!
//! - [`view`]: Typed view tree with escaping HTML rendering
//! - [`csrf`]: CSRF token lookup from the `csrftoken` cookie
//! - [`dataset`]: Typed access to `data-*` attribute maps
//! - [`number`]: Browser-compatible number parsing
//! - [`transport`]: HTTP transport abstraction and its `reqwest` implementation
//! - [`messages`]: Inline, de-duplicated widget messages
//! - [`error`]: API and configuration errors
//!
//! ## Example
//!
//! ```
//! use tinycms_pages::view::View;
//!
//! let alert = View::element("div")
//! 	.attr("class", "alert alert-info")
//! 	.child("<nothing found>");
//!
//! assert_eq!(
//! 	View::from(alert).render_to_string(),
//! 	"<div class=\"alert alert-info\">&lt;nothing found&gt;</div>"
//! );
//! ```

#![warn(missing_docs)]

pub mod csrf;
pub mod dataset;
pub mod error;
pub mod messages;
pub mod number;
pub mod transport;
pub mod view;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use csrf::{CSRF_COOKIE_NAME, CSRF_FORM_FIELD, CSRF_HEADER_NAME, CsrfManager};
pub use dataset::Dataset;
pub use error::{ApiError, ConfigError};
pub use messages::{Message, MessageKind, MessageStack};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, RequestBody, ReqwestTransport};
pub use view::{ElementView, IntoView, View};
