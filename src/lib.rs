//! # tinycms
//!
//! Browser-side widgets of a tinycms site, written as plain state objects.
//!
//! A host (a WASM glue layer or a test) collects each widget container's
//! `data-*` attributes, feeds user events into the widget and applies the
//! views it renders. Widgets talk to the backend through an
//! [`pages::HttpTransport`]; [`pages::ReqwestTransport`] is the network
//! implementation.
//!
//! ## Feature Flags
//!
//! - `search` - Faceted search widget ([`search`])
//! - `comments` - Comment and rating widget ([`comments`])
//! - `full` (default) - Both widgets
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tinycms::comments::{CommentDraft, CommentsApi, CommentsConfig, CommentsWidget};
//! use tinycms::pages::{CsrfManager, Dataset, ReqwestTransport};
//!
//! let dataset = Dataset::from_attributes(container_attributes);
//! let config = CommentsConfig::from_dataset(&dataset)?;
//! let api = CommentsApi::new(
//!     Arc::new(ReqwestTransport::new("https://example.com")),
//!     CsrfManager::from_cookie_header(&document_cookie),
//!     config.clone(),
//! );
//! let widget = CommentsWidget::new(config, api, CommentDraft::new());
//! widget.start().await;
//! let list_html = widget.render_list().render_to_string();
//! ```

pub mod pages;

#[cfg(feature = "comments")]
pub mod comments;
#[cfg(feature = "search")]
pub mod search;

pub use tinycms_pages::{ApiError, ConfigError, CsrfManager, Dataset, View};
