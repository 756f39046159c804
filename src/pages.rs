//! Shared widget plumbing
//!
//! This module provides access to tinycms-pages: the typed view tree the
//! widgets render into, CSRF token handling, `data-*` configuration access,
//! the HTTP transport and inline messages.
//!
//! ## Example
//!
//! ```
//! use tinycms::pages::{CsrfManager, Dataset};
//!
//! let csrf = CsrfManager::from_cookie_header("csrftoken=abc");
//! assert_eq!(csrf.token().as_deref(), Some("abc"));
//!
//! let dataset = Dataset::from_attributes([("data-config-id", "7")]);
//! assert_eq!(dataset.require("config-id"), Ok("7"));
//! ```

pub use tinycms_pages::*;
