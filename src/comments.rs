//! Comment and rating widget
//!
//! Re-exports tinycms-comments: configuration, the endpoint client,
//! validation, star rendering and the widget state.

pub use tinycms_comments::*;
