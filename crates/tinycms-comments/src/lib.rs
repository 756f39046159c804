//! tinycms Comments - comment and rating widget
//!
//! Each comments block on a page gets its own [`CommentsWidget`]. It loads
//! the rating statistics and pages of approved comments, lets the visitor
//! sort and filter them, and validates and posts new comments.
//!
//! ## Architecture
//!
//! - [`config`]: Widget configuration, sort orders and filters
//! - [`api`]: Client of the comments endpoints and their response types
//! - [`validation`]: Comment form values, validation and character counter
//! - [`stars`]: Star rendering and the interactive star picker
//! - [`render`]: Statistics, comment and placeholder markup
//! - [`widget`]: The widget state machine
//!
//! ## Example
//!
//! ```
//! use tinycms_comments::validation::{CommentDraft, RATING_REQUIRED_MESSAGE};
//!
//! let draft = CommentDraft::new().with_text("Bright and quiet, recommended");
//! let errors = draft.validate().unwrap_err();
//! assert_eq!(errors.messages(), [RATING_REQUIRED_MESSAGE]);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod render;
pub mod stars;
pub mod validation;
pub mod widget;

pub use api::{Comment, CommentsApi, ModerationAction, Pagination, Statistics, UserType};
pub use config::{CommentFilter, CommentsConfig, SortOrder};
pub use stars::StarSelector;
pub use validation::{CharCounter, CommentDraft, ValidationErrors};
pub use widget::{CommentsWidget, ListContent, LoadOutcome, SubmitOutcome};
