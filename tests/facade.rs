//! Facade smoke tests
//!
//! Builds both widgets through the `tinycms` re-exports from the `data-*`
//! attributes a page would carry.

use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use tinycms::comments::{CommentDraft, CommentsApi, CommentsConfig, CommentsWidget, LoadOutcome};
use tinycms::pages::testing::FakeTransport;
use tinycms::pages::{CsrfManager, Dataset};
use tinycms::search::field::{FieldDescriptor, FieldKind};
use tinycms::search::form::{Control, ControlKind, InputControl, SearchForm};
use tinycms::search::{SearchApi, SearchConfig, SearchWidget};

#[rstest]
#[tokio::test]
async fn test_comments_widget_from_dataset() {
	let dataset = Dataset::from_attributes([
		("class", "comments-widget"),
		("data-content-type-id", "3"),
		("data-object-id", "8"),
		("data-has-rating", "false"),
	]);
	let config = CommentsConfig::from_dataset(&dataset).unwrap();
	let transport = Arc::new(FakeTransport::new().respond(
		"/comments/list/3/8/",
		200,
		json!({"success": true, "comments": [], "pagination": {"current_page": 1, "total_pages": 1}}),
	));
	let api = CommentsApi::new(transport, CsrfManager::new(), config.clone());
	let widget = CommentsWidget::new(config, api, CommentDraft::new());

	assert_eq!(widget.load_comments(true).await, LoadOutcome::Loaded);
	assert!(widget.render_list().render_to_string().contains("empty-state"));
}

#[rstest]
#[tokio::test]
async fn test_search_widget_from_dataset() {
	let dataset = Dataset::from_attributes([("data-config-id", "5"), ("data-content-type", "2")]);
	let config = SearchConfig::from_dataset(&dataset).unwrap();
	let form = SearchForm::new()
		.with_field(FieldDescriptor::new("q", FieldKind::Text))
		.with_control(Control::Input(InputControl::new("q", ControlKind::Search, "desk")));
	let transport = Arc::new(FakeTransport::new());
	let widget = SearchWidget::new(config, form, SearchApi::new(transport, CsrfManager::new()));

	assert_eq!(widget.payload().into_value(), json!({"q": "desk"}));
}
