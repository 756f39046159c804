//! Search results panel.

use crate::api::{SearchResponse, SearchResult};
use serde::Serialize;
use serde_json::Value;
use tinycms_pages::{IntoView, View};

/// Alert shown when a search fails.
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed";

/// Alert shown when a search matches nothing.
pub const NOTHING_FOUND_MESSAGE: &str = "Nothing found";

/// What the panel currently lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelContent {
	/// Nothing rendered yet
	#[default]
	Empty,
	/// A failed search
	Error(String),
	/// A search without hits
	NothingFound,
	/// Hits of a search
	Results {
		/// Hits in rank order
		items: Vec<SearchResult>,
		/// Total number of hits
		total: u64,
		/// Whether the total is shown
		show_count: bool,
		/// Whether a "Show all" button is offered
		has_more: bool,
		/// Server-side id of the search
		search_id: Option<Value>,
	},
}

/// Published when the user clicks a hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultClick {
	/// Object id
	pub id: Value,
	/// Content type of the object
	pub content_type: Value,
	/// The whole hit
	pub object: SearchResult,
	/// Search configuration id
	pub config_id: String,
}

impl ResultClick {
	/// Name of the event dispatched on the form.
	pub const EVENT_NAME: &'static str = "search-result-click";

	/// Page to open after the event, if the hit has one.
	pub fn navigate_to(&self) -> Option<&str> {
		self.object.url.as_deref().filter(|url| !url.is_empty())
	}
}

/// State of the results panel below a search form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsPanel {
	/// Whether the panel is shown
	pub visible: bool,
	/// Whether the loading indicator is shown
	pub loading: bool,
	/// Rendered content
	pub content: PanelContent,
}

impl ResultsPanel {
	/// Creates a hidden, empty panel.
	pub fn new() -> Self {
		Self::default()
	}

	/// Shows the panel with its loading indicator.
	pub fn start_loading(&mut self) {
		self.visible = true;
		self.loading = true;
	}

	/// Renders a search response.
	pub fn show_response(&mut self, response: SearchResponse) {
		self.loading = false;
		self.content = if !response.success {
			PanelContent::Error(
				response
					.message
					.filter(|m| !m.is_empty())
					.unwrap_or_else(|| SEARCH_FAILED_MESSAGE.to_string()),
			)
		} else if response.results.is_empty() {
			PanelContent::NothingFound
		} else {
			PanelContent::Results {
				items: response.results,
				total: response.total,
				show_count: response.show_count,
				has_more: response.has_more,
				search_id: response.search_id,
			}
		};
	}

	/// Renders a failure.
	pub fn show_error(&mut self, message: impl Into<String>) {
		self.loading = false;
		self.content = PanelContent::Error(message.into());
	}

	/// Hides the panel, keeping its content.
	pub fn hide(&mut self) {
		self.visible = false;
	}

	/// Hides the panel and drops its content.
	pub fn clear(&mut self) {
		self.visible = false;
		self.loading = false;
		self.content = PanelContent::Empty;
	}

	/// Returns the hit at `index`.
	pub fn item(&self, index: usize) -> Option<&SearchResult> {
		match &self.content {
			PanelContent::Results { items, .. } => items.get(index),
			_ => None,
		}
	}

	/// Server-side id of the listed search, for "Show all".
	pub fn search_id(&self) -> Option<&Value> {
		match &self.content {
			PanelContent::Results { search_id, .. } => search_id.as_ref(),
			_ => None,
		}
	}

	/// Renders the list content.
	pub fn render(&self) -> View {
		match &self.content {
			PanelContent::Empty => View::empty(),
			PanelContent::Error(message) => alert("alert alert-danger m-2", message.clone()),
			PanelContent::NothingFound => alert("alert alert-info m-2", NOTHING_FOUND_MESSAGE),
			PanelContent::Results {
				items,
				total,
				show_count,
				has_more,
				..
			} => {
				let count = show_count.then(|| {
					View::element("div")
						.attr("class", "search-results-count p-2 border-bottom")
						.child(
							View::element("small")
								.attr("class", "text-muted")
								.child(format!("Found: {total}")),
						)
				});
				let show_all = has_more.then(|| {
					View::element("button")
						.attr("class", "btn btn-link btn-sm w-100 text-center")
						.attr("type", "button")
						.child("Show all...")
				});
				View::fragment([
					count.into_view(),
					View::fragment(items.iter().enumerate().map(|(i, item)| render_item(i, item))),
					show_all.into_view(),
				])
			}
		}
	}
}

fn alert(class: &'static str, message: impl Into<String>) -> View {
	View::element("div")
		.attr("class", class)
		.child(message.into())
		.into()
}

fn render_item(index: usize, item: &SearchResult) -> View {
	let content_type = match &item.content_type {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	};
	let description = item
		.description
		.as_deref()
		.filter(|d| !d.is_empty())
		.map(|d| {
			View::element("div")
				.attr("class", "small text-muted")
				.child(d.to_string())
		});

	View::element("div")
		.attr("class", "search-result-item")
		.attr("data-object-id", item.id_text())
		.attr("data-object-type", content_type)
		.attr("data-index", index.to_string())
		.child(
			View::element("div")
				.attr("class", "d-flex justify-content-between align-items-center")
				.child(
					View::element("div")
						.child(View::element("strong").child(item.display_title()))
						.child(description),
				)
				.child(
					View::element("span")
						.attr("class", "badge bg-secondary")
						.child(format!("ID: {}", item.id_text())),
				),
		)
		.into()
}
