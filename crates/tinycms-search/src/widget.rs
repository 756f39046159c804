//! Search widget.
//!
//! One [`SearchWidget`] drives one search form: it loads dynamic field
//! choices, debounces the query input, runs searches, renders the results
//! panel and resets the form.
//!
//! Searches are numbered. When a response arrives after a newer search has
//! started it is discarded, so results never go back in time.

use crate::api::{SearchApi, SearchRequest};
use crate::choices::RadioGroupControl;
use crate::debounce::{DebounceAction, QueryDebounce};
use crate::extract::{SearchPayload, extract};
use crate::field::{FieldDescriptor, FieldKind};
use crate::form::{Control, FormSnapshot, SearchForm};
use crate::range::ResetNotification;
use crate::results::{ResultClick, ResultsPanel, SEARCH_FAILED_MESSAGE};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tinycms_pages::{ConfigError, Dataset, View};

/// Results returned per search unless configured otherwise.
pub const DEFAULT_RESULTS_LIMIT: i64 = 10;

fn default_results_limit() -> i64 {
	DEFAULT_RESULTS_LIMIT
}

/// Configuration of a search form, read from its `data-*` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
	/// Search configuration id (`data-config-id`)
	pub config_id: String,
	/// Content type searched (`data-content-type`)
	#[serde(default)]
	pub content_type_id: String,
	/// Maximum number of results (`data-results-limit`, default 10)
	#[serde(default = "default_results_limit")]
	pub results_limit: i64,
}

impl SearchConfig {
	/// Creates a configuration with the default results limit.
	pub fn new(config_id: impl Into<String>, content_type_id: impl Into<String>) -> Self {
		Self {
			config_id: config_id.into(),
			content_type_id: content_type_id.into(),
			results_limit: DEFAULT_RESULTS_LIMIT,
		}
	}

	/// Reads the configuration from the form's dataset.
	pub fn from_dataset(dataset: &Dataset) -> Result<Self, ConfigError> {
		Ok(Self {
			config_id: dataset.require("config-id")?.to_string(),
			content_type_id: dataset
				.get_non_empty("content-type")
				.unwrap_or_default()
				.to_string(),
			results_limit: dataset.int_or("results-limit", DEFAULT_RESULTS_LIMIT),
		})
	}
}

/// What happened to a search response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
	/// The response (or failure) was rendered
	Rendered,
	/// A newer search started first; the response was dropped
	Discarded,
}

#[derive(Debug)]
struct WidgetState {
	form: SearchForm,
	panel: ResultsPanel,
	debounce: QueryDebounce,
	sequence: u64,
}

/// Behaviour of one search form.
#[derive(Debug)]
pub struct SearchWidget {
	config: SearchConfig,
	api: SearchApi,
	state: Mutex<WidgetState>,
}

impl SearchWidget {
	/// Creates the widget of `form`.
	pub fn new(config: SearchConfig, form: SearchForm, api: SearchApi) -> Self {
		tracing::info!(
			"search widget initialized for config {} with {} fields",
			config.config_id,
			form.fields().len()
		);
		Self {
			config,
			api,
			state: Mutex::new(WidgetState {
				form,
				panel: ResultsPanel::new(),
				debounce: QueryDebounce::default(),
				sequence: 0,
			}),
		}
	}

	/// Widget configuration.
	pub fn config(&self) -> &SearchConfig {
		&self.config
	}

	/// Runs `f` on the form model, e.g. to apply a user edit.
	pub fn update_form<R>(&self, f: impl FnOnce(&mut SearchForm) -> R) -> R {
		f(&mut self.state.lock().form)
	}

	/// Reads the current form entries.
	pub fn snapshot(&self) -> FormSnapshot {
		self.state.lock().form.snapshot()
	}

	/// Builds the payload the next search would send.
	pub fn payload(&self) -> SearchPayload {
		extract(&self.snapshot())
	}

	/// Loads the choices of every select and radio field with a field id.
	///
	/// Failed loads and empty choice lists leave the field untouched.
	/// Returns how many fields were populated.
	pub async fn load_choices(&self) -> usize {
		let fields: Vec<FieldDescriptor> = self
			.state
			.lock()
			.form
			.fields()
			.iter()
			.filter(|f| f.has_dynamic_choices())
			.cloned()
			.collect();

		let mut populated = 0;
		for field in fields {
			let Some(field_id) = field.field_id.as_deref() else {
				continue;
			};
			let response = match self.api.field_choices(&self.config.config_id, field_id).await {
				Ok(response) => response,
				Err(e) => {
					tracing::warn!("Failed to load choices for field {}: {}", field.name, e);
					continue;
				}
			};
			if !response.success || response.choices.is_empty() {
				tracing::debug!("no choices for field {}", field.name);
				continue;
			}

			let mut state = self.state.lock();
			match field.kind {
				FieldKind::Select => match state.form.select_mut(&field.name) {
					Some(select) => select.populate(&response.choices, &field.selected),
					None => {
						tracing::warn!("Select for field {} not found", field.name);
						continue;
					}
				},
				FieldKind::Radio => match state.form.radio_group_mut(&field.name) {
					Some(group) => group.populate(&response.choices),
					None => {
						let mut group =
							RadioGroupControl::new(&field.name, field_id, field.label.clone());
						group.populate(&response.choices);
						state.form.push_control(Control::RadioGroup(group));
					}
				},
				_ => continue,
			}
			populated += 1;
		}
		populated
	}

	/// Records a keystroke in the main query input.
	pub fn on_query_input(&self, query: &str, now_ms: u64) {
		self.state.lock().debounce.input(query, now_ms);
	}

	/// When the pending auto-search is due, if any.
	pub fn next_poll_at(&self) -> Option<u64> {
		self.state.lock().debounce.due_at()
	}

	/// Fires the auto-search debounce if it is due.
	///
	/// A long enough query runs a search; a short one hides the results.
	pub async fn poll(&self, now_ms: u64) -> Option<SearchOutcome> {
		let action = self.state.lock().debounce.poll(now_ms)?;
		match action {
			DebounceAction::Search => Some(self.perform_search().await),
			DebounceAction::Hide => {
				self.state.lock().panel.hide();
				None
			}
		}
	}

	/// Runs a search with the current form values.
	pub async fn perform_search(&self) -> SearchOutcome {
		let (sequence, request) = {
			let mut state = self.state.lock();
			state.sequence += 1;
			state.panel.start_loading();
			let request = SearchRequest {
				config_id: self.config.config_id.clone(),
				content_type_id: self.config.content_type_id.clone(),
				search_data: extract(&state.form.snapshot()),
				limit: self.config.results_limit,
			};
			(state.sequence, request)
		};
		tracing::debug!("search #{} with {} fields", sequence, request.search_data.len());

		let result = self.api.search(&request).await;

		let mut state = self.state.lock();
		if state.sequence != sequence {
			tracing::debug!("discarded stale response of search #{}", sequence);
			return SearchOutcome::Discarded;
		}
		match result {
			Ok(response) => state.panel.show_response(response),
			Err(e) => {
				tracing::warn!("Search failed: {}", e);
				state.panel.show_error(SEARCH_FAILED_MESSAGE);
			}
		}
		SearchOutcome::Rendered
	}

	/// Current results panel.
	pub fn panel(&self) -> ResultsPanel {
		self.state.lock().panel.clone()
	}

	/// Renders the results list.
	pub fn render_results(&self) -> View {
		self.state.lock().panel.render()
	}

	/// Resets the form and hides the results.
	///
	/// A search still in flight is discarded when it completes.
	pub fn clear(&self) -> Vec<ResetNotification> {
		let mut state = self.state.lock();
		state.sequence += 1;
		state.debounce.cancel();
		state.panel.clear();
		state.form.clear()
	}

	/// Prepares a native submission: sliders left at their limits are not
	/// submitted. Returns how many sliders were blanked.
	pub fn prepare_submit(&self) -> usize {
		self.state.lock().form.normalize_ranges_for_submit()
	}

	/// Handles a click on the hit at `index`.
	pub fn click_result(&self, index: usize) -> Option<ResultClick> {
		let state = self.state.lock();
		let item = state.panel.item(index)?;
		tracing::debug!("result {} clicked", item.id_text());
		Some(ResultClick {
			id: item.id.clone(),
			content_type: item.content_type.clone(),
			object: item.clone(),
			config_id: self.config.config_id.clone(),
		})
	}

	/// Handles the "Show all" button; returns the listed search's id.
	pub fn show_all(&self) -> Option<Value> {
		let search_id = self.state.lock().panel.search_id().cloned();
		tracing::debug!("show all requested for search {:?}", search_id);
		search_id
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_config_from_dataset() {
		let dataset = Dataset::new()
			.with("config-id", "3")
			.with("content-type", "12")
			.with("results-limit", "25");

		assert_eq!(
			SearchConfig::from_dataset(&dataset),
			Ok(SearchConfig {
				config_id: "3".to_string(),
				content_type_id: "12".to_string(),
				results_limit: 25,
			})
		);
	}

	#[rstest]
	fn test_config_defaults() {
		let dataset = Dataset::new().with("config-id", "3").with("results-limit", "many");

		let config = SearchConfig::from_dataset(&dataset).unwrap();

		assert_eq!(config.results_limit, DEFAULT_RESULTS_LIMIT);
		assert_eq!(config.content_type_id, "");
		assert!(SearchConfig::from_dataset(&Dataset::new()).is_err());
	}
}
