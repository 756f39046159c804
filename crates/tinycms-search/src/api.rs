//! Search endpoint client.
//!
//! Two endpoints back the search widget:
//!
//! - `GET /search/api/field-choices/{config_id}/{field_id}/` lists the
//!   choices of a select or radio field,
//! - `POST /search/api/search/` runs a search from a JSON body and expects
//!   the CSRF token in the `X-CSRFToken` header.

use crate::choices::Choice;
use crate::extract::SearchPayload;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tinycms_pages::{ApiError, ApiRequest, CsrfManager, HttpTransport};

/// Path of the search endpoint.
pub const SEARCH_URL: &str = "/search/api/search/";

/// Path of the field-choices endpoint for a field.
pub fn field_choices_url(config_id: &str, field_id: &str) -> String {
	format!("/search/api/field-choices/{config_id}/{field_id}/")
}

/// Response of the field-choices endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldChoicesResponse {
	/// Whether the backend found the field
	pub success: bool,
	/// Choices of the field
	#[serde(default)]
	pub choices: Vec<Choice>,
}

/// Body of a search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
	/// Search configuration id
	pub config_id: String,
	/// Content type searched
	pub content_type_id: String,
	/// Extracted form values
	pub search_data: SearchPayload,
	/// Maximum number of results
	pub limit: i64,
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
	/// Object id (number or string)
	pub id: Value,
	/// Content type of the object
	#[serde(default)]
	pub content_type: Value,
	/// Display title
	#[serde(default)]
	pub title: Option<String>,
	/// Short description
	#[serde(default)]
	pub description: Option<String>,
	/// Detail page of the object
	#[serde(default)]
	pub url: Option<String>,
	/// Any other attribute the backend sends
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl SearchResult {
	/// The id as displayed: strings unquoted, numbers as written.
	pub fn id_text(&self) -> String {
		match &self.id {
			Value::String(s) => s.clone(),
			other => other.to_string(),
		}
	}

	/// Title, falling back to `Object #<id>`.
	pub fn display_title(&self) -> String {
		match self.title.as_deref() {
			Some(title) if !title.is_empty() => title.to_string(),
			_ => format!("Object #{}", self.id_text()),
		}
	}
}

/// Response of the search endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
	/// Whether the search ran
	pub success: bool,
	/// Error text when `success` is false
	#[serde(default)]
	pub message: Option<String>,
	/// Hits, at most `limit`
	#[serde(default)]
	pub results: Vec<SearchResult>,
	/// Total number of hits
	#[serde(default)]
	pub total: u64,
	/// Whether more hits exist than were returned
	#[serde(default)]
	pub has_more: bool,
	/// Whether to show the hit count
	#[serde(default)]
	pub show_count: bool,
	/// Server-side id of the search
	#[serde(default)]
	pub search_id: Option<Value>,
}

/// Client of the search endpoints.
#[derive(Clone)]
pub struct SearchApi {
	transport: Arc<dyn HttpTransport>,
	csrf: CsrfManager,
}

impl std::fmt::Debug for SearchApi {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SearchApi").field("csrf", &self.csrf).finish()
	}
}

impl SearchApi {
	/// Creates a client.
	pub fn new(transport: Arc<dyn HttpTransport>, csrf: CsrfManager) -> Self {
		Self { transport, csrf }
	}

	/// Loads the choices of a field.
	///
	/// Non-2xx statuses are errors; a `success: false` body is returned as is.
	pub async fn field_choices(
		&self,
		config_id: &str,
		field_id: &str,
	) -> Result<FieldChoicesResponse, ApiError> {
		let request = ApiRequest::get(field_choices_url(config_id, field_id));
		let response = self.transport.send(request).await?;
		response.success_json()
	}

	/// Runs a search.
	pub async fn search(&self, body: &SearchRequest) -> Result<SearchResponse, ApiError> {
		let body = serde_json::to_value(body).map_err(|e| ApiError::serialization(e.to_string()))?;
		let mut request = ApiRequest::post_json(SEARCH_URL, body);
		// The endpoint expects the header even when no token is known.
		let token = self.csrf.header().map(|(_, token)| token).unwrap_or_default();
		request = request.header(tinycms_pages::CSRF_HEADER_NAME, token);

		let response = self.transport.send(request).await?;
		response.success_json()
	}
}
