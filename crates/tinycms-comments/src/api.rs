//! Comments endpoint client.
//!
//! Endpoints, relative to the configured base path:
//!
//! - `GET stats/{content_type_id}/{object_id}/` rating statistics,
//! - `GET list/{content_type_id}/{object_id}/?page&per_page&sort&filter`
//!   one page of approved comments,
//! - `POST submit/{content_type_id}/{object_id}/` a new comment,
//!   form-encoded with the CSRF token as `csrfmiddlewaretoken`,
//! - `POST admin/{comment_id}/` a staff moderation action.
//!
//! The backend reports rejected submissions as JSON with a 4xx status, so
//! those bodies are decoded rather than turned into errors.

use crate::config::{CommentFilter, CommentsConfig, SortOrder};
use crate::validation::CommentDraft;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tinycms_pages::{ApiError, ApiRequest, ApiResponse, CsrfManager, HttpTransport};

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(s) => Ok(s),
		Value::Number(n) => Ok(n.to_string()),
		other => Err(de::Error::custom(format!("expected an id, got {other}"))),
	}
}

/// Rating statistics of the commented object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
	/// Number of approved comments
	#[serde(default)]
	pub total: u64,
	/// Average rating, 0 without comments
	#[serde(default)]
	pub average_rating: Option<f64>,
	/// Comment count per star, keyed `"1"` to `"5"`
	#[serde(default)]
	pub ratings_distribution: BTreeMap<String, u64>,
	/// Comments with an administrator reply
	#[serde(default)]
	pub with_replies: u64,
	/// Verified comments
	#[serde(default)]
	pub verified: u64,
}

impl Statistics {
	/// Comments rated `stars`.
	pub fn count(&self, stars: u8) -> u64 {
		self.ratings_distribution
			.get(&stars.to_string())
			.copied()
			.unwrap_or(0)
	}

	/// Share of comments rated `stars`, in percent of the total.
	pub fn percentage(&self, stars: u8) -> f64 {
		if self.total == 0 {
			return 0.0;
		}
		self.count(stars) as f64 / self.total as f64 * 100.0
	}
}

/// Response of the statistics endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsResponse {
	/// Whether the object was found
	pub success: bool,
	/// Statistics on success
	#[serde(default)]
	pub statistics: Option<Statistics>,
	/// Error text on failure
	#[serde(default)]
	pub error: Option<String>,
}

/// Who wrote a comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
	/// Site staff
	Staff,
	/// Signed-in visitor
	Authenticated,
	/// Anonymous visitor
	#[default]
	#[serde(other)]
	Anonymous,
}

/// One comment as listed or returned after submission.
///
/// A freshly submitted comment carries only some of the fields; the rest
/// take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
	/// Comment id
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	/// Display name of the author
	#[serde(default)]
	pub name: String,
	/// Author e-mail
	#[serde(default)]
	pub email: Option<String>,
	/// Comment text
	#[serde(default)]
	pub text: String,
	/// Rating, 1 to 5
	#[serde(default)]
	pub rating: u8,
	/// Human readable rating
	#[serde(default)]
	pub rating_display: Option<String>,
	/// Creation time, preformatted by the backend
	#[serde(default)]
	pub created_at: String,
	/// Whether the author stayed anonymous
	#[serde(default)]
	pub is_anonymous: bool,
	/// Whether staff verified the comment
	#[serde(default)]
	pub is_verified: bool,
	/// Whether an administrator answered
	#[serde(default)]
	pub has_admin_reply: bool,
	/// The administrator's answer
	#[serde(default)]
	pub admin_reply: Option<String>,
	/// Answer time, preformatted by the backend
	#[serde(default)]
	pub replied_at: Option<String>,
	/// Author category
	#[serde(default)]
	pub user_type: UserType,
	/// Whether the visitor may answer
	#[serde(default)]
	pub can_reply: bool,
	/// Moderation status
	#[serde(default)]
	pub status: Option<String>,
}

/// Pagination of a comment list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	/// Page returned, 1-based
	#[serde(default)]
	pub current_page: u32,
	/// Number of pages
	#[serde(default)]
	pub total_pages: u32,
	/// Number of comments over all pages
	#[serde(default)]
	pub total_items: u64,
	/// Whether another page follows
	#[serde(default)]
	pub has_next: bool,
	/// Whether a page precedes
	#[serde(default)]
	pub has_previous: bool,
}

/// The visitor's own comment on the object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserComment {
	/// Comment id
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	/// Rating given
	#[serde(default)]
	pub rating: u8,
	/// Comment text
	#[serde(default)]
	pub text: String,
	/// Moderation status
	#[serde(default)]
	pub status: Option<String>,
	/// Whether an administrator answered
	#[serde(default)]
	pub has_admin_reply: bool,
	/// The administrator's answer
	#[serde(default)]
	pub admin_reply: Option<String>,
}

/// Query of the list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListQuery {
	/// Page, 1-based
	pub page: u32,
	/// Comments per page
	pub per_page: u32,
	/// Order
	pub sort: SortOrder,
	/// Subset
	pub filter: CommentFilter,
}

/// Response of the list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListResponse {
	/// Whether the page exists
	pub success: bool,
	/// Comments of the page
	#[serde(default)]
	pub comments: Vec<Comment>,
	/// Pagination
	#[serde(default)]
	pub pagination: Pagination,
	/// Statistics of the object
	#[serde(default)]
	pub statistics: Option<Statistics>,
	/// The visitor's own comment
	#[serde(default)]
	pub user_comment: Option<UserComment>,
	/// Error text on failure
	#[serde(default)]
	pub error: Option<String>,
}

/// Response of the submit and moderation endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitResponse {
	/// Whether the action was accepted
	pub success: bool,
	/// Confirmation text
	#[serde(default)]
	pub message: Option<String>,
	/// Field errors, field name to messages
	#[serde(default)]
	pub errors: Option<Map<String, Value>>,
	/// General error text
	#[serde(default)]
	pub error: Option<String>,
	/// Updated statistics
	#[serde(default)]
	pub statistics: Option<Statistics>,
	/// The stored comment
	#[serde(default)]
	pub comment: Option<Comment>,
	/// Whether the comment waits for moderation
	#[serde(default)]
	pub requires_moderation: bool,
}

/// Shown when a rejection carries no readable error.
pub const GENERIC_SUBMIT_ERROR: &str = "The comment could not be saved";

impl SubmitResponse {
	/// Flattens the rejection into user-facing messages.
	///
	/// Field errors come first, in the order the backend sent them, then the
	/// general error.
	pub fn error_messages(&self) -> Vec<String> {
		let mut messages = Vec::new();
		if let Some(errors) = &self.errors {
			for value in errors.values() {
				match value {
					Value::Array(items) => messages.extend(items.iter().filter_map(message_text)),
					other => messages.extend(message_text(other)),
				}
			}
		}
		if let Some(error) = self.error.as_ref().filter(|e| !e.is_empty()) {
			messages.push(error.clone());
		}
		if messages.is_empty() {
			messages.push(GENERIC_SUBMIT_ERROR.to_string());
		}
		messages
	}
}

fn message_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Object(map) => map.get("message").and_then(Value::as_str).map(str::to_string),
		Value::Null => None,
		other => Some(other.to_string()),
	}
}

/// Staff moderation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
	/// Store an administrator reply
	Reply(String),
	/// Approve the comment
	Approve,
	/// Reject the comment
	Reject,
	/// Mark the comment verified
	Verify,
}

impl ModerationAction {
	/// Value of the `action` form field.
	pub fn as_str(&self) -> &'static str {
		match self {
			ModerationAction::Reply(_) => "reply",
			ModerationAction::Approve => "approve",
			ModerationAction::Reject => "reject",
			ModerationAction::Verify => "verify",
		}
	}

	fn form_fields(&self) -> Vec<(String, String)> {
		let mut fields = vec![("action".to_string(), self.as_str().to_string())];
		if let ModerationAction::Reply(reply) = self {
			fields.push(("admin_reply".to_string(), reply.clone()));
		}
		fields
	}
}

/// Client of the comments endpoints of one object.
#[derive(Clone)]
pub struct CommentsApi {
	transport: Arc<dyn HttpTransport>,
	csrf: CsrfManager,
	config: CommentsConfig,
}

impl std::fmt::Debug for CommentsApi {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CommentsApi")
			.field("csrf", &self.csrf)
			.field("config", &self.config)
			.finish()
	}
}

impl CommentsApi {
	/// Creates a client for the object named by `config`.
	pub fn new(transport: Arc<dyn HttpTransport>, csrf: CsrfManager, config: CommentsConfig) -> Self {
		Self {
			transport,
			csrf,
			config,
		}
	}

	/// Loads the rating statistics.
	pub async fn statistics(&self) -> Result<StatsResponse, ApiError> {
		let response = self.transport.send(ApiRequest::get(self.config.stats_url())).await?;
		decode(&response)
	}

	/// Loads one page of comments.
	pub async fn list(&self, query: &ListQuery) -> Result<ListResponse, ApiError> {
		let params = serde_urlencoded::to_string(query)
			.map_err(|e| ApiError::serialization(e.to_string()))?;
		let url = format!("{}?{}", self.config.list_url(), params);
		let response = self.transport.send(ApiRequest::get(url)).await?;
		decode(&response)
	}

	/// Posts a new comment.
	pub async fn submit(&self, draft: &CommentDraft) -> Result<SubmitResponse, ApiError> {
		let mut fields = draft.form_fields();
		if let Some((name, token)) = self.csrf.form_field() {
			fields.push((name.to_string(), token));
		}
		self.post_form(self.config.submit_url(), fields).await
	}

	/// Posts a moderation action on a comment.
	pub async fn moderate(
		&self,
		comment_id: &str,
		action: &ModerationAction,
	) -> Result<SubmitResponse, ApiError> {
		let mut fields = action.form_fields();
		if let Some((name, token)) = self.csrf.form_field() {
			fields.push((name.to_string(), token));
		}
		self.post_form(self.config.admin_url(comment_id), fields).await
	}

	async fn post_form(
		&self,
		url: String,
		fields: Vec<(String, String)>,
	) -> Result<SubmitResponse, ApiError> {
		let request =
			ApiRequest::post_form(url, fields).header("X-Requested-With", "XMLHttpRequest");
		let response = self.transport.send(request).await?;
		decode(&response)
	}
}

/// Decodes a JSON body of any status; a body that is not JSON is a
/// transport-level failure reported by status.
fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ApiError> {
	match response.json::<T>() {
		Ok(value) => Ok(value),
		Err(_) if !response.is_success() => {
			Err(ApiError::server(response.status, response.body.clone()))
		}
		Err(e) => Err(e),
	}
}
