//! Comments widget.
//!
//! A [`CommentsWidget`] owns the state of one comments block: the loaded
//! comments and their pagination, the active sort and filter, the rating
//! statistics, the comment form and the messages shown to the visitor.
//!
//! Only one list load runs at a time. Loading, paging, sorting and
//! filtering while a load is in flight are no-ops reported as
//! [`LoadOutcome::Skipped`].

use crate::api::{
	Comment, CommentsApi, ListQuery, ModerationAction, Pagination, Statistics, UserComment,
};
use crate::config::{CommentFilter, CommentsConfig, SortOrder};
use crate::render;
use crate::stars::StarSelector;
use crate::validation::{CharCounter, CommentDraft, DEFAULT_MAX_LENGTH, ValidationErrors};
use parking_lot::Mutex;
use tinycms_pages::{MessageKind, MessageStack, View};

/// Shown in the form when the submit request fails to reach the server.
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error. Please try again later.";

/// Result of a list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
	/// The page was loaded and rendered
	Loaded,
	/// Nothing happened: a load was in flight or nothing changed
	Skipped,
	/// The request failed
	Failed,
}

/// Result of a comment submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// The comment was stored
	Submitted,
	/// The form is invalid; nothing was sent
	Invalid(ValidationErrors),
	/// The server rejected the comment
	Rejected(Vec<String>),
	/// The request failed
	Failed,
	/// A submission is already in flight
	Skipped,
}

/// What the comment list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListContent {
	/// The loaded comments
	Comments,
	/// The "no comments yet" placeholder
	Empty,
	/// The load failure placeholder
	Error,
}

#[derive(Debug)]
struct WidgetState {
	current_page: u32,
	sort: SortOrder,
	filter: CommentFilter,
	has_more: bool,
	is_loading: bool,
	comments: Vec<Comment>,
	list: ListContent,
	pagination: Pagination,
	statistics: Option<Statistics>,
	user_comment: Option<UserComment>,
	has_rating: bool,
	messages: MessageStack,
	form_messages: MessageStack,
	draft: CommentDraft,
	stars: StarSelector,
	submitting: bool,
	modal_open: bool,
	form_visible: bool,
}

/// Behaviour of one comments block.
#[derive(Debug)]
pub struct CommentsWidget {
	config: CommentsConfig,
	api: CommentsApi,
	state: Mutex<WidgetState>,
}

impl CommentsWidget {
	/// Creates the widget. `draft` carries the form's initial values.
	pub fn new(config: CommentsConfig, api: CommentsApi, draft: CommentDraft) -> Self {
		tracing::info!(
			"comments widget initialized for object {}/{}",
			config.content_type_id,
			config.object_id
		);
		let state = WidgetState {
			current_page: 1,
			sort: SortOrder::default(),
			filter: CommentFilter::default(),
			has_more: true,
			is_loading: false,
			comments: Vec::new(),
			list: ListContent::Comments,
			pagination: Pagination::default(),
			statistics: None,
			user_comment: None,
			has_rating: config.has_rating,
			messages: MessageStack::new(),
			form_messages: MessageStack::new(),
			draft,
			stars: StarSelector::new(),
			submitting: false,
			modal_open: false,
			form_visible: false,
		};
		Self {
			config,
			api,
			state: Mutex::new(state),
		}
	}

	/// Widget configuration.
	pub fn config(&self) -> &CommentsConfig {
		&self.config
	}

	/// Loads the statistics and the first page when auto-loading is on.
	pub async fn start(&self) {
		if !self.config.auto_load {
			return;
		}
		self.load_statistics().await;
		self.load_comments(true).await;
	}

	/// Loads the rating statistics. Returns whether they were updated.
	pub async fn load_statistics(&self) -> bool {
		if !self.config.show_stats {
			return false;
		}
		match self.api.statistics().await {
			Ok(response) if response.success => match response.statistics {
				Some(stats) => {
					self.state.lock().statistics = Some(stats);
					true
				}
				None => false,
			},
			Ok(response) => {
				tracing::warn!(
					"Statistics unavailable: {}",
					response.error.unwrap_or_default()
				);
				false
			}
			Err(e) => {
				tracing::warn!("Error loading statistics: {}", e);
				false
			}
		}
	}

	/// Loads the current page of comments.
	///
	/// With `clear` the list is emptied first and the page replaces it;
	/// otherwise the page is appended. A failed clearing load shows the
	/// error placeholder.
	pub async fn load_comments(&self, clear: bool) -> LoadOutcome {
		let query = {
			let mut state = self.state.lock();
			if state.is_loading {
				tracing::debug!("comments load skipped: another load is in flight");
				return LoadOutcome::Skipped;
			}
			state.is_loading = true;
			if clear {
				state.comments.clear();
				state.list = ListContent::Comments;
				state.has_more = true;
			}
			ListQuery {
				page: state.current_page,
				per_page: self.config.items_per_page,
				sort: state.sort,
				filter: state.filter,
			}
		};
		let _loading = scopeguard::guard(&self.state, |state| state.lock().is_loading = false);
		tracing::debug!(
			"loading comments page {} ({}, {})",
			query.page,
			query.sort,
			query.filter
		);

		let result = self.api.list(&query).await;

		let mut state = self.state.lock();
		match result {
			Ok(response) if response.success => {
				if !response.comments.is_empty() {
					state.comments.extend(response.comments);
					state.list = ListContent::Comments;
				} else if clear {
					state.list = ListContent::Empty;
				}
				state.has_more = response.pagination.has_next;
				state.pagination = response.pagination;
				if response.user_comment.is_some() {
					state.user_comment = response.user_comment;
				}
				LoadOutcome::Loaded
			}
			Ok(response) => {
				tracing::warn!(
					"Comments unavailable: {}",
					response.error.unwrap_or_default()
				);
				if clear {
					state.list = ListContent::Error;
				}
				LoadOutcome::Failed
			}
			Err(e) => {
				tracing::warn!("Error loading comments: {}", e);
				if clear {
					state.list = ListContent::Error;
				}
				LoadOutcome::Failed
			}
		}
	}

	/// Appends the next page.
	pub async fn load_more(&self) -> LoadOutcome {
		{
			let mut state = self.state.lock();
			if !state.has_more || state.is_loading {
				return LoadOutcome::Skipped;
			}
			state.current_page += 1;
		}
		self.load_comments(false).await
	}

	/// Switches the order and reloads from the first page.
	pub async fn change_sort(&self, sort: SortOrder) -> LoadOutcome {
		{
			let mut state = self.state.lock();
			if state.sort == sort || state.is_loading {
				return LoadOutcome::Skipped;
			}
			state.sort = sort;
			state.current_page = 1;
		}
		self.load_comments(true).await
	}

	/// Switches the filter and reloads from the first page.
	pub async fn change_filter(&self, filter: CommentFilter) -> LoadOutcome {
		{
			let mut state = self.state.lock();
			if state.filter == filter || state.is_loading {
				return LoadOutcome::Skipped;
			}
			state.filter = filter;
			state.current_page = 1;
		}
		self.load_comments(true).await
	}

	/// Opens the comment form: the modal with a fresh form, or the inline
	/// form when modals are disabled.
	pub fn open_form(&self) {
		let mut state = self.state.lock();
		if self.config.modal_enabled {
			state.draft.reset();
			state.stars.reset();
			state.modal_open = true;
		} else {
			state.form_visible = true;
		}
	}

	/// Closes the modal and clears the form messages.
	pub fn close_form(&self) {
		Self::hide_modal(&mut self.state.lock());
	}

	/// Runs `f` on the form values, e.g. to apply typing.
	pub fn update_draft<R>(&self, f: impl FnOnce(&mut CommentDraft) -> R) -> R {
		f(&mut self.state.lock().draft)
	}

	/// Current form values.
	pub fn draft(&self) -> CommentDraft {
		self.state.lock().draft.clone()
	}

	/// Handles a click on star `value`.
	pub fn select_star(&self, value: u8) {
		let mut state = self.state.lock();
		let rating = state.stars.click(value);
		state.draft.rating = rating;
	}

	/// Handles the pointer entering star `value`.
	pub fn hover_star(&self, value: u8) {
		self.state.lock().stars.hover(value);
	}

	/// Handles the pointer leaving the stars.
	pub fn leave_stars(&self) {
		self.state.lock().stars.leave();
	}

	/// Character counter of the comment text.
	pub fn char_counter(&self) -> CharCounter {
		CharCounter::new(&self.state.lock().draft.text, DEFAULT_MAX_LENGTH)
	}

	/// Validates and sends the form.
	pub async fn submit(&self, now_ms: u64) -> SubmitOutcome {
		let draft = {
			let mut state = self.state.lock();
			if state.submitting {
				return SubmitOutcome::Skipped;
			}
			if let Err(errors) = state.draft.validate() {
				tracing::debug!("comment form invalid: {} errors", errors.messages().len());
				state
					.form_messages
					.push(MessageKind::Error, errors.to_string(), now_ms);
				return SubmitOutcome::Invalid(errors);
			}
			state.submitting = true;
			state.draft.clone()
		};
		let _submitting = scopeguard::guard(&self.state, |state| state.lock().submitting = false);

		let result = self.api.submit(&draft).await;

		let mut state = self.state.lock();
		match result {
			Ok(response) if response.success => {
				if let Some(message) = response.message.filter(|m| !m.is_empty()) {
					state.messages.push(MessageKind::Success, message, now_ms);
				}
				state.draft.reset();
				state.stars.reset();
				Self::hide_modal(&mut state);
				if let Some(stats) = response.statistics {
					state.statistics = Some(stats);
				}
				if let Some(comment) = response.comment {
					state.comments.insert(0, comment);
					state.list = ListContent::Comments;
					state.has_rating = true;
				}
				SubmitOutcome::Submitted
			}
			Ok(response) => {
				let errors = response.error_messages();
				state
					.form_messages
					.push(MessageKind::Error, errors.join("\n"), now_ms);
				SubmitOutcome::Rejected(errors)
			}
			Err(e) => {
				tracing::warn!("Error submitting comment: {}", e);
				state
					.form_messages
					.push(MessageKind::Error, CONNECTION_ERROR_MESSAGE, now_ms);
				SubmitOutcome::Failed
			}
		}
	}

	/// Runs a staff moderation action and applies it to the loaded list.
	///
	/// Visitors without staff rights send nothing. Returns whether the
	/// server accepted the action.
	pub async fn moderate(&self, comment_id: &str, action: ModerationAction, now_ms: u64) -> bool {
		if !self.config.is_staff {
			tracing::debug!("moderation of comment {} refused: not staff", comment_id);
			return false;
		}

		let result = self.api.moderate(comment_id, &action).await;

		let mut state = self.state.lock();
		let response = match result {
			Ok(response) if response.success => response,
			Ok(response) => {
				let errors = response.error_messages();
				state.messages.push(MessageKind::Error, errors.join("\n"), now_ms);
				return false;
			}
			Err(e) => {
				tracing::warn!("Moderation of comment {} failed: {}", comment_id, e);
				state
					.messages
					.push(MessageKind::Error, CONNECTION_ERROR_MESSAGE, now_ms);
				return false;
			}
		};

		if let Some(message) = response.message.filter(|m| !m.is_empty()) {
			state.messages.push(MessageKind::Success, message, now_ms);
		}
		let updated = response.comment;
		match action {
			ModerationAction::Reject => state.comments.retain(|c| c.id != comment_id),
			ModerationAction::Reply(reply) => {
				if let Some(comment) = state.comments.iter_mut().find(|c| c.id == comment_id) {
					let reply = updated
						.as_ref()
						.and_then(|c| c.admin_reply.clone())
						.unwrap_or(reply);
					comment.has_admin_reply = !reply.trim().is_empty();
					comment.admin_reply = Some(reply);
					comment.replied_at = updated.and_then(|c| c.replied_at);
				}
			}
			ModerationAction::Verify => {
				if let Some(comment) = state.comments.iter_mut().find(|c| c.id == comment_id) {
					comment.is_verified = updated.map(|c| c.is_verified).unwrap_or(true);
				}
			}
			ModerationAction::Approve => {
				if let Some(comment) = state.comments.iter_mut().find(|c| c.id == comment_id) {
					comment.status = updated.and_then(|c| c.status);
				}
			}
		}
		true
	}

	/// Removes expired success messages.
	pub fn expire_messages(&self, now_ms: u64) {
		let mut state = self.state.lock();
		state.messages.expire(now_ms);
		state.form_messages.expire(now_ms);
	}

	/// Whether a list load is in flight.
	pub fn is_loading(&self) -> bool {
		self.state.lock().is_loading
	}

	/// Whether another page can be loaded.
	pub fn has_more(&self) -> bool {
		self.state.lock().has_more
	}

	/// Page last requested.
	pub fn current_page(&self) -> u32 {
		self.state.lock().current_page
	}

	/// Active order.
	pub fn sort(&self) -> SortOrder {
		self.state.lock().sort
	}

	/// Active filter.
	pub fn filter(&self) -> CommentFilter {
		self.state.lock().filter
	}

	/// Whether the visitor has rated the object.
	pub fn has_rating(&self) -> bool {
		self.state.lock().has_rating
	}

	/// Loaded comments, newest submission first.
	pub fn comments(&self) -> Vec<Comment> {
		self.state.lock().comments.clone()
	}

	/// What the list shows.
	pub fn list_content(&self) -> ListContent {
		self.state.lock().list
	}

	/// Latest statistics.
	pub fn statistics(&self) -> Option<Statistics> {
		self.state.lock().statistics.clone()
	}

	/// The visitor's own comment, once a list load reported it.
	pub fn user_comment(&self) -> Option<UserComment> {
		self.state.lock().user_comment.clone()
	}

	/// Whether the modal is open.
	pub fn is_modal_open(&self) -> bool {
		self.state.lock().modal_open
	}

	/// Whether the inline form is shown.
	pub fn is_form_visible(&self) -> bool {
		self.state.lock().form_visible
	}

	/// Messages shown above the widget.
	pub fn messages(&self) -> MessageStack {
		self.state.lock().messages.clone()
	}

	/// Messages shown inside the form.
	pub fn form_messages(&self) -> MessageStack {
		self.state.lock().form_messages.clone()
	}

	/// Renders the comment list.
	pub fn render_list(&self) -> View {
		let state = self.state.lock();
		let list = View::element("ul").attr("class", "comments-list");
		let list = match state.list {
			ListContent::Comments => list.children(state.comments.iter().map(render::render_comment)),
			ListContent::Empty => list.child(render::render_empty_state()),
			ListContent::Error => list.child(render::render_error_state()),
		};
		list.into()
	}

	/// Renders the statistics panel, or nothing before they load.
	pub fn render_statistics(&self) -> View {
		if !self.config.show_stats {
			return View::empty();
		}
		self.state
			.lock()
			.statistics
			.as_ref()
			.map(render::render_statistics)
			.unwrap_or_else(View::empty)
	}

	/// Renders the pagination button.
	pub fn render_load_more(&self) -> View {
		let state = self.state.lock();
		render::render_load_more(&state.pagination, state.has_more)
	}

	/// Renders the sort and filter controls that are enabled.
	pub fn render_controls(&self) -> View {
		let state = self.state.lock();
		View::fragment([
			if self.config.enable_sorting {
				render::render_sort_controls(state.sort)
			} else {
				View::empty()
			},
			if self.config.enable_filtering {
				render::render_filter_controls(state.filter)
			} else {
				View::empty()
			},
		])
	}

	/// Renders the star picker of the form.
	pub fn render_stars(&self) -> View {
		self.state.lock().stars.render()
	}

	fn hide_modal(state: &mut WidgetState) {
		state.modal_open = false;
		state.form_messages.clear();
	}
}
