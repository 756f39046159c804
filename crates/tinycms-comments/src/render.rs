//! Markup of the comments widget.
//!
//! Render functions take the widget's data and return escaped [`View`]
//! trees. Comment text and administrator replies keep their line breaks.

use crate::api::{Comment, Pagination, Statistics, UserType};
use crate::config::{CommentFilter, SortOrder};
use crate::stars::{STAR_COUNT, rating_glyphs, render_stars};
use tinycms_pages::View;

/// Title of the empty list placeholder.
pub const EMPTY_TITLE: &str = "No comments yet";

/// Title of the failed list placeholder.
pub const ERROR_TITLE: &str = "Failed to load comments";

/// Renders the statistics panel.
pub fn render_statistics(stats: &Statistics) -> View {
	let average = stats.average_rating.filter(|a| *a != 0.0);

	let summary = View::element("div")
		.attr("class", "average-rating")
		.child(average.map(|avg| {
			View::element("div")
				.attr("class", "average-number")
				.child(format!("{avg:.1}"))
		}))
		.child(
			View::element("div")
				.attr("class", "stars-display")
				.child(render_stars(average.unwrap_or(0.0))),
		)
		.child(
			View::element("div")
				.attr("class", "average-text")
				.child(format!("{} ratings", stats.total)),
		);

	let rows = (1..=STAR_COUNT).rev().map(|stars| {
		let percentage = stats.percentage(stars);
		View::element("div")
			.attr("class", "distribution-row")
			.attr("data-stars", stars.to_string())
			.child(
				View::element("span")
					.attr("class", "distribution-label")
					.child(format!("{stars} ★")),
			)
			.child(
				View::element("div").attr("class", "distribution-bar").child(
					View::element("div")
						.attr("class", "distribution-fill")
						.attr("style", format!("width: {percentage}%")),
				),
			)
			.child(
				View::element("span")
					.attr("class", "distribution-count")
					.child(stats.count(stars).to_string()),
			)
	});

	View::element("div")
		.attr("class", "comments-stats")
		.child(summary)
		.child(
			View::element("div")
				.attr("class", "rating-distribution")
				.children(rows),
		)
		.into()
}

fn user_badge(user_type: UserType) -> View {
	let (class, label) = match user_type {
		UserType::Staff => ("badge bg-danger", "Staff"),
		UserType::Authenticated => ("badge bg-success", "User"),
		UserType::Anonymous => ("badge bg-secondary", "Anonymous"),
	};
	View::element("span").attr("class", class).child(label).into()
}

fn admin_reply(comment: &Comment) -> Option<View> {
	let reply = comment.admin_reply.as_deref().filter(|_| comment.has_admin_reply)?;
	let header = View::element("div")
		.attr("class", "admin-reply-header")
		.child(
			View::element("h6")
				.attr("class", "admin-reply-title")
				.child(View::element("span").attr("class", "text-success").child("✓"))
				.child(" Administrator reply"),
		)
		.child(comment.replied_at.clone().map(|date| {
			View::element("span")
				.attr("class", "admin-reply-date")
				.child(date)
		}));
	Some(
		View::element("div")
			.attr("class", "admin-reply")
			.child(header)
			.child(
				View::element("div")
					.attr("class", "admin-reply-content")
					.child(View::multiline(reply)),
			)
			.into(),
	)
}

/// First letter of the name, upper-cased, or `?` for a nameless author.
pub fn avatar_initial(name: &str) -> String {
	match name.chars().next() {
		Some(first) => first.to_uppercase().collect(),
		None => "?".to_string(),
	}
}

/// Renders one comment list item.
pub fn render_comment(comment: &Comment) -> View {
	let avatar_class = if comment.is_verified {
		"user-avatar verified"
	} else {
		"user-avatar"
	};

	let name = View::element("div")
		.attr("class", "user-name")
		.child(comment.name.clone())
		.child(" ")
		.child(user_badge(comment.user_type))
		.child(comment.is_verified.then(|| {
			View::element("span")
				.attr("class", "verified-badge")
				.child("✓ Verified")
		}));

	let header = View::element("div")
		.attr("class", "comment-header")
		.child(
			View::element("div")
				.attr("class", "comment-user")
				.child(
					View::element("div")
						.attr("class", avatar_class)
						.child(avatar_initial(&comment.name)),
				)
				.child(
					View::element("div")
						.attr("class", "user-info")
						.child(name)
						.child(
							View::element("div").attr("class", "user-meta").child(
								View::element("span").child(comment.created_at.clone()),
							),
						),
				),
		)
		.child(
			View::element("div")
				.attr("class", "comment-rating")
				.attr("title", comment.rating_display.clone().unwrap_or_default())
				.child(rating_glyphs(comment.rating)),
		);

	View::element("li")
		.attr("class", "comment-item")
		.attr("data-comment-id", comment.id.clone())
		.child(header)
		.child(
			View::element("div")
				.attr("class", "comment-content")
				.child(View::multiline(&comment.text)),
		)
		.child(admin_reply(comment))
		.into()
}

/// Renders the placeholder of an empty list.
pub fn render_empty_state() -> View {
	View::element("div")
		.attr("class", "empty-state")
		.child(View::element("div").attr("class", "empty-icon").child("💬"))
		.child(View::element("h4").attr("class", "empty-title").child(EMPTY_TITLE))
		.child(
			View::element("p")
				.attr("class", "empty-text")
				.child("Be the first to leave a review!"),
		)
		.child(
			View::element("button")
				.attr("type", "button")
				.attr("class", "btn btn-primary add-comment-btn")
				.child("Leave a comment"),
		)
		.into()
}

/// Renders the placeholder of a list that failed to load.
pub fn render_error_state() -> View {
	View::element("div")
		.attr("class", "empty-state")
		.child(
			View::element("div")
				.attr("class", "empty-icon text-danger")
				.child("⚠️"),
		)
		.child(View::element("h4").attr("class", "empty-title").child(ERROR_TITLE))
		.child(
			View::element("p")
				.attr("class", "empty-text")
				.child("The comments could not be loaded. Please try again later."),
		)
		.child(
			View::element("button")
				.attr("type", "button")
				.attr("class", "btn btn-outline-primary reload-btn")
				.child("Reload page"),
		)
		.into()
}

/// Renders the "Load more" button; hidden when no next page exists.
pub fn render_load_more(pagination: &Pagination, has_more: bool) -> View {
	let button = View::element("button")
		.attr("type", "button")
		.attr(
			"class",
			if has_more {
				"btn btn-outline-primary load-more-btn"
			} else {
				"btn btn-outline-primary load-more-btn hidden"
			},
		);
	if !has_more {
		return button.into();
	}
	button
		.child("Load more ")
		.child(
			View::element("span")
				.attr("class", "text-muted")
				.child(format!(
					"({}/{})",
					pagination.current_page, pagination.total_pages
				)),
		)
		.into()
}

/// Renders the sort buttons with `active` marked.
pub fn render_sort_controls(active: SortOrder) -> View {
	View::element("div")
		.attr("class", "comments-sort")
		.children(SortOrder::ALL.into_iter().map(|order| {
			View::element("button")
				.attr("type", "button")
				.attr(
					"class",
					if order == active { "sort-btn active" } else { "sort-btn" },
				)
				.attr("data-sort", order.as_str())
				.child(order.label())
		}))
		.into()
}

/// Renders the filter badges with `active` marked.
pub fn render_filter_controls(active: CommentFilter) -> View {
	View::element("div")
		.attr("class", "comments-filter")
		.children(CommentFilter::ALL.into_iter().map(|filter| {
			View::element("span")
				.attr(
					"class",
					if filter == active {
						"filter-badge active"
					} else {
						"filter-badge"
					},
				)
				.attr("data-filter", filter.as_str())
				.child(filter.label())
		}))
		.into()
}
