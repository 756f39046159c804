//! Comments widget configuration.
//!
//! A [`CommentsConfig`] is read once from the widget container's `data-*`
//! attributes. The object being commented on is identified by
//! `data-content-type-id` and `data-object-id`; everything else has a
//! default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tinycms_pages::{ConfigError, Dataset};

/// Base path of the comments endpoints.
pub const DEFAULT_API_BASE_URL: &str = "/comments/";

/// Comments requested per page.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

/// Order of the comment list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
	/// Most recent first
	#[default]
	Newest,
	/// Oldest first
	Oldest,
	/// Highest rating first
	Highest,
	/// Lowest rating first
	Lowest,
	/// Most recently answered first
	Replied,
}

impl SortOrder {
	/// Every order, in the order the sort buttons show them.
	pub const ALL: [SortOrder; 5] = [
		SortOrder::Newest,
		SortOrder::Oldest,
		SortOrder::Highest,
		SortOrder::Lowest,
		SortOrder::Replied,
	];

	/// Query parameter value.
	pub fn as_str(&self) -> &'static str {
		match self {
			SortOrder::Newest => "newest",
			SortOrder::Oldest => "oldest",
			SortOrder::Highest => "highest",
			SortOrder::Lowest => "lowest",
			SortOrder::Replied => "replied",
		}
	}

	/// Button label.
	pub fn label(&self) -> &'static str {
		match self {
			SortOrder::Newest => "Newest",
			SortOrder::Oldest => "Oldest",
			SortOrder::Highest => "Highest rated",
			SortOrder::Lowest => "Lowest rated",
			SortOrder::Replied => "Recently answered",
		}
	}
}

impl fmt::Display for SortOrder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SortOrder {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		SortOrder::ALL
			.into_iter()
			.find(|order| order.as_str() == s)
			.ok_or_else(|| ConfigError::InvalidValue {
				attribute: "sort".to_string(),
				value: s.to_string(),
			})
	}
}

/// Subset of comments listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentFilter {
	/// Every approved comment
	#[default]
	All,
	/// Comments with an administrator reply
	WithReplies,
	/// Verified comments
	Verified,
	/// Comments rated 4 or 5
	HighRating,
}

impl CommentFilter {
	/// Every filter, in the order the badges show them.
	pub const ALL: [CommentFilter; 4] = [
		CommentFilter::All,
		CommentFilter::WithReplies,
		CommentFilter::Verified,
		CommentFilter::HighRating,
	];

	/// Query parameter value.
	pub fn as_str(&self) -> &'static str {
		match self {
			CommentFilter::All => "all",
			CommentFilter::WithReplies => "with_replies",
			CommentFilter::Verified => "verified",
			CommentFilter::HighRating => "high_rating",
		}
	}

	/// Badge label.
	pub fn label(&self) -> &'static str {
		match self {
			CommentFilter::All => "All",
			CommentFilter::WithReplies => "With replies",
			CommentFilter::Verified => "Verified",
			CommentFilter::HighRating => "4+ stars",
		}
	}
}

impl fmt::Display for CommentFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for CommentFilter {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		CommentFilter::ALL
			.into_iter()
			.find(|filter| filter.as_str() == s)
			.ok_or_else(|| ConfigError::InvalidValue {
				attribute: "filter".to_string(),
				value: s.to_string(),
			})
	}
}

fn default_api_base_url() -> String {
	DEFAULT_API_BASE_URL.to_string()
}

fn default_items_per_page() -> u32 {
	DEFAULT_ITEMS_PER_PAGE
}

fn enabled() -> bool {
	true
}

/// Configuration of one comments widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsConfig {
	/// Content type of the commented object (`data-content-type-id`)
	pub content_type_id: String,
	/// Id of the commented object (`data-object-id`)
	pub object_id: String,
	/// Whether the visitor already rated the object (`data-has-rating`)
	#[serde(default)]
	pub has_rating: bool,
	/// Whether the visitor may moderate (`data-is-staff`)
	#[serde(default)]
	pub is_staff: bool,
	/// Base path of the endpoints, always ending in `/`
	#[serde(default = "default_api_base_url")]
	pub api_base_url: String,
	/// Comments per page
	#[serde(default = "default_items_per_page")]
	pub items_per_page: u32,
	/// Load statistics and the first page on start
	#[serde(default = "enabled")]
	pub auto_load: bool,
	/// Show the sort buttons
	#[serde(default = "enabled")]
	pub enable_sorting: bool,
	/// Show the filter badges
	#[serde(default = "enabled")]
	pub enable_filtering: bool,
	/// Load and show the rating statistics
	#[serde(default = "enabled")]
	pub show_stats: bool,
	/// Show the comment form
	#[serde(default = "enabled")]
	pub show_form: bool,
	/// Show the form in a modal instead of inline
	#[serde(default = "enabled")]
	pub modal_enabled: bool,
}

impl CommentsConfig {
	/// Creates a configuration with every default.
	pub fn new(content_type_id: impl Into<String>, object_id: impl Into<String>) -> Self {
		Self {
			content_type_id: content_type_id.into(),
			object_id: object_id.into(),
			has_rating: false,
			is_staff: false,
			api_base_url: default_api_base_url(),
			items_per_page: DEFAULT_ITEMS_PER_PAGE,
			auto_load: true,
			enable_sorting: true,
			enable_filtering: true,
			show_stats: true,
			show_form: true,
			modal_enabled: true,
		}
	}

	/// Sets the base path, adding the trailing slash when missing.
	pub fn with_api_base_url(mut self, base: impl Into<String>) -> Self {
		let mut base = base.into();
		if !base.ends_with('/') {
			base.push('/');
		}
		self.api_base_url = base;
		self
	}

	/// Reads the configuration from the container's dataset.
	///
	/// `content-type-id` and `object-id` are required. Options missing from
	/// the dataset keep their defaults; an unparsable `items-per-page` falls
	/// back to [`DEFAULT_ITEMS_PER_PAGE`].
	pub fn from_dataset(dataset: &Dataset) -> Result<Self, ConfigError> {
		let mut config = Self::new(
			dataset.require("content-type-id")?,
			dataset.require("object-id")?,
		);
		config.has_rating = dataset.flag_or("has-rating", false);
		config.is_staff = dataset.flag_or("is-staff", false);
		if let Some(base) = dataset.get_non_empty("api-base-url") {
			config = config.with_api_base_url(base);
		}
		config.items_per_page = u32::try_from(
			dataset.int_or("items-per-page", i64::from(DEFAULT_ITEMS_PER_PAGE)),
		)
		.ok()
		.filter(|n| *n > 0)
		.unwrap_or(DEFAULT_ITEMS_PER_PAGE);
		config.auto_load = dataset.flag_or("auto-load", true);
		config.enable_sorting = dataset.flag_or("enable-sorting", true);
		config.enable_filtering = dataset.flag_or("enable-filtering", true);
		config.show_stats = dataset.flag_or("show-stats", true);
		config.show_form = dataset.flag_or("show-form", true);
		config.modal_enabled = dataset.flag_or("modal-enabled", true);
		Ok(config)
	}

	fn object_path(&self, endpoint: &str) -> String {
		format!(
			"{}{}/{}/{}/",
			self.api_base_url, endpoint, self.content_type_id, self.object_id
		)
	}

	/// URL of the statistics endpoint.
	pub fn stats_url(&self) -> String {
		self.object_path("stats")
	}

	/// URL of the list endpoint without its query string.
	pub fn list_url(&self) -> String {
		self.object_path("list")
	}

	/// URL of the submit endpoint.
	pub fn submit_url(&self) -> String {
		self.object_path("submit")
	}

	/// URL of the moderation endpoint for a comment.
	pub fn admin_url(&self, comment_id: &str) -> String {
		format!("{}admin/{}/", self.api_base_url, comment_id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_from_dataset_defaults() {
		let dataset = Dataset::new()
			.with("content-type-id", "12")
			.with("object-id", "34")
			.with("has-rating", "true");

		let config = CommentsConfig::from_dataset(&dataset).unwrap();

		assert_eq!(config.content_type_id, "12");
		assert_eq!(config.object_id, "34");
		assert!(config.has_rating);
		assert!(!config.is_staff);
		assert_eq!(config.api_base_url, "/comments/");
		assert_eq!(config.items_per_page, 10);
		assert!(config.auto_load && config.modal_enabled && config.show_stats);
	}

	#[rstest]
	#[case("content-type-id")]
	#[case("object-id")]
	fn test_from_dataset_requires_object(#[case] missing: &str) {
		let dataset = Dataset::new()
			.with("content-type-id", "12")
			.with("object-id", "34")
			.with(missing, "");

		assert_eq!(
			CommentsConfig::from_dataset(&dataset),
			Err(ConfigError::MissingAttribute(missing.to_string()))
		);
	}

	#[rstest]
	#[case("25", 25)]
	#[case("0", 10)]
	#[case("-3", 10)]
	#[case("lots", 10)]
	fn test_items_per_page(#[case] raw: &str, #[case] expected: u32) {
		let dataset = Dataset::new()
			.with("content-type-id", "1")
			.with("object-id", "2")
			.with("items-per-page", raw);

		assert_eq!(
			CommentsConfig::from_dataset(&dataset).unwrap().items_per_page,
			expected
		);
	}

	#[rstest]
	fn test_urls() {
		let config = CommentsConfig::new("7", "42").with_api_base_url("/api/reviews");

		assert_eq!(config.stats_url(), "/api/reviews/stats/7/42/");
		assert_eq!(config.list_url(), "/api/reviews/list/7/42/");
		assert_eq!(config.submit_url(), "/api/reviews/submit/7/42/");
		assert_eq!(config.admin_url("5"), "/api/reviews/admin/5/");
	}

	#[rstest]
	fn test_deserialize_with_defaults() {
		let config: CommentsConfig =
			serde_json::from_str(r#"{"content_type_id": "1", "object_id": "2", "modal_enabled": false}"#)
				.unwrap();

		assert_eq!(config.items_per_page, DEFAULT_ITEMS_PER_PAGE);
		assert!(!config.modal_enabled);
		assert!(config.enable_sorting);
	}

	#[rstest]
	#[case("newest", Ok(SortOrder::Newest))]
	#[case("replied", Ok(SortOrder::Replied))]
	#[case("random", Err(()))]
	fn test_sort_order_from_str(#[case] raw: &str, #[case] expected: Result<SortOrder, ()>) {
		assert_eq!(raw.parse::<SortOrder>().map_err(|_| ()), expected);
	}

	#[rstest]
	fn test_filter_round_trips_through_as_str() {
		for filter in CommentFilter::ALL {
			assert_eq!(filter.as_str().parse::<CommentFilter>(), Ok(filter));
		}
		assert!("spam".parse::<CommentFilter>().is_err());
	}
}
