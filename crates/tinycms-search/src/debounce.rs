//! Auto-search debounce for the query input.
//!
//! Every keystroke restarts the timer. When it fires, a query of at least
//! [`MIN_QUERY_CHARS`] characters triggers a search and a shorter one hides
//! the results. The clock is supplied by the caller in milliseconds, so any
//! host timer (or a test) can drive it.

/// Delay between the last keystroke and the search.
pub const DEBOUNCE_MS: u64 = 500;

/// Shortest query that triggers a search.
pub const MIN_QUERY_CHARS: usize = 2;

/// What to do when the debounce fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceAction {
	/// Run a search
	Search,
	/// Hide the results panel
	Hide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
	due_at_ms: u64,
	query: String,
}

/// Restartable one-shot timer for the query input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDebounce {
	delay_ms: u64,
	min_chars: usize,
	pending: Option<Pending>,
}

impl Default for QueryDebounce {
	fn default() -> Self {
		Self::new(DEBOUNCE_MS, MIN_QUERY_CHARS)
	}
}

impl QueryDebounce {
	/// Creates a debounce with a custom delay and minimum length.
	pub fn new(delay_ms: u64, min_chars: usize) -> Self {
		Self {
			delay_ms,
			min_chars,
			pending: None,
		}
	}

	/// Records a keystroke, cancelling the pending firing.
	pub fn input(&mut self, query: impl Into<String>, now_ms: u64) {
		self.pending = Some(Pending {
			due_at_ms: now_ms.saturating_add(self.delay_ms),
			query: query.into(),
		});
	}

	/// When the pending firing is due, if any.
	pub fn due_at(&self) -> Option<u64> {
		self.pending.as_ref().map(|p| p.due_at_ms)
	}

	/// Fires the pending timer once it is due.
	pub fn poll(&mut self, now_ms: u64) -> Option<DebounceAction> {
		match &self.pending {
			Some(pending) if now_ms >= pending.due_at_ms => {
				let long_enough = pending.query.chars().count() >= self.min_chars;
				self.pending = None;
				Some(if long_enough {
					DebounceAction::Search
				} else {
					DebounceAction::Hide
				})
			}
			_ => None,
		}
	}

	/// Drops the pending firing.
	pub fn cancel(&mut self) {
		self.pending = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_fires_after_delay() {
		let mut debounce = QueryDebounce::default();
		debounce.input("la", 1_000);

		assert_eq!(debounce.poll(1_499), None);
		assert_eq!(debounce.poll(1_500), Some(DebounceAction::Search));
		assert_eq!(debounce.poll(2_000), None);
	}

	#[rstest]
	fn test_keystroke_restarts_timer() {
		let mut debounce = QueryDebounce::default();
		debounce.input("l", 0);
		debounce.input("la", 400);

		assert_eq!(debounce.poll(600), None);
		assert_eq!(debounce.due_at(), Some(900));
		assert_eq!(debounce.poll(900), Some(DebounceAction::Search));
	}

	#[rstest]
	#[case("", DebounceAction::Hide)]
	#[case("x", DebounceAction::Hide)]
	#[case("жё", DebounceAction::Search)]
	fn test_minimum_length(#[case] query: &str, #[case] expected: DebounceAction) {
		let mut debounce = QueryDebounce::default();
		debounce.input(query, 0);

		assert_eq!(debounce.poll(DEBOUNCE_MS), Some(expected));
	}

	#[rstest]
	fn test_cancel() {
		let mut debounce = QueryDebounce::default();
		debounce.input("lamp", 0);
		debounce.cancel();

		assert_eq!(debounce.poll(10_000), None);
	}
}
