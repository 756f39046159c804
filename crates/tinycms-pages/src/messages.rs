//! Inline widget messages.
//!
//! A [`MessageStack`] holds the dismissible notices a widget shows above its
//! content or inside its form. Newest messages come first, a message whose
//! text is already shown is not added twice, and success messages expire
//! after [`SUCCESS_MESSAGE_TTL_MS`].

use crate::view::View;

/// How long a success message stays visible.
pub const SUCCESS_MESSAGE_TTL_MS: u64 = 5_000;

/// Severity of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
	/// Operation succeeded
	Success,
	/// Operation failed
	Error,
	/// Neutral notice
	Info,
}

impl MessageKind {
	/// CSS modifier used for the message element.
	pub fn as_str(&self) -> &'static str {
		match self {
			MessageKind::Success => "success",
			MessageKind::Error => "error",
			MessageKind::Info => "info",
		}
	}
}

/// A single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
	/// Severity
	pub kind: MessageKind,
	/// Text; line breaks render as `<br />`
	pub text: String,
	/// Host clock reading (milliseconds) when the message was shown
	pub shown_at_ms: u64,
}

/// Ordered, de-duplicated message list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageStack {
	messages: Vec<Message>,
}

impl MessageStack {
	/// Creates an empty stack.
	pub fn new() -> Self {
		Self::default()
	}

	/// Shows a message unless one with the same text is already visible.
	///
	/// Returns whether the message was added.
	pub fn push(&mut self, kind: MessageKind, text: impl Into<String>, now_ms: u64) -> bool {
		let text = text.into();
		if self.messages.iter().any(|m| m.text == text) {
			return false;
		}
		self.messages.insert(
			0,
			Message {
				kind,
				text,
				shown_at_ms: now_ms,
			},
		);
		true
	}

	/// Drops success messages older than [`SUCCESS_MESSAGE_TTL_MS`].
	pub fn expire(&mut self, now_ms: u64) {
		self.messages.retain(|m| {
			m.kind != MessageKind::Success
				|| now_ms.saturating_sub(m.shown_at_ms) < SUCCESS_MESSAGE_TTL_MS
		});
	}

	/// Removes the message with `text`.
	pub fn dismiss(&mut self, text: &str) {
		self.messages.retain(|m| m.text != text);
	}

	/// Removes every message.
	pub fn clear(&mut self) {
		self.messages.clear();
	}

	/// Returns the visible messages, newest first.
	pub fn messages(&self) -> &[Message] {
		&self.messages
	}

	/// Returns whether no message is visible.
	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	/// Renders the messages.
	pub fn render(&self) -> View {
		View::fragment(self.messages.iter().map(|m| {
			View::element("div")
				.attr("class", format!("message message-{}", m.kind.as_str()))
				.attr("data-text", m.text.clone())
				.child(View::multiline(&m.text))
		}))
	}
}
