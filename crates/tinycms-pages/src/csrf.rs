//! CSRF protection for widget requests
//!
//! The backend issues its CSRF token in the `csrftoken` cookie. Widgets
//! echo it back either as the `csrfmiddlewaretoken` form field (form-encoded
//! posts) or as the `X-CSRFToken` header (JSON posts).
//!
//! ## Usage
//!
//! ```
//! use tinycms_pages::csrf::{CsrfManager, parse_cookie_value, CSRF_COOKIE_NAME};
//!
//! let cookies = "sessionid=abc; csrftoken=tok%2B1";
//! assert_eq!(parse_cookie_value(cookies, CSRF_COOKIE_NAME), Some("tok+1".to_string()));
//!
//! let manager = CsrfManager::from_cookie_header(cookies);
//! assert_eq!(manager.header(), Some(("X-CSRFToken", "tok+1".to_string())));
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

/// The cookie name used by the backend for CSRF tokens.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// The header name used to send CSRF tokens in JSON requests.
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// The form field name for CSRF tokens.
pub const CSRF_FORM_FIELD: &str = "csrfmiddlewaretoken";

/// CSRF token holder shared by the widgets of one page.
///
/// Cloning shares the cached token.
#[derive(Debug, Clone, Default)]
pub struct CsrfManager {
	token: Arc<Mutex<Option<String>>>,
}

impl CsrfManager {
	/// Creates a manager without a token.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a manager from a `document.cookie` style string.
	pub fn from_cookie_header(cookie_str: &str) -> Self {
		let manager = Self::new();
		if let Some(token) = parse_cookie_value(cookie_str, CSRF_COOKIE_NAME) {
			manager.set_token(token);
		}
		manager
	}

	/// Gets the cached token.
	pub fn token(&self) -> Option<String> {
		self.token.lock().clone()
	}

	/// Gets the cached token, reading the browser cookie on first use.
	#[cfg(target_arch = "wasm32")]
	pub fn get_or_fetch_token(&self) -> Option<String> {
		if let Some(token) = self.token() {
			return Some(token);
		}
		let token = get_csrf_token_from_cookie()?;
		self.set_token(token.clone());
		Some(token)
	}

	/// Gets the cached token (non-WASM: no browser cookie to read).
	#[cfg(not(target_arch = "wasm32"))]
	pub fn get_or_fetch_token(&self) -> Option<String> {
		self.token()
	}

	/// Sets the token manually.
	pub fn set_token(&self, token: impl Into<String>) {
		*self.token.lock() = Some(token.into());
	}

	/// Clears the cached token.
	pub fn clear(&self) {
		*self.token.lock() = None;
	}

	/// Returns the `(header_name, header_value)` pair for JSON requests.
	pub fn header(&self) -> Option<(&'static str, String)> {
		self.get_or_fetch_token()
			.map(|token| (CSRF_HEADER_NAME, token))
	}

	/// Returns the `(field_name, field_value)` pair for form-encoded requests.
	pub fn form_field(&self) -> Option<(&'static str, String)> {
		self.get_or_fetch_token()
			.map(|token| (CSRF_FORM_FIELD, token))
	}
}

/// Retrieves the CSRF token from the browser cookie.
#[cfg(target_arch = "wasm32")]
pub fn get_csrf_token_from_cookie() -> Option<String> {
	use wasm_bindgen::JsCast;
	use web_sys::{HtmlDocument, window};

	let window = window()?;
	let document = window.document()?;
	let html_doc = document.dyn_ref::<HtmlDocument>()?;
	let cookie_str = html_doc.cookie().ok()?;

	parse_cookie_value(&cookie_str, CSRF_COOKIE_NAME)
}

/// Parses a cookie value from a cookie string.
///
/// The cookie string format is: "name1=value1; name2=value2; ...".
/// Values are percent-decoded; a value that fails to decode is returned raw.
pub fn parse_cookie_value(cookie_str: &str, name: &str) -> Option<String> {
	for part in cookie_str.split(';') {
		let part = part.trim();
		if let Some((key, value)) = part.split_once('=')
			&& key.trim() == name
		{
			let value = value.trim();
			return Some(
				urlencoding::decode(value)
					.map(|decoded| decoded.into_owned())
					.unwrap_or_else(|_| value.to_string()),
			);
		}
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("csrftoken=abc123", Some("abc123"))]
	#[case("sessionid=xyz; csrftoken=abc123; theme=dark", Some("abc123"))]
	#[case("  csrftoken = spaced ", Some("spaced"))]
	#[case("xcsrftoken=nope", None)]
	#[case("", None)]
	#[case("csrftoken=a%20b", Some("a b"))]
	fn test_parse_cookie_value(#[case] cookies: &str, #[case] expected: Option<&str>) {
		assert_eq!(
			parse_cookie_value(cookies, CSRF_COOKIE_NAME),
			expected.map(str::to_string)
		);
	}

	#[rstest]
	fn test_manager_header_and_form_field() {
		let manager = CsrfManager::from_cookie_header("csrftoken=tok");

		assert_eq!(manager.header(), Some((CSRF_HEADER_NAME, "tok".to_string())));
		assert_eq!(
			manager.form_field(),
			Some((CSRF_FORM_FIELD, "tok".to_string()))
		);
	}

	#[rstest]
	fn test_manager_clones_share_token() {
		let manager = CsrfManager::new();
		let shared = manager.clone();

		assert_eq!(shared.token(), None);
		manager.set_token("fresh");
		assert_eq!(shared.token(), Some("fresh".to_string()));

		shared.clear();
		assert_eq!(manager.header(), None);
	}
}
