//! Errors shared by the widget crates.

use thiserror::Error;

/// Error returned by the widget API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
	/// Network error (connection failed, timeout, etc.)
	#[error("Network error: {0}")]
	Network(String),

	/// Failed to serialize the request body
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// Failed to deserialize the response body
	#[error("Deserialization error: {0}")]
	Deserialization(String),

	/// Server-side error (HTTP 4xx, 5xx)
	#[error("Server error ({status}): {message}")]
	Server {
		/// HTTP status code
		status: u16,
		/// Error message
		message: String,
	},

	/// The backend answered with `success: false`
	#[error("Application error: {0}")]
	Application(String),
}

impl ApiError {
	/// Create a network error
	pub fn network(msg: impl Into<String>) -> Self {
		Self::Network(msg.into())
	}

	/// Create a serialization error
	pub fn serialization(msg: impl Into<String>) -> Self {
		Self::Serialization(msg.into())
	}

	/// Create a deserialization error
	pub fn deserialization(msg: impl Into<String>) -> Self {
		Self::Deserialization(msg.into())
	}

	/// Create a server error
	pub fn server(status: u16, message: impl Into<String>) -> Self {
		Self::Server {
			status,
			message: message.into(),
		}
	}

	/// Create an application error
	pub fn application(msg: impl Into<String>) -> Self {
		Self::Application(msg.into())
	}
}

/// Error raised while building a typed configuration from `data-*` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	/// A required attribute is absent or blank
	#[error("missing required attribute `data-{0}`")]
	MissingAttribute(String),

	/// An attribute holds a value outside its allowed set
	#[error("invalid value `{value}` for attribute `data-{attribute}`")]
	InvalidValue {
		/// Attribute name without the `data-` prefix
		attribute: String,
		/// The rejected value
		value: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_api_error_creation() {
		let err = ApiError::network("Connection timeout");
		assert!(matches!(err, ApiError::Network(_)));

		let err = ApiError::server(404, "Not found");
		assert!(matches!(err, ApiError::Server { status: 404, .. }));
	}

	#[rstest]
	fn test_api_error_display() {
		assert_eq!(
			ApiError::server(500, "boom").to_string(),
			"Server error (500): boom"
		);
		assert_eq!(
			ApiError::application("Page not found").to_string(),
			"Application error: Page not found"
		);
	}

	#[rstest]
	fn test_config_error_display() {
		let err = ConfigError::MissingAttribute("config-id".to_string());
		assert_eq!(err.to_string(), "missing required attribute `data-config-id`");
	}
}
