//! In-memory transport for tests.
//!
//! [`FakeTransport`] answers requests from canned responses keyed by URL
//! prefix and records every request it receives.

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

#[derive(Debug)]
struct Route {
	url_prefix: String,
	responses: VecDeque<Result<ApiResponse, ApiError>>,
}

/// Transport answering from canned responses.
///
/// Responses registered for a prefix are served in order; the last one is
/// repeated once the queue would otherwise run dry. Requests matching no
/// route fail with a network error.
#[derive(Debug, Default)]
pub struct FakeTransport {
	routes: Mutex<Vec<Route>>,
	requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
	/// Creates a transport with no routes.
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a JSON response for URLs starting with `url_prefix`.
	pub fn respond(self, url_prefix: &str, status: u16, body: serde_json::Value) -> Self {
		self.push(url_prefix, Ok(ApiResponse::new(status, body.to_string())));
		self
	}

	/// Queues a transport failure for URLs starting with `url_prefix`.
	pub fn fail(self, url_prefix: &str, message: &str) -> Self {
		self.push(url_prefix, Err(ApiError::network(message)));
		self
	}

	/// Queues a raw response.
	pub fn push(&self, url_prefix: &str, response: Result<ApiResponse, ApiError>) {
		let mut routes = self.routes.lock();
		match routes.iter_mut().find(|r| r.url_prefix == url_prefix) {
			Some(route) => route.responses.push_back(response),
			None => routes.push(Route {
				url_prefix: url_prefix.to_string(),
				responses: VecDeque::from([response]),
			}),
		}
	}

	/// Returns the requests received so far.
	pub fn requests(&self) -> Vec<ApiRequest> {
		self.requests.lock().clone()
	}

	/// Returns how many requests were received.
	pub fn request_count(&self) -> usize {
		self.requests.lock().len()
	}

	fn next_response(&self, url: &str) -> Result<ApiResponse, ApiError> {
		let mut routes = self.routes.lock();
		let route = routes
			.iter_mut()
			.filter(|r| url.starts_with(&r.url_prefix))
			.max_by_key(|r| r.url_prefix.len());
		match route {
			Some(route) if route.responses.len() > 1 => route
				.responses
				.pop_front()
				.unwrap_or_else(|| Err(ApiError::network("no response"))),
			Some(route) => route
				.responses
				.front()
				.cloned()
				.unwrap_or_else(|| Err(ApiError::network("no response"))),
			None => Err(ApiError::network(format!("no route for {url}"))),
		}
	}
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl HttpTransport for FakeTransport {
	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
		let response = self.next_response(&request.url);
		self.requests.lock().push(request);
		response
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[tokio::test]
	async fn test_fake_transport_serves_in_order_then_repeats() {
		let transport = FakeTransport::new()
			.respond("/a/", 200, serde_json::json!({"n": 1}))
			.respond("/a/", 200, serde_json::json!({"n": 2}));

		let first = transport.send(ApiRequest::get("/a/1")).await.unwrap();
		let second = transport.send(ApiRequest::get("/a/2")).await.unwrap();
		let third = transport.send(ApiRequest::get("/a/3")).await.unwrap();

		assert_eq!(first.body, r#"{"n":1}"#);
		assert_eq!(second.body, r#"{"n":2}"#);
		assert_eq!(third.body, r#"{"n":2}"#);
		assert_eq!(transport.request_count(), 3);
	}

	#[rstest]
	#[tokio::test]
	async fn test_fake_transport_prefers_longest_prefix() {
		let transport = FakeTransport::new()
			.respond("/comments/", 200, serde_json::json!("generic"))
			.respond("/comments/stats/", 200, serde_json::json!("stats"));

		let response = transport.send(ApiRequest::get("/comments/stats/1/2/")).await.unwrap();
		assert_eq!(response.body, "\"stats\"");

		let missing = transport.send(ApiRequest::get("/other/")).await;
		assert!(matches!(missing, Err(ApiError::Network(_))));
	}
}
