//! HTTP transport used by the widget API clients.
//!
//! Clients build an [`ApiRequest`] with a site-relative URL and hand it to an
//! [`HttpTransport`]. [`ReqwestTransport`] sends it over the network (it runs
//! both natively and in the browser); tests substitute an in-memory
//! transport.

use crate::error::ApiError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	/// GET
	Get,
	/// POST
	Post,
}

/// Body of an API request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
	/// No body
	Empty,
	/// JSON body (`Content-Type: application/json`)
	Json(serde_json::Value),
	/// Form-encoded body (`application/x-www-form-urlencoded`)
	Form(Vec<(String, String)>),
}

/// A request to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
	/// HTTP method
	pub method: Method,
	/// Site-relative URL including the query string
	pub url: String,
	/// Extra request headers
	pub headers: Vec<(String, String)>,
	/// Request body
	pub body: RequestBody,
}

impl ApiRequest {
	/// Creates a GET request that accepts JSON.
	pub fn get(url: impl Into<String>) -> Self {
		Self {
			method: Method::Get,
			url: url.into(),
			headers: vec![("Accept".to_string(), "application/json".to_string())],
			body: RequestBody::Empty,
		}
	}

	/// Creates a POST request with a JSON body.
	pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
		Self {
			method: Method::Post,
			url: url.into(),
			headers: Vec::new(),
			body: RequestBody::Json(body),
		}
	}

	/// Creates a POST request with a form-encoded body.
	pub fn post_form(url: impl Into<String>, fields: Vec<(String, String)>) -> Self {
		Self {
			method: Method::Post,
			url: url.into(),
			headers: Vec::new(),
			body: RequestBody::Form(fields),
		}
	}

	/// Adds a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	/// Returns the value of the first header named `name` (case-insensitive).
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(n, _)| n.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}

	/// Returns the value of the first form field named `name`.
	pub fn form_value(&self, name: &str) -> Option<&str> {
		match &self.body {
			RequestBody::Form(fields) => fields
				.iter()
				.find(|(n, _)| n == name)
				.map(|(_, v)| v.as_str()),
			_ => None,
		}
	}
}

/// A response from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code
	pub status: u16,
	/// Response body text
	pub body: String,
}

impl ApiResponse {
	/// Creates a response.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	/// Returns whether the status is 2xx.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Deserializes the body as JSON regardless of the status.
	///
	/// The backend reports validation failures as JSON with a 4xx status,
	/// so callers that need those bodies use this method.
	pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
		serde_json::from_str(&self.body).map_err(|e| ApiError::deserialization(e.to_string()))
	}

	/// Deserializes the body as JSON, failing on a non-2xx status.
	pub fn success_json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
		if !self.is_success() {
			return Err(ApiError::server(self.status, self.body.clone()));
		}
		self.json()
	}
}

/// Sends API requests.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait HttpTransport: Send + Sync {
	/// Sends `request` and returns the raw response.
	///
	/// Only transport failures are errors; HTTP error statuses come back as
	/// responses so callers can read error bodies.
	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	client: reqwest::Client,
	origin: String,
}

impl ReqwestTransport {
	/// Creates a transport resolving relative URLs against `origin`
	/// (e.g. `https://example.com`).
	pub fn new(origin: impl Into<String>) -> Self {
		Self::with_client(reqwest::Client::new(), origin)
	}

	/// Creates a transport with a preconfigured client.
	pub fn with_client(client: reqwest::Client, origin: impl Into<String>) -> Self {
		Self {
			client,
			origin: origin.into().trim_end_matches('/').to_string(),
		}
	}

	fn absolute_url(&self, url: &str) -> String {
		if url.starts_with("http://") || url.starts_with("https://") {
			url.to_string()
		} else if url.starts_with('/') {
			format!("{}{}", self.origin, url)
		} else {
			format!("{}/{}", self.origin, url)
		}
	}
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl HttpTransport for ReqwestTransport {
	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
		let url = self.absolute_url(&request.url);
		tracing::debug!("{:?} {}", request.method, url);

		let mut builder = match request.method {
			Method::Get => self.client.get(&url),
			Method::Post => self.client.post(&url),
		};
		for (name, value) in &request.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}
		builder = match request.body {
			RequestBody::Empty => builder,
			RequestBody::Json(value) => builder.json(&value),
			RequestBody::Form(fields) => {
				let encoded = serde_urlencoded::to_string(&fields)
					.map_err(|e| ApiError::serialization(e.to_string()))?;
				builder
					.header("Content-Type", "application/x-www-form-urlencoded")
					.body(encoded)
			}
		};

		let response = builder
			.send()
			.await
			.map_err(|e| ApiError::network(e.to_string()))?;
		let status = response.status().as_u16();
		let body = response
			.text()
			.await
			.map_err(|e| ApiError::network(e.to_string()))?;

		Ok(ApiResponse { status, body })
	}
}
