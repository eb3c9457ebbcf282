//! Transport primitives for identity and storage requests.
//!
//! The module exposes [`StorageHttpClient`] alongside [`RawResponse`] so downstream crates can
//! integrate custom HTTP clients for testing or alternative stacks. The trait mirrors the four
//! verbs the storage service speaks: a JSON `POST` for token exchanges and header-driven
//! `GET`/`PUT`/`DELETE` for object operations. Implementations own any timeout or proxy
//! configuration; the client layer never retries or reconfigures the transport.

// std
use std::{borrow::Cow, ops::Deref};
// self
use crate::{_prelude::*, error::TransportError};

/// Future returned by [`StorageHttpClient`] methods.
pub type TransportFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Header name/value pairs attached to a single request.
pub type HeaderPairs<'a> = &'a [(&'a str, &'a str)];

/// Abstraction over HTTP transports capable of executing identity and storage exchanges.
///
/// The trait acts as the client's only dependency on an HTTP stack. Callers provide an
/// implementation (typically behind `Arc<T>`) at construction time, which keeps the core
/// testable against mock servers and free of hard-wired transport choices.
pub trait StorageHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues a `POST` carrying `body` as an `application/json` payload.
	fn post_json<'a>(
		&'a self,
		url: &'a Url,
		body: &'a serde_json::Value,
	) -> TransportFuture<'a, RawResponse>;

	/// Issues a `GET` with the provided headers.
	fn get<'a>(&'a self, url: &'a Url, headers: HeaderPairs<'a>) -> TransportFuture<'a, RawResponse>;

	/// Issues a `PUT` with the provided headers and raw body.
	fn put<'a>(
		&'a self,
		url: &'a Url,
		headers: HeaderPairs<'a>,
		body: Vec<u8>,
	) -> TransportFuture<'a, RawResponse>;

	/// Issues a `DELETE` with the provided headers.
	fn delete<'a>(
		&'a self,
		url: &'a Url,
		headers: HeaderPairs<'a>,
	) -> TransportFuture<'a, RawResponse>;
}

/// Raw HTTP response surfaced to callers; status, headers, and body are read eagerly.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers in arrival order.
	pub headers: Vec<(String, String)>,
	/// Raw response body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns the first header matching `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Returns the body decoded lossily as UTF-8.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}

	/// Converts non-success statuses into [`TransportError::Status`].
	pub fn error_for_status(self) -> Result<Self, TransportError> {
		if self.is_success() {
			Ok(self)
		} else {
			let body = self.text().into_owned();

			Err(TransportError::Status { status: self.status, body })
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Timeouts, proxies, and TLS settings belong to the wrapped client; configure them on a
/// custom [`ReqwestClient`] and pass it through [`ReqwestHttpClient::with_client`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn capture(request: reqwest::RequestBuilder) -> Result<RawResponse, TransportError> {
		let response = request.send().await.map_err(TransportError::from)?;
		let status = response.status().as_u16();
		let headers = response
			.headers()
			.iter()
			.map(|(name, value)| {
				(name.as_str().to_owned(), String::from_utf8_lossy(value.as_bytes()).into_owned())
			})
			.collect();
		let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

		Ok(RawResponse { status, headers, body })
	}

	fn apply_headers(
		mut request: reqwest::RequestBuilder,
		headers: HeaderPairs<'_>,
	) -> reqwest::RequestBuilder {
		for (name, value) in headers {
			request = request.header(*name, *value);
		}

		request
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl StorageHttpClient for ReqwestHttpClient {
	fn post_json<'a>(
		&'a self,
		url: &'a Url,
		body: &'a serde_json::Value,
	) -> TransportFuture<'a, RawResponse> {
		let request = self.0.post(url.clone()).json(body);

		Box::pin(Self::capture(request))
	}

	fn get<'a>(
		&'a self,
		url: &'a Url,
		headers: HeaderPairs<'a>,
	) -> TransportFuture<'a, RawResponse> {
		let request = Self::apply_headers(self.0.get(url.clone()), headers);

		Box::pin(Self::capture(request))
	}

	fn put<'a>(
		&'a self,
		url: &'a Url,
		headers: HeaderPairs<'a>,
		body: Vec<u8>,
	) -> TransportFuture<'a, RawResponse> {
		let request = Self::apply_headers(self.0.put(url.clone()), headers).body(body);

		Box::pin(Self::capture(request))
	}

	fn delete<'a>(
		&'a self,
		url: &'a Url,
		headers: HeaderPairs<'a>,
	) -> TransportFuture<'a, RawResponse> {
		let request = Self::apply_headers(self.0.delete(url.clone()), headers);

		Box::pin(Self::capture(request))
	}
}
