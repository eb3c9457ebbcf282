//! Rust's turnkey ConoHa object storage client - token-cached Identity v2 auth, tenant-scoped
//! container operations, and a transport-aware error taxonomy in one crate built for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]
#![cfg_attr(test, allow(unused_crate_dependencies))]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod obs;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{CacheKey, Credentials, TenantId},
		client::{ObjectStorageClient, ReqwestStorageClient},
		config::StorageConfig,
		http::ReqwestHttpClient,
		store::{MemoryStore, TokenCache, TokenStore},
	};

	/// Storage configuration whose identity and storage endpoints both point at `base`.
	///
	/// The identity endpoint lands on `<base>/v2.0/tokens` and the storage endpoint on
	/// `<base>/v1/`, matching the paths the integration mocks mount.
	pub fn test_storage_config(base: &str) -> StorageConfig {
		StorageConfig::builder()
			.tenant(TenantId::new("test-tenant").expect("Tenant fixture should be valid."))
			.credentials(Credentials::new("test-user", "test-password"))
			.auth_endpoint(
				Url::parse(&format!("{base}/v2.0/tokens"))
					.expect("Mock identity endpoint should parse successfully."),
			)
			.storage_endpoint(
				Url::parse(&format!("{base}/v1/"))
					.expect("Mock storage endpoint should parse successfully."),
			)
			.build()
			.expect("Storage configuration should build successfully.")
	}

	/// Builds a [`TokenCache`] backed by a fresh [`MemoryStore`], returning the backend too so
	/// tests can inspect what the client persisted.
	pub fn test_memory_cache(key: &str) -> (TokenCache, Arc<MemoryStore>) {
		let backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn TokenStore> = backend.clone();
		let cache =
			TokenCache::new(store, CacheKey::new(key).expect("Cache key fixture should be valid."));

		(cache, backend)
	}

	/// Connects a [`ReqwestStorageClient`] against the provided configuration and cache.
	pub async fn connect_reqwest_test_client(
		config: StorageConfig,
		cache: Option<TokenCache>,
	) -> Result<ReqwestStorageClient> {
		ObjectStorageClient::with_http_client(config, cache, ReqwestHttpClient::default()).await
	}

	/// Formats `now + delta` as the RFC 3339 expiry string the identity mocks hand out.
	pub fn rfc3339_in(delta: Duration) -> String {
		(OffsetDateTime::now_utc() + delta)
			.format(&time::format_description::well_known::Rfc3339)
			.expect("Expiry fixture should format as RFC 3339.")
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
