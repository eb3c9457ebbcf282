//! Token cache contracts and built-in store implementations.
//!
//! The client treats the cache as a plain `has`/`get`/`put`/`forget` key-value collaborator.
//! Entries carry their own expiry (put-instant plus TTL), which is independent from the
//! token's identity-issued expiry; stores hide entries whose TTL has elapsed.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{CacheKey, TokenRecord},
};

/// Future returned by [`TokenStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by token stores.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Returns whether a live entry exists under `key`.
	fn has<'a>(&'a self, key: &'a CacheKey) -> StoreFuture<'a, bool>;

	/// Fetches the token cached under `key`, if present and within its TTL.
	fn get<'a>(&'a self, key: &'a CacheKey) -> StoreFuture<'a, Option<TokenRecord>>;

	/// Persists or replaces the token under `key`, keeping it for at most `ttl`.
	fn put<'a>(
		&'a self,
		key: &'a CacheKey,
		record: TokenRecord,
		ttl: Duration,
	) -> StoreFuture<'a, ()>;

	/// Removes the entry under `key`, returning whether one was present.
	fn forget<'a>(&'a self, key: &'a CacheKey) -> StoreFuture<'a, bool>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Stored envelope pairing a token record with the cache entry's own expiry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheEntry {
	/// Cached token record.
	pub record: TokenRecord,
	/// Instant at which the cache entry itself lapses.
	#[serde(with = "time::serde::rfc3339")]
	pub expires_at: OffsetDateTime,
}
impl CacheEntry {
	/// Wraps a record with an entry expiry of now plus `ttl`.
	pub fn new(record: TokenRecord, ttl: Duration) -> Self {
		Self { record, expires_at: OffsetDateTime::now_utc() + ttl }
	}

	/// Returns `true` while the entry's TTL has not elapsed.
	pub fn is_live_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at > instant
	}
}

/// Caching collaborator handed to the client: a [`TokenStore`] plus the key and TTL to use.
///
/// Construction without a `TokenCache` disables persistence entirely; the client then
/// re-authenticates whenever its in-memory token expires.
#[derive(Clone)]
pub struct TokenCache {
	store: Arc<dyn TokenStore>,
	key: CacheKey,
	ttl: Duration,
}
impl TokenCache {
	/// Default entry TTL; should cover the longest token lifetime the identity service issues.
	pub const DEFAULT_TTL: Duration = Duration::hours(24);

	/// Creates a cache handle with the default TTL.
	pub fn new(store: Arc<dyn TokenStore>, key: CacheKey) -> Self {
		Self { store, key, ttl: Self::DEFAULT_TTL }
	}

	/// Overrides the configured entry TTL.
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = if ttl.is_negative() { Duration::ZERO } else { ttl };

		self
	}

	/// Returns the cache key this handle reads and writes.
	pub fn key(&self) -> &CacheKey {
		&self.key
	}

	/// Returns the configured entry TTL.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Fetches the cached token under this handle's key.
	pub async fn lookup(&self) -> Result<Option<TokenRecord>, StoreError> {
		self.store.get(&self.key).await
	}

	/// Persists `record` under this handle's key.
	///
	/// The effective TTL is the configured TTL or the token's remaining lifetime, whichever
	/// is longer; a cache entry must never lapse before the token it holds.
	pub async fn persist(&self, record: &TokenRecord) -> Result<(), StoreError> {
		let remaining = record.remaining_at(OffsetDateTime::now_utc());
		let ttl = if remaining > self.ttl { remaining } else { self.ttl };

		self.store.put(&self.key, record.clone(), ttl).await
	}
}
impl Debug for TokenCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenCache").field("key", &self.key).field("ttl", &self.ttl).finish()
	}
}
