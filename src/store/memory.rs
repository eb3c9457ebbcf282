//! Thread-safe in-memory [`TokenStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{CacheKey, TokenRecord},
	store::{CacheEntry, StoreError, StoreFuture, TokenStore},
};

type StoreMap = Arc<RwLock<HashMap<CacheKey, CacheEntry>>>;

/// Thread-safe storage backend that keeps entries in-process for tests and demos.
///
/// Concurrent writers race with plain last-write-wins semantics; there is no coordination
/// beyond the map lock, matching the shared-cache contract the client assumes.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	fn has_now(map: StoreMap, key: &CacheKey) -> bool {
		let now = OffsetDateTime::now_utc();

		map.read().get(key).is_some_and(|entry| entry.is_live_at(now))
	}

	fn get_now(map: StoreMap, key: &CacheKey) -> Option<TokenRecord> {
		let now = OffsetDateTime::now_utc();

		map.read().get(key).filter(|entry| entry.is_live_at(now)).map(|entry| entry.record.clone())
	}

	fn put_now(map: StoreMap, key: CacheKey, record: TokenRecord, ttl: Duration) {
		map.write().insert(key, CacheEntry::new(record, ttl));
	}

	fn forget_now(map: StoreMap, key: &CacheKey) -> bool {
		map.write().remove(key).is_some()
	}
}
impl TokenStore for MemoryStore {
	fn has<'a>(&'a self, key: &'a CacheKey) -> StoreFuture<'a, bool> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::has_now(map, key)) })
	}

	fn get<'a>(&'a self, key: &'a CacheKey) -> StoreFuture<'a, Option<TokenRecord>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::get_now(map, key)) })
	}

	fn put<'a>(
		&'a self,
		key: &'a CacheKey,
		record: TokenRecord,
		ttl: Duration,
	) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move {
			Self::put_now(map, key, record, ttl);

			Ok(())
		})
	}

	fn forget<'a>(&'a self, key: &'a CacheKey) -> StoreFuture<'a, bool> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::forget_now(map, key)) })
	}
}
