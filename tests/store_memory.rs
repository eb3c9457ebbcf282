// self
use conoha_object_client::{
	_preludet::*,
	auth::{CacheKey, TokenRecord},
	store::{MemoryStore, TokenCache, TokenStore},
};

fn fixture(key: &str, lifetime: Duration) -> (CacheKey, TokenRecord) {
	let key = CacheKey::new(key).expect("Cache key fixture should be valid.");
	let record = TokenRecord::new("access-token", OffsetDateTime::now_utc() + lifetime);

	(key, record)
}

#[tokio::test]
async fn put_get_has_forget_round_trip() {
	let store = MemoryStore::default();
	let (key, record) = fixture("conoha_token", Duration::hours(1));

	assert!(!store.has(&key).await.expect("Empty store lookup should succeed."));

	store.put(&key, record.clone(), Duration::hours(24)).await.expect("Put should succeed.");

	assert!(store.has(&key).await.expect("Lookup after put should succeed."));

	let fetched = store
		.get(&key)
		.await
		.expect("Get after put should succeed.")
		.expect("Stored record should be returned.");

	assert_eq!(fetched.id.expose(), record.id.expose());
	assert_eq!(fetched.expires_at, record.expires_at);

	assert!(store.forget(&key).await.expect("Forget should succeed."));
	assert!(!store.has(&key).await.expect("Lookup after forget should succeed."));
	assert!(!store.forget(&key).await.expect("Second forget should succeed."));
}

#[tokio::test]
async fn zero_ttl_entries_are_invisible() {
	let store = MemoryStore::default();
	let (key, record) = fixture("conoha_token", Duration::hours(1));

	store.put(&key, record, Duration::ZERO).await.expect("Put should succeed.");

	assert!(!store.has(&key).await.expect("Lookup should succeed."));
	assert!(store.get(&key).await.expect("Get should succeed.").is_none());
}

#[tokio::test]
async fn overwrites_follow_last_write_wins() {
	let store = MemoryStore::default();
	let (key, first) = fixture("conoha_token", Duration::hours(1));
	let second = TokenRecord::new("replacement", OffsetDateTime::now_utc() + Duration::hours(2));

	store.put(&key, first, Duration::hours(24)).await.expect("First put should succeed.");
	store.put(&key, second, Duration::hours(24)).await.expect("Second put should succeed.");

	let fetched = store
		.get(&key)
		.await
		.expect("Get should succeed.")
		.expect("Replacement record should be returned.");

	assert_eq!(fetched.id.expose(), "replacement");
}

#[tokio::test]
async fn token_cache_keeps_entries_alive_for_the_token_lifetime() {
	let backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn TokenStore> = backend.clone();
	let key = CacheKey::new("conoha_token").expect("Cache key fixture should be valid.");
	// A configured TTL of zero would normally make every entry invisible; the cache handle
	// must stretch it to the token's remaining lifetime instead.
	let cache = TokenCache::new(store, key.clone()).with_ttl(Duration::ZERO);
	let record = TokenRecord::new("long-lived", OffsetDateTime::now_utc() + Duration::hours(1));

	cache.persist(&record).await.expect("Persist should succeed.");

	let fetched = cache
		.lookup()
		.await
		.expect("Lookup should succeed.")
		.expect("Entry must outlive the configured TTL while the token is valid.");

	assert_eq!(fetched.id.expose(), "long-lived");
}

#[tokio::test]
async fn token_cache_keeps_expired_tokens_until_the_entry_ttl_lapses() {
	let backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn TokenStore> = backend.clone();
	let key = CacheKey::new("conoha_token").expect("Cache key fixture should be valid.");
	let cache = TokenCache::new(store, key);
	let expired = TokenRecord::new("stale", OffsetDateTime::now_utc() - Duration::minutes(5));

	cache.persist(&expired).await.expect("Persist should succeed.");

	// Entry liveness is independent from token validity; the caller decides what an expired
	// token means.
	let fetched = cache
		.lookup()
		.await
		.expect("Lookup should succeed.")
		.expect("Expired token should still be readable while its entry is live.");

	assert_eq!(fetched.id.expose(), "stale");
	assert!(fetched.is_expired());
}
