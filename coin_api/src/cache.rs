use {
	crate::consts::CACHE_TTL_MILLIS,
	serde_json::Value,
	std::{collections::HashMap, sync::Arc},
	tokio::sync::RwLock,
};

/// Time source for freshness checks, in unix milliseconds.
pub trait Clock: Send + Sync {
	fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now_millis(&self) -> i64 {
		chrono::Utc::now().timestamp_millis()
	}
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
	pub payload: Value,
	pub stored_at: i64,
}

/// Response cache shared by all requests.
///
/// Entries are never evicted: a stale entry is skipped by `get` and replaced by the next
/// `set` for the same key. The key space is small (pages, coin ids, chart windows) so the
/// map stays bounded in practice.
pub struct CacheStore {
	entries: RwLock<HashMap<String, CacheEntry>>,
	ttl_millis: i64,
	clock: Arc<dyn Clock>,
}

impl Default for CacheStore {
	fn default() -> Self {
		Self::new(CACHE_TTL_MILLIS, Arc::new(SystemClock))
	}
}

impl CacheStore {
	pub fn new(ttl_millis: i64, clock: Arc<dyn Clock>) -> Self {
		Self { entries: RwLock::new(HashMap::new()), ttl_millis, clock }
	}

	/// Fresh payload for `key`, or `None` when missing or older than the ttl.
	pub async fn get(&self, key: &str) -> Option<Value> {
		let now = self.clock.now_millis();
		let read_guard = self.entries.read().await;
		read_guard.get(key).filter(|entry| now - entry.stored_at < self.ttl_millis).map(|entry| entry.payload.clone())
	}

	pub async fn set(&self, key: impl Into<String>, payload: Value) {
		let entry = CacheEntry { payload, stored_at: self.clock.now_millis() };
		let mut write_guard = self.entries.write().await;
		write_guard.insert(key.into(), entry);
	}

	/// Number of stored entries, stale ones included.
	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.read().await.is_empty()
	}

	pub fn ttl_millis(&self) -> i64 {
		self.ttl_millis
	}
}
