use {
	crate::{
		api_types::Coin,
		cache::CacheStore,
		coingecko::{MarketDataSource, UpstreamError},
		demo::demo_coins,
		key,
		normalize::{normalize_coin_detail, normalize_markets},
	},
	serde::{Serialize, de::DeserializeOwned},
	serde_json::Value,
	std::sync::Arc,
	tracing::{debug, error, warn},
};

/// Cache-first access to the market data provider.
///
/// Every operation checks the cache, calls upstream on a miss, normalizes and stores the
/// result. Concurrent misses on the same key are not merged: each one calls upstream.
pub struct CoinService {
	source: Arc<dyn MarketDataSource>,
	cache: CacheStore,
}

impl CoinService {
	pub fn new(source: Arc<dyn MarketDataSource>, cache: CacheStore) -> Self {
		Self { source, cache }
	}

	pub fn cache(&self) -> &CacheStore {
		&self.cache
	}

	/// Coin list for the landing page. Never fails: any upstream error yields the demo list.
	pub async fn list_coins(&self, page: u32, per_page: u32) -> Vec<Coin> {
		let cache_key = key::coins_key(page, per_page);
		match self.fetch_coins(&cache_key, page, per_page).await {
			Ok(coins) => coins,
			Err(UpstreamError::RateLimited { retry_after }) => {
				warn!("cache_key={} - Rate limited by market data provider (retry after: {:?}), serving demo coins", cache_key, retry_after);
				demo_coins()
			}
			Err(e) => {
				warn!("cache_key={} - Failed to fetch coins, serving demo coins: {}", cache_key, e);
				demo_coins()
			}
		}
	}

	async fn fetch_coins(&self, cache_key: &str, page: u32, per_page: u32) -> Result<Vec<Coin>, UpstreamError> {
		if let Some(coins) = self.cached::<Vec<Coin>>(cache_key).await {
			return Ok(coins);
		}

		let raw = self.source.markets(page, per_page).await?;
		let coins = normalize_markets(&raw)?;
		self.store(cache_key, &coins).await;
		Ok(coins)
	}

	pub async fn get_coin_by_id(&self, id: &str) -> Result<Coin, UpstreamError> {
		let cache_key = key::coin_key(id);
		if let Some(coin) = self.cached::<Coin>(&cache_key).await {
			return Ok(coin);
		}

		let raw = self.source.coin(id).await.inspect_err(|e| log_upstream_error(&cache_key, e))?;
		let coin = normalize_coin_detail(&raw, id);
		self.store(&cache_key, &coin).await;
		Ok(coin)
	}

	/// Provider chart JSON, passed through untouched.
	pub async fn get_coin_market_chart(&self, id: &str, days: u32) -> Result<Value, UpstreamError> {
		let cache_key = key::chart_key(id, days);
		if let Some(chart) = self.cache.get(&cache_key).await {
			debug!("cache_key={} - Cache hit", cache_key);
			return Ok(chart);
		}

		let chart = self.source.market_chart(id, days).await.inspect_err(|e| log_upstream_error(&cache_key, e))?;
		self.cache.set(cache_key, chart.clone()).await;
		Ok(chart)
	}

	async fn cached<T: DeserializeOwned>(&self, cache_key: &str) -> Option<T> {
		let payload = self.cache.get(cache_key).await?;
		match serde_json::from_value(payload) {
			Ok(value) => {
				debug!("cache_key={} - Cache hit", cache_key);
				Some(value)
			}
			Err(e) => {
				warn!("cache_key={} - Ignoring unreadable cache entry: {}", cache_key, e);
				None
			}
		}
	}

	async fn store<T: Serialize>(&self, cache_key: &str, value: &T) {
		match serde_json::to_value(value) {
			Ok(payload) => self.cache.set(cache_key, payload).await,
			Err(e) => error!("cache_key={} - Failed to serialize value for cache: {}", cache_key, e),
		}
	}
}

fn log_upstream_error(cache_key: &str, e: &UpstreamError) {
	match e {
		UpstreamError::NotFound => warn!("cache_key={} - {}", cache_key, e),
		_ => error!("cache_key={} - {}", cache_key, e),
	}
}
