use {
	async_trait::async_trait,
	axum::{
		Router,
		body::Body,
		http::{Request, StatusCode},
	},
	coin_api::{
		cache::{CacheStore, Clock},
		coingecko::{MarketDataSource, UpstreamError},
		consts::CACHE_TTL_MILLIS,
		server::AppState,
		service::CoinService,
	},
	serde_json::{Value, json},
	std::{
		net::SocketAddr,
		sync::{
			Arc, Mutex,
			atomic::{AtomicI64, AtomicUsize, Ordering},
		},
		time::Duration,
	},
	tower::ServiceExt,
};

/// Clock the tests move by hand.
pub struct ManualClock {
	now: AtomicI64,
}

#[allow(dead_code)]
impl ManualClock {
	pub fn new(start: i64) -> Arc<Self> {
		Arc::new(Self { now: AtomicI64::new(start) })
	}

	pub fn advance(&self, millis: i64) {
		self.now.fetch_add(millis, Ordering::SeqCst);
	}
}

impl Clock for ManualClock {
	fn now_millis(&self) -> i64 {
		self.now.load(Ordering::SeqCst)
	}
}

/// Scripted provider that counts how often each endpoint is hit.
pub struct FakeSource {
	pub markets_response: Mutex<Result<Value, UpstreamError>>,
	pub coin_response: Mutex<Result<Value, UpstreamError>>,
	pub chart_response: Mutex<Result<Value, UpstreamError>>,
	pub markets_calls: AtomicUsize,
	pub coin_calls: AtomicUsize,
	pub chart_calls: AtomicUsize,
	pub last_markets_args: Mutex<Option<(u32, u32)>>,
	pub delay: Option<Duration>,
}

#[allow(dead_code)]
impl FakeSource {
	pub fn healthy() -> Self {
		Self {
			markets_response: Mutex::new(Ok(market_records())),
			coin_response: Mutex::new(Ok(coin_record())),
			chart_response: Mutex::new(Ok(chart_record())),
			markets_calls: AtomicUsize::new(0),
			coin_calls: AtomicUsize::new(0),
			chart_calls: AtomicUsize::new(0),
			last_markets_args: Mutex::new(None),
			delay: None,
		}
	}

	/// Every endpoint fails with `error`.
	pub fn failing(error: UpstreamError) -> Self {
		let source = Self::healthy();
		source.fail_all(error);
		source
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	pub fn fail_all(&self, error: UpstreamError) {
		*self.markets_response.lock().unwrap() = Err(error.clone());
		*self.coin_response.lock().unwrap() = Err(error.clone());
		*self.chart_response.lock().unwrap() = Err(error);
	}

	pub fn set_markets(&self, response: Result<Value, UpstreamError>) {
		*self.markets_response.lock().unwrap() = response;
	}

	pub fn set_chart(&self, response: Result<Value, UpstreamError>) {
		*self.chart_response.lock().unwrap() = response;
	}

	pub fn markets_calls(&self) -> usize {
		self.markets_calls.load(Ordering::SeqCst)
	}

	pub fn coin_calls(&self) -> usize {
		self.coin_calls.load(Ordering::SeqCst)
	}

	pub fn chart_calls(&self) -> usize {
		self.chart_calls.load(Ordering::SeqCst)
	}

	async fn pause(&self) {
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
	}
}

#[async_trait]
impl MarketDataSource for FakeSource {
	async fn markets(&self, page: u32, per_page: u32) -> Result<Value, UpstreamError> {
		self.markets_calls.fetch_add(1, Ordering::SeqCst);
		*self.last_markets_args.lock().unwrap() = Some((page, per_page));
		self.pause().await;
		self.markets_response.lock().unwrap().clone()
	}

	async fn coin(&self, _id: &str) -> Result<Value, UpstreamError> {
		self.coin_calls.fetch_add(1, Ordering::SeqCst);
		self.pause().await;
		self.coin_response.lock().unwrap().clone()
	}

	async fn market_chart(&self, _id: &str, _days: u32) -> Result<Value, UpstreamError> {
		self.chart_calls.fetch_add(1, Ordering::SeqCst);
		self.pause().await;
		self.chart_response.lock().unwrap().clone()
	}
}

/// Two `/coins/markets` records, the second one with the messy fields the provider sometimes sends.
pub fn market_records() -> Value {
	json!([
		{
			"id": "bitcoin",
			"symbol": "btc",
			"name": "Bitcoin",
			"image": "https://example.com/bitcoin.png",
			"current_price": 64000.5,
			"price_change_percentage_24h": -2.5,
			"market_cap": 1_250_000_000_000u64,
			"total_volume": 30_000_000_000u64,
			"market_cap_rank": 1
		},
		{
			"id": "weird-coin",
			"symbol": "wrd",
			"name": "Weird Coin",
			"image": { "large": "", "small": "https://example.com/weird-small.png" },
			"current_price": "not-a-number",
			"price_change_percentage_24h": null,
			"market_cap": "1200",
			"total_volume": 0
		}
	])
}

pub fn coin_record() -> Value {
	json!({
		"id": "bitcoin",
		"symbol": "btc",
		"name": "Bitcoin",
		"image": { "thumb": "https://example.com/t.png", "small": "https://example.com/s.png", "large": "https://example.com/l.png" },
		"market_data": {
			"current_price": { "usd": 64000.5, "eur": 59000.0 },
			"price_change_percentage_24h": 1.25,
			"market_cap": { "usd": 1_250_000_000_000u64 },
			"total_volume": { "eur": 1.0 }
		}
	})
}

pub fn chart_record() -> Value {
	json!({
		"prices": [[1_700_000_000_000u64, 64000.5], [1_700_003_600_000u64, 64100.0]],
		"market_caps": [[1_700_000_000_000u64, 1.25e12]],
		"total_volumes": [[1_700_000_000_000u64, 3.0e10]]
	})
}

#[allow(dead_code)]
pub fn service_with(source: Arc<FakeSource>, clock: Arc<ManualClock>) -> CoinService {
	CoinService::new(source, CacheStore::new(CACHE_TTL_MILLIS, clock))
}

#[allow(dead_code)]
pub fn app_with(source: Arc<dyn MarketDataSource>) -> Router {
	let service = CoinService::new(source, CacheStore::default());
	coin_api::server::app(AppState::new(service))
}

/// Runs `router` as a fake provider on a random local port.
#[allow(dead_code)]
pub async fn spawn_server(router: Router) -> SocketAddr {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, router).await.unwrap();
	});
	addr
}

/// Base url on a port nothing listens on, so connections are refused.
#[allow(dead_code)]
pub fn refused_base_url() -> String {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();
	drop(listener);
	format!("http://127.0.0.1:{}/api/v3", port)
}

#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
	let request = Request::builder().uri(uri).header("x-request-id", "test-request-id").body(Body::empty()).unwrap();
	let response = app.oneshot(request).await.unwrap();
	let status = response.status();
	let headers = response.headers().clone();
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
	let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
	(status, headers, body)
}
