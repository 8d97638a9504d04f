use {
	crate::consts::{COINGECKO_API_KEY_HEADER, VS_CURRENCY},
	async_trait::async_trait,
	reqwest::{
		Client, StatusCode, Url,
		header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER},
	},
	serde::Serialize,
	serde_json::Value,
	std::time::Duration,
	thiserror::Error,
};

/// Classified failure of a call to the market data provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
	/// DNS failure, refused connection or timeout
	#[error("Market data provider is not reachable: {0}")]
	NetworkUnreachable(String),

	/// HTTP 429. `retry_after` is the raw `Retry-After` header, if the provider sent one
	#[error("Market data provider rate limit exceeded (retry after: {retry_after:?})")]
	RateLimited { retry_after: Option<String> },

	/// HTTP 404, or an id that cannot name a coin
	#[error("Resource not found at market data provider")]
	NotFound,

	/// Any other non-2xx status
	#[error("Market data provider responded with status {status}")]
	Status { status: u16 },

	/// Transport failure after the connection was made, e.g. a reset mid-response
	#[error("Request to market data provider failed: {0}")]
	Transport(String),

	/// Body is not JSON, or not the shape the normalizer expects
	#[error("Unexpected payload from market data provider: {0}")]
	InvalidPayload(String),
}

impl UpstreamError {
	pub fn from_status(status: StatusCode, retry_after: Option<String>) -> Self {
		match status {
			StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited { retry_after },
			StatusCode::NOT_FOUND => UpstreamError::NotFound,
			_ => UpstreamError::Status { status: status.as_u16() },
		}
	}

	fn from_reqwest(err: reqwest::Error) -> Self {
		if err.is_timeout() || err.is_connect() {
			UpstreamError::NetworkUnreachable(err.to_string())
		} else if err.is_decode() {
			UpstreamError::InvalidPayload(err.to_string())
		} else if let Some(status) = err.status() {
			UpstreamError::from_status(status, None)
		} else {
			UpstreamError::Transport(err.to_string())
		}
	}
}

/// Raw access to the market data provider. Responses are returned as provider JSON.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
	/// One page of `/coins/markets`, ordered by market cap
	async fn markets(&self, page: u32, per_page: u32) -> Result<Value, UpstreamError>;

	/// `/coins/{id}` with market data only
	async fn coin(&self, id: &str) -> Result<Value, UpstreamError>;

	/// `/coins/{id}/market_chart` in usd over the last `days`
	async fn market_chart(&self, id: &str, days: u32) -> Result<Value, UpstreamError>;
}

/// `/coins/markets` query string
#[derive(Debug, Clone, Serialize)]
struct ReqMarkets {
	vs_currency: &'static str,
	order: &'static str,
	per_page: u32,
	page: u32,
	sparkline: bool,
	price_change_percentage: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct ReqCoin {
	localization: bool,
	tickers: bool,
	market_data: bool,
	community_data: bool,
	developer_data: bool,
	sparkline: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ReqMarketChart {
	vs_currency: &'static str,
	days: u32,
}

/// CoinGecko REST client. The api key, when configured, goes out as a default header on
/// every request.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
	client: Client,
	base_url: Url,
}

impl CoinGeckoClient {
	pub fn new(base_url: &str, timeout: Duration, api_key: Option<&str>) -> anyhow::Result<Self> {
		let base_url = Url::parse(base_url)?;
		if base_url.cannot_be_a_base() {
			return Err(anyhow::anyhow!("CoinGecko base url {} cannot be a base", base_url));
		}

		let mut headers = HeaderMap::new();
		if let Some(api_key) = api_key {
			let mut value = HeaderValue::from_str(api_key)?;
			value.set_sensitive(true);
			headers.insert(HeaderName::from_static(COINGECKO_API_KEY_HEADER), value);
		}

		let client = Client::builder().timeout(timeout).default_headers(headers).build()?;
		Ok(Self { client, base_url })
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Appends path segments to the base url. Ids are percent-encoded as single segments.
	///
	/// `extend` drops `.` and `..` segments, so ids like that are rejected up front with
	/// `NotFound` instead of silently hitting another provider route.
	fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
		let mut url = self.base_url.clone();
		{
			let mut path = url.path_segments_mut().map_err(|_| UpstreamError::Transport(format!("invalid base url {}", self.base_url)))?;
			path.pop_if_empty().extend(segments);
		}
		Ok(url)
	}

	fn coin_segment(id: &str) -> Result<&str, UpstreamError> {
		match id {
			"" | "." | ".." => Err(UpstreamError::NotFound),
			_ => Ok(id),
		}
	}

	async fn get_json<Q: Serialize + ?Sized>(&self, url: Url, query: &Q) -> Result<Value, UpstreamError> {
		let response = self.client.get(url).query(query).send().await.map_err(UpstreamError::from_reqwest)?;

		let status = response.status();
		if !status.is_success() {
			let retry_after = response.headers().get(RETRY_AFTER).and_then(|value| value.to_str().ok()).map(str::to_string);
			return Err(UpstreamError::from_status(status, retry_after));
		}

		response.json::<Value>().await.map_err(UpstreamError::from_reqwest)
	}
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
	async fn markets(&self, page: u32, per_page: u32) -> Result<Value, UpstreamError> {
		let url = self.endpoint(&["coins", "markets"])?;
		let req = ReqMarkets { vs_currency: VS_CURRENCY, order: "market_cap_desc", per_page, page, sparkline: false, price_change_percentage: "24h" };
		self.get_json(url, &req).await
	}

	async fn coin(&self, id: &str) -> Result<Value, UpstreamError> {
		let url = self.endpoint(&["coins", Self::coin_segment(id)?])?;
		let req = ReqCoin { localization: false, tickers: false, market_data: true, community_data: false, developer_data: false, sparkline: false };
		self.get_json(url, &req).await
	}

	async fn market_chart(&self, id: &str, days: u32) -> Result<Value, UpstreamError> {
		let url = self.endpoint(&["coins", Self::coin_segment(id)?, "market_chart"])?;
		let req = ReqMarketChart { vs_currency: VS_CURRENCY, days };
		self.get_json(url, &req).await
	}
}
