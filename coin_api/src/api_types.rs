use {
	crate::consts::{DEFAULT_CHART_DAYS, DEFAULT_PAGE, DEFAULT_PER_PAGE},
	serde::{Deserialize, Serialize},
	serde_json::Value,
};

/// Stable coin shape served to the frontend.
///
/// Numeric fields stay `None` when the provider omitted them or sent something that is not
/// a number, so "unknown" never turns into `0`. `None` fields are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Coin {
	pub id: String,
	/// Ticker, lowercase as the provider sends it
	pub symbol: String,
	pub name: String,
	/// Largest non-empty image url, `""` when there is none
	pub image: String,
	/// Price in usd
	#[serde(skip_serializing_if = "Option::is_none")]
	pub current_price: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price_change_percentage_24h: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub market_cap: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total_volume: Option<f64>,
}

/// Coin detail page payload: the coin plus its price chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
	#[serde(flatten)]
	pub coin: Coin,
	/// Provider chart JSON (`prices`, `market_caps`, `total_volumes`), passed through as-is
	pub market_chart: Value,
}

/// `GET /api/coins` query. Values are parsed leniently, see `CoinsQuery::page`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinsQuery {
	pub page: Option<String>,
	pub per_page: Option<String>,
}

impl CoinsQuery {
	pub fn page(&self) -> u32 {
		parse_positive_or(self.page.as_deref(), DEFAULT_PAGE)
	}

	pub fn per_page(&self) -> u32 {
		parse_positive_or(self.per_page.as_deref(), DEFAULT_PER_PAGE)
	}
}

/// `GET /api/coins/{id}/market_chart` query, `days` defaults to 7
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartQuery {
	pub days: Option<String>,
}

impl ChartQuery {
	pub fn days(&self) -> u32 {
		parse_positive_or(self.days.as_deref(), DEFAULT_CHART_DAYS)
	}
}

/// Reads the leading digits of `raw` ("12abc" -> 12). Missing, unparsable or zero values
/// give `default`.
pub fn parse_positive_or(raw: Option<&str>, default: u32) -> u32 {
	let Some(raw) = raw else {
		return default;
	};
	let trimmed = raw.trim_start();
	let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
	let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
	match digits[..end].parse::<u32>() {
		Ok(value) if value > 0 => value,
		_ => default,
	}
}

/// Liveness body for `/health` and `/api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub message: String,
	/// RFC 3339, millisecond precision
	pub timestamp: String,
}

/// Error body. `retryAfter` is only present for rate limit errors that carried a hint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub message: String,
	#[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
	pub retry_after: Option<String>,
}
