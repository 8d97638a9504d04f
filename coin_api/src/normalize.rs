use {
	crate::{api_types::Coin, coingecko::UpstreamError},
	serde_json::Value,
};

/// Image url from either a plain string or an `{large, small, thumb}` object.
pub fn extract_image_url(image: Option<&Value>) -> String {
	match image {
		Some(Value::String(url)) => url.clone(),
		Some(Value::Object(sizes)) => ["large", "small", "thumb"]
			.iter()
			.filter_map(|size| sizes.get(*size).and_then(Value::as_str))
			.find(|url| !url.is_empty())
			.unwrap_or_default()
			.to_string(),
		_ => String::new(),
	}
}

/// Number conversion with explicit absence.
///
/// Numbers pass through, booleans are 1/0, strings are trimmed and parsed (blank is 0).
/// Null, arrays, objects and anything that ends up NaN or infinite are `None`.
pub fn extract_numeric_value(value: Option<&Value>) -> Option<f64> {
	let number = match value? {
		Value::Number(number) => number.as_f64(),
		Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
		Value::String(raw) => {
			let trimmed = raw.trim();
			if trimmed.is_empty() { Some(0.0) } else { trimmed.parse::<f64>().ok() }
		}
		Value::Null | Value::Array(_) | Value::Object(_) => None,
	};
	number.filter(|number| number.is_finite())
}

fn extract_string(value: Option<&Value>) -> String {
	value.and_then(Value::as_str).unwrap_or_default().to_string()
}

/// `market_data.<field>.usd`
fn usd_value<'a>(market_data: Option<&'a Value>, field: &str) -> Option<&'a Value> {
	market_data?.get(field)?.get(crate::consts::VS_CURRENCY)
}

/// One record of `/coins/markets`.
pub fn normalize_market_coin(raw: &Value) -> Coin {
	Coin {
		id: extract_string(raw.get("id")),
		symbol: extract_string(raw.get("symbol")),
		name: extract_string(raw.get("name")),
		image: extract_image_url(raw.get("image")),
		current_price: extract_numeric_value(raw.get("current_price")),
		price_change_percentage_24h: extract_numeric_value(raw.get("price_change_percentage_24h")),
		market_cap: extract_numeric_value(raw.get("market_cap")),
		total_volume: extract_numeric_value(raw.get("total_volume")),
	}
}

/// The whole `/coins/markets` payload, which must be an array.
pub fn normalize_markets(raw: &Value) -> Result<Vec<Coin>, UpstreamError> {
	let records = raw.as_array().ok_or_else(|| UpstreamError::InvalidPayload("coins markets response is not an array".to_string()))?;
	Ok(records.iter().map(normalize_market_coin).collect())
}

/// `/coins/{id}` payload. Prices live under `market_data`; `id` falls back to the requested one.
pub fn normalize_coin_detail(raw: &Value, requested_id: &str) -> Coin {
	let market_data = raw.get("market_data");
	let id = match raw.get("id").and_then(Value::as_str) {
		Some(id) if !id.is_empty() => id.to_string(),
		_ => requested_id.to_string(),
	};

	Coin {
		id,
		symbol: extract_string(raw.get("symbol")),
		name: extract_string(raw.get("name")),
		image: extract_image_url(raw.get("image")),
		current_price: extract_numeric_value(usd_value(market_data, "current_price")),
		price_change_percentage_24h: extract_numeric_value(market_data.and_then(|data| data.get("price_change_percentage_24h"))),
		market_cap: extract_numeric_value(usd_value(market_data, "market_cap")),
		total_volume: extract_numeric_value(usd_value(market_data, "total_volume")),
	}
}
