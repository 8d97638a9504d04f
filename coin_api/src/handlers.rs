use {
	crate::{
		api_error::ApiError,
		api_types::{ChartQuery, Coin, CoinDetail, CoinsQuery, HealthResponse},
		consts::{DEFAULT_CHART_DAYS, HEALTH_MESSAGE},
		server::{AppState, ClientInfo},
	},
	axum::{
		Extension, Json,
		extract::{Path, Query, State},
	},
	serde_json::Value,
	tracing::info,
};

/// Coin list. Always 200: upstream trouble is answered with demo data.
pub async fn handle_coins(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<CoinsQuery>) -> Json<Vec<Coin>> {
	let (page, per_page) = (params.page(), params.per_page());
	info!("[Coins] request_id={}, ip={}, page={}, per_page={}", client_info.request_id, client_info.ip, page, per_page);

	Json(state.coin_service.list_coins(page, per_page).await)
}

/// Coin with its 7 day chart. Upstream errors are surfaced with their own status.
pub async fn handle_coin_detail(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Path(id): Path<String>) -> Result<Json<CoinDetail>, ApiError> {
	info!("[CoinDetail] request_id={}, ip={}, id={}", client_info.request_id, client_info.ip, id);

	let coin = state.coin_service.get_coin_by_id(&id).await.map_err(|e| {
		info!("request_id={}, id={} - Coin lookup failed: {}", client_info.request_id, id, e);
		ApiError::from(e)
	})?;
	let market_chart = state.coin_service.get_coin_market_chart(&id, DEFAULT_CHART_DAYS).await.map_err(|e| {
		info!("request_id={}, id={} - Market chart lookup failed: {}", client_info.request_id, id, e);
		ApiError::from(e)
	})?;

	Ok(Json(CoinDetail { coin, market_chart }))
}

pub async fn handle_market_chart(
	State(state): State<AppState>,
	Extension(client_info): Extension<ClientInfo>,
	Path(id): Path<String>,
	Query(params): Query<ChartQuery>,
) -> Result<Json<Value>, ApiError> {
	let days = params.days();
	info!("[MarketChart] request_id={}, ip={}, id={}, days={}", client_info.request_id, client_info.ip, id, days);

	let chart = state.coin_service.get_coin_market_chart(&id, days).await?;
	Ok(Json(chart))
}

pub async fn handle_health() -> Json<HealthResponse> {
	Json(HealthResponse { status: "OK".to_string(), message: HEALTH_MESSAGE.to_string(), timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true) })
}
