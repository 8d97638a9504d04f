use {
	crate::{
		handlers::{handle_coin_detail, handle_coins, handle_health, handle_market_chart},
		service::CoinService,
	},
	axum::{
		Router,
		extract::{ConnectInfo, Request},
		http::HeaderName,
		middleware::{self, Next},
		response::Response,
		routing::get,
	},
	std::{io, net::SocketAddr, sync::Arc, time::Duration},
	tokio::net::TcpListener,
	tower_http::{
		compression::CompressionLayer,
		cors::{Any, CorsLayer},
		request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	},
	tracing::warn,
	uuid::Uuid,
};

#[derive(Clone)]
pub struct AppState {
	pub coin_service: Arc<CoinService>,
}

impl AppState {
	pub fn new(coin_service: CoinService) -> Self {
		Self { coin_service: Arc::new(coin_service) }
	}
}

#[derive(Clone)]
pub struct ClientInfo {
	pub request_id: String,
	pub ip: String,
}

// x-real-ip > x-forwarded-for (first hop) > peer address
fn client_ip(request: &Request) -> String {
	let headers = request.headers();
	headers
		.get("x-real-ip")
		.and_then(|header| header.to_str().ok())
		.map(|s| s.trim().to_string())
		.or_else(|| headers.get("x-forwarded-for").and_then(|header| header.to_str().ok()).and_then(|value| value.split(',').next()).map(|s| s.trim().to_string()))
		.filter(|ip| !ip.is_empty())
		.or_else(|| request.extensions().get::<ConnectInfo<SocketAddr>>().map(|connect_info| connect_info.ip().to_string()))
		.unwrap_or_else(|| "unknown".to_string())
}

async fn extract_client_info(mut request: Request, next: Next) -> Response {
	let ip = client_ip(&request);
	let x_request_id = HeaderName::from_static("x-request-id");
	let request_id = request.headers().get(x_request_id).and_then(|header| header.to_str().ok()).map(|header| header.to_string()).unwrap_or_else(|| Uuid::new_v4().to_string());
	request.extensions_mut().insert(ClientInfo { request_id, ip });
	next.run(request).await
}

pub fn app(state: AppState) -> Router {
	let x_request_id = HeaderName::from_static("x-request-id");
	let sub_router = Router::new()
		.route("/health", get(handle_health))
		.route("/coins", get(handle_coins))
		.route("/coins/{id}", get(handle_coin_detail))
		.route("/coins/{id}/market_chart", get(handle_market_chart))
		.layer(PropagateRequestIdLayer::new(x_request_id.clone()))
		.layer(CompressionLayer::new())
		.layer(middleware::from_fn(extract_client_info))
		.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
		.layer(CorsLayer::new().allow_methods(Any).allow_origin(Any).allow_credentials(false).allow_headers(Any).expose_headers(Any).max_age(Duration::from_secs(60) * 10))
		.with_state(state);

	Router::new().route("/health", get(handle_health)).nest("/api", sub_router)
}

/// Binds `0.0.0.0:port`, falling back to `port + 1` once when the port is taken.
pub async fn bind_listener(port: u16) -> io::Result<TcpListener> {
	match TcpListener::bind(("0.0.0.0", port)).await {
		Ok(listener) => Ok(listener),
		Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
			let Some(next_port) = port.checked_add(1) else {
				return Err(e);
			};
			warn!("Port {} is already in use, trying port {}", port, next_port);
			TcpListener::bind(("0.0.0.0", next_port)).await
		}
		Err(e) => Err(e),
	}
}
