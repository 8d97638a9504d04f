use {
	coin_api::{config, init, server},
	std::net::SocketAddr,
	tracing::info,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let state = init::init_all()?;

	let config = config::get_config();
	let listener = server::bind_listener(config.server.port).await?;
	info!("🚀 Coin API is running at {}, endpoints under /api", listener.local_addr()?);

	let app = server::app(state);
	axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).with_graceful_shutdown(common::graceful::shutdown_signal()).await?;

	info!("Coin API stopped");
	Ok(())
}
