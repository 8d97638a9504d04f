use {tokio::signal, tracing::info};

/// Resolves on SIGINT or SIGTERM. Used as the axum graceful shutdown future.
pub async fn shutdown_signal() {
	#[cfg(unix)]
	{
		use tokio::signal::unix::{SignalKind, signal};
		match signal(SignalKind::terminate()) {
			Ok(mut sigterm) => {
				tokio::select! {
					_ = signal::ctrl_c() => {
						info!("Received SIGINT, starting graceful shutdown...");
					}
					_ = sigterm.recv() => {
						info!("Received SIGTERM, starting graceful shutdown...");
					}
				}
			}
			Err(e) => {
				info!("Failed to create SIGTERM signal handler: {}", e);
				let _ = signal::ctrl_c().await;
				info!("Received SIGINT, starting graceful shutdown...");
			}
		}
	}
	#[cfg(not(unix))]
	{
		let _ = signal::ctrl_c().await;
		info!("Received SIGINT, starting graceful shutdown...");
	}
}
