use {
	crate::{
		cache::CacheStore,
		coingecko::CoinGeckoClient,
		config::{get_config, load_config},
		server::AppState,
		service::CoinService,
	},
	common::common_env,
	std::{sync::Arc, time::Duration},
	tracing::info,
};

pub fn init_all() -> anyhow::Result<AppState> {
	init_load()?;
	init_logging()?;
	init_app_state()
}

fn init_load() -> anyhow::Result<()> {
	common_env::load_common_env()?;
	load_config(common::consts::COIN_API_CONFIG_PATH)?;
	Ok(())
}

fn init_logging() -> anyhow::Result<()> {
	common::logging::init_logging(&get_config().logging)
}

fn init_app_state() -> anyhow::Result<AppState> {
	let upstream = &get_config().upstream;
	let api_key = common_env::get_common_env().api_key();
	let client = CoinGeckoClient::new(&upstream.base_url, Duration::from_secs(upstream.timeout_secs), api_key)?;
	info!("CoinGecko client initialized (base_url: {}, timeout: {}s, api_key: {})", client.base_url(), upstream.timeout_secs, if api_key.is_some() { "set" } else { "not set" });

	let coin_service = CoinService::new(Arc::new(client), CacheStore::default());
	Ok(AppState::new(coin_service))
}
