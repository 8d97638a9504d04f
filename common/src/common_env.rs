use {
	crate::consts::COMMON_ENV_PATH,
	config::{Config, Environment},
	serde::{Deserialize, Serialize},
	tokio::sync::OnceCell,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommonEnv {
	pub run_mode: String,
	// CoinGecko demo api key, sent as x-cg-demo-api-key when present
	pub coingecko_api_key: Option<String>,
	// overrides server.port from the toml file
	pub port: Option<u16>,
}

impl CommonEnv {
	pub fn api_key(&self) -> Option<&str> {
		self.coingecko_api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
	}
}

pub static COMMON_ENV: OnceCell<CommonEnv> = OnceCell::const_new();

pub fn load_common_env() -> anyhow::Result<()> {
	// the env file is optional, variables may come from the container instead
	if let Err(e) = dotenvy::from_path(COMMON_ENV_PATH) {
		println!("Skip loading {}: {}", COMMON_ENV_PATH, e);
	}

	let config = Config::builder().add_source(Environment::default()).build()?;

	let common_env: CommonEnv = config.try_deserialize()?;
	println!("Common env configuration: run_mode={}, api_key_set={}, port={:?}", common_env.run_mode, common_env.api_key().is_some(), common_env.port);
	COMMON_ENV.set(common_env)?;
	check_common_env()?;
	Ok(())
}

pub fn check_common_env() -> anyhow::Result<()> {
	let common_env = get_common_env();
	crate::consts::validate_run_mode(&common_env.run_mode)?;
	if common_env.port == Some(0) {
		return Err(anyhow::anyhow!("PORT must be greater than 0"));
	}
	Ok(())
}

pub fn get_common_env() -> &'static CommonEnv {
	COMMON_ENV.get().expect("Common env not loaded")
}
