use {
	crate::consts::{DEFAULT_COINGECKO_API_URL, DEFAULT_UPSTREAM_TIMEOUT_SECS},
	common::logging::LoggingConfig,
	config::{Config, File},
	serde::{Deserialize, Serialize},
	tokio::sync::OnceCell,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	pub logging: LoggingConfig,
	pub server: ServerConfig,
	#[serde(default)]
	pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
	pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
	#[serde(default = "default_base_url")]
	pub base_url: String,
	#[serde(default = "default_timeout_secs")]
	pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
	fn default() -> Self {
		Self { base_url: default_base_url(), timeout_secs: default_timeout_secs() }
	}
}

fn default_base_url() -> String {
	DEFAULT_COINGECKO_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
	DEFAULT_UPSTREAM_TIMEOUT_SECS
}

impl UpstreamConfig {
	pub fn check(&self) -> anyhow::Result<()> {
		if self.base_url.is_empty() {
			return Err(anyhow::anyhow!("Upstream base_url is empty"));
		}
		if self.timeout_secs == 0 {
			return Err(anyhow::anyhow!("Upstream timeout_secs must be greater than 0"));
		}
		Ok(())
	}
}

pub static CONFIG: OnceCell<ApiConfig> = OnceCell::const_new();

pub fn load_config(config_path: &str) -> anyhow::Result<()> {
	let common_env = common::common_env::get_common_env();

	let config = Config::builder().add_source(File::with_name(&format!("{}/{}", config_path, common_env.run_mode)).required(true)).build()?;

	let mut api_config: ApiConfig = config.try_deserialize()?;
	if let Some(port) = common_env.port {
		api_config.server.port = port;
	}
	println!("Configuration loaded for mode: {}", common_env.run_mode);
	println!("Configuration: {:?}", api_config);
	check_config(&api_config)?;
	CONFIG.set(api_config)?;
	Ok(())
}

fn check_config(config: &ApiConfig) -> anyhow::Result<()> {
	config.logging.check()?;
	config.upstream.check()?;
	if config.server.port == 0 {
		return Err(anyhow::anyhow!("Server port must be greater than 0"));
	}
	Ok(())
}

pub fn get_config() -> &'static ApiConfig {
	CONFIG.get().expect("Config not loaded")
}
