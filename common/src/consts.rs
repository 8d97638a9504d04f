pub const COMMON_ENV_PATH: &str = "./deploy/common.env";
pub const COIN_API_CONFIG_PATH: &str = "./deploy/coin_api";

pub const RUN_MODE_DEV: &str = "dev";
pub const RUN_MODE_PROD: &str = "prod";

pub fn validate_run_mode(run_mode: &str) -> anyhow::Result<()> {
	match run_mode {
		RUN_MODE_DEV | RUN_MODE_PROD => Ok(()),
		_ => Err(anyhow::anyhow!("Invalid RUN_MODE: {}. Must be either '{}' or '{}'", run_mode, RUN_MODE_DEV, RUN_MODE_PROD)),
	}
}
