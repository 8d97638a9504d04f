/// How long a cached upstream response stays fresh (milliseconds)
pub const CACHE_TTL_MILLIS: i64 = 60_000;

pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;
pub const COINGECKO_API_KEY_HEADER: &str = "x-cg-demo-api-key";

pub const VS_CURRENCY: &str = "usd";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 100;
/// Chart window attached to the coin detail response
pub const DEFAULT_CHART_DAYS: u32 = 7;

pub const HEALTH_MESSAGE: &str = "CryptoTracker API is running";
