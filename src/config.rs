use crate::errors::ConfigError;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Base URLs for every source. Defaults point at the live sites.
#[derive(Debug, Clone)]
pub struct SourceEndpoints {
    pub jiji_api: String,
    pub jiji_site: String,
    pub realethio_listing: String,
    pub ethiopiarealty_site: String,
    pub ethiopiarealty_listing_path: String,
    pub livingethio_api: String,
    pub livingethio_site: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            jiji_api: "https://jiji.com.et/api_web/v1/listing".into(),
            jiji_site: "https://jiji.com.et".into(),
            realethio_listing: "https://realethio.com/property-type/house-for-sale/".into(),
            ethiopiarealty_site: "https://ethiopiarealty.com".into(),
            ethiopiarealty_listing_path: "/building-for-sale/".into(),
            livingethio_api:
                "https://18.223.203.43.nip.io/api/properties/findByCategoryPagination/house-for-sale"
                    .into(),
            livingethio_site: "https://livingethio.com".into(),
        }
    }
}

/// Runtime settings shared by all adapters.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub user_agent: String,
    /// Timeout for Jiji, Realethio and EthiopiaRealty requests.
    pub request_timeout: Duration,
    pub livingethio_timeout: Duration,
    /// Pause between LivingEthio page requests.
    pub livingethio_delay: Duration,
    pub endpoints: SourceEndpoints,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
            livingethio_timeout: Duration::from_secs(15),
            livingethio_delay: Duration::from_millis(1000),
            endpoints: SourceEndpoints::default(),
        }
    }
}

impl ScraperConfig {
    /// Defaults, overridden by environment variables (a `.env` file is loaded if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv();

        let mut config = Self::default();

        if let Ok(ua) = env::var("LISTINGS_USER_AGENT") {
            if !ua.trim().is_empty() {
                config.user_agent = ua;
            }
        }
        if let Some(secs) = parse_env_u64("LISTINGS_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_env_u64("LIVINGETHIO_TIMEOUT_SECS")? {
            config.livingethio_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_env_u64("LIVINGETHIO_DELAY_MS")? {
            config.livingethio_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

fn parse_env_u64(var: &str) -> Result<Option<u64>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                var: var.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
