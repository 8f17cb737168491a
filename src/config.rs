// src/config.rs
use anyhow::{Context, Result};
use dotenv::dotenv;
use log::{info, warn};
use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3030;
const DEFAULT_EXCHANGE_RATE_API_URL: &str = "https://open.er-api.com/v6";
const DEFAULT_GEOCODING_API_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_GEOCODING_USER_AGENT: &str = "property-analyzer/0.1";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ExchangeRateConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub http_timeout: Duration,
    pub exchange_rates: ExchangeRateConfig,
    pub geocoding: GeocodingConfig,
}

impl AppConfig {
    /// Build the configuration from the process environment (and `.env`,
    /// when present). Credentials are only ever read from here.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number, got {:?}", value))?,
            Err(_) => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .with_context(|| format!("HTTP_TIMEOUT_SECS must be a number, got {:?}", value))?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let config = AppConfig {
            port,
            http_timeout: Duration::from_secs(timeout_secs),
            exchange_rates: ExchangeRateConfig {
                base_url: var_or("EXCHANGE_RATE_API_URL", DEFAULT_EXCHANGE_RATE_API_URL),
                api_key: optional_var("EXCHANGE_RATE_API_KEY"),
            },
            geocoding: GeocodingConfig {
                base_url: var_or("GEOCODING_API_URL", DEFAULT_GEOCODING_API_URL),
                api_key: optional_var("GEOCODING_API_KEY"),
                user_agent: var_or("GEOCODING_USER_AGENT", DEFAULT_GEOCODING_USER_AGENT),
            },
        };

        info!(
            "Configuration loaded (exchange rates: {}, geocoding: {})",
            config.exchange_rates.base_url, config.geocoding.base_url
        );
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            exchange_rates: ExchangeRateConfig {
                base_url: DEFAULT_EXCHANGE_RATE_API_URL.to_string(),
                api_key: None,
            },
            geocoding: GeocodingConfig {
                base_url: DEFAULT_GEOCODING_API_URL.to_string(),
                api_key: None,
                user_agent: DEFAULT_GEOCODING_USER_AGENT.to_string(),
            },
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
