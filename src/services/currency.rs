// src/services/currency.rs
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::ExchangeRateConfig;
use crate::models::{Conversion, DataSource};
use crate::services::error::{AnalysisError, AnalysisResult};
use crate::BoxError;

pub const PIVOT_CURRENCY: &str = "USD";

// Units of each currency per 1 USD, used when the rate API is unreachable.
const FALLBACK_RATES: [(&str, f64); 8] = [
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("CAD", 1.36),
    ("AUD", 1.52),
    ("INR", 83.0),
    ("JPY", 150.0),
    ("MXN", 17.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub rates: HashMap<String, f64>,
    pub source: DataSource,
}

impl RateTable {
    pub fn fallback() -> Self {
        RateTable {
            rates: FALLBACK_RATES
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
            source: DataSource::Fallback,
        }
    }

    /// Units of `to` per unit of `from`, crossing through the pivot currency.
    pub fn rate(&self, from: &str, to: &str) -> Option<f64> {
        let from_rate = self.rates.get(&from.to_uppercase())?;
        let to_rate = self.rates.get(&to.to_uppercase())?;
        if *from_rate == 0.0 {
            return None;
        }
        Some(to_rate / from_rate)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    result: Option<String>,
    rates: HashMap<String, f64>,
}

pub struct CurrencyService {
    client: Client,
    config: ExchangeRateConfig,
}

impl CurrencyService {
    pub fn new(config: ExchangeRateConfig, timeout: Duration) -> Result<Self, BoxError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(CurrencyService { client, config })
    }

    fn latest_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match &self.config.api_key {
            Some(key) => format!("{}/{}/latest/{}", base, key, PIVOT_CURRENCY),
            None => format!("{}/latest/{}", base, PIVOT_CURRENCY),
        }
    }

    /// Fetch the latest pivot-based rates from the configured API.
    pub async fn fetch_rates(&self) -> Result<HashMap<String, f64>, BoxError> {
        let url = self.latest_url();
        info!("Fetching exchange rates from {}", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<LatestRatesResponse>()
            .await?;

        if let Some(result) = &response.result {
            if result != "success" {
                return Err(format!("Exchange rate API returned result {:?}", result).into());
            }
        }
        if response.rates.is_empty() {
            return Err("Exchange rate API returned no rates".into());
        }

        debug!("Received {} exchange rates", response.rates.len());
        Ok(response.rates)
    }

    /// Live rates, or the static table when the API call fails.
    pub async fn rates(&self) -> RateTable {
        match self.fetch_rates().await {
            Ok(rates) => RateTable {
                rates,
                source: DataSource::Live,
            },
            Err(e) => {
                warn!("Exchange rate fetch failed, using fallback rates: {}", e);
                RateTable::fallback()
            }
        }
    }

    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> AnalysisResult<Conversion> {
        if !amount.is_finite() {
            return Err(AnalysisError::invalid("amount must be a finite number"));
        }
        let table = self.rates().await;
        convert_with(&table, amount, from, to)
    }
}

pub fn convert_with(table: &RateTable, amount: f64, from: &str, to: &str) -> AnalysisResult<Conversion> {
    let rate = table.rate(from, to).ok_or_else(|| {
        AnalysisError::invalid(format!("unsupported currency pair {} -> {}", from, to))
    })?;

    Ok(Conversion {
        amount,
        from: from.to_uppercase(),
        to: to.to_uppercase(),
        rate,
        converted: (amount * rate * 100.0).round() / 100.0,
        source: table.source,
    })
}
