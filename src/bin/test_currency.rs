// src/bin/test_currency.rs
use property_analyzer::config::AppConfig;
use property_analyzer::models::DataSource;
use property_analyzer::services::currency::CurrencyService;
use log::{info, warn};
use env_logger;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();
    let config = AppConfig::from_env()?;

    let mut args = env::args().skip(1);
    let amount: f64 = args.next().unwrap_or_else(|| "1".to_string()).parse()?;
    let from = args.next().unwrap_or_else(|| "USD".to_string());
    let to = args.next().unwrap_or_else(|| "EUR".to_string());

    info!("Testing exchange rate API at {}", config.exchange_rates.base_url);
    let service = CurrencyService::new(config.exchange_rates.clone(), config.http_timeout)?;

    match service.fetch_rates().await {
        Ok(rates) => info!("SUCCESS: received {} live rates", rates.len()),
        Err(e) => warn!("Live rates unavailable: {}", e),
    }

    let conversion = service.convert(amount, &from, &to).await?;
    if conversion.source == DataSource::Fallback {
        warn!("Conversion used the static fallback table");
    }
    println!("{} {} = {:.2} {} (rate {})", amount, conversion.from, conversion.converted, conversion.to, conversion.rate);
    Ok(())
}
