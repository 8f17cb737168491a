// src/bin/test_geocode.rs
use property_analyzer::config::AppConfig;
use property_analyzer::services::geocoding::GeocodingService;
use log::{error, info};
use env_logger;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();
    let config = AppConfig::from_env()?;

    let location = env::args().skip(1).collect::<Vec<_>>().join(" ");
    let location = if location.is_empty() { "Austin, TX".to_string() } else { location };

    let service = GeocodingService::new(config.geocoding.clone(), config.http_timeout)?;
    info!("Testing geocoding for {:?}...", location);

    match service.search(&location).await {
        Ok(point) => info!("SUCCESS: {} -> ({}, {})", point.label, point.latitude, point.longitude),
        Err(e) => error!("ERROR: live geocoding failed: {}", e),
    }

    let pin = service.locate(&location).await;
    println!("{:.4}, {:.4} [{:?}] {}", pin.latitude, pin.longitude, pin.source, pin.label);
    Ok(())
}
