// src/handlers/market.rs
use log::info;
use serde::Deserialize;
use warp::reply::Json;
use warp::Rejection;

use crate::services::market::classify;

#[derive(Debug, Deserialize)]
pub struct MarketQuery {
    #[serde(default)]
    pub location: String,
}

pub async fn get_market_profile(query: MarketQuery) -> Result<Json, Rejection> {
    let profile = classify(&query.location);
    info!("Market profile for {:?}: {:?}", query.location, profile.tier);
    Ok(warp::reply::json(&profile))
}
