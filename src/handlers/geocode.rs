// src/handlers/geocode.rs
use log::info;
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    pub location: String,
}

pub async fn get_map_pin(query: GeocodeQuery, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling map pin request for {:?}", query.location);
    let point = state.geocoder.locate(&query.location).await;
    Ok(warp::reply::json(&point))
}
