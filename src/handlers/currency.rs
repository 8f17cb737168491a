// src/handlers/currency.rs
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::currency::PIVOT_CURRENCY;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub amount: f64,
    #[serde(default = "pivot_currency")]
    pub from: String,
    pub to: String,
}

fn pivot_currency() -> String {
    PIVOT_CURRENCY.to_string()
}

pub async fn convert_currency(query: ConvertQuery, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Converting {} {} to {}", query.amount, query.from, query.to);

    let conversion = state
        .currency
        .convert(query.amount, &query.from, &query.to)
        .await
        .map_err(|e| {
            error!("Currency conversion rejected: {}", e);
            warp::reject::custom(ApiError::from(e))
        })?;

    Ok(warp::reply::json(&conversion))
}
