// src/handlers/upload.rs
use log::{error, info};
use warp::hyper::body::Bytes;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::csv_import::analyze_csv;

pub async fn upload_csv(body: Bytes) -> Result<Json, Rejection> {
    info!("Handling CSV upload ({} bytes)", body.len());

    let text = std::str::from_utf8(&body).map_err(|e| {
        error!("CSV upload is not UTF-8: {}", e);
        warp::reject::custom(ApiError::invalid_input("CSV upload must be UTF-8 text"))
    })?;

    let outcomes = analyze_csv(text).map_err(|e| {
        error!("CSV upload rejected: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&outcomes))
}
