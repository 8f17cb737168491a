// src/handlers/analysis.rs
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::{AnalysisRecord, HorizonInput, NoiAnalysis, NoiInput};
use crate::services::calculations;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub first: NoiInput,
    pub second: NoiInput,
}

#[derive(Debug, Serialize)]
struct CompareResponse {
    first: NoiAnalysis,
    second: NoiAnalysis,
}

fn run_noi(input: &NoiInput) -> Result<NoiAnalysis, Rejection> {
    calculations::analyze_noi(input).map_err(|e| {
        error!("NOI analysis rejected: {}", e);
        warp::reject::custom(ApiError::from(e))
    })
}

pub async fn analyze_noi(input: NoiInput, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling NOI analysis for location {:?}", input.location);

    let analysis = run_noi(&input)?;
    state
        .session
        .record_analysis(AnalysisRecord::Noi(analysis.clone()))
        .await;

    Ok(warp::reply::json(&analysis))
}

pub async fn analyze_horizon(input: HorizonInput, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling {}-year horizon analysis", input.duration_years);

    let analysis = calculations::analyze_horizon(&input).map_err(|e| {
        error!("Horizon analysis rejected: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;
    state
        .session
        .record_analysis(AnalysisRecord::Horizon(analysis.clone()))
        .await;

    Ok(warp::reply::json(&analysis))
}

/// Side-by-side analysis of two properties. Only the first is kept in
/// session history.
pub async fn compare(request: CompareRequest, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!(
        "Comparing {:?} with {:?}",
        request.first.location, request.second.location
    );

    let first = run_noi(&request.first)?;
    let second = run_noi(&request.second)?;
    state
        .session
        .record_analysis(AnalysisRecord::Noi(first.clone()))
        .await;

    Ok(warp::reply::json(&CompareResponse { first, second }))
}
