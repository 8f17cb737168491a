// src/handlers/history.rs
use log::info;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::state::AppState;

pub async fn get_history(state: Arc<AppState>) -> Result<Json, Rejection> {
    let history = state.session.history().await;
    info!("Returning {} past analyses", history.len());
    Ok(warp::reply::json(&history))
}
