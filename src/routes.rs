// src/routes.rs
use std::sync::Arc;
use warp::reject::Rejection;
use crate::handlers::{
    analysis::{analyze_horizon, analyze_noi, compare},
    contact::{submit_contact, subscribe},
    currency::convert_currency,
    geocode::get_map_pin,
    history::get_history,
    market::get_market_profile,
    report::{download_horizon_report, download_report},
    upload::upload_csv,
};
use crate::state::AppState;
use log::{error, info};

use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Reply};
use crate::handlers::error::ApiError;

const JSON_BODY_LIMIT: u64 = 64 * 1024;
const CSV_BODY_LIMIT: u64 = 4 * 1024 * 1024;

// Add recovery handling for our custom errors
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        message = format!("Invalid request body: {}", e);
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = format!("Invalid query string: {}", e);
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = "Payload Too Large".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        error!("Unhandled rejection: {:?}", err);
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let state_filter = warp::any().map(move || state.clone());
    let json_body = || warp::body::content_length_limit(JSON_BODY_LIMIT);

    let noi_route = warp::path!("api" / "v1" / "analysis" / "noi")
        .and(warp::post())
        .and(json_body())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(analyze_noi);

    let horizon_route = warp::path!("api" / "v1" / "analysis" / "horizon")
        .and(warp::post())
        .and(json_body())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(analyze_horizon);

    let compare_route = warp::path!("api" / "v1" / "analysis" / "compare")
        .and(warp::post())
        .and(json_body())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(compare);

    let market_route = warp::path!("api" / "v1" / "market")
        .and(warp::get())
        .and(warp::query())
        .and_then(get_market_profile);

    let history_route = warp::path!("api" / "v1" / "history")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_history);

    let upload_route = warp::path!("api" / "v1" / "upload")
        .and(warp::post())
        .and(warp::body::content_length_limit(CSV_BODY_LIMIT))
        .and(warp::body::bytes())
        .and_then(upload_csv);

    let report_route = warp::path!("api" / "v1" / "report")
        .and(warp::post())
        .and(json_body())
        .and(warp::body::json())
        .and_then(download_report);

    let horizon_report_route = warp::path!("api" / "v1" / "report" / "horizon")
        .and(warp::post())
        .and(json_body())
        .and(warp::body::json())
        .and_then(download_horizon_report);

    let currency_route = warp::path!("api" / "v1" / "currency" / "convert")
        .and(warp::get())
        .and(warp::query())
        .and(state_filter.clone())
        .and_then(convert_currency);

    let geocode_route = warp::path!("api" / "v1" / "geocode")
        .and(warp::get())
        .and(warp::query())
        .and(state_filter.clone())
        .and_then(get_map_pin);

    let contact_route = warp::path!("api" / "v1" / "contact")
        .and(warp::post())
        .and(json_body())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(submit_contact);

    let subscribe_route = warp::path!("api" / "v1" / "subscribe")
        .and(warp::post())
        .and(json_body())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(subscribe);

    info!("All routes configured successfully.");

    noi_route
        .or(horizon_route)
        .or(compare_route)
        .or(market_route)
        .or(history_route)
        .or(upload_route)
        .or(report_route)
        .or(horizon_report_route)
        .or(currency_route)
        .or(geocode_route)
        .or(contact_route)
        .or(subscribe_route)
        .recover(handle_rejection)
}
