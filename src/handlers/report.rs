// src/handlers/report.rs
use log::{error, info};
use warp::Rejection;

use super::error::ApiError;
use crate::models::{HorizonInput, NoiInput};
use crate::services::calculations::{analyze_horizon, analyze_noi};
use crate::services::report::{render_pdf, REPORT_FILE_NAME, REPORT_TITLE};

fn pdf_attachment(rows: &[(&str, String)]) -> Result<impl warp::Reply, Rejection> {
    let pdf = render_pdf(REPORT_TITLE, rows).map_err(|e| {
        error!("Failed to render PDF report: {}", e);
        warp::reject::custom(ApiError::new("Failed to render PDF report"))
    })?;
    let reply = warp::reply::with_header(pdf, "content-type", "application/pdf");
    Ok(warp::reply::with_header(
        reply,
        "content-disposition",
        format!("attachment; filename=\"{}\"", REPORT_FILE_NAME),
    ))
}

pub async fn download_report(input: NoiInput) -> Result<impl warp::Reply, Rejection> {
    info!("Rendering PDF report for {:?}", input.location);

    let analysis = analyze_noi(&input).map_err(|e| {
        error!("Report analysis rejected: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;
    pdf_attachment(&analysis.rows())
}

pub async fn download_horizon_report(input: HorizonInput) -> Result<impl warp::Reply, Rejection> {
    info!("Rendering {}-year horizon PDF report", input.duration_years);

    let analysis = analyze_horizon(&input).map_err(|e| {
        error!("Report analysis rejected: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;
    pdf_attachment(&analysis.rows())
}
