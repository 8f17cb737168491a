// src/bin/analyze_csv.rs
use property_analyzer::services::csv_import::analyze_csv;
use anyhow::{Context, Result};
use dotenv::dotenv;
use log::info;
use env_logger;
use std::env;
use std::fs;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let path = env::args()
        .nth(1)
        .context("usage: analyze_csv <properties.csv>")?;
    let csv_text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path))?;

    let outcomes = analyze_csv(&csv_text)?;
    info!("Analyzed {} rows from {}", outcomes.len(), path);

    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    Ok(())
}
