use env_logger;
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use property_analyzer::config::AppConfig;
use property_analyzer::routes;
use property_analyzer::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Config load error: {:#}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::new(&config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to initialize HTTP clients: {}", e);
            std::process::exit(1);
        }
    };

    // Bind to 0.0.0.0 so the server is reachable from outside a container
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET", "POST"]);

    // Set up routes
    let api = routes::routes(state).with(cors);
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    warp::serve(api)
        .run(addr)
        .await;
}
