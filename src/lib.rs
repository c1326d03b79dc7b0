pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::{sync::Arc, time::Duration};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use config::Config;
use services::outlet_food::OutletFoodService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub outlet_food: Arc<OutletFoodService>,
}

impl AppState {
    pub fn new(config: Config, outlet_food: OutletFoodService) -> Self {
        Self {
            config: Arc::new(config),
            outlet_food: Arc::new(outlet_food),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        .route("/api/getOutletFood", post(routes::outlet_food::get_outlet_food))
        .route("/api/updateOutletFood", post(routes::outlet_food::update_outlet_food))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}
