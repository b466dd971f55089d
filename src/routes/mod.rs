// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::worker::LatestStats;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) latest: LatestStats,
    /// Configured host names, in config order.
    pub(crate) hosts: Arc<Vec<String>>,
}

pub fn app(latest: LatestStats, hosts: Vec<String>) -> Router {
    let state = AppState {
        latest,
        hosts: Arc::new(hosts),
    };
    Router::new()
        .route("/", get(|| async { "fleetstat: remote host monitor" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/get-hosts", get(http::get_hosts)) // GET /api/get-hosts
        .route("/api/get-stats", get(http::get_stats)) // GET /api/get-stats?id=NAME
        .route("/api/get-all-stats", get(http::get_all_stats)) // GET /api/get-all-stats
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
