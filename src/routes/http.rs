// GET handlers: version, hosts, per-host stats

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use std::collections::HashMap;

use super::AppState;
use crate::models::{Response, Stats};
use crate::worker::HostState;

/// GET /version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/get-hosts: configured host names.
pub(super) async fn get_hosts(State(state): State<AppState>) -> Json<Response<Vec<String>>> {
    Json(Response::ok(state.hosts.as_ref().clone()))
}

#[derive(Debug, Deserialize)]
pub(super) struct StatsQuery {
    id: Option<String>,
}

/// GET /api/get-stats?id=NAME: latest snapshot in `data`, its timestamp (ms) in `data2`.
pub(super) async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Json<Response<Stats, u64>> {
    let Some(id) = query.id.filter(|id| !id.is_empty()) else {
        return Json(Response::error("missing id"));
    };
    let latest = state.latest.read().await;
    let resp = match latest.get(&id) {
        None => Response::error(format!("host not found: {}", id)),
        Some(HostState::Pending) => Response::error(format!("host not sampled yet: {}", id)),
        Some(HostState::Failed { error, .. }) => {
            Response::error(format!("last poll of {} failed: {}", id, error))
        }
        Some(HostState::Sampled { timestamp, stats }) => Response::ok_with(stats.clone(), *timestamp),
    };
    Json(resp)
}

/// GET /api/get-all-stats: latest snapshot of every host whose last poll succeeded.
pub(super) async fn get_all_stats(
    State(state): State<AppState>,
) -> Json<Response<HashMap<String, Stats>>> {
    let latest = state.latest.read().await;
    let all = latest
        .iter()
        .filter_map(|(name, s)| match s {
            HostState::Sampled { stats, .. } => Some((name.clone(), stats.clone())),
            _ => None,
        })
        .collect();
    Json(Response::ok(all))
}
