// Background collector: polls every host concurrently on each tick and keeps
// the latest outcome per host for the HTTP routes.

use crate::models::Stats;
use crate::remote::RemoteConnection;
use crate::sampler::{SampleError, Sampler};
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};

/// Latest poll outcome per host name.
pub type LatestStats = Arc<RwLock<HashMap<String, HostState>>>;

#[derive(Debug, Clone)]
pub enum HostState {
    /// Not polled yet.
    Pending,
    Sampled { timestamp: u64, stats: Stats },
    Failed { timestamp: u64, error: String },
}

pub struct HostTarget<C> {
    pub name: String,
    pub connection: Arc<C>,
}

/// Sampler, hosts, shared results, and shutdown for the worker.
pub struct WorkerDeps<C> {
    pub sampler: Arc<Sampler>,
    pub hosts: Vec<HostTarget<C>>,
    pub latest: LatestStats,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub sample_interval_ms: u64,
    /// How often to log collector stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Map with every host marked [`HostState::Pending`].
pub fn pending_states<'a>(names: impl IntoIterator<Item = &'a str>) -> LatestStats {
    let map = names
        .into_iter()
        .map(|n| (n.to_string(), HostState::Pending))
        .collect();
    Arc::new(RwLock::new(map))
}

fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

async fn poll_host<'a, C: RemoteConnection>(
    sampler: &Sampler,
    host: &'a HostTarget<C>,
) -> (&'a str, Result<Stats, SampleError>) {
    let result = sampler.sample(host.connection.as_ref()).await;
    (host.name.as_str(), result)
}

/// Polls all hosts once, concurrently, and records each outcome.
/// Returns the number of hosts whose poll failed.
pub async fn poll_once<C: RemoteConnection>(
    sampler: &Sampler,
    hosts: &[HostTarget<C>],
    latest: &RwLock<HashMap<String, HostState>>,
) -> usize {
    let results = join_all(hosts.iter().map(|host| poll_host(sampler, host))).await;

    let timestamp = now_millis();
    let mut failed = 0;
    let mut latest = latest.write().await;
    for (name, result) in results {
        let state = match result {
            Ok(stats) => HostState::Sampled { timestamp, stats },
            Err(e) => {
                failed += 1;
                tracing::warn!(host = name, error = %e, operation = "sample", "poll failed");
                HostState::Failed {
                    timestamp,
                    error: e.to_string(),
                }
            }
        };
        latest.insert(name.to_string(), state);
    }
    failed
}

pub fn spawn<C>(deps: WorkerDeps<C>, config: WorkerConfig) -> tokio::task::JoinHandle<()>
where
    C: RemoteConnection + 'static,
{
    let WorkerDeps {
        sampler,
        hosts,
        latest,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        sample_interval_ms,
        stats_log_interval_secs,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(sample_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut polls_total: u64 = 0;
        let mut failures_total: u64 = 0;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    failures_total += poll_once(&sampler, &hosts, &latest).await as u64;
                    polls_total += hosts.len() as u64;
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        hosts = hosts.len(),
                        polls_total,
                        failures_total,
                        cpu_baselines = sampler.history().len(),
                        "collector stats"
                    );
                }
            }
        }

        for host in &hosts {
            sampler.forget(host.connection.as_ref());
        }
    })
}
