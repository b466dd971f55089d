// Worker: concurrent polls, latest-state bookkeeping, shutdown cleanup

mod common;

use common::{Reply, ScriptedConnection};
use fleetstat::cpu_history::CpuHistory;
use fleetstat::sampler::{MEMINFO_COMMAND, Sampler};
use fleetstat::worker::{
    HostState, HostTarget, WorkerConfig, WorkerDeps, pending_states, poll_once, spawn,
};
use std::sync::Arc;
use std::time::Duration;

fn targets() -> Vec<HostTarget<ScriptedConnection>> {
    let healthy = ScriptedConnection::linux("web-1");
    let broken = ScriptedConnection::linux("db-1");
    broken.reply(MEMINFO_COMMAND, Reply::Fail("Connection reset by peer".into()));
    vec![
        HostTarget {
            name: "web-1".into(),
            connection: Arc::new(healthy),
        },
        HostTarget {
            name: "db-1".into(),
            connection: Arc::new(broken),
        },
    ]
}

#[tokio::test]
async fn poll_once_records_success_and_failure_per_host() {
    let history = Arc::new(CpuHistory::new());
    let sampler = Sampler::new(history.clone(), Duration::from_secs(5));
    let hosts = targets();
    let latest = pending_states(["web-1", "db-1"]);

    let failed = poll_once(&sampler, &hosts, &latest).await;

    assert_eq!(failed, 1);
    let latest = latest.read().await;
    match &latest["web-1"] {
        HostState::Sampled { stats, .. } => assert_eq!(stats.hostname, "web-1"),
        other => panic!("web-1 should be sampled, got {other:?}"),
    }
    match &latest["db-1"] {
        HostState::Failed { error, .. } => assert!(error.contains("Connection reset by peer")),
        other => panic!("db-1 should have failed, got {other:?}"),
    }
    // Only the healthy host reached the CPU step.
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn worker_ticks_then_forgets_baselines_on_shutdown() {
    let history = Arc::new(CpuHistory::new());
    let sampler = Arc::new(Sampler::new(history.clone(), Duration::from_secs(5)));
    let latest = pending_states(["web-1", "db-1"]);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            sampler,
            hosts: targets(),
            latest: latest.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            sample_interval_ms: 25,
            stats_log_interval_secs: 3600,
        },
    );
    tokio::time::sleep(Duration::from_millis(150)).await;
    let _ = shutdown_tx.send(());
    handle.await.unwrap();

    let latest = latest.read().await;
    assert!(matches!(latest["web-1"], HostState::Sampled { .. }));
    assert!(matches!(latest["db-1"], HostState::Failed { .. }));
    assert!(history.is_empty(), "shutdown should drop every baseline");
}
