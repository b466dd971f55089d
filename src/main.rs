use anyhow::Result;
use fleetstat::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let ssh_options = app_config.ssh.options();

    let hosts: Vec<worker::HostTarget<remote::SshConnection>> = app_config
        .hosts
        .iter()
        .map(|h| worker::HostTarget {
            name: h.name.clone(),
            connection: Arc::new(remote::SshConnection::new(
                &h.user,
                &h.address,
                h.port,
                h.key_path.clone(),
                ssh_options.clone(),
            )),
        })
        .collect();
    let connections: Vec<Arc<remote::SshConnection>> =
        hosts.iter().map(|h| h.connection.clone()).collect();
    let names: Vec<String> = hosts.iter().map(|h| h.name.clone()).collect();

    let history = Arc::new(cpu_history::CpuHistory::new());
    let sampler = Arc::new(sampler::Sampler::new(
        history.clone(),
        app_config.monitoring.command_timeout(),
    ));
    let latest = worker::pending_states(names.iter().map(String::as_str));

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            sampler,
            hosts,
            latest: latest.clone(),
            shutdown_rx,
        },
        worker::WorkerConfig {
            sample_interval_ms: app_config.monitoring.sample_interval_ms,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );

    let app = routes::app(latest, names);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(hosts = connections.len(), "Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }

    let _ = shutdown_tx.send(());
    let _ = worker_handle.await;
    history.clear();
    for conn in &connections {
        conn.close().await;
    }
    Ok(())
}
