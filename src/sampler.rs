// One full poll of a remote host: run each diagnostic command under a
// deadline, parse it, and turn cumulative CPU counters into rates.

use crate::cpu_history::CpuHistory;
use crate::models::{CpuInfo, Stats};
use crate::parsers::{parse_df, parse_host, parse_meminfo, parse_network, parse_proc_stat};
use crate::remote::{CommandError, RemoteConnection};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

pub const HOST_COMMAND: &str = "/bin/hostname; /bin/cat /proc/uptime /proc/loadavg";
pub const MEMINFO_COMMAND: &str = "/bin/cat /proc/meminfo";
pub const DF_COMMAND: &str = "/bin/df -B1";
pub const NETWORK_COMMAND: &str = "/bin/cat /proc/net/dev; ip -o addr show 2>/dev/null || true";
pub const PROC_STAT_COMMAND: &str = "/bin/cat /proc/stat";

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("`{command}` failed: {source}")]
    Command {
        command: &'static str,
        #[source]
        source: CommandError,
    },
    #[error("`{command}` timed out after {timeout:?}")]
    Timeout {
        command: &'static str,
        timeout: Duration,
    },
}

pub struct Sampler {
    history: Arc<CpuHistory>,
    command_timeout: Duration,
}

impl Sampler {
    pub fn new(history: Arc<CpuHistory>, command_timeout: Duration) -> Self {
        Self {
            history,
            command_timeout,
        }
    }

    pub fn history(&self) -> &Arc<CpuHistory> {
        &self.history
    }

    /// Polls every source in turn. The first failing command aborts the poll;
    /// nothing gathered before it is returned.
    #[instrument(skip(self, conn), fields(host = %conn.label(), connection = %conn.id(), operation = "sample"))]
    pub async fn sample<C: RemoteConnection>(&self, conn: &C) -> Result<Stats, SampleError> {
        let mut stats = Stats::default();
        parse_host(&self.run(conn, HOST_COMMAND).await?, &mut stats);
        parse_meminfo(&self.run(conn, MEMINFO_COMMAND).await?, &mut stats);
        stats.fs_infos = parse_df(&self.run(conn, DF_COMMAND).await?);
        stats.network = parse_network(&self.run(conn, NETWORK_COMMAND).await?);
        // Last, so a failed poll never moves the baseline.
        stats.cpu = self.sample_cpu(conn).await?;
        Ok(stats)
    }

    /// CPU usage since the previous call for the same connection. The first
    /// call only records a baseline and reports 0% everywhere.
    #[instrument(skip(self, conn), fields(host = %conn.label(), operation = "sample_cpu"))]
    pub async fn sample_cpu<C: RemoteConnection>(&self, conn: &C) -> Result<CpuInfo, SampleError> {
        let output = self.run(conn, PROC_STAT_COMMAND).await?;
        let stat = parse_proc_stat(&output);
        let mut cpu = match self.history.swap(conn.id(), stat.aggregate) {
            Some(prev) => stat.aggregate.usage_since(&prev),
            None => {
                debug!(connection = %conn.id(), "CPU baseline stored");
                CpuInfo::default()
            }
        };
        cpu.core_num = stat.core_num;
        Ok(cpu)
    }

    /// Drops the stored baseline for a connection that is being torn down.
    pub fn forget<C: RemoteConnection>(&self, conn: &C) {
        self.history.remove(conn.id());
    }

    async fn run<C: RemoteConnection>(
        &self,
        conn: &C,
        command: &'static str,
    ) -> Result<String, SampleError> {
        let started = Instant::now();
        let output = tokio::time::timeout(self.command_timeout, conn.run(command))
            .await
            .map_err(|_| SampleError::Timeout {
                command,
                timeout: self.command_timeout,
            })?
            .map_err(|source| SampleError::Command { command, source })?;
        debug!(
            command,
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = output.len(),
            "command finished"
        );
        Ok(output)
    }
}
