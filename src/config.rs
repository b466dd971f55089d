use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::remote::SshOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub ssh: SshConfig,
    #[serde(default)]
    pub hosts: Vec<HostConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub sample_interval_ms: u64,
    /// Deadline for each remote command; a hung shell fails the poll.
    pub command_timeout_ms: u64,
    /// How often to log collector stats at INFO level.
    pub stats_log_interval_secs: u64,
}

impl MonitoringConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SshConfig {
    #[serde(default = "default_control_dir")]
    pub control_dir: String,
    #[serde(default = "default_control_persist_secs")]
    pub control_persist_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            control_dir: default_control_dir(),
            control_persist_secs: default_control_persist_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl SshConfig {
    pub fn options(&self) -> SshOptions {
        SshOptions {
            control_dir: PathBuf::from(&self.control_dir),
            control_persist_secs: self.control_persist_secs,
            connect_timeout_secs: self.connect_timeout_secs,
        }
    }
}

fn default_control_dir() -> String {
    "/tmp".into()
}

fn default_control_persist_secs() -> u64 {
    600
}

fn default_connect_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    pub name: String,
    pub address: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_ssh_port")]
    pub port: u16,
    pub key_path: Option<String>,
}

fn default_user() -> String {
    "root".into()
}

fn default_ssh_port() -> u16 {
    22
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.monitoring.sample_interval_ms > 0,
            "monitoring.sample_interval_ms must be > 0, got {}",
            self.monitoring.sample_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.command_timeout_ms > 0,
            "monitoring.command_timeout_ms must be > 0, got {}",
            self.monitoring.command_timeout_ms
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        anyhow::ensure!(
            !self.ssh.control_dir.is_empty(),
            "ssh.control_dir must be non-empty"
        );
        anyhow::ensure!(!self.hosts.is_empty(), "at least one [[hosts]] entry is required");

        let mut seen = HashSet::new();
        for host in &self.hosts {
            anyhow::ensure!(!host.name.is_empty(), "hosts.name must be non-empty");
            anyhow::ensure!(
                seen.insert(host.name.as_str()),
                "hosts.name must be unique, got duplicate {:?}",
                host.name
            );
            anyhow::ensure!(
                !host.address.is_empty(),
                "hosts.address must be non-empty for host {:?}",
                host.name
            );
            anyhow::ensure!(
                host.port > 0,
                "hosts.port must be between 1 and 65535 for host {:?}",
                host.name
            );
        }
        Ok(())
    }
}
