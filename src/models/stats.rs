// Per-host snapshot: memory, filesystems, CPU and host identity

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::NetworkInfo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FsInfo {
    pub mount_point: String,
    pub used: u64,
    pub free: u64,
}

/// CPU usage over the last polling window, in percent of elapsed ticks.
/// All percentages are 0.0 on the first sample of a connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuInfo {
    pub user: f64,
    pub nice: f64,
    pub system: f64,
    pub idle: f64,
    pub io_wait: f64,
    pub irq: f64,
    pub soft_irq: f64,
    pub steal: f64,
    pub guest: f64,
    pub core_num: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub uptime: i64,
    pub hostname: String,
    pub load1: String,
    pub load5: String,
    pub load10: String,
    pub running_process: String,
    pub total_process: String,
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_buffers: u64,
    pub mem_available: u64,
    pub mem_cached: u64,
    pub swap_total: u64,
    pub swap_free: u64,
    pub fs_infos: Vec<FsInfo>,
    pub network: HashMap<String, NetworkInfo>,
    pub cpu: CpuInfo,
}
