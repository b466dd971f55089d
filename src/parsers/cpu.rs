// /proc/stat CPU lines: `cpu  user nice system idle iowait irq softirq steal guest ...`

use crate::models::CpuInfo;

const AGGREGATE_LABEL: &str = "cpu";

/// Cumulative tick counters since boot for the aggregate CPU line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuRaw {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub io_wait: u64,
    pub irq: u64,
    pub soft_irq: u64,
    pub steal: u64,
    pub guest: u64,
    /// Sum of every counter parsed from the line.
    pub total: u64,
}

impl CpuRaw {
    /// Percentages of the ticks elapsed between `prev` and `self`. A zero
    /// total delta yields non-finite values.
    pub fn usage_since(&self, prev: &CpuRaw) -> CpuInfo {
        let total = self.total.saturating_sub(prev.total) as f64;
        let pct = |now: u64, before: u64| now.saturating_sub(before) as f64 / total * 100.0;
        CpuInfo {
            user: pct(self.user, prev.user),
            nice: pct(self.nice, prev.nice),
            system: pct(self.system, prev.system),
            idle: pct(self.idle, prev.idle),
            io_wait: pct(self.io_wait, prev.io_wait),
            irq: pct(self.irq, prev.irq),
            soft_irq: pct(self.soft_irq, prev.soft_irq),
            steal: pct(self.steal, prev.steal),
            guest: pct(self.guest, prev.guest),
            core_num: 0,
        }
    }
}

/// Fills counters from the tokens of one CPU line (label first). Tokens that
/// fail to parse are skipped without stopping the scan.
pub fn parse_cpu_fields(fields: &[&str]) -> CpuRaw {
    let mut raw = CpuRaw::default();
    for (i, field) in fields.iter().enumerate().skip(1) {
        let Ok(val) = field.parse::<u64>() else {
            continue;
        };
        raw.total = raw.total.saturating_add(val);
        match i {
            1 => raw.user = val,
            2 => raw.nice = val,
            3 => raw.system = val,
            4 => raw.idle = val,
            5 => raw.io_wait = val,
            6 => raw.irq = val,
            7 => raw.soft_irq = val,
            8 => raw.steal = val,
            9 => raw.guest = val,
            _ => {}
        }
    }
    raw
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcStat {
    pub aggregate: CpuRaw,
    /// Number of lines labelled `cpu*`, the aggregate line included.
    pub core_num: u32,
}

pub fn parse_proc_stat(output: &str) -> ProcStat {
    let mut stat = ProcStat::default();
    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(label) = fields.first() else {
            continue;
        };
        if *label == AGGREGATE_LABEL {
            stat.aggregate = parse_cpu_fields(&fields);
        }
        if label.starts_with(AGGREGATE_LABEL) {
            stat.core_num += 1;
        }
    }
    stat
}
