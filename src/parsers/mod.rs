// Text parsers for diagnostic command output. Pure functions; tolerant of
// noise lines, which are skipped rather than reported.

mod cpu;
mod df;
mod host;
mod meminfo;
mod network;

pub use cpu::{CpuRaw, ProcStat, parse_cpu_fields, parse_proc_stat};
pub use df::parse_df;
pub use host::parse_host;
pub use meminfo::parse_meminfo;
pub use network::parse_network;
