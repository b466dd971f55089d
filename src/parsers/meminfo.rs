// /proc/meminfo: `Key:   value kB`

use crate::models::Stats;

pub fn parse_meminfo(output: &str, stats: &mut Stats) {
    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            continue;
        }
        let Ok(kib) = parts[1].parse::<u64>() else {
            continue;
        };
        let bytes = kib.saturating_mul(1024);
        match parts[0] {
            "MemTotal:" => stats.mem_total = bytes,
            "MemFree:" => stats.mem_free = bytes,
            "MemAvailable:" => stats.mem_available = bytes,
            "Buffers:" => stats.mem_buffers = bytes,
            "Cached:" => stats.mem_cached = bytes,
            "SwapTotal:" => stats.swap_total = bytes,
            "SwapFree:" => stats.swap_free = bytes,
            _ => {}
        }
    }
}
