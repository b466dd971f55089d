// hostname, /proc/uptime and /proc/loadavg, concatenated in that order.

use crate::models::Stats;

pub fn parse_host(output: &str, stats: &mut Stats) {
    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.len() {
            0 => {}
            1 if stats.hostname.is_empty() => stats.hostname = parts[0].to_string(),
            2 => {
                if let (Ok(up), Ok(_)) = (parts[0].parse::<f64>(), parts[1].parse::<f64>()) {
                    stats.uptime = up as i64;
                }
            }
            5 => {
                // "0.00 0.01 0.05 1/123 4567"
                let Some((running, total)) = parts[3].split_once('/') else {
                    continue;
                };
                stats.load1 = parts[0].to_string();
                stats.load5 = parts[1].to_string();
                stats.load10 = parts[2].to_string();
                stats.running_process = running.to_string();
                stats.total_process = total.to_string();
            }
            _ => {}
        }
    }
}
