// /proc/net/dev counters followed by `ip -o addr show` rows.

use crate::models::NetworkInfo;
use std::collections::HashMap;

pub fn parse_network(output: &str) -> HashMap<String, NetworkInfo> {
    let mut network: HashMap<String, NetworkInfo> = HashMap::new();
    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if let Some((iface, family, addr)) = ip_addr_row(&parts) {
            let entry = network.entry(iface.to_string()).or_default();
            let slot = if family == "inet" {
                &mut entry.ipv4
            } else {
                &mut entry.ipv6
            };
            if slot.is_empty() {
                *slot = addr.to_string();
            }
            continue;
        }
        if line.contains('|') {
            continue;
        }
        let Some((iface, counters)) = line.split_once(':') else {
            continue;
        };
        let counters: Vec<&str> = counters.split_whitespace().collect();
        if counters.len() < 9 {
            continue;
        }
        let (Ok(rx), Ok(tx)) = (counters[0].parse::<u64>(), counters[8].parse::<u64>()) else {
            continue;
        };
        let entry = network.entry(iface.trim().to_string()).or_default();
        entry.rx = rx;
        entry.tx = tx;
    }
    network
}

/// `2: eth0    inet 10.0.0.5/24 brd ...` → ("eth0", "inet", "10.0.0.5")
fn ip_addr_row<'a>(parts: &[&'a str]) -> Option<(&'a str, &'a str, &'a str)> {
    if parts.len() < 4 {
        return None;
    }
    let index = parts[0].strip_suffix(':')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let family = parts[2];
    if family != "inet" && family != "inet6" {
        return None;
    }
    let iface = parts[1].split('@').next().unwrap_or(parts[1]);
    let addr = parts[3].split('/').next().unwrap_or(parts[3]);
    Some((iface, family, addr))
}
