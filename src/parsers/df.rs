// `df -B1` with exact byte counts. df wraps long device names onto their own
// line, pushing the remaining five columns to the next one.

use crate::models::FsInfo;

const DEVICE_PREFIX: &str = "/dev/";

pub fn parse_df(output: &str) -> Vec<FsInfo> {
    let mut infos = Vec::new();
    // 1 while the previous line held only a wrapped device name.
    let mut carry = 0usize;
    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let n = parts.len();
        let dev = n > 0 && parts[0].starts_with(DEVICE_PREFIX);
        if n == 1 && dev {
            carry = 1;
        } else if (n == 5 && carry == 1) || (n == 6 && dev) {
            let offset = carry;
            carry = 0;
            let Ok(used) = parts[2 - offset].parse::<u64>() else {
                continue;
            };
            let Ok(free) = parts[3 - offset].parse::<u64>() else {
                continue;
            };
            infos.push(FsInfo {
                mount_point: parts[5 - offset].to_string(),
                used,
                free,
            });
        }
    }
    infos
}
