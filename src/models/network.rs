// Network interface model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    #[serde(rename = "iPv4")]
    pub ipv4: String,
    #[serde(rename = "iPv6")]
    pub ipv6: String,
    /// Cumulative received bytes.
    pub rx: u64,
    /// Cumulative transmitted bytes.
    pub tx: u64,
}
