// Domain models

mod network;
mod response;
mod stats;

pub use network::NetworkInfo;
pub use response::{Response, Status};
pub use stats::{CpuInfo, FsInfo, Stats};
