// Remote command execution over an already-open connection

mod ssh;

pub use ssh::{SshConnection, SshOptions};

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one open connection object. Allocated per instance, so two
/// connections to the same host never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to start remote shell: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("remote command exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// An open remote session that can run shell commands.
pub trait RemoteConnection: Send + Sync {
    fn id(&self) -> ConnectionId;

    /// Human-readable target, used in logs only.
    fn label(&self) -> &str;

    /// Runs `command` and returns its standard output only, so stderr noise
    /// never reaches the parsers. On failure stderr is carried in
    /// [`CommandError::Failed`].
    fn run(&self, command: &str) -> impl Future<Output = Result<String, CommandError>> + Send;
}
