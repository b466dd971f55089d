// OpenSSH client transport. One multiplexed master session per connection,
// reused by every command run through it.

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::{CommandError, ConnectionId, RemoteConnection};

#[derive(Debug, Clone)]
pub struct SshOptions {
    pub control_dir: PathBuf,
    pub control_persist_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for SshOptions {
    fn default() -> Self {
        Self {
            control_dir: PathBuf::from("/tmp"),
            control_persist_secs: 600,
            connect_timeout_secs: 5,
        }
    }
}

pub struct SshConnection {
    id: ConnectionId,
    label: String,
    target: String,
    port: u16,
    key_path: Option<String>,
    control_path: PathBuf,
    options: SshOptions,
}

impl SshConnection {
    pub fn new(
        user: &str,
        address: &str,
        port: u16,
        key_path: Option<String>,
        options: SshOptions,
    ) -> Self {
        let id = ConnectionId::next();
        let target = format!("{}@{}", user, address);
        let control_path = options
            .control_dir
            .join(format!("fleetstat-{}-{}.sock", std::process::id(), id.as_u64()));
        Self {
            id,
            label: format!("{}:{}", target, port),
            target,
            port,
            key_path,
            control_path,
            options,
        }
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new("ssh");
        cmd.arg("-o").arg("BatchMode=yes");
        cmd.arg("-o")
            .arg(format!("ConnectTimeout={}", self.options.connect_timeout_secs));
        cmd.arg("-o").arg("ControlMaster=auto");
        cmd.arg("-o")
            .arg(format!("ControlPath={}", self.control_path.display()));
        cmd.arg("-o")
            .arg(format!("ControlPersist={}", self.options.control_persist_secs));
        if self.port != 22 {
            cmd.arg("-p").arg(self.port.to_string());
        }
        if let Some(ref key_path) = self.key_path {
            cmd.arg("-i").arg(key_path);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// Asks the multiplexing master to exit. Errors are ignored; the master
    /// also exits on its own after `control_persist_secs`.
    pub async fn close(&self) {
        let mut cmd = self.base_command();
        cmd.arg("-O").arg("exit").arg(&self.target);
        if let Err(e) = cmd.output().await {
            debug!(host = %self.label, error = %e, "ssh master exit failed");
        }
    }
}

impl RemoteConnection for SshConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    async fn run(&self, command: &str) -> Result<String, CommandError> {
        let mut cmd = self.base_command();
        cmd.arg(&self.target).arg(command);
        let output = cmd.output().await?;
        if !output.status.success() {
            return Err(CommandError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
