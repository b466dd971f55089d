// Shared test helpers: a scripted in-memory remote connection

#![allow(dead_code)]

use fleetstat::remote::{CommandError, ConnectionId, RemoteConnection};
use fleetstat::sampler::{
    DF_COMMAND, HOST_COMMAND, MEMINFO_COMMAND, NETWORK_COMMAND, PROC_STAT_COMMAND,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub const MEMINFO: &str = "\
MemTotal:        8048144 kB
MemFree:          451232 kB
MemAvailable:    5122368 kB
Buffers:          312004 kB
Cached:          4137840 kB
SwapTotal:       2097148 kB
SwapFree:        2090000 kB
";

pub const DF: &str = "\
Filesystem        1B-blocks        Used   Available Use% Mounted on
/dev/sda1       52710469632 21474836480 28521938944  43% /
/dev/mapper/ubuntu--vg-ubuntu--lv
                 1073741824   536870912   536870912  50% /var
";

pub const HOST: &str = "web-1\n350735.47 234388.90\n0.15 0.10 0.05 2/143 4567\n";

pub const NETWORK: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
  eth0: 1215645    2751    0    0    0     0          0         0  1782404    4324    0    0    0   427       0          0
2: eth0    inet 10.0.0.5/24 brd 10.0.0.255 scope global eth0
";

/// `/proc/stat` with the aggregate line plus two cores.
pub fn proc_stat(user: u64, idle: u64) -> String {
    format!(
        "cpu  {user} 0 0 {idle} 0 0 0 0 0 0\n\
         cpu0 {} 0 0 {} 0 0 0 0 0 0\n\
         cpu1 {} 0 0 {} 0 0 0 0 0 0\n\
         intr 1 2 3\nctxt 42\n",
        user / 2,
        idle / 2,
        user - user / 2,
        idle - idle / 2
    )
}

#[derive(Debug, Clone)]
pub enum Reply {
    Output(String),
    Fail(String),
    /// Never answers within any reasonable deadline.
    Hang,
}

pub struct ScriptedConnection {
    id: ConnectionId,
    label: String,
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedConnection {
    /// A healthy Linux host answering every diagnostic command.
    pub fn linux(label: &str) -> Self {
        let conn = Self {
            id: ConnectionId::next(),
            label: label.to_string(),
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        };
        conn.reply(HOST_COMMAND, Reply::Output(HOST.into()));
        conn.reply(MEMINFO_COMMAND, Reply::Output(MEMINFO.into()));
        conn.reply(DF_COMMAND, Reply::Output(DF.into()));
        conn.reply(NETWORK_COMMAND, Reply::Output(NETWORK.into()));
        conn.set_proc_stat(100, 1000);
        conn
    }

    pub fn reply(&self, command: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .insert(command.to_string(), reply);
    }

    pub fn set_proc_stat(&self, user: u64, idle: u64) {
        self.reply(PROC_STAT_COMMAND, Reply::Output(proc_stat(user, idle)));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl RemoteConnection for ScriptedConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    async fn run(&self, command: &str) -> Result<String, CommandError> {
        let reply = {
            self.calls.lock().unwrap().push(command.to_string());
            self.replies.lock().unwrap().get(command).cloned()
        };
        match reply {
            Some(Reply::Output(s)) => Ok(s),
            Some(Reply::Fail(stderr)) => Err(CommandError::Failed {
                status: "exit status: 1".into(),
                stderr,
            }),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
            None => Err(CommandError::Failed {
                status: "exit status: 127".into(),
                stderr: format!("unscripted command: {command}"),
            }),
        }
    }
}
