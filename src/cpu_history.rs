// Last-observed CPU counters per connection, used as the baseline for the
// next poll's rate computation.

use crate::parsers::CpuRaw;
use crate::remote::ConnectionId;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Single-slot baseline per connection identity. Entries live until removed;
/// owners call [`CpuHistory::remove`] or [`CpuHistory::clear`] when
/// connections go away.
#[derive(Debug, Default)]
pub struct CpuHistory {
    // Held for one map operation at a time, never across a remote command.
    inner: Mutex<HashMap<ConnectionId, CpuRaw>>,
}

impl CpuHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> MutexGuard<'_, HashMap<ConnectionId, CpuRaw>> {
        // Entries are whole values; a poisoned map is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, id: ConnectionId) -> Option<CpuRaw> {
        self.map().get(&id).copied()
    }

    pub fn put(&self, id: ConnectionId, raw: CpuRaw) {
        self.map().insert(id, raw);
    }

    /// Stores `raw` as the new baseline and returns the previous one, in one
    /// critical section.
    pub fn swap(&self, id: ConnectionId, raw: CpuRaw) -> Option<CpuRaw> {
        self.map().insert(id, raw)
    }

    pub fn remove(&self, id: ConnectionId) -> Option<CpuRaw> {
        self.map().remove(&id)
    }

    pub fn clear(&self) {
        self.map().clear();
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}
