//! Cancellation ids and the registry of in-flight effect tasks.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// Identifies a group of effects that can be cancelled together.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CancelId(Arc<str>);

impl CancelId {
    /// A fresh id no other effect shares.
    pub fn unique() -> Self {
        Self(Arc::from(Uuid::new_v4().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CancelId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for CancelId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<&CancelId> for CancelId {
    fn from(value: &CancelId) -> Self {
        value.clone()
    }
}

impl fmt::Debug for CancelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CancelId({})", self.0)
    }
}

impl fmt::Display for CancelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared flag checked by a running effect before every delivery.
#[derive(Clone, Default)]
pub(crate) struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub(crate) fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

struct TaskEntry {
    ids: Vec<CancelId>,
    flag: CancellationFlag,
    abort: Option<AbortHandle>,
}

impl TaskEntry {
    fn stop(self) {
        self.flag.cancel();
        if let Some(abort) = self.abort {
            abort.abort();
        }
    }
}

#[derive(Default)]
struct RegistryInner {
    next_token: u64,
    tasks: HashMap<u64, TaskEntry>,
    by_id: HashMap<CancelId, HashSet<u64>>,
}

impl RegistryInner {
    fn remove(&mut self, token: u64) -> Option<TaskEntry> {
        let entry = self.tasks.remove(&token)?;
        for id in &entry.ids {
            if let Some(tokens) = self.by_id.get_mut(id) {
                tokens.remove(&token);
                if tokens.is_empty() {
                    self.by_id.remove(id);
                }
            }
        }
        Some(entry)
    }
}

/// Every effect task a store has spawned and not yet seen finish.
///
/// Tasks without a cancellation id are tracked too, so that tearing the
/// store down stops all of them.
#[derive(Default)]
pub(crate) struct EffectRegistry {
    inner: Mutex<RegistryInner>,
}

impl EffectRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a task about to be spawned under the given ids.
    pub(crate) fn begin(&self, ids: &[CancelId]) -> (u64, CancellationFlag) {
        let mut inner = self.inner.lock();
        let token = inner.next_token;
        inner.next_token += 1;
        let flag = CancellationFlag::default();
        for id in ids {
            inner.by_id.entry(id.clone()).or_default().insert(token);
        }
        inner.tasks.insert(
            token,
            TaskEntry {
                ids: ids.to_vec(),
                flag: flag.clone(),
                abort: None,
            },
        );
        (token, flag)
    }

    /// Attach the abort handle once the task exists.
    ///
    /// A task that was cancelled (or finished) in between is aborted right away.
    pub(crate) fn attach(&self, token: u64, abort: AbortHandle) {
        let abort = match self.inner.lock().tasks.get_mut(&token) {
            Some(entry) => {
                entry.abort = Some(abort);
                return;
            }
            None => abort,
        };
        abort.abort();
    }

    pub(crate) fn finish(&self, token: u64) {
        self.inner.lock().remove(token);
    }

    /// Cancel every task registered under `id`. Unknown ids are a no-op.
    pub(crate) fn cancel(&self, id: &CancelId) -> usize {
        let entries: Vec<TaskEntry> = {
            let mut inner = self.inner.lock();
            let tokens = inner.by_id.remove(id).unwrap_or_default();
            tokens.into_iter().filter_map(|token| inner.remove(token)).collect()
        };
        let cancelled = entries.len();
        entries.into_iter().for_each(TaskEntry::stop);
        cancelled
    }

    pub(crate) fn cancel_all(&self) -> usize {
        let entries: Vec<TaskEntry> = {
            let mut inner = self.inner.lock();
            inner.by_id.clear();
            inner.tasks.drain().map(|(_, entry)| entry).collect()
        };
        let cancelled = entries.len();
        entries.into_iter().for_each(TaskEntry::stop);
        cancelled
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.inner.lock().tasks.len()
    }
}
