//! Explicitly shared state between features and stores.
//!
//! A [`Shared`] handle is placed in the state of every feature that needs
//! the value. Access rules:
//! - reads see the latest committed value, never a partial write;
//! - writes are exclusive and belong inside reducers, so they are
//!   serialized with the owning store's actions;
//! - every write bumps [`Shared::version`].
//!
//! Each handle also carries a frozen copy of the value, taken when the
//! handle was cloned or last written through. State snapshots are clones,
//! so a snapshot keeps the value it saw even after later writes. Equality
//! and `Debug` use that frozen copy.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::state::FeatureState;

struct Versioned<T> {
    value: T,
    version: u64,
}

pub struct Shared<T> {
    cell: Arc<RwLock<Versioned<T>>>,
    snapshot: Arc<T>,
    snapshot_version: u64,
}

impl<T: Clone> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            snapshot: Arc::new(value.clone()),
            cell: Arc::new(RwLock::new(Versioned { value, version: 0 })),
            snapshot_version: 0,
        }
    }

    /// Read the latest committed value.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.read().value)
    }

    pub fn get(&self) -> T {
        self.cell.read().value.clone()
    }

    /// Write the value. This handle's frozen copy follows the write.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut cell = self.cell.write();
        let result = f(&mut cell.value);
        cell.version += 1;
        self.snapshot = Arc::new(cell.value.clone());
        self.snapshot_version = cell.version;
        result
    }

    /// Number of writes since creation, through any handle.
    pub fn version(&self) -> u64 {
        self.cell.read().version
    }

    /// The value as this handle last saw it.
    pub fn snapshot(&self) -> &T {
        &self.snapshot
    }

    pub fn snapshot_version(&self) -> u64 {
        self.snapshot_version
    }

    /// Whether both handles refer to the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Clone> Clone for Shared<T> {
    fn clone(&self) -> Self {
        let cell = self.cell.read();
        let snapshot = if cell.version == self.snapshot_version {
            Arc::clone(&self.snapshot)
        } else {
            Arc::new(cell.value.clone())
        };
        Self {
            cell: Arc::clone(&self.cell),
            snapshot,
            snapshot_version: cell.version,
        }
    }
}

impl<T: Clone + PartialEq> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) && self.snapshot_version == other.snapshot_version {
            return true;
        }
        *self.snapshot == *other.snapshot
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("value", &*self.snapshot)
            .field("version", &self.snapshot_version)
            .finish()
    }
}

impl<T> FeatureState for Shared<T> where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_writes() {
        let shared = Shared::new(1);
        let mut other = shared.clone();

        other.update(|value| *value += 1);

        assert_eq!(shared.get(), 2);
        assert_eq!(shared.version(), 1);
        assert!(shared.ptr_eq(&other));
    }

    #[test]
    fn clones_freeze_the_value_they_saw() {
        let mut live = Shared::new(1);
        let before = live.clone();

        live.update(|value| *value += 1);
        let after = live.clone();

        assert_eq!(*before.snapshot(), 1);
        assert_eq!(*after.snapshot(), 2);
        assert_ne!(before, after);
        assert_eq!(after.snapshot_version(), 1);
    }

    #[test]
    fn stale_handles_refresh_when_cloned() {
        let mut writer = Shared::new(String::from("a"));
        let reader = writer.clone();

        writer.update(|value| value.push('b'));

        assert_eq!(reader.snapshot(), "a");
        assert_eq!(reader.clone().snapshot(), "ab");
        assert_eq!(reader.get(), "ab");
    }

    #[test]
    fn equality_compares_values_across_handles() {
        let a = Shared::new(String::from("x"));
        let mut b = Shared::new(String::from("x"));
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));

        b.update(|value| value.push('y'));
        assert_ne!(a, b);
    }
}
