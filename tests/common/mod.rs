//! Shared test utilities.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use casestudies::architecture::{ImmediateScheduler, StateStream};
use casestudies::catalog::Dependencies;
use casestudies::demos::cancellation::LiveFactClient;
use casestudies::demos::die_roll::Dice;
use tempfile::TempDir;
use tokio::sync::broadcast;

/// Write `content` to a `config.toml` inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Dice that cycle through a fixed list of faces.
pub struct ScriptedDice {
    faces: Vec<u8>,
    next: AtomicUsize,
}

impl ScriptedDice {
    pub fn new(faces: &[u8]) -> Self {
        Self {
            faces: faces.to_vec(),
            next: AtomicUsize::new(0),
        }
    }
}

impl Dice for ScriptedDice {
    fn roll(&self) -> u8 {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.faces[index % self.faces.len()]
    }
}

/// Dependencies that never wait and roll the given faces.
pub fn test_dependencies(faces: &[u8]) -> Dependencies {
    let (notifications, _) = broadcast::channel(16);
    Dependencies {
        scheduler: Arc::new(ImmediateScheduler),
        dice: Arc::new(ScriptedDice::new(faces)),
        facts: Arc::new(LiveFactClient {
            scheduler: Arc::new(ImmediateScheduler),
            latency: Duration::ZERO,
        }),
        notifications,
        tick: Duration::from_millis(10),
    }
}

/// Read snapshots until one satisfies `predicate`.
pub async fn wait_for<S>(stream: &mut StateStream<S>, predicate: impl Fn(&S) -> bool) -> S {
    tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(state) = stream.next().await {
            if predicate(&state) {
                return state;
            }
        }
        panic!("store was torn down before the expected state");
    })
    .await
    .expect("timed out waiting for state")
}
