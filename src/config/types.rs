use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub runtime: RuntimeConfig,
    pub timers: TimersConfig,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive (e.g., "info", "casestudies=debug").
    /// `RUST_LOG` takes precedence when set.
    pub filter: String,
}

/// Settings for driving a screen from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Time to let effects run after each command, in milliseconds (default: 100).
    pub settle_ms: u64,
    /// Simulated latency of request-style effects, in milliseconds (default: 300).
    pub latency_ms: u64,
}

/// Settings for timer-driven screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimersConfig {
    /// Interval between timer ticks, in milliseconds (default: 1000).
    pub tick_ms: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            latency_ms: 300,
        }
    }
}

impl Default for TimersConfig {
    fn default() -> Self {
        Self { tick_ms: 1000 }
    }
}

impl RuntimeConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl TimersConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
