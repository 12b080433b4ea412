use crate::architecture::{FeatureState, Shared};

/// Counter statistics both tabs read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterStats {
    pub count: i64,
    pub max_count: i64,
    pub min_count: i64,
    pub number_of_counts: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Counter,
    Profile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterTabState {
    pub stats: Shared<CounterStats>,
    pub alert: Option<String>,
}

impl FeatureState for CounterTabState {}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTabState {
    pub stats: Shared<CounterStats>,
}

impl FeatureState for ProfileTabState {}

#[derive(Debug, Clone, PartialEq)]
pub struct SharedStateDemo {
    pub current_tab: Tab,
    pub counter: CounterTabState,
    pub profile: ProfileTabState,
}

impl FeatureState for SharedStateDemo {}

impl SharedStateDemo {
    /// Both tabs hold a handle to the same `stats`.
    pub fn with_stats(stats: Shared<CounterStats>) -> Self {
        Self {
            current_tab: Tab::Counter,
            counter: CounterTabState {
                stats: stats.clone(),
                alert: None,
            },
            profile: ProfileTabState { stats },
        }
    }
}

impl Default for SharedStateDemo {
    fn default() -> Self {
        Self::with_stats(Shared::new(CounterStats::default()))
    }
}
