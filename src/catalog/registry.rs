//! The catalog of case studies, grouped into sections.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::architecture::{AnyScheduler, LiveScheduler, Shared, Store};
use crate::catalog::error::CatalogError;
use crate::catalog::screen::{Screen, StoreScreen};
use crate::config::Config;
use crate::demos::cancellation::{
    self, CancellationEnvironment, CancellationReducer, CancellationState, FactClient, LiveFactClient,
};
use crate::demos::die_roll::{self, Dice, DieRollEnvironment, DieRollReducer, DieRollState, LiveDice};
use crate::demos::long_living::{self, LongLivingEnvironment, LongLivingReducer, LongLivingState};
use crate::demos::nested::{self, NestedReducer, NestedState};
use crate::demos::shared_state::{self, CounterStats, SharedStateDemo};
use crate::demos::timers::{self, TimersEnvironment, TimersReducer, TimersState};
use crate::demos::{counter, optional_basics, two_counters};

const NOTIFICATION_CAPACITY: usize = 16;

/// Capabilities handed to screens when they are opened.
#[derive(Clone)]
pub struct Dependencies {
    pub scheduler: AnyScheduler,
    pub dice: Arc<dyn Dice>,
    pub facts: Arc<dyn FactClient>,
    /// Process-wide notification channel, like a platform notification center.
    pub notifications: broadcast::Sender<()>,
    pub tick: Duration,
}

impl Dependencies {
    /// Wall clock, real randomness and the configured intervals.
    pub fn live(config: &Config) -> Self {
        let scheduler: AnyScheduler = Arc::new(LiveScheduler);
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            facts: Arc::new(LiveFactClient {
                scheduler: Arc::clone(&scheduler),
                latency: config.runtime.latency(),
            }),
            scheduler,
            dice: Arc::new(LiveDice),
            notifications,
            tick: config.timers.tick(),
        }
    }
}

/// A navigable demo.
pub struct Entry {
    pub title: &'static str,
    /// Builds a fresh store with fresh initial state on every call.
    pub open: fn(&Dependencies) -> Box<dyn Screen>,
}

pub struct Section {
    pub header: &'static str,
    pub entries: Vec<Entry>,
}

pub struct Catalog {
    pub title: &'static str,
    pub sections: Vec<Section>,
}

/// Lowercase, dash-separated form of a label, used in entry paths.
pub fn slug(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

impl Catalog {
    pub fn case_studies() -> Self {
        Self {
            title: "Case Studies",
            sections: vec![
                Section {
                    header: "Getting started",
                    entries: vec![
                        Entry {
                            title: "Basics",
                            open: open_basics,
                        },
                        Entry {
                            title: "Pullback and combine",
                            open: open_two_counters,
                        },
                        Entry {
                            title: "Optional state",
                            open: open_optional_basics,
                        },
                        Entry {
                            title: "Shared state",
                            open: open_shared_state,
                        },
                    ],
                },
                Section {
                    header: "Effects",
                    entries: vec![
                        Entry {
                            title: "Cancellation",
                            open: open_cancellation,
                        },
                        Entry {
                            title: "Long-living effects",
                            open: open_long_living,
                        },
                        Entry {
                            title: "Timers",
                            open: open_timers,
                        },
                    ],
                },
                Section {
                    header: "Higher-order reducers",
                    entries: vec![
                        Entry {
                            title: "Strict reducers",
                            open: open_die_roll,
                        },
                        Entry {
                            title: "Recursive state and actions",
                            open: open_nested,
                        },
                    ],
                },
            ],
        }
    }

    /// Every entry with its `section/entry` path, in catalog order.
    pub fn paths(&self) -> Vec<(String, &Entry)> {
        self.sections
            .iter()
            .flat_map(|section| {
                section
                    .entries
                    .iter()
                    .map(move |entry| (format!("{}/{}", slug(section.header), slug(entry.title)), entry))
            })
            .collect()
    }

    /// Look an entry up by `section/entry` path or by entry slug alone.
    pub fn find(&self, path: &str) -> Result<&Entry, CatalogError> {
        let wanted = path.trim().trim_matches('/').to_ascii_lowercase();
        self.paths()
            .into_iter()
            .find(|(full, entry)| *full == wanted || slug(entry.title) == wanted)
            .map(|(_, entry)| entry)
            .ok_or_else(|| CatalogError::UnknownEntry {
                path: path.to_string(),
            })
    }
}

fn open_basics(_: &Dependencies) -> Box<dyn Screen> {
    let store = Store::new(counter::CounterState::default(), counter::CounterReducer, ());
    Box::new(StoreScreen::new(store, counter::COMMANDS, counter::parse_command))
}

fn open_two_counters(_: &Dependencies) -> Box<dyn Screen> {
    let store = Store::new(
        two_counters::TwoCountersState::default(),
        two_counters::two_counters_reducer(),
        (),
    );
    Box::new(StoreScreen::new(store, two_counters::COMMANDS, two_counters::parse_command))
}

fn open_optional_basics(_: &Dependencies) -> Box<dyn Screen> {
    let store = Store::new(
        optional_basics::OptionalBasicsState::default(),
        optional_basics::optional_basics_reducer(),
        (),
    );
    Box::new(StoreScreen::new(
        store,
        optional_basics::COMMANDS,
        optional_basics::parse_command,
    ))
}

fn open_shared_state(_: &Dependencies) -> Box<dyn Screen> {
    let state = SharedStateDemo::with_stats(Shared::new(CounterStats::default()));
    let store = Store::new(state, shared_state::shared_state_reducer(), ());
    Box::new(StoreScreen::new(store, shared_state::COMMANDS, shared_state::parse_command))
}

fn open_cancellation(dependencies: &Dependencies) -> Box<dyn Screen> {
    let environment = CancellationEnvironment {
        facts: Arc::clone(&dependencies.facts),
    };
    let store = Store::new(CancellationState::default(), CancellationReducer, environment);
    Box::new(StoreScreen::new(store, cancellation::COMMANDS, cancellation::parse_command))
}

fn open_long_living(dependencies: &Dependencies) -> Box<dyn Screen> {
    let environment = LongLivingEnvironment {
        notifications: dependencies.notifications.clone(),
    };
    let store = Store::new(LongLivingState::default(), LongLivingReducer, environment);
    Box::new(StoreScreen::new(store, long_living::COMMANDS, long_living::parse_command))
}

fn open_timers(dependencies: &Dependencies) -> Box<dyn Screen> {
    let environment = TimersEnvironment {
        scheduler: Arc::clone(&dependencies.scheduler),
        tick: dependencies.tick,
    };
    let store = Store::new(TimersState::default(), TimersReducer, environment);
    Box::new(StoreScreen::new(store, timers::COMMANDS, timers::parse_command))
}

fn open_die_roll(dependencies: &Dependencies) -> Box<dyn Screen> {
    let environment = DieRollEnvironment {
        dice: Arc::clone(&dependencies.dice),
    };
    let store = Store::new(DieRollState::default(), DieRollReducer, environment);
    Box::new(StoreScreen::new(store, die_roll::COMMANDS, die_roll::parse_command))
}

fn open_nested(_: &Dependencies) -> Box<dyn Screen> {
    let store = Store::new(NestedState::mock(), NestedReducer, ());
    Box::new(
        StoreScreen::new(store, nested::COMMANDS, nested::parse_command)
            .with_render(|state: &NestedState| state.tree.render()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_normalizes_labels() {
        assert_eq!(slug("Pullback and combine"), "pullback-and-combine");
        assert_eq!(slug("Higher-order reducers"), "higher-order-reducers");
        assert_eq!(slug("  Shared   state "), "shared-state");
    }

    #[test]
    fn paths_are_unique() {
        let catalog = Catalog::case_studies();
        let mut paths: Vec<String> = catalog.paths().into_iter().map(|(path, _)| path).collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }
}
