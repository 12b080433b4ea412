//! "Shared state": two tabs reading and writing one explicitly shared value.
//!
//! The counter tab and the profile tab each hold a [`Shared`] handle to the
//! same [`CounterStats`]. Nothing is global; whoever builds the state decides
//! which features share the value.
//!
//! [`Shared`]: crate::architecture::Shared

mod action;
mod reducer;
mod state;

pub use action::{CounterTabAction, ProfileTabAction, SharedStateAction};
pub use reducer::{shared_state_reducer, CounterTabReducer, ProfileTabReducer};
pub use state::{CounterStats, CounterTabState, ProfileTabState, SharedStateDemo, Tab};

pub const COMMANDS: &[&str] = &[
    "tab counter",
    "tab profile",
    "increment",
    "decrement",
    "is-prime",
    "dismiss",
    "reset",
];

pub fn parse_command(command: &str) -> Option<SharedStateAction> {
    let action = match command {
        "tab counter" => SharedStateAction::SelectTab(Tab::Counter),
        "tab profile" => SharedStateAction::SelectTab(Tab::Profile),
        "increment" | "+" => SharedStateAction::Counter(CounterTabAction::IncrementButtonTapped),
        "decrement" | "-" => SharedStateAction::Counter(CounterTabAction::DecrementButtonTapped),
        "is-prime" => SharedStateAction::Counter(CounterTabAction::IsPrimeButtonTapped),
        "dismiss" => SharedStateAction::Counter(CounterTabAction::AlertDismissed),
        "reset" => SharedStateAction::Profile(ProfileTabAction::ResetCounterButtonTapped),
        _ => return None,
    };
    Some(action)
}
