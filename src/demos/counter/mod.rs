//! "Basics": a single counter with no effects.

mod action;
mod reducer;
mod state;

pub use action::CounterAction;
pub use reducer::CounterReducer;
pub use state::CounterState;

pub const COMMANDS: &[&str] = &["increment", "decrement"];

pub fn parse_command(command: &str) -> Option<CounterAction> {
    match command {
        "increment" | "+" => Some(CounterAction::Increment),
        "decrement" | "-" => Some(CounterAction::Decrement),
        _ => None,
    }
}
