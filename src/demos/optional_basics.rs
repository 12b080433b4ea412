//! "Optional state": a counter that can be toggled in and out of existence.

use crate::architecture::{from_fn, Action, Effect, FeatureState, Reducer, ReducerExt};
use crate::case_path;
use crate::demos::counter::{self, CounterAction, CounterReducer, CounterState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionalBasicsState {
    pub optional_counter: Option<CounterState>,
}

impl FeatureState for OptionalBasicsState {}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionalBasicsAction {
    ToggleCounterButtonTapped,
    OptionalCounter(CounterAction),
}

impl Action for OptionalBasicsAction {}

pub fn optional_basics_reducer(
) -> impl Reducer<State = OptionalBasicsState, Action = OptionalBasicsAction, Environment = ()> {
    CounterReducer
        .optional()
        .pullback(
            |state: &mut OptionalBasicsState| &mut state.optional_counter,
            case_path!(OptionalBasicsAction::OptionalCounter),
            |_: &()| (),
        )
        .combine(from_fn(
            |state: &mut OptionalBasicsState, action: OptionalBasicsAction, _: &()| {
                if let OptionalBasicsAction::ToggleCounterButtonTapped = action {
                    state.optional_counter = match state.optional_counter {
                        Some(_) => None,
                        None => Some(CounterState::default()),
                    };
                }
                Effect::none()
            },
        ))
}

pub const COMMANDS: &[&str] = &["toggle", "increment", "decrement"];

pub fn parse_command(command: &str) -> Option<OptionalBasicsAction> {
    match command {
        "toggle" => Some(OptionalBasicsAction::ToggleCounterButtonTapped),
        other => counter::parse_command(other).map(OptionalBasicsAction::OptionalCounter),
    }
}
