//! "Pullback and combine": two independent counters built from one reducer.

use crate::architecture::{Action, FeatureState, Reducer, ReducerExt};
use crate::case_path;
use crate::demos::counter::{self, CounterAction, CounterReducer, CounterState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TwoCountersState {
    pub first: CounterState,
    pub second: CounterState,
}

impl FeatureState for TwoCountersState {}

#[derive(Debug, Clone, PartialEq)]
pub enum TwoCountersAction {
    First(CounterAction),
    Second(CounterAction),
}

impl Action for TwoCountersAction {}

pub fn two_counters_reducer(
) -> impl Reducer<State = TwoCountersState, Action = TwoCountersAction, Environment = ()> {
    CounterReducer
        .pullback(
            |state: &mut TwoCountersState| &mut state.first,
            case_path!(TwoCountersAction::First),
            |_: &()| (),
        )
        .combine(CounterReducer.pullback(
            |state: &mut TwoCountersState| &mut state.second,
            case_path!(TwoCountersAction::Second),
            |_: &()| (),
        ))
}

pub const COMMANDS: &[&str] = &[
    "first increment",
    "first decrement",
    "second increment",
    "second decrement",
];

pub fn parse_command(command: &str) -> Option<TwoCountersAction> {
    let (target, rest) = command.split_once(char::is_whitespace)?;
    let action = counter::parse_command(rest.trim())?;
    match target {
        "first" => Some(TwoCountersAction::First(action)),
        "second" => Some(TwoCountersAction::Second(action)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_routes_to_counter() {
        assert_eq!(
            parse_command("second  +"),
            Some(TwoCountersAction::Second(CounterAction::Increment))
        );
        assert_eq!(parse_command("third increment"), None);
        assert_eq!(parse_command("first"), None);
    }
}
