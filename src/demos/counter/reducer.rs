use crate::architecture::{Effect, Reducer};
use crate::demos::counter::action::CounterAction;
use crate::demos::counter::state::CounterState;

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;
    type Environment = ();

    fn reduce(&self, state: &mut CounterState, action: CounterAction, _: &()) -> Effect<CounterAction> {
        match action {
            CounterAction::Increment => state.count += 1,
            CounterAction::Decrement => state.count -= 1,
        }
        Effect::none()
    }
}
