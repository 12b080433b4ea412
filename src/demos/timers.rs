//! "Timers": a ticking effect started and stopped by the user.

use std::time::Duration;

use crate::architecture::{Action, AnyScheduler, Effect, FeatureState, Reducer};

const TIMER_ID: &str = "timers.tick";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimersState {
    pub is_timer_active: bool,
    pub seconds_elapsed: u64,
}

impl FeatureState for TimersState {}

#[derive(Debug, Clone, PartialEq)]
pub enum TimersAction {
    ToggleTimerButtonTapped,
    TimerTicked,
    OnDisappear,
}

impl Action for TimersAction {}

pub struct TimersEnvironment {
    pub scheduler: AnyScheduler,
    pub tick: Duration,
}

pub struct TimersReducer;

impl Reducer for TimersReducer {
    type State = TimersState;
    type Action = TimersAction;
    type Environment = TimersEnvironment;

    fn reduce(
        &self,
        state: &mut TimersState,
        action: TimersAction,
        environment: &TimersEnvironment,
    ) -> Effect<TimersAction> {
        match action {
            TimersAction::ToggleTimerButtonTapped => {
                state.is_timer_active = !state.is_timer_active;
                if state.is_timer_active {
                    Effect::every(environment.scheduler.clone(), environment.tick, || {
                        TimersAction::TimerTicked
                    })
                    .cancellable(TIMER_ID, true)
                } else {
                    Effect::cancel(TIMER_ID)
                }
            }
            TimersAction::TimerTicked => {
                state.seconds_elapsed += 1;
                Effect::none()
            }
            TimersAction::OnDisappear => {
                state.is_timer_active = false;
                Effect::cancel(TIMER_ID)
            }
        }
    }
}

pub const COMMANDS: &[&str] = &["toggle", "disappear"];

pub fn parse_command(command: &str) -> Option<TimersAction> {
    match command {
        "toggle" => Some(TimersAction::ToggleTimerButtonTapped),
        "disappear" => Some(TimersAction::OnDisappear),
        _ => None,
    }
}
