//! "Strict reducers": randomness only reaches the reducer through its environment.

use std::sync::Arc;

use rand::Rng;

use crate::architecture::{Action, Effect, FeatureState, Reducer};

/// Source of die faces, 1 through 6.
pub trait Dice: Send + Sync + 'static {
    fn roll(&self) -> u8;
}

/// Dice backed by the thread-local random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveDice;

impl Dice for LiveDice {
    fn roll(&self) -> u8 {
        rand::thread_rng().gen_range(1..=6)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DieRollState {
    pub die_face: u8,
}

impl Default for DieRollState {
    fn default() -> Self {
        Self { die_face: 1 }
    }
}

impl FeatureState for DieRollState {}

#[derive(Debug, Clone, PartialEq)]
pub enum DieRollAction {
    RollDieButtonTapped,
    DieRolled(u8),
}

impl Action for DieRollAction {}

pub struct DieRollEnvironment {
    pub dice: Arc<dyn Dice>,
}

pub struct DieRollReducer;

impl Reducer for DieRollReducer {
    type State = DieRollState;
    type Action = DieRollAction;
    type Environment = DieRollEnvironment;

    fn reduce(
        &self,
        state: &mut DieRollState,
        action: DieRollAction,
        environment: &DieRollEnvironment,
    ) -> Effect<DieRollAction> {
        match action {
            DieRollAction::RollDieButtonTapped => {
                let dice = Arc::clone(&environment.dice);
                Effect::task(async move { DieRollAction::DieRolled(dice.roll()) })
            }
            DieRollAction::DieRolled(face) => {
                state.die_face = face;
                Effect::none()
            }
        }
    }
}

pub const COMMANDS: &[&str] = &["roll"];

pub fn parse_command(command: &str) -> Option<DieRollAction> {
    match command {
        "roll" => Some(DieRollAction::RollDieButtonTapped),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_dice_stay_in_range() {
        for _ in 0..200 {
            let face = LiveDice.roll();
            assert!((1..=6).contains(&face));
        }
    }
}
