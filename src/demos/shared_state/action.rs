use crate::architecture::Action;
use crate::demos::shared_state::state::Tab;

#[derive(Debug, Clone, PartialEq)]
pub enum CounterTabAction {
    IncrementButtonTapped,
    DecrementButtonTapped,
    IsPrimeButtonTapped,
    AlertDismissed,
}

impl Action for CounterTabAction {}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileTabAction {
    ResetCounterButtonTapped,
}

impl Action for ProfileTabAction {}

#[derive(Debug, Clone, PartialEq)]
pub enum SharedStateAction {
    SelectTab(Tab),
    Counter(CounterTabAction),
    Profile(ProfileTabAction),
}

impl Action for SharedStateAction {}
