use crate::architecture::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum CounterAction {
    Increment,
    Decrement,
}

impl Action for CounterAction {}
