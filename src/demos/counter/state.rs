use crate::architecture::FeatureState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CounterState {
    pub count: i64,
}

impl FeatureState for CounterState {}
