//! Demo features, each exercising one part of the architecture.
//!
//! Every demo exposes its state, actions and reducer, plus `COMMANDS` and
//! `parse_command` used by the catalog to drive it from text.

pub mod cancellation;
pub mod counter;
pub mod die_roll;
pub mod long_living;
pub mod nested;
pub mod optional_basics;
pub mod shared_state;
pub mod timers;
pub mod two_counters;
