//! Base trait for actions in the store architecture.

use std::fmt::Debug;

/// Marker trait for action enums.
///
/// Actions represent:
/// - User interaction (button taps, toggles)
/// - Effect results (timer ticks, loaded data, failures)
/// - Child feature events embedded in a parent action
///
/// Actions are processed by reducers to produce the next state.
pub trait Action: Debug + Send + 'static {}
