//! Unidirectional state-management primitives.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Store ──→ Reducer ──→ State ──→ observers
//!   ↑                     │
//!   │                  Effect
//!   │                     │
//!   └──── Environment ←───┘
//! ```
//!
//! - **State**: plain value owned by exactly one store
//! - **Action**: user events and effect results
//! - **Reducer**: the only place state changes; returns an [`Effect`]
//! - **Environment**: injected dependencies ([`Scheduler`], clients, randomness)
//! - **Effect**: deferred work whose results come back as actions
//! - **Store**: serializes actions, publishes state, runs and cancels effects

mod action;
mod cancellation;
mod case_path;
mod combinators;
mod effect;
mod reducer;
mod scheduler;
mod shared;
mod state;
mod store;
mod stream;

pub use action::Action;
pub use cancellation::CancelId;
pub use case_path::CasePath;
pub use combinators::{
    Combine, Debugged, ForEach, Identifiable, Optional, Pullback, ReducerExt,
};
pub use effect::{Effect, Emitter, Operation};
pub use reducer::{combine_all, from_fn, AnyReducer, CombineAll, FnReducer, Reducer};
pub use scheduler::{AnyScheduler, ImmediateScheduler, LiveScheduler, Scheduler};
pub use shared::Shared;
pub use state::FeatureState;
pub use store::Store;
pub use stream::StateStream;
