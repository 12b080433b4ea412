//! Reducer trait for the store architecture.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::action::Action;
use super::effect::Effect;
use super::state::FeatureState;

/// Reducer evolves state in response to actions.
///
/// The reducer is the only place where state transitions happen. It must be
/// total and synchronous: every action yields a defined result, and any work
/// that waits on the outside world is returned as an [`Effect`].
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: FeatureState;

    /// The action type this reducer handles.
    type Action: Action;

    /// Dependencies available to the effects this reducer returns.
    type Environment: Send + Sync + 'static;

    /// Apply an action to the state and describe the follow-up work.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> Effect<Self::Action>;
}

/// Reducer backed by a closure.
pub struct FnReducer<S, A, E, F> {
    f: F,
    _marker: PhantomData<fn() -> (S, A, E)>,
}

/// Build a reducer from a closure.
///
/// ```
/// use casestudies::architecture::{from_fn, Action, Effect, FeatureState};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Count(i64);
/// impl FeatureState for Count {}
///
/// #[derive(Debug)]
/// enum Step { Up }
/// impl Action for Step {}
///
/// let counter = from_fn(|state: &mut Count, action: Step, _env: &()| {
///     match action {
///         Step::Up => state.0 += 1,
///     }
///     Effect::none()
/// });
/// # let _ = counter;
/// ```
pub fn from_fn<S, A, E, F>(f: F) -> FnReducer<S, A, E, F>
where
    S: FeatureState,
    A: Action,
    E: Send + Sync + 'static,
    F: Fn(&mut S, A, &E) -> Effect<A> + Send + Sync + 'static,
{
    FnReducer {
        f,
        _marker: PhantomData,
    }
}

impl<S, A, E, F> Reducer for FnReducer<S, A, E, F>
where
    S: FeatureState,
    A: Action,
    E: Send + Sync + 'static,
    F: Fn(&mut S, A, &E) -> Effect<A> + Send + Sync + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut S, action: A, environment: &E) -> Effect<A> {
        (self.f)(state, action, environment)
    }
}

/// Type-erased reducer, for collections of reducers over the same types.
pub struct AnyReducer<S, A, E> {
    inner: Arc<dyn Reducer<State = S, Action = A, Environment = E>>,
}

impl<S, A, E> AnyReducer<S, A, E>
where
    S: FeatureState,
    A: Action,
    E: Send + Sync + 'static,
{
    pub fn new<R>(reducer: R) -> Self
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        Self {
            inner: Arc::new(reducer),
        }
    }
}

impl<S, A, E> Clone for AnyReducer<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, A, E> fmt::Debug for AnyReducer<S, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnyReducer")
    }
}

impl<S, A, E> Reducer for AnyReducer<S, A, E>
where
    S: FeatureState,
    A: Action,
    E: Send + Sync + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut S, action: A, environment: &E) -> Effect<A> {
        self.inner.reduce(state, action, environment)
    }
}

/// Reducers run in order against the same action.
pub struct CombineAll<S, A, E> {
    reducers: Vec<AnyReducer<S, A, E>>,
}

/// Run every reducer, in the given order, against each action and merge the effects.
pub fn combine_all<S, A, E>(reducers: Vec<AnyReducer<S, A, E>>) -> CombineAll<S, A, E>
where
    S: FeatureState,
    A: Action + Clone,
    E: Send + Sync + 'static,
{
    CombineAll { reducers }
}

impl<S, A, E> Reducer for CombineAll<S, A, E>
where
    S: FeatureState,
    A: Action + Clone,
    E: Send + Sync + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut S, action: A, environment: &E) -> Effect<A> {
        Effect::merge(
            self.reducers
                .iter()
                .map(|reducer| reducer.reduce(state, action.clone(), environment))
                .collect::<Vec<_>>(),
        )
    }
}
