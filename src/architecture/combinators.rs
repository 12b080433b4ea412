//! Higher-order reducers: building a feature's reducer out of smaller ones.

use std::fmt::Debug;

use super::action::Action;
use super::case_path::CasePath;
use super::effect::Effect;
use super::reducer::{AnyReducer, Reducer};
use super::state::FeatureState;

type StateLens<S, C> = Box<dyn Fn(&mut S) -> &mut C + Send + Sync>;
type EnvironmentMap<E, C> = Box<dyn Fn(&E) -> C + Send + Sync>;

/// A child reducer lifted into its parent's state, action and environment.
pub struct Pullback<R: Reducer, S, A, E> {
    child: R,
    state: StateLens<S, R::State>,
    action: CasePath<A, R::Action>,
    environment: EnvironmentMap<E, R::Environment>,
}

impl<R, S, A, E> Reducer for Pullback<R, S, A, E>
where
    R: Reducer,
    S: FeatureState,
    A: Action,
    E: Send + Sync + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut S, action: A, environment: &E) -> Effect<A> {
        let Ok(child_action) = self.action.extract(action) else {
            return Effect::none();
        };
        let child_environment = (self.environment)(environment);
        self.child
            .reduce((self.state)(state), child_action, &child_environment)
            .map(self.action.embedder())
    }
}

/// Two reducers over the same types, run first then second.
pub struct Combine<R1, R2> {
    first: R1,
    second: R2,
}

impl<R1, R2> Reducer for Combine<R1, R2>
where
    R1: Reducer,
    R1::Action: Clone,
    R2: Reducer<State = R1::State, Action = R1::Action, Environment = R1::Environment>,
{
    type State = R1::State;
    type Action = R1::Action;
    type Environment = R1::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> Effect<Self::Action> {
        let first = self.first.reduce(state, action.clone(), environment);
        let second = self.second.reduce(state, action, environment);
        Effect::merge([first, second])
    }
}

/// A reducer lifted to optional state. Actions arriving while the state is
/// absent are ignored.
pub struct Optional<R> {
    inner: R,
}

impl<R: Reducer> Reducer for Optional<R> {
    type State = Option<R::State>;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> Effect<Self::Action> {
        match state {
            Some(inner) => self.inner.reduce(inner, action, environment),
            None => {
                tracing::debug!(?action, "action sent to absent optional state");
                Effect::none()
            }
        }
    }
}

/// Element of a collection that can be addressed by a stable id.
pub trait Identifiable {
    type Id: Clone + PartialEq + Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

type ElementId<R> = <<R as Reducer>::State as Identifiable>::Id;

/// An element reducer lifted to a collection of elements addressed by id.
pub struct ForEach<R, S, A, E>
where
    R: Reducer,
    R::State: Identifiable,
{
    element: R,
    state: StateLens<S, Vec<R::State>>,
    action: CasePath<A, (ElementId<R>, R::Action)>,
    environment: EnvironmentMap<E, R::Environment>,
}

impl<R, S, A, E> Reducer for ForEach<R, S, A, E>
where
    R: Reducer,
    R::State: Identifiable,
    S: FeatureState,
    A: Action,
    E: Send + Sync + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut S, action: A, environment: &E) -> Effect<A> {
        let Ok((id, element_action)) = self.action.extract(action) else {
            return Effect::none();
        };
        let Some(element) = (self.state)(state).iter_mut().find(|element| element.id() == id) else {
            tracing::debug!(?id, action = ?element_action, "action sent to missing element");
            return Effect::none();
        };
        let element_environment = (self.environment)(environment);
        let embed = self.action.embedder();
        self.element
            .reduce(element, element_action, &element_environment)
            .map(move |action| embed((id.clone(), action)))
    }
}

/// Logs every action and resulting state change through `tracing`.
pub struct Debugged<R> {
    inner: R,
    name: String,
}

impl<R: Reducer> Reducer for Debugged<R> {
    type State = R::State;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> Effect<Self::Action> {
        tracing::debug!(feature = %self.name, ?action, "received action");
        let before = state.clone();
        let effect = self.inner.reduce(state, action, environment);
        // Compare clones: shared handles refresh their frozen copy on clone.
        if state.clone() == before {
            tracing::trace!(feature = %self.name, "state unchanged");
        } else {
            tracing::debug!(feature = %self.name, ?state, "state changed");
        }
        effect
    }
}

/// Combinators available on every reducer.
pub trait ReducerExt: Reducer + Sized {
    /// Lift this reducer into a parent feature.
    ///
    /// It runs only for actions matching `action`, against the substate
    /// selected by `state`, with an environment derived by `environment`.
    fn pullback<S, A, E, L, M>(
        self,
        state: L,
        action: CasePath<A, Self::Action>,
        environment: M,
    ) -> Pullback<Self, S, A, E>
    where
        S: FeatureState,
        A: Action,
        E: Send + Sync + 'static,
        L: Fn(&mut S) -> &mut Self::State + Send + Sync + 'static,
        M: Fn(&E) -> Self::Environment + Send + Sync + 'static,
    {
        Pullback {
            child: self,
            state: Box::new(state),
            action,
            environment: Box::new(environment),
        }
    }

    /// Run `other` after this reducer for every action.
    fn combine<R>(self, other: R) -> Combine<Self, R>
    where
        Self::Action: Clone,
        R: Reducer<State = Self::State, Action = Self::Action, Environment = Self::Environment>,
    {
        Combine {
            first: self,
            second: other,
        }
    }

    fn optional(self) -> Optional<Self> {
        Optional { inner: self }
    }

    /// Lift an element reducer to a `Vec` of elements in a parent feature.
    fn for_each<S, A, E, L, M>(
        self,
        state: L,
        action: CasePath<A, (ElementId<Self>, Self::Action)>,
        environment: M,
    ) -> ForEach<Self, S, A, E>
    where
        Self::State: Identifiable,
        S: FeatureState,
        A: Action,
        E: Send + Sync + 'static,
        L: Fn(&mut S) -> &mut Vec<Self::State> + Send + Sync + 'static,
        M: Fn(&E) -> Self::Environment + Send + Sync + 'static,
    {
        ForEach {
            element: self,
            state: Box::new(state),
            action,
            environment: Box::new(environment),
        }
    }

    fn debug(self, name: impl Into<String>) -> Debugged<Self> {
        Debugged {
            inner: self,
            name: name.into(),
        }
    }

    fn boxed(self) -> AnyReducer<Self::State, Self::Action, Self::Environment> {
        AnyReducer::new(self)
    }
}

impl<R: Reducer> ReducerExt for R {}
