//! Effects returned by reducers and executed by the store.
//!
//! An effect is a description of work, not the work itself: reducers stay
//! pure by returning an [`Effect`] and the store decides when and where it
//! runs. Results come back into the store as ordinary actions.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_core::future::BoxFuture;

use super::cancellation::CancelId;

type Deliver<A> = Arc<dyn Fn(A) -> bool + Send + Sync>;
type Alive = Arc<dyn Fn() -> bool + Send + Sync>;
pub type Operation<A> = Box<dyn FnOnce(Emitter<A>) -> BoxFuture<'static, ()> + Send>;

/// Handle a running effect uses to feed actions back into its store.
pub struct Emitter<A> {
    deliver: Deliver<A>,
    alive: Alive,
}

impl<A: Send + 'static> Emitter<A> {
    pub(crate) fn new<D, L>(deliver: D, alive: L) -> Self
    where
        D: Fn(A) -> bool + Send + Sync + 'static,
        L: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            deliver: Arc::new(deliver),
            alive: Arc::new(alive),
        }
    }

    /// Send an action back to the store.
    ///
    /// Returns `false` once the effect was cancelled or the store is gone.
    /// Long-living effects should stop producing when that happens.
    pub fn emit(&self, action: A) -> bool {
        (self.deliver)(action)
    }

    pub fn is_cancelled(&self) -> bool {
        !(self.alive)()
    }

    fn contramap<C: Send + 'static>(&self, f: Arc<dyn Fn(C) -> A + Send + Sync>) -> Emitter<C> {
        let deliver = Arc::clone(&self.deliver);
        Emitter {
            deliver: Arc::new(move |action| deliver(f(action))),
            alive: Arc::clone(&self.alive),
        }
    }
}

impl<A> Clone for Emitter<A> {
    fn clone(&self) -> Self {
        Self {
            deliver: Arc::clone(&self.deliver),
            alive: Arc::clone(&self.alive),
        }
    }
}

/// Deferred work produced by a reducer.
pub enum Effect<A> {
    /// No work.
    None,
    /// Exactly one action, processed right after the current one.
    Sync(A),
    /// Asynchronous work producing zero or more actions over time.
    Future(Operation<A>),
    /// Wraps an effect so it can be stopped by [`Effect::Cancel`] with the same id.
    Cancellable {
        id: CancelId,
        /// Cancel whatever is already running under `id` before starting.
        cancel_in_flight: bool,
        effect: Box<Effect<A>>,
    },
    /// Stops delivery from every effect registered under the id.
    Cancel(CancelId),
    /// Runs all effects; none is skipped.
    Merge(Vec<Effect<A>>),
}

impl<A: Send + 'static> Effect<A> {
    pub fn none() -> Self {
        Effect::None
    }

    pub fn send(action: A) -> Self {
        Effect::Sync(action)
    }

    /// Asynchronous work that reports back through an [`Emitter`].
    pub fn run<F, Fut>(operation: F) -> Self
    where
        F: FnOnce(Emitter<A>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Effect::Future(Box::new(move |emitter| Box::pin(operation(emitter))))
    }

    /// A future resolving to exactly one action.
    pub fn task<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::run(move |emitter| async move {
            let action = future.await;
            emitter.emit(action);
        })
    }

    /// A fallible future whose outcome, success or failure, becomes an action.
    pub fn result<T, E, Fut, F>(future: Fut, into_action: F) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        F: FnOnce(Result<T, E>) -> A + Send + 'static,
    {
        Self::task(async move { into_action(future.await) })
    }

    /// Work whose output is never fed back.
    pub fn fire_and_forget<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::run(move |_| future)
    }

    pub fn merge<I>(effects: I) -> Self
    where
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut effects: Vec<Effect<A>> = effects.into_iter().filter(|e| !e.is_none()).collect();
        if effects.len() == 1 {
            if let Some(effect) = effects.pop() {
                return effect;
            }
        }
        if effects.is_empty() {
            Effect::None
        } else {
            Effect::Merge(effects)
        }
    }

    pub fn cancel(id: impl Into<CancelId>) -> Self {
        Effect::Cancel(id.into())
    }

    /// Mark this effect as cancellable under `id`.
    pub fn cancellable(self, id: impl Into<CancelId>, cancel_in_flight: bool) -> Self {
        Effect::Cancellable {
            id: id.into(),
            cancel_in_flight,
            effect: Box::new(self),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Transform every action this effect produces.
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        self.map_with(Arc::new(f))
    }

    fn map_with<B: Send + 'static>(self, f: Arc<dyn Fn(A) -> B + Send + Sync>) -> Effect<B> {
        match self {
            Effect::None => Effect::None,
            Effect::Sync(action) => Effect::Sync(f(action)),
            Effect::Future(operation) => {
                Effect::Future(Box::new(move |emitter: Emitter<B>| operation(emitter.contramap(f))))
            }
            Effect::Cancellable {
                id,
                cancel_in_flight,
                effect,
            } => Effect::Cancellable {
                id,
                cancel_in_flight,
                effect: Box::new(effect.map_with(f)),
            },
            Effect::Cancel(id) => Effect::Cancel(id),
            Effect::Merge(effects) => Effect::Merge(
                effects
                    .into_iter()
                    .map(|effect| effect.map_with(Arc::clone(&f)))
                    .collect(),
            ),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => write!(f, "None"),
            Effect::Sync(action) => f.debug_tuple("Sync").field(action).finish(),
            Effect::Future(_) => write!(f, "Future(..)"),
            Effect::Cancellable {
                id,
                cancel_in_flight,
                effect,
            } => f
                .debug_struct("Cancellable")
                .field("id", id)
                .field("cancel_in_flight", cancel_in_flight)
                .field("effect", effect)
                .finish(),
            Effect::Cancel(id) => f.debug_tuple("Cancel").field(id).finish(),
            Effect::Merge(effects) => f.debug_list().entries(effects).finish(),
        }
    }
}
