//! The store: runtime owner of one feature's state.
//!
//! ```text
//! send(action) ──→ queue ──→ Reducer ──→ State ──→ observers
//!      ↑                        │
//!      │                     Effect
//!      │                        │
//!      └──── Emitter ←── tokio task
//! ```
//!
//! Sends are serialized per store. A send issued while the same thread is
//! already draining the queue (from an observer callback) is queued and
//! processed after the current action, never rejected.

use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::action::Action;
use super::cancellation::{CancelId, CancellationFlag, EffectRegistry};
use super::effect::{Effect, Emitter, Operation};
use super::reducer::Reducer;
use super::state::FeatureState;
use super::stream::StateStream;

type Observer<S> = Box<dyn FnMut(&S) -> bool + Send>;

trait StoreCore<S, A>: Send + Sync {
    fn send(&self, action: A);
    fn state(&self) -> S;
    fn observe_with(&self, observer: Observer<S>);
    fn cancel(&self, id: &CancelId);
    fn in_flight(&self) -> usize;
}

/// Handle to a running feature.
///
/// Clones share the same state. The store is torn down, and every effect it
/// spawned cancelled, when the last handle (including scoped ones) is dropped.
pub struct Store<S, A> {
    core: Arc<dyn StoreCore<S, A>>,
}

impl<S: FeatureState, A: Action> Store<S, A> {
    /// Create a store on the current tokio runtime, if any.
    ///
    /// Without a runtime the store still processes actions and synchronous
    /// effects; asynchronous effects are logged and dropped.
    pub fn new<R>(initial_state: S, reducer: R, environment: R::Environment) -> Self
    where
        R: Reducer<State = S, Action = A>,
    {
        Self::build(initial_state, reducer, environment, Handle::try_current().ok())
    }

    /// Create a store whose effects run on `runtime`.
    pub fn with_runtime<R>(
        initial_state: S,
        reducer: R,
        environment: R::Environment,
        runtime: Handle,
    ) -> Self
    where
        R: Reducer<State = S, Action = A>,
    {
        Self::build(initial_state, reducer, environment, Some(runtime))
    }

    fn build<R>(
        initial_state: S,
        reducer: R,
        environment: R::Environment,
        runtime: Option<Handle>,
    ) -> Self
    where
        R: Reducer<State = S, Action = A>,
    {
        let core = Arc::new_cyclic(|me: &Weak<RootCore<R>>| RootCore {
            me: me.clone(),
            state: Mutex::new(initial_state),
            reducer,
            environment,
            queue: Mutex::new(VecDeque::new()),
            send_lock: Mutex::new(()),
            drainer: Mutex::new(None),
            observers: Mutex::new(Vec::new()),
            effects: Arc::new(EffectRegistry::new()),
            runtime,
        });
        Self { core }
    }

    /// Apply `action` and schedule the resulting effect.
    ///
    /// When this returns, the action and any synchronous follow-ups have
    /// been reduced and published.
    pub fn send(&self, action: A) {
        self.core.send(action);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> S {
        self.core.state()
    }

    /// Stream of state snapshots, starting with the current one.
    pub fn observe(&self) -> StateStream<S> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.core
            .observe_with(Box::new(move |state: &S| sender.send(state.clone()).is_ok()));
        StateStream::new(receiver)
    }

    /// Call `callback` with the current state now and after every action.
    ///
    /// The callback may send actions to this store; they are queued.
    pub fn subscribe<F>(&self, mut callback: F)
    where
        F: FnMut(&S) + Send + 'static,
    {
        self.core.observe_with(Box::new(move |state: &S| {
            callback(state);
            true
        }));
    }

    /// Derive a store over part of this store's state and actions.
    pub fn scope<LS, LA, F, G>(&self, to_local: F, from_local: G) -> Store<LS, LA>
    where
        LS: FeatureState,
        LA: Action,
        F: Fn(&S) -> LS + Send + Sync + 'static,
        G: Fn(LA) -> A + Send + Sync + 'static,
    {
        Store {
            core: Arc::new(ScopedCore {
                parent: self.clone(),
                to_local: Arc::new(to_local),
                from_local: Arc::new(from_local),
            }),
        }
    }

    /// Stop delivery from every effect running under `id`.
    pub fn cancel(&self, id: impl Into<CancelId>) {
        self.core.cancel(&id.into());
    }

    /// Number of effect tasks started and not yet finished or cancelled.
    pub fn in_flight(&self) -> usize {
        self.core.in_flight()
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

struct Queued<A> {
    action: A,
    /// Set for actions emitted by an effect; checked again at dequeue time.
    origin: Option<CancellationFlag>,
}

struct RootCore<R: Reducer> {
    me: Weak<RootCore<R>>,
    state: Mutex<R::State>,
    reducer: R,
    environment: R::Environment,
    queue: Mutex<VecDeque<Queued<R::Action>>>,
    send_lock: Mutex<()>,
    drainer: Mutex<Option<ThreadId>>,
    observers: Mutex<Vec<Observer<R::State>>>,
    effects: Arc<EffectRegistry>,
    runtime: Option<Handle>,
}

impl<R: Reducer> RootCore<R> {
    fn draining_here(&self) -> bool {
        *self.drainer.lock() == Some(thread::current().id())
    }

    /// Run `f` inside the store's critical section, then drain the queue.
    fn exclusive<T>(&self, f: impl FnOnce() -> T) -> T {
        if self.draining_here() {
            return f();
        }
        let _serial = self.send_lock.lock();
        *self.drainer.lock() = Some(thread::current().id());
        scopeguard::defer! {
            *self.drainer.lock() = None;
        }
        let result = f();
        while let Some(next) = self.next_queued() {
            self.process(next);
        }
        result
    }

    fn next_queued(&self) -> Option<Queued<R::Action>> {
        self.queue.lock().pop_front()
    }

    fn enqueue(&self, queued: Queued<R::Action>) {
        self.queue.lock().push_back(queued);
        if self.draining_here() {
            tracing::trace!("re-entrant send queued");
            return;
        }
        self.exclusive(|| ());
    }

    fn process(&self, queued: Queued<R::Action>) {
        let Queued { action, origin } = queued;
        if origin.is_some_and(|flag| flag.is_cancelled()) {
            tracing::trace!(?action, "dropping action from cancelled effect");
            return;
        }
        tracing::trace!(?action, "processing action");
        let (effect, snapshot) = {
            let mut state = self.state.lock();
            let effect = self.reducer.reduce(&mut state, action, &self.environment);
            (effect, state.clone())
        };
        self.publish(&snapshot);
        self.execute(effect, &[]);
    }

    fn publish(&self, snapshot: &R::State) {
        let mut observers = std::mem::take(&mut *self.observers.lock());
        observers.retain_mut(|observer| observer(snapshot));
        let mut current = self.observers.lock();
        let added = std::mem::replace(&mut *current, observers);
        current.extend(added);
    }

    fn execute(&self, effect: Effect<R::Action>, ids: &[CancelId]) {
        match effect {
            Effect::None => {}
            Effect::Sync(action) => {
                self.queue.lock().push_back(Queued {
                    action,
                    origin: None,
                });
            }
            Effect::Future(operation) => self.spawn(operation, ids),
            Effect::Cancellable {
                id,
                cancel_in_flight,
                effect,
            } => {
                if cancel_in_flight {
                    let cancelled = self.effects.cancel(&id);
                    tracing::debug!(%id, cancelled, "cancelled in-flight effects");
                }
                let mut ids = ids.to_vec();
                ids.push(id);
                self.execute(*effect, &ids);
            }
            Effect::Cancel(id) => {
                let cancelled = self.effects.cancel(&id);
                tracing::debug!(%id, cancelled, "cancelled effects");
            }
            Effect::Merge(effects) => {
                for effect in effects {
                    self.execute(effect, ids);
                }
            }
        }
    }

    fn spawn(&self, operation: Operation<R::Action>, ids: &[CancelId]) {
        let Some(runtime) = &self.runtime else {
            tracing::error!(?ids, "no tokio runtime for asynchronous effect; dropping it");
            return;
        };
        let (token, flag) = self.effects.begin(ids);

        let deliver = {
            let core = self.me.clone();
            let flag = flag.clone();
            move |action: R::Action| {
                if flag.is_cancelled() {
                    return false;
                }
                match core.upgrade() {
                    Some(core) => {
                        core.enqueue(Queued {
                            action,
                            origin: Some(flag.clone()),
                        });
                        true
                    }
                    None => false,
                }
            }
        };
        let alive = {
            let core = self.me.clone();
            move || !flag.is_cancelled() && core.strong_count() > 0
        };
        let emitter = Emitter::new(deliver, alive);

        let registry = Arc::clone(&self.effects);
        let task = runtime.spawn(async move {
            // Runs on completion, panic or abort alike.
            scopeguard::defer! {
                registry.finish(token);
            }
            operation(emitter).await;
        });
        self.effects.attach(token, task.abort_handle());
    }
}

impl<R: Reducer> StoreCore<R::State, R::Action> for RootCore<R> {
    fn send(&self, action: R::Action) {
        self.enqueue(Queued {
            action,
            origin: None,
        });
    }

    fn state(&self) -> R::State {
        self.state.lock().clone()
    }

    fn observe_with(&self, mut observer: Observer<R::State>) {
        self.exclusive(|| {
            let snapshot = self.state.lock().clone();
            if observer(&snapshot) {
                self.observers.lock().push(observer);
            }
        });
    }

    fn cancel(&self, id: &CancelId) {
        let cancelled = self.effects.cancel(id);
        tracing::debug!(%id, cancelled, "cancelled effects from outside the store");
    }

    fn in_flight(&self) -> usize {
        self.effects.in_flight()
    }
}

impl<R: Reducer> Drop for RootCore<R> {
    fn drop(&mut self) {
        let cancelled = self.effects.cancel_all();
        tracing::debug!(cancelled, "store torn down");
    }
}

struct ScopedCore<PS, PA, S, A> {
    parent: Store<PS, PA>,
    to_local: Arc<dyn Fn(&PS) -> S + Send + Sync>,
    from_local: Arc<dyn Fn(A) -> PA + Send + Sync>,
}

impl<PS, PA, S, A> StoreCore<S, A> for ScopedCore<PS, PA, S, A>
where
    PS: FeatureState,
    PA: Action,
    S: FeatureState,
    A: Action,
{
    fn send(&self, action: A) {
        self.parent.send((self.from_local)(action));
    }

    fn state(&self) -> S {
        (self.to_local)(&self.parent.state())
    }

    fn observe_with(&self, mut observer: Observer<S>) {
        let to_local = Arc::clone(&self.to_local);
        self.parent
            .core
            .observe_with(Box::new(move |parent: &PS| observer(&to_local(parent))));
    }

    fn cancel(&self, id: &CancelId) {
        self.parent.core.cancel(id);
    }

    fn in_flight(&self) -> usize {
        self.parent.in_flight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::from_fn;

    #[derive(Debug, Clone, PartialEq)]
    struct Log(Vec<&'static str>);

    impl FeatureState for Log {}

    #[derive(Debug)]
    enum Step {
        First,
        Second,
        Third,
    }

    impl Action for Step {}

    fn log_reducer() -> impl Reducer<State = Log, Action = Step, Environment = ()> {
        from_fn(|log: &mut Log, step: Step, _: &()| {
            match step {
                Step::First => log.0.push("first"),
                Step::Second => log.0.push("second"),
                Step::Third => log.0.push("third"),
            }
            Effect::none()
        })
    }

    #[test]
    fn reentrant_send_from_subscriber_is_queued_in_order() {
        let store = Store::new(Log(Vec::new()), log_reducer(), ());
        let handle = store.clone();
        let mut fired = false;
        store.subscribe(move |log: &Log| {
            if !fired && log.0 == ["first"] {
                fired = true;
                handle.send(Step::Third);
            }
        });

        store.send(Step::First);
        assert_eq!(store.state().0, vec!["first", "third"]);

        store.send(Step::Second);
        assert_eq!(store.state().0, vec!["first", "third", "second"]);
    }

    #[test]
    fn future_effect_without_runtime_is_dropped() {
        let store = Store::new(
            Log(Vec::new()),
            from_fn(|log: &mut Log, _: Step, _: &()| {
                log.0.push("sent");
                Effect::task(async { Step::Second })
            }),
            (),
        );

        store.send(Step::First);

        assert_eq!(store.state().0, vec!["sent"]);
        assert_eq!(store.in_flight(), 0);
    }

    #[test]
    fn scoped_observer_receives_projection() {
        let store = Store::new(Log(Vec::new()), log_reducer(), ());
        let scoped = store.scope(|log: &Log| Log(log.0.iter().rev().copied().collect()), |s: Step| s);
        let mut stream = scoped.observe();

        scoped.send(Step::First);
        scoped.send(Step::Second);

        let snapshots = stream.drain();
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[2].0, vec!["second", "first"]);
    }
}
