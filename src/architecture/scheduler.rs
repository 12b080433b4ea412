//! Schedulers: the clock capability injected into environments.
//!
//! Effects that wait never call `tokio::time` directly; they go through a
//! [`Scheduler`] taken from the environment so tests can swap in a
//! scheduler that does not wait at all.

use std::sync::Arc;
use std::time::Duration;

use futures_core::future::BoxFuture;

use super::effect::Effect;

pub trait Scheduler: Send + Sync + 'static {
    /// Complete after `duration` has passed on this scheduler's clock.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

pub type AnyScheduler = Arc<dyn Scheduler>;

/// Wall-clock scheduler backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveScheduler;

impl Scheduler for LiveScheduler {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        // Created on first poll, inside the runtime that runs the effect.
        Box::pin(async move { tokio::time::sleep(duration).await })
    }
}

/// Scheduler whose sleeps only yield to the runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn sleep(&self, _duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::task::yield_now())
    }
}

impl<A: Send + 'static> Effect<A> {
    /// Deliver `action` once `delay` has passed on `scheduler`.
    pub fn delayed(scheduler: AnyScheduler, delay: Duration, action: A) -> Self {
        Self::task(async move {
            scheduler.sleep(delay).await;
            action
        })
    }

    /// Deliver `tick()` every `interval` until cancelled.
    pub fn every<F>(scheduler: AnyScheduler, interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> A + Send + 'static,
    {
        Self::run(move |emitter| async move {
            loop {
                scheduler.sleep(interval).await;
                if emitter.is_cancelled() || !emitter.emit(tick()) {
                    break;
                }
            }
        })
    }
}
