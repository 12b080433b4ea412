//! Per-subscriber stream of state snapshots.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc;

/// Snapshots of a store's state, one per processed action.
///
/// The first item is the state at the time of subscribing. The stream ends
/// when the store is torn down.
pub struct StateStream<S> {
    receiver: mpsc::UnboundedReceiver<S>,
}

impl<S> StateStream<S> {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<S>) -> Self {
        Self { receiver }
    }

    pub async fn next(&mut self) -> Option<S> {
        self.receiver.recv().await
    }

    /// The next snapshot if one is already waiting.
    pub fn try_next(&mut self) -> Option<S> {
        self.receiver.try_recv().ok()
    }

    /// Every snapshot published so far and not yet consumed.
    pub fn drain(&mut self) -> Vec<S> {
        let mut snapshots = Vec::new();
        while let Ok(snapshot) = self.receiver.try_recv() {
            snapshots.push(snapshot);
        }
        snapshots
    }
}

impl<S> Stream for StateStream<S> {
    type Item = S;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S>> {
        self.receiver.poll_recv(cx)
    }
}

impl<S> Unpin for StateStream<S> {}
