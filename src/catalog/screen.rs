//! A running demo: a store plus the text interface that drives it.

use std::fmt::Debug;

use crate::architecture::{Action, FeatureState, Store};
use crate::catalog::error::CatalogError;

/// An opened catalog entry.
pub trait Screen: Send {
    /// Commands accepted by [`Screen::dispatch`].
    fn commands(&self) -> &'static [&'static str];

    /// Parse `command` and send the resulting action to the store.
    fn dispatch(&self, command: &str) -> Result<(), CatalogError>;

    /// Text rendering of the current state.
    fn render(&self) -> String;

    /// Effects still running for this screen.
    fn in_flight(&self) -> usize;
}

/// [`Screen`] backed by a [`Store`].
pub struct StoreScreen<S, A> {
    store: Store<S, A>,
    commands: &'static [&'static str],
    parse: fn(&str) -> Option<A>,
    render: fn(&S) -> String,
}

impl<S: FeatureState, A: Action> StoreScreen<S, A> {
    pub fn new(store: Store<S, A>, commands: &'static [&'static str], parse: fn(&str) -> Option<A>) -> Self {
        Self {
            store,
            commands,
            parse,
            render: render_debug::<S>,
        }
    }

    /// Replace the default `Debug` rendering.
    pub fn with_render(mut self, render: fn(&S) -> String) -> Self {
        self.render = render;
        self
    }
}

fn render_debug<S: Debug>(state: &S) -> String {
    format!("{state:#?}")
}

impl<S: FeatureState, A: Action> Screen for StoreScreen<S, A> {
    fn commands(&self) -> &'static [&'static str] {
        self.commands
    }

    fn dispatch(&self, command: &str) -> Result<(), CatalogError> {
        let command = command.trim();
        let action = (self.parse)(command).ok_or_else(|| CatalogError::UnknownCommand {
            command: command.to_string(),
            usage: self.commands.join(", "),
        })?;
        tracing::debug!(command, ?action, "dispatching command");
        self.store.send(action);
        Ok(())
    }

    fn render(&self) -> String {
        (self.render)(&self.store.state())
    }

    fn in_flight(&self) -> usize {
        self.store.in_flight()
    }
}
