//! "Cancellation": a slow request that can be cancelled, or made stale by editing the count.

use std::sync::Arc;
use std::time::Duration;

use futures_core::future::BoxFuture;
use thiserror::Error;

use crate::architecture::{Action, AnyScheduler, Effect, FeatureState, Reducer};

const TRIVIA_REQUEST_ID: &str = "cancellation.trivia";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactError {
    #[error("No fact is known for {0}")]
    Unavailable(i64),
}

/// Source of number trivia.
pub trait FactClient: Send + Sync + 'static {
    fn fact(&self, number: i64) -> BoxFuture<'static, Result<String, FactError>>;
}

/// Answers after a fixed latency on the given scheduler. Negative numbers have no fact.
pub struct LiveFactClient {
    pub scheduler: AnyScheduler,
    pub latency: Duration,
}

impl FactClient for LiveFactClient {
    fn fact(&self, number: i64) -> BoxFuture<'static, Result<String, FactError>> {
        let scheduler = Arc::clone(&self.scheduler);
        let latency = self.latency;
        Box::pin(async move {
            scheduler.sleep(latency).await;
            if number < 0 {
                Err(FactError::Unavailable(number))
            } else {
                Ok(format!("{number} is a good number."))
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CancellationState {
    pub count: i64,
    pub is_trivia_request_in_flight: bool,
    pub current_trivia: Option<String>,
    pub last_error: Option<FactError>,
}

impl FeatureState for CancellationState {}

#[derive(Debug, Clone, PartialEq)]
pub enum CancellationAction {
    Incremented,
    Decremented,
    TriviaButtonTapped,
    CancelButtonTapped,
    TriviaResponse(Result<String, FactError>),
}

impl Action for CancellationAction {}

pub struct CancellationEnvironment {
    pub facts: Arc<dyn FactClient>,
}

pub struct CancellationReducer;

impl Reducer for CancellationReducer {
    type State = CancellationState;
    type Action = CancellationAction;
    type Environment = CancellationEnvironment;

    fn reduce(
        &self,
        state: &mut CancellationState,
        action: CancellationAction,
        environment: &CancellationEnvironment,
    ) -> Effect<CancellationAction> {
        match action {
            CancellationAction::Incremented => step(state, 1),
            CancellationAction::Decremented => step(state, -1),
            CancellationAction::TriviaButtonTapped => {
                state.current_trivia = None;
                state.last_error = None;
                state.is_trivia_request_in_flight = true;
                Effect::result(
                    environment.facts.fact(state.count),
                    CancellationAction::TriviaResponse,
                )
                .cancellable(TRIVIA_REQUEST_ID, true)
            }
            CancellationAction::CancelButtonTapped => {
                state.is_trivia_request_in_flight = false;
                Effect::cancel(TRIVIA_REQUEST_ID)
            }
            CancellationAction::TriviaResponse(Ok(trivia)) => {
                state.current_trivia = Some(trivia);
                state.is_trivia_request_in_flight = false;
                Effect::none()
            }
            CancellationAction::TriviaResponse(Err(error)) => {
                state.last_error = Some(error);
                state.is_trivia_request_in_flight = false;
                Effect::none()
            }
        }
    }
}

/// Changing the count makes any pending trivia stale.
fn step(state: &mut CancellationState, delta: i64) -> Effect<CancellationAction> {
    state.count += delta;
    state.current_trivia = None;
    state.is_trivia_request_in_flight = false;
    Effect::cancel(TRIVIA_REQUEST_ID)
}

pub const COMMANDS: &[&str] = &["increment", "decrement", "trivia", "cancel"];

pub fn parse_command(command: &str) -> Option<CancellationAction> {
    match command {
        "increment" | "+" => Some(CancellationAction::Incremented),
        "decrement" | "-" => Some(CancellationAction::Decremented),
        "trivia" => Some(CancellationAction::TriviaButtonTapped),
        "cancel" => Some(CancellationAction::CancelButtonTapped),
        _ => None,
    }
}
