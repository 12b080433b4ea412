//! "Long-living effects": a subscription that lives while the screen is shown.
//!
//! Appearing subscribes to a notification channel for as long as the screen
//! is visible. Disappearing cancels the subscription; notifications posted
//! afterwards are not counted.

use tokio::sync::broadcast;

use crate::architecture::{Action, Effect, FeatureState, Reducer};

const NOTIFICATIONS_ID: &str = "long-living.notifications";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LongLivingState {
    pub notification_count: u64,
}

impl FeatureState for LongLivingState {}

#[derive(Debug, Clone, PartialEq)]
pub enum LongLivingAction {
    OnAppear,
    OnDisappear,
    /// Post a notification, as another part of the system would.
    PostNotification,
    NotificationReceived,
}

impl Action for LongLivingAction {}

pub struct LongLivingEnvironment {
    pub notifications: broadcast::Sender<()>,
}

pub struct LongLivingReducer;

impl Reducer for LongLivingReducer {
    type State = LongLivingState;
    type Action = LongLivingAction;
    type Environment = LongLivingEnvironment;

    fn reduce(
        &self,
        state: &mut LongLivingState,
        action: LongLivingAction,
        environment: &LongLivingEnvironment,
    ) -> Effect<LongLivingAction> {
        match action {
            LongLivingAction::OnAppear => {
                // Subscribe now so nothing posted before the task starts is missed.
                let mut receiver = environment.notifications.subscribe();
                Effect::run(move |emitter| async move {
                    loop {
                        match receiver.recv().await {
                            Ok(()) => {
                                if !emitter.emit(LongLivingAction::NotificationReceived) {
                                    break;
                                }
                            }
                            Err(broadcast::error::RecvError::Lagged(missed)) => {
                                tracing::warn!(missed, "notification subscriber lagged");
                            }
                            Err(broadcast::error::RecvError::Closed) => break,
                        }
                    }
                })
                .cancellable(NOTIFICATIONS_ID, true)
            }
            LongLivingAction::OnDisappear => Effect::cancel(NOTIFICATIONS_ID),
            LongLivingAction::PostNotification => {
                let notifications = environment.notifications.clone();
                Effect::fire_and_forget(async move {
                    if notifications.send(()).is_err() {
                        tracing::debug!("notification posted with no subscribers");
                    }
                })
            }
            LongLivingAction::NotificationReceived => {
                state.notification_count += 1;
                Effect::none()
            }
        }
    }
}

pub const COMMANDS: &[&str] = &["appear", "disappear", "notify"];

pub fn parse_command(command: &str) -> Option<LongLivingAction> {
    match command {
        "appear" => Some(LongLivingAction::OnAppear),
        "disappear" => Some(LongLivingAction::OnDisappear),
        "notify" => Some(LongLivingAction::PostNotification),
        _ => None,
    }
}
