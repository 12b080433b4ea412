mod common;

use casestudies::architecture::{from_fn, Action, Effect, FeatureState, Reducer, Store};
use casestudies::demos::counter::{CounterAction, CounterReducer, CounterState};
use casestudies::demos::shared_state::{
    shared_state_reducer, CounterTabAction, SharedStateAction, SharedStateDemo,
};
use casestudies::demos::two_counters::{two_counters_reducer, TwoCountersAction, TwoCountersState};

use common::wait_for;

#[test]
fn counter_increments_synchronously() {
    let store = Store::new(CounterState::default(), CounterReducer, ());

    store.send(CounterAction::Increment);
    store.send(CounterAction::Increment);
    store.send(CounterAction::Increment);

    assert_eq!(store.state().count, 3);
}

#[test]
fn final_state_is_left_fold_of_actions() {
    let actions = vec![
        TwoCountersAction::First(CounterAction::Increment),
        TwoCountersAction::Second(CounterAction::Decrement),
        TwoCountersAction::First(CounterAction::Increment),
        TwoCountersAction::Second(CounterAction::Decrement),
        TwoCountersAction::First(CounterAction::Decrement),
    ];

    let reducer = two_counters_reducer();
    let mut folded = TwoCountersState::default();
    for action in actions.clone() {
        reducer.reduce(&mut folded, action, &());
    }

    let store = Store::new(TwoCountersState::default(), two_counters_reducer(), ());
    for action in actions {
        store.send(action);
    }

    assert_eq!(store.state(), folded);
    assert_eq!(folded.first.count, 1);
    assert_eq!(folded.second.count, -2);
}

#[test]
fn observers_see_initial_state_then_one_snapshot_per_action() {
    let store = Store::new(CounterState::default(), CounterReducer, ());
    store.send(CounterAction::Increment);

    let mut stream = store.observe();
    assert_eq!(stream.try_next().map(|state| state.count), Some(1));
    assert!(stream.try_next().is_none());
    store.send(CounterAction::Increment);
    store.send(CounterAction::Decrement);

    let counts: Vec<i64> = stream.drain().into_iter().map(|state| state.count).collect();
    assert_eq!(counts, vec![2, 1]);
}

#[test]
fn every_observer_gets_its_own_stream() {
    let store = Store::new(CounterState::default(), CounterReducer, ());
    let mut first = store.observe();
    store.send(CounterAction::Increment);
    let mut second = store.observe();
    store.send(CounterAction::Increment);

    assert_eq!(first.drain().len(), 3);
    assert_eq!(second.drain().len(), 2);
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Received(Vec<&'static str>);

impl FeatureState for Received {}

#[derive(Debug, Clone, PartialEq)]
enum Message {
    Start,
    Got(&'static str),
}

impl Action for Message {}

#[tokio::test]
async fn effect_actions_arrive_in_production_order() {
    let store = Store::new(
        Received::default(),
        from_fn(|state: &mut Received, action: Message, _: &()| match action {
            Message::Start => Effect::run(|emitter| async move {
                for letter in ["a", "b", "c"] {
                    emitter.emit(Message::Got(letter));
                    tokio::task::yield_now().await;
                }
            }),
            Message::Got(letter) => {
                state.0.push(letter);
                Effect::none()
            }
        }),
        (),
    );
    let mut stream = store.observe();

    store.send(Message::Start);

    let state = wait_for(&mut stream, |state| state.0.len() == 3).await;
    assert_eq!(state.0, vec!["a", "b", "c"]);
}

#[test]
fn sync_effects_run_before_send_returns() {
    let store = Store::new(
        Received::default(),
        from_fn(|state: &mut Received, action: Message, _: &()| match action {
            Message::Start => Effect::merge([Effect::send(Message::Got("x")), Effect::send(Message::Got("y"))]),
            Message::Got(letter) => {
                state.0.push(letter);
                Effect::none()
            }
        }),
        (),
    );

    store.send(Message::Start);

    assert_eq!(store.state().0, vec!["x", "y"]);
}

#[derive(Debug)]
struct TwoCountersStep;

impl Action for TwoCountersStep {}

#[test]
fn scoped_stores_read_and_write_through_the_parent() {
    let store = Store::new(TwoCountersState::default(), two_counters_reducer(), ());
    let second = store.scope(|state: &TwoCountersState| state.second.clone(), TwoCountersAction::Second);
    let increments_only = second.scope(
        |state: &CounterState| state.clone(),
        |_: TwoCountersStep| CounterAction::Increment,
    );

    second.send(CounterAction::Increment);
    increments_only.send(TwoCountersStep);

    assert_eq!(store.state().second.count, 2);
    assert_eq!(store.state().first.count, 0);
    assert_eq!(increments_only.state().count, 2);
}

#[test]
fn shared_state_snapshots_keep_the_values_they_saw() {
    let store = Store::new(SharedStateDemo::default(), shared_state_reducer(), ());
    let mut stream = store.observe();

    store.send(SharedStateAction::Counter(CounterTabAction::IncrementButtonTapped));
    store.send(SharedStateAction::Counter(CounterTabAction::IncrementButtonTapped));

    let snapshots = stream.drain();
    let counts: Vec<i64> = snapshots
        .iter()
        .map(|state| state.counter.stats.snapshot().count)
        .collect();
    assert_eq!(counts, vec![0, 1, 2]);
    assert_ne!(snapshots[0], snapshots[2]);
    assert_eq!(snapshots[2].profile.stats.snapshot().count, 2);
}
