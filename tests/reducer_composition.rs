use casestudies::architecture::{
    combine_all, from_fn, Action, Effect, FeatureState, Reducer, ReducerExt,
};
use casestudies::case_path;
use casestudies::demos::counter::{CounterAction, CounterReducer, CounterState};
use casestudies::demos::optional_basics::{
    optional_basics_reducer, OptionalBasicsAction, OptionalBasicsState,
};
use casestudies::demos::two_counters::{two_counters_reducer, TwoCountersAction, TwoCountersState};

#[derive(Debug, Clone, PartialEq, Default)]
struct Trace(Vec<&'static str>);

impl FeatureState for Trace {}

#[derive(Debug, Clone, PartialEq)]
enum Ping {
    Ping,
    Pong(&'static str),
}

impl Action for Ping {}

fn tracer(name: &'static str) -> impl Reducer<State = Trace, Action = Ping, Environment = ()> {
    from_fn(move |trace: &mut Trace, action: Ping, _: &()| match action {
        Ping::Ping => {
            trace.0.push(name);
            Effect::send(Ping::Pong(name))
        }
        Ping::Pong(_) => Effect::none(),
    })
}

#[test]
fn pullback_ignores_actions_for_other_children() {
    let reducer = two_counters_reducer();
    let mut state = TwoCountersState::default();

    reducer.reduce(&mut state, TwoCountersAction::Second(CounterAction::Increment), &());

    assert_eq!(state.first, CounterState::default());
    assert_eq!(state.second.count, 1);
}

#[test]
fn pullback_maps_child_effects_into_parent_actions() {
    #[derive(Debug, Clone, PartialEq, Default)]
    struct Parent {
        child: Trace,
    }
    impl FeatureState for Parent {}

    #[derive(Debug, Clone, PartialEq)]
    enum ParentAction {
        Child(Ping),
        Other,
    }
    impl Action for ParentAction {}

    let reducer = tracer("child").pullback(
        |state: &mut Parent| &mut state.child,
        case_path!(ParentAction::Child),
        |_: &()| (),
    );
    let mut state = Parent::default();

    let effect = reducer.reduce(&mut state, ParentAction::Child(Ping::Ping), &());
    assert!(matches!(effect, Effect::Sync(ParentAction::Child(Ping::Pong("child")))));

    let effect = reducer.reduce(&mut state, ParentAction::Other, &());
    assert!(effect.is_none());
    assert_eq!(state.child.0, vec!["child"]);
}

#[test]
fn combine_runs_in_order_and_keeps_every_effect() {
    let reducer = tracer("first").combine(tracer("second"));
    let mut state = Trace::default();

    let effect = reducer.reduce(&mut state, Ping::Ping, &());

    assert_eq!(state.0, vec!["first", "second"]);
    match effect {
        Effect::Merge(effects) => {
            assert_eq!(effects.len(), 2);
            assert!(matches!(effects[0], Effect::Sync(Ping::Pong("first"))));
            assert!(matches!(effects[1], Effect::Sync(Ping::Pong("second"))));
        }
        other => panic!("expected merged effects, got {:?}", other),
    }
}

#[test]
fn combine_all_preserves_list_order() {
    let reducer = combine_all(vec![
        tracer("a").boxed(),
        tracer("b").boxed(),
        tracer("c").boxed(),
    ]);
    let mut state = Trace::default();

    reducer.reduce(&mut state, Ping::Ping, &());

    assert_eq!(state.0, vec!["a", "b", "c"]);
}

#[test]
fn optional_counter_only_counts_while_present() {
    let reducer = optional_basics_reducer();
    let mut state = OptionalBasicsState::default();

    reducer.reduce(
        &mut state,
        OptionalBasicsAction::OptionalCounter(CounterAction::Increment),
        &(),
    );
    assert_eq!(state.optional_counter, None);

    reducer.reduce(&mut state, OptionalBasicsAction::ToggleCounterButtonTapped, &());
    reducer.reduce(
        &mut state,
        OptionalBasicsAction::OptionalCounter(CounterAction::Increment),
        &(),
    );
    assert_eq!(state.optional_counter, Some(CounterState { count: 1 }));

    reducer.reduce(&mut state, OptionalBasicsAction::ToggleCounterButtonTapped, &());
    assert_eq!(state.optional_counter, None);
}

#[test]
fn debug_wrapper_does_not_change_behavior() {
    let reducer = CounterReducer.debug("counter");
    let mut state = CounterState::default();

    reducer.reduce(&mut state, CounterAction::Decrement, &());

    assert_eq!(state.count, -1);
}
