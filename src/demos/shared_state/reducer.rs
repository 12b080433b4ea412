use crate::architecture::{from_fn, Effect, Reducer, ReducerExt};
use crate::case_path;
use crate::demos::shared_state::action::{CounterTabAction, ProfileTabAction, SharedStateAction};
use crate::demos::shared_state::state::{CounterStats, CounterTabState, ProfileTabState, SharedStateDemo};

pub struct CounterTabReducer;

impl Reducer for CounterTabReducer {
    type State = CounterTabState;
    type Action = CounterTabAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut CounterTabState,
        action: CounterTabAction,
        _: &(),
    ) -> Effect<CounterTabAction> {
        match action {
            CounterTabAction::IncrementButtonTapped => state.stats.update(|stats| {
                stats.count += 1;
                stats.number_of_counts += 1;
                stats.max_count = stats.max_count.max(stats.count);
            }),
            CounterTabAction::DecrementButtonTapped => state.stats.update(|stats| {
                stats.count -= 1;
                stats.number_of_counts += 1;
                stats.min_count = stats.min_count.min(stats.count);
            }),
            CounterTabAction::IsPrimeButtonTapped => {
                let count = state.stats.read(|stats| stats.count);
                state.alert = Some(if is_prime(count) {
                    format!("The number {count} is prime!")
                } else {
                    format!("The number {count} is not prime :(")
                });
            }
            CounterTabAction::AlertDismissed => state.alert = None,
        }
        Effect::none()
    }
}

pub struct ProfileTabReducer;

impl Reducer for ProfileTabReducer {
    type State = ProfileTabState;
    type Action = ProfileTabAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut ProfileTabState,
        action: ProfileTabAction,
        _: &(),
    ) -> Effect<ProfileTabAction> {
        match action {
            ProfileTabAction::ResetCounterButtonTapped => {
                state.stats.update(|stats| *stats = CounterStats::default());
            }
        }
        Effect::none()
    }
}

pub fn shared_state_reducer(
) -> impl Reducer<State = SharedStateDemo, Action = SharedStateAction, Environment = ()> {
    CounterTabReducer
        .pullback(
            |state: &mut SharedStateDemo| &mut state.counter,
            case_path!(SharedStateAction::Counter),
            |_: &()| (),
        )
        .combine(ProfileTabReducer.pullback(
            |state: &mut SharedStateDemo| &mut state.profile,
            case_path!(SharedStateAction::Profile),
            |_: &()| (),
        ))
        .combine(from_fn(
            |state: &mut SharedStateDemo, action: SharedStateAction, _: &()| {
                if let SharedStateAction::SelectTab(tab) = action {
                    state.current_tab = tab;
                }
                Effect::none()
            },
        ))
}

fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::is_prime;

    #[test]
    fn primes() {
        let primes: Vec<i64> = (-3..20).filter(|n| is_prime(*n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19]);
    }
}
