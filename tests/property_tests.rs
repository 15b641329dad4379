//! Property-based tests for the action and check combinators.
//!
//! These tests use proptest to verify ordering, fail-fast and
//! short-circuit properties across many randomly generated trees.

use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use stepwise::core::{
    always, apply_if_else, apply_list, apply_try, check_and, check_not, check_or, Action,
    ActionError, ApplyFn, BoxedAction, BoxedCheck, CapturedOutput, Check, CheckFn, Context,
    NoSession,
};

type Trace = Arc<Mutex<Vec<usize>>>;

/// Action that records its index and succeeds iff `ok`.
fn traced_action(index: usize, ok: bool, trace: &Trace) -> BoxedAction {
    let trace = Arc::clone(trace);
    ApplyFn::new(move |_ctx| {
        trace.lock().unwrap().push(index);
        if ok {
            Ok(())
        } else {
            Err(ActionError::msg(format!("action {index} failed")))
        }
    })
    .boxed()
}

/// Check that records its index and evaluates to `value`.
fn traced_check(index: usize, value: bool, trace: &Trace) -> BoxedCheck {
    let trace = Arc::clone(trace);
    CheckFn::new(move |_ctx| {
        trace.lock().unwrap().push(index);
        Ok(value)
    })
    .boxed()
}

fn with_context<T>(f: impl FnOnce(&Context<'_>) -> T) -> T {
    let sink = CapturedOutput::new();
    f(&Context::new(&sink, &NoSession, false))
}

proptest! {
    #[test]
    fn apply_list_runs_prefix_up_to_first_failure(
        outcomes in prop::collection::vec(any::<bool>(), 0..12)
    ) {
        let trace: Trace = Arc::default();
        let actions: Vec<BoxedAction> = outcomes
            .iter()
            .enumerate()
            .map(|(i, ok)| traced_action(i, *ok, &trace))
            .collect();

        let result = with_context(|ctx| apply_list(&actions, ctx));

        let first_failure = outcomes.iter().position(|ok| !ok);
        let expected: Vec<usize> = match first_failure {
            Some(i) => (0..=i).collect(),
            None => (0..outcomes.len()).collect(),
        };
        prop_assert_eq!(trace.lock().unwrap().clone(), expected);

        match first_failure {
            Some(i) => prop_assert_eq!(
                result,
                Err(ActionError::msg(format!("action {i} failed")))
            ),
            None => prop_assert!(result.is_ok()),
        }
    }

    #[test]
    fn check_and_matches_all_and_short_circuits(
        values in prop::collection::vec(any::<bool>(), 0..10)
    ) {
        let trace: Trace = Arc::default();
        let checks: Vec<BoxedCheck> = values
            .iter()
            .enumerate()
            .map(|(i, v)| traced_check(i, *v, &trace))
            .collect();

        let result = with_context(|ctx| check_and(checks).check(ctx));

        prop_assert_eq!(result, Ok(values.iter().all(|v| *v)));
        let evaluated = values
            .iter()
            .position(|v| !v)
            .map_or(values.len(), |i| i + 1);
        prop_assert_eq!(trace.lock().unwrap().len(), evaluated);
    }

    #[test]
    fn check_or_matches_any_and_short_circuits(
        values in prop::collection::vec(any::<bool>(), 0..10)
    ) {
        let trace: Trace = Arc::default();
        let checks: Vec<BoxedCheck> = values
            .iter()
            .enumerate()
            .map(|(i, v)| traced_check(i, *v, &trace))
            .collect();

        let result = with_context(|ctx| check_or(checks).check(ctx));

        prop_assert_eq!(result, Ok(values.iter().any(|v| *v)));
        let evaluated = values
            .iter()
            .position(|v| *v)
            .map_or(values.len(), |i| i + 1);
        prop_assert_eq!(trace.lock().unwrap().len(), evaluated);
    }

    #[test]
    fn double_negation_is_identity(value in any::<bool>()) {
        let result = with_context(|ctx| check_not(check_not(always(value))).check(ctx));
        prop_assert_eq!(result, Ok(value));
    }

    #[test]
    fn apply_try_always_succeeds(ok in any::<bool>()) {
        let trace: Trace = Arc::default();
        let action = apply_try(traced_action(0, ok, &trace));

        let result = with_context(|ctx| action.apply(ctx));

        prop_assert!(result.is_ok());
        prop_assert_eq!(trace.lock().unwrap().len(), 1);
    }

    #[test]
    fn apply_if_else_runs_exactly_one_branch(value in any::<bool>()) {
        let checks: Trace = Arc::default();
        let branches: Trace = Arc::default();
        let action = apply_if_else(
            traced_check(0, value, &checks),
            traced_action(1, true, &branches),
            traced_action(2, true, &branches),
        );

        let result = with_context(|ctx| action.apply(ctx));

        prop_assert!(result.is_ok());
        prop_assert_eq!(checks.lock().unwrap().len(), 1);
        let expected = if value { vec![1] } else { vec![2] };
        prop_assert_eq!(branches.lock().unwrap().clone(), expected);
    }
}
