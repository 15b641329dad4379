//! Macros for ergonomic action and check trees.

/// Build an [`ActionList`](crate::core::ActionList) from a list of actions.
///
/// # Example
///
/// ```
/// use stepwise::core::{message, message_warn, Action, CapturedOutput, Context, NoSession};
/// use stepwise::sequence;
///
/// let steps = sequence![message("one"), message_warn("two")];
///
/// let sink = CapturedOutput::new();
/// steps.apply(&Context::new(&sink, &NoSession, false)).unwrap();
/// assert_eq!(sink.lines(), vec!["one", "WARNING: two"]);
/// ```
#[macro_export]
macro_rules! sequence {
    ($($action:expr),* $(,)?) => {{
        let actions: ::std::vec::Vec<$crate::core::BoxedAction> =
            ::std::vec![$(::std::boxed::Box::new($action) as $crate::core::BoxedAction),*];
        $crate::core::ActionList::from(actions)
    }};
}

/// Logical AND of checks, see [`check_and`](crate::core::check_and).
///
/// # Example
///
/// ```
/// use stepwise::core::{always, Check, CapturedOutput, Context, NoSession};
/// use stepwise::all_of;
///
/// let sink = CapturedOutput::new();
/// let ctx = Context::new(&sink, &NoSession, false);
///
/// assert!(all_of![always(true), always(true)].check(&ctx).unwrap());
/// assert!(all_of![].check(&ctx).unwrap());
/// ```
#[macro_export]
macro_rules! all_of {
    ($($check:expr),* $(,)?) => {{
        let checks: ::std::vec::Vec<$crate::core::BoxedCheck> =
            ::std::vec![$(::std::boxed::Box::new($check) as $crate::core::BoxedCheck),*];
        $crate::core::check_and(checks)
    }};
}

/// Logical OR of checks, see [`check_or`](crate::core::check_or).
///
/// # Example
///
/// ```
/// use stepwise::core::{always, Check, CapturedOutput, Context, NoSession};
/// use stepwise::any_of;
///
/// let sink = CapturedOutput::new();
/// let ctx = Context::new(&sink, &NoSession, false);
///
/// assert!(any_of![always(false), always(true)].check(&ctx).unwrap());
/// assert!(!any_of![].check(&ctx).unwrap());
/// ```
#[macro_export]
macro_rules! any_of {
    ($($check:expr),* $(,)?) => {{
        let checks: ::std::vec::Vec<$crate::core::BoxedCheck> =
            ::std::vec![$(::std::boxed::Box::new($check) as $crate::core::BoxedCheck),*];
        $crate::core::check_or(checks)
    }};
}
