//! Checks: composable boolean preconditions.
//!
//! Checks inspect remote state without changing anything the rest of the
//! plan depends on. They combine with short-circuit `and`/`or`/`not`, and
//! an evaluation error is always propagated, never turned into a boolean.

use super::context::Context;
use super::error::ActionError;
use std::fmt;
use std::sync::Arc;

/// A boolean precondition evaluated against an execution [`Context`].
///
/// # Example
///
/// ```rust
/// use stepwise::core::{always, check_and, check_not, BoxedCheck, CapturedOutput, Check, Context, NoSession};
///
/// let sink = CapturedOutput::new();
/// let ctx = Context::new(&sink, &NoSession, false);
///
/// let both: Vec<BoxedCheck> = vec![Box::new(always(true)), Box::new(check_not(always(false)))];
/// assert!(check_and(both).check(&ctx).unwrap());
/// ```
pub trait Check: Send + Sync {
    fn check(&self, ctx: &Context<'_>) -> Result<bool, ActionError>;
}

pub type BoxedCheck = Box<dyn Check>;

impl<C: Check + ?Sized> Check for Box<C> {
    fn check(&self, ctx: &Context<'_>) -> Result<bool, ActionError> {
        (**self).check(ctx)
    }
}

impl<C: Check + ?Sized> Check for Arc<C> {
    fn check(&self, ctx: &Context<'_>) -> Result<bool, ActionError> {
        (**self).check(ctx)
    }
}

type CheckClosure = dyn Fn(&Context<'_>) -> Result<bool, ActionError> + Send + Sync;

/// Adapter that turns a closure into a [`Check`].
pub struct CheckFn {
    predicate: Box<CheckClosure>,
}

impl CheckFn {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Context<'_>) -> Result<bool, ActionError> + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }

    pub fn boxed(self) -> BoxedCheck {
        Box::new(self)
    }
}

impl Check for CheckFn {
    fn check(&self, ctx: &Context<'_>) -> Result<bool, ActionError> {
        (self.predicate)(ctx)
    }
}

impl fmt::Debug for CheckFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CheckFn")
    }
}

/// Check that always evaluates to `value`.
pub fn always(value: bool) -> CheckFn {
    CheckFn::new(move |_ctx| Ok(value))
}

/// Logical AND over `checks`, evaluated left to right.
///
/// Stops at the first `false` or the first error. Checks past that point
/// are never invoked. An empty list is `true`.
pub fn check_and<I>(checks: I) -> CheckFn
where
    I: IntoIterator<Item = BoxedCheck>,
{
    let checks: Vec<BoxedCheck> = checks.into_iter().collect();
    CheckFn::new(move |ctx| {
        for check in &checks {
            if !check.check(ctx)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// Logical OR over `checks`, evaluated left to right.
///
/// Stops at the first `true` or the first error. An empty list is `false`.
pub fn check_or<I>(checks: I) -> CheckFn
where
    I: IntoIterator<Item = BoxedCheck>,
{
    let checks: Vec<BoxedCheck> = checks.into_iter().collect();
    CheckFn::new(move |ctx| {
        for check in &checks {
            if check.check(ctx)? {
                return Ok(true);
            }
        }
        Ok(false)
    })
}

/// Logical NOT of `check`. Errors pass through un-negated.
pub fn check_not<C>(check: C) -> CheckFn
where
    C: Check + 'static,
{
    CheckFn::new(move |ctx| check.check(ctx).map(|holds| !holds))
}
