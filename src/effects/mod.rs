//! Bridge from action and check trees to Stillwater effects.
//!
//! Hosts that drive provisioning from async code can turn a tree into a
//! `BoxedEffect` and run it against a [`SharedContext`]. Nothing becomes
//! concurrent: when the effect runs, the tree is evaluated synchronously,
//! left to right, exactly as [`Action::apply`](crate::core::Action::apply)
//! would.

mod context;

pub use context::SharedContext;

use crate::core::{Action, ActionError, Check};
use std::sync::Arc;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

/// Effect that applies `action` against the environment's context.
pub fn apply_effect(action: Arc<dyn Action>) -> BoxedEffect<(), ActionError, SharedContext> {
    from_fn(move |env: &SharedContext| action.apply(&env.context())).boxed()
}

/// Effect that evaluates `check` against the environment's context.
pub fn check_effect(check: Arc<dyn Check>) -> BoxedEffect<bool, ActionError, SharedContext> {
    from_fn(move |env: &SharedContext| check.check(&env.context())).boxed()
}
