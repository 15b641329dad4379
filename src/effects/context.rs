//! Owned execution context for async hosts.

use crate::core::{Context, OutputSink, RemoteSession};
use std::sync::Arc;

/// Cloneable, owned counterpart of [`Context`].
///
/// Effects need an environment they can hold on to, so this keeps the sink
/// and session behind `Arc`s. Every effect run against it sees the same
/// sink, session and flag.
#[derive(Clone)]
pub struct SharedContext {
    sink: Arc<dyn OutputSink>,
    session: Arc<dyn RemoteSession>,
    use_elevated: bool,
}

impl SharedContext {
    pub fn new(
        sink: Arc<dyn OutputSink>,
        session: Arc<dyn RemoteSession>,
        use_elevated: bool,
    ) -> Self {
        Self {
            sink,
            session,
            use_elevated,
        }
    }

    /// Borrow as a plain [`Context`] for synchronous evaluation.
    pub fn context(&self) -> Context<'_> {
        Context::new(self.sink.as_ref(), self.session.as_ref(), self.use_elevated)
    }

    pub fn use_elevated(&self) -> bool {
        self.use_elevated
    }
}
