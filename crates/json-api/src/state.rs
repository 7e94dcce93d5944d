//! State

use std::{fmt, sync::Arc};

use vitrine_app::context::AppContext;

/// Shared handler state, injected into the depot once per server.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State").finish_non_exhaustive()
    }
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
