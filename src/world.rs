//! World attachment contract.
//!
//! A world is the simulation/environment object a context may own or
//! borrow. Only the attach/detach contract matters here; the simulation
//! loop itself lives with the host.

use crate::context::ContextId;
use std::sync::Arc;
use tracing::debug;

/// Simulation/environment object attachable to a context.
pub trait World: Send + Sync {
    /// Id of the context this world was created for.
    fn context_id(&self) -> ContextId;

    /// Emit the world's current state as `tracing` diagnostics.
    fn log_current_state(&self);
}

/// Recipe for the default world a context creates when asked for one it
/// does not have yet. Worlds created this way are owned by the context
/// and released on replacement or teardown.
pub trait WorldFactory: Send + Sync {
    fn create_world(&self, context_id: ContextId) -> Arc<dyn World>;
}

/// Inert world for hosts that run contexts without a simulation attached.
pub struct NullWorld {
    context_id: ContextId,
}

impl NullWorld {
    pub fn new(context_id: ContextId) -> Self {
        Self { context_id }
    }
}

impl World for NullWorld {
    fn context_id(&self) -> ContextId {
        self.context_id
    }

    fn log_current_state(&self) {
        debug!(context_id = self.context_id, "null world; nothing to log");
    }
}

/// Factory producing [`NullWorld`]s.
#[derive(Default)]
pub struct NullWorldFactory;

impl WorldFactory for NullWorldFactory {
    fn create_world(&self, context_id: ContextId) -> Arc<dyn World> {
        Arc::new(NullWorld { context_id })
    }
}
