//! Directory of live execution contexts.
//!
//! The directory is the single entry point for context lifecycle: hosts
//! create one around their instance catalog and world factory, then hand
//! it (or a lock around it) to whatever subsystems need contexts. At
//! most one [`Context`] exists per id.

use crate::agent::InstanceCatalog;
use crate::context::{Context, ContextId};
use crate::error::{ContextError, Result};
use crate::world::WorldFactory;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Lazily populated id-to-context map.
pub struct ContextDirectory {
    contexts: HashMap<ContextId, Context>,
    catalog: Arc<dyn InstanceCatalog>,
    worlds: Arc<dyn WorldFactory>,
}

impl ContextDirectory {
    /// Empty directory around the host's catalog and world factory; both
    /// are cloned into every context created here.
    pub fn new(catalog: Arc<dyn InstanceCatalog>, worlds: Arc<dyn WorldFactory>) -> Self {
        Self {
            contexts: HashMap::new(),
            catalog,
            worlds,
        }
    }

    /// Context for `id`, created empty on first request.
    pub fn get_or_create(&mut self, id: ContextId) -> &mut Context {
        let catalog = &self.catalog;
        let worlds = &self.worlds;
        self.contexts.entry(id).or_insert_with(|| {
            info!(context_id = id, "creating context");
            Context::new(id, Arc::clone(catalog), Arc::clone(worlds))
        })
    }

    /// Context for `id`, if it exists. Never creates.
    pub fn get(&self, id: ContextId) -> Option<&Context> {
        self.contexts.get(&id)
    }

    /// Mutable context for `id`, if it exists. Never creates.
    pub fn get_mut(&mut self, id: ContextId) -> Option<&mut Context> {
        self.contexts.get_mut(&id)
    }

    /// Tear down and remove the context for `id`.
    ///
    /// Destroying an id that was never created (or already destroyed) is
    /// a caller error. A context that still has bound instances refuses
    /// teardown and is left fully intact.
    pub fn destroy(&mut self, id: ContextId) -> Result<()> {
        let context = self
            .contexts
            .get_mut(&id)
            .ok_or(ContextError::UnknownContext(id))?;

        context.verify_teardown()?;
        context.shutdown();
        self.contexts.remove(&id);
        info!(context_id = id, "context destroyed");
        Ok(())
    }

    /// Tear down every tracked context.
    ///
    /// All-or-nothing: every context is verified free of bindings before
    /// any is torn down, so a single bound instance anywhere leaves the
    /// whole directory untouched.
    pub fn destroy_all(&mut self) -> Result<()> {
        let mut ids: Vec<ContextId> = self.contexts.keys().copied().collect();
        ids.sort_unstable();

        for id in &ids {
            if let Some(context) = self.contexts.get(id) {
                context.verify_teardown()?;
            }
        }

        for id in &ids {
            if let Some(mut context) = self.contexts.remove(id) {
                context.shutdown();
            }
        }

        info!(count = ids.len(), "destroyed all contexts");
        Ok(())
    }

    /// Ask every attached world, in context-id order, to log its current
    /// state. Contexts without a world are skipped.
    pub fn log_current_states(&self) {
        let ids = self.ids();
        debug!(contexts = ids.len(), "logging current world states");
        for id in ids {
            if let Some(world) = self.contexts.get(&id).and_then(Context::world) {
                world.log_current_state();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Tracked context ids, sorted.
    pub fn ids(&self) -> Vec<ContextId> {
        let mut ids: Vec<ContextId> = self.contexts.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for ContextDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextDirectory")
            .field("ids", &self.ids())
            .finish()
    }
}
