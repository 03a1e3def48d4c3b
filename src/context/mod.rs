//! Execution contexts: isolated state universes for agent groups.
//!
//! A [`Context`] owns everything scoped to one simulation island: its
//! optional [`World`] attachment, per-class static variables, named
//! instance bindings, and the static event table. Contexts are created
//! and destroyed through the [`ContextDirectory`]; nothing here touches
//! global state.

use crate::agent::{Agent, InstanceCatalog};
use crate::error::{ContextError, Result};
use crate::events::{MethodDesc, OverrideChain, StaticEventTable};
use crate::state::StateSnapshot;
use crate::world::{World, WorldFactory};
use std::sync::Arc;
use tracing::debug;

mod directory;
mod instances;
mod statics;

pub use directory::ContextDirectory;
pub use instances::InstanceRegistry;
pub use statics::StaticVariableStore;

/// Identifier for one execution context.
pub type ContextId = u32;

/// One isolated execution context.
///
/// Holds a world attachment with an ownership flag: a world the context
/// created on demand is released when replaced or torn down, while an
/// externally attached world is only ever borrowed.
pub struct Context {
    id: ContextId,
    world: Option<Arc<dyn World>>,
    world_created_here: bool,
    statics: StaticVariableStore,
    instances: InstanceRegistry,
    static_events: StaticEventTable,
    worlds: Arc<dyn WorldFactory>,
}

impl Context {
    pub(crate) fn new(
        id: ContextId,
        catalog: Arc<dyn InstanceCatalog>,
        worlds: Arc<dyn WorldFactory>,
    ) -> Self {
        Self {
            id,
            world: None,
            world_created_here: false,
            statics: StaticVariableStore::new(),
            instances: InstanceRegistry::new(catalog),
            static_events: StaticEventTable::new(),
            worlds,
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Attach `world` to this context, or detach with `None`.
    ///
    /// A world the context created itself is released first; an adopted
    /// world is borrowed, never owned, so detaching it later just drops
    /// the reference.
    pub fn set_world(&mut self, world: Option<Arc<dyn World>>) {
        if self.world_created_here && self.world.take().is_some() {
            debug!(context_id = self.id, "releasing context-created world");
        }
        self.world_created_here = false;
        self.world = world;
    }

    /// Currently attached world, if any.
    pub fn world(&self) -> Option<Arc<dyn World>> {
        self.world.as_ref().map(Arc::clone)
    }

    /// Attached world, creating one through the factory on first call.
    ///
    /// A world created here is owned by the context and released on
    /// teardown or replacement.
    pub fn ensure_world(&mut self) -> Arc<dyn World> {
        if let Some(world) = &self.world {
            return Arc::clone(world);
        }

        let world = self.worlds.create_world(self.id);
        debug!(context_id = self.id, "created world for context");
        self.world = Some(Arc::clone(&world));
        self.world_created_here = true;
        world
    }

    /// Whether the attached world was created by this context.
    pub fn world_is_owned(&self) -> bool {
        self.world_created_here
    }

    pub fn statics(&self) -> &StaticVariableStore {
        &self.statics
    }

    pub fn statics_mut(&mut self) -> &mut StaticVariableStore {
        &mut self.statics
    }

    /// Log static variables for `class_name`, or all classes with `None`.
    pub fn log_static_variables(&self, class_name: Option<&str>) {
        self.statics.log_static_variables(class_name);
    }

    /// Restore every changed static variable to its default.
    pub fn reset_changed_variables(&mut self) {
        self.statics.reset_changed_variables();
    }

    /// Capture static state into `snapshot`; see
    /// [`StaticVariableStore::save_into`].
    pub fn save_into(&self, snapshot: &mut StateSnapshot) {
        self.statics.save_into(snapshot);
    }

    /// Capture static state into a fresh snapshot.
    pub fn save(&self) -> StateSnapshot {
        self.statics.save()
    }

    /// Restore static state from `snapshot`; see
    /// [`StaticVariableStore::load`].
    pub fn load(&mut self, snapshot: &StateSnapshot) {
        self.statics.load(snapshot);
    }

    pub fn instances(&self) -> &InstanceRegistry {
        &self.instances
    }

    /// See [`InstanceRegistry::get_instance`].
    pub fn get_instance(&self, instance_name: &str) -> Option<Arc<dyn Agent>> {
        self.instances.get_instance(instance_name)
    }

    /// See [`InstanceRegistry::bind_instance`].
    pub fn bind_instance(&mut self, instance_name: &str, agent: &Arc<dyn Agent>) -> Result<bool> {
        self.instances.bind_instance(instance_name, agent)
    }

    /// See [`InstanceRegistry::unbind_instance`].
    pub fn unbind_instance(&mut self, instance_name: &str) -> Result<bool> {
        self.instances.unbind_instance(instance_name)
    }

    pub fn static_events(&self) -> &StaticEventTable {
        &self.static_events
    }

    /// Look up a globally registered static event for `class_name`.
    pub fn find_event_static(&self, class_name: &str, event_name: &str) -> Option<&MethodDesc> {
        self.static_events.find(class_name, event_name)
    }

    /// Register `event` globally for `class_name`; duplicate
    /// registrations are a no-op. Returns whether an entry was stored.
    pub fn insert_event_global(&mut self, class_name: &str, event: &MethodDesc) -> bool {
        self.static_events.insert(class_name, event)
    }

    /// Resolve `event_name` through `chain`, honoring overrides.
    ///
    /// A static event that resolves is also registered into this
    /// context's static event table, under its declaring class, so later
    /// class-wide dispatch finds it without walking the chain again.
    pub fn find_named_event<'c>(
        &mut self,
        chain: &'c OverrideChain,
        event_name: &str,
    ) -> Option<&'c MethodDesc> {
        let event = chain.resolve(event_name)?;
        if event.is_static() {
            self.insert_event_global(event.class_name(), event);
        }
        Some(event)
    }

    /// Refuse teardown while instance bindings remain.
    pub(crate) fn verify_teardown(&self) -> Result<()> {
        if !self.instances.is_empty() {
            return Err(ContextError::BindingsRemain {
                context_id: self.id,
                names: self.instances.bound_names(),
            });
        }
        Ok(())
    }

    /// Release everything this context holds, in order: world, static
    /// variables, instance bindings, event registrations.
    pub(crate) fn shutdown(&mut self) {
        if self.world_created_here && self.world.take().is_some() {
            debug!(context_id = self.id, "releasing context-created world");
        }
        self.world_created_here = false;
        self.world = None;

        let classes = self.statics.len();
        self.statics.cleanup_static_variables();
        debug!(context_id = self.id, classes, "static variables cleaned up");

        let bindings = self.instances.clear();
        debug!(context_id = self.id, bindings, "instance registry cleared");

        let events = self.static_events.len();
        self.static_events.clear();
        debug!(context_id = self.id, events, "event registrations released");
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.id)
            .field("has_world", &self.world.is_some())
            .field("world_created_here", &self.world_created_here)
            .field("statics", &self.statics)
            .field("instances", &self.instances)
            .finish()
    }
}
