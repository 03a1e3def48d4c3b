//! Named instance bindings for one execution context.
//!
//! Binding names come from the shared [`InstanceCatalog`]; the registry
//! holds weak handles only, so binding never extends an agent's
//! lifetime. A context with live bindings refuses teardown, which is
//! what catches agents leaked past the end of their context.

use crate::agent::{Agent, InstanceCatalog};
use crate::error::{ContextError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::warn;

/// Name-to-agent bindings scoped to a single context.
pub struct InstanceRegistry {
    catalog: Arc<dyn InstanceCatalog>,
    bound: HashMap<String, Weak<dyn Agent>>,
}

impl InstanceRegistry {
    pub(crate) fn new(catalog: Arc<dyn InstanceCatalog>) -> Self {
        Self {
            catalog,
            bound: HashMap::new(),
        }
    }

    /// Agent currently bound under `instance_name`, if any.
    ///
    /// Misses are expected: unknown names, names registered but not yet
    /// bound, and bindings whose agent has since been dropped all return
    /// `None`. A stale binding is logged and left in place; it still
    /// counts as bound until explicitly unbound.
    pub fn get_instance(&self, instance_name: &str) -> Option<Arc<dyn Agent>> {
        if instance_name.is_empty() {
            return None;
        }

        let handle = self.bound.get(instance_name)?;
        let agent = handle.upgrade();
        if agent.is_none() {
            warn!(instance_name, "bound agent has been dropped");
        }
        agent
    }

    /// Bind `agent` under `instance_name`.
    ///
    /// The name must be registered in the catalog and free in this
    /// context; violating either is a caller error. An agent of the
    /// wrong class is an expected rejection: `Ok(false)` with the
    /// registry unchanged.
    pub fn bind_instance(
        &mut self,
        instance_name: &str,
        agent: &Arc<dyn Agent>,
    ) -> Result<bool> {
        let registered_class = self
            .catalog
            .registered_class(instance_name)
            .ok_or_else(|| ContextError::NameNotRegistered(instance_name.to_string()))?;

        if self.bound.contains_key(instance_name) {
            return Err(ContextError::AlreadyBound(instance_name.to_string()));
        }

        if !agent.is_a(&registered_class) {
            return Ok(false);
        }

        self.bound
            .insert(instance_name.to_string(), Arc::downgrade(agent));
        Ok(true)
    }

    /// Remove the binding under `instance_name`.
    ///
    /// Returns whether a binding was removed; unbinding a registered but
    /// unbound name is `Ok(false)`. Unregistered names are a caller
    /// error, as with [`bind_instance`](Self::bind_instance).
    pub fn unbind_instance(&mut self, instance_name: &str) -> Result<bool> {
        if !self.catalog.is_registered(instance_name) {
            return Err(ContextError::NameNotRegistered(instance_name.to_string()));
        }

        Ok(self.bound.remove(instance_name).is_some())
    }

    /// Names with a binding entry, sorted. Includes stale bindings.
    pub fn bound_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bound.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Drop every binding; teardown path.
    pub(crate) fn clear(&mut self) -> usize {
        let released = self.bound.len();
        self.bound.clear();
        released
    }
}

impl std::fmt::Debug for InstanceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceRegistry")
            .field("bound", &self.bound_names())
            .finish()
    }
}
