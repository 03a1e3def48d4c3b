//! Agent collaborator seams.
//!
//! Agents are constructed and owned entirely outside this crate; contexts
//! reference them through weak handles and query class membership through
//! the `Agent` trait. The `InstanceCatalog` carries the host's
//! instance-name registrations consulted at bind time.

use std::collections::HashMap;
use std::sync::Arc;

/// Behavior-driven entity bindable to an instance name within a context.
///
/// Implementors answer class-membership queries for the single-inheritance
/// hierarchy the host runtime registers. The object itself stays owned by
/// whatever subsystem created it; a context never takes ownership.
pub trait Agent: Send + Sync {
    /// Most-derived class name of this agent.
    fn class_name(&self) -> &str;

    /// Whether this agent is an instance of `class_name` or of a class
    /// derived from it.
    fn is_a(&self, class_name: &str) -> bool;
}

/// Registered-name to expected-class lookup consulted at bind time.
///
/// The host's class registration layer owns this table; instance names
/// are registered there in advance, and binding an uncataloged name is a
/// caller bug.
pub trait InstanceCatalog: Send + Sync {
    /// Expected class for a registered instance name; `None` when the
    /// name was never registered.
    fn registered_class(&self, instance_name: &str) -> Option<String>;

    /// Whether `instance_name` has been registered.
    fn is_registered(&self, instance_name: &str) -> bool {
        self.registered_class(instance_name).is_some()
    }
}

/// Plain map catalog: instance name -> class name.
impl InstanceCatalog for HashMap<String, String> {
    fn registered_class(&self, instance_name: &str) -> Option<String> {
        self.get(instance_name).cloned()
    }
}

/// Build a shareable catalog from (instance name, class name) pairs.
pub fn catalog_from_pairs<I, S>(pairs: I) -> Arc<dyn InstanceCatalog>
where
    I: IntoIterator<Item = (S, S)>,
    S: Into<String>,
{
    let map: HashMap<String, String> = pairs
        .into_iter()
        .map(|(name, class)| (name.into(), class.into()))
        .collect();
    Arc::new(map)
}
