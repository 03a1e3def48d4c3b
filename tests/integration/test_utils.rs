//! Shared fixtures for integration tests: a simulated agent hierarchy,
//! a counting world factory, and ready-made directories.

use copse::agent::{catalog_from_pairs, Agent, InstanceCatalog};
use copse::context::{ContextDirectory, ContextId};
use copse::world::{World, WorldFactory};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Agent with an explicit ancestry chain, base class first.
pub struct SimAgent {
    ancestry: Vec<String>,
}

impl SimAgent {
    pub fn new(ancestry: &[&str]) -> Arc<dyn Agent> {
        Arc::new(Self {
            ancestry: ancestry.iter().map(|c| c.to_string()).collect(),
        })
    }
}

impl Agent for SimAgent {
    fn class_name(&self) -> &str {
        self.ancestry.last().map(String::as_str).unwrap_or_default()
    }

    fn is_a(&self, class_name: &str) -> bool {
        self.ancestry.iter().any(|c| c == class_name)
    }
}

/// World that counts how often its state was logged.
pub struct SimWorld {
    context_id: ContextId,
    pub logged: AtomicUsize,
}

impl SimWorld {
    pub fn new(context_id: ContextId) -> Self {
        Self {
            context_id,
            logged: AtomicUsize::new(0),
        }
    }
}

impl World for SimWorld {
    fn context_id(&self) -> ContextId {
        self.context_id
    }

    fn log_current_state(&self) {
        self.logged.fetch_add(1, Ordering::SeqCst);
    }
}

/// Factory producing [`SimWorld`]s and counting creations.
#[derive(Default)]
pub struct SimWorldFactory {
    pub created: AtomicUsize,
}

impl WorldFactory for SimWorldFactory {
    fn create_world(&self, context_id: ContextId) -> Arc<dyn World> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Arc::new(SimWorld {
            context_id,
            logged: AtomicUsize::new(0),
        })
    }
}

/// Catalog used across the lifecycle tests: "hero" must be a Hero,
/// "shopkeeper" any Npc.
pub fn sim_catalog() -> Arc<dyn InstanceCatalog> {
    catalog_from_pairs([("hero", "Hero"), ("shopkeeper", "Npc")])
}

pub fn sim_directory() -> (ContextDirectory, Arc<SimWorldFactory>) {
    let factory = Arc::new(SimWorldFactory::default());
    let directory = ContextDirectory::new(
        sim_catalog(),
        Arc::clone(&factory) as Arc<dyn WorldFactory>,
    );
    (directory, factory)
}
