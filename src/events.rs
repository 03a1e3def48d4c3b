//! Named-event descriptors, override resolution, and the static event
//! table.
//!
//! Event identity is the event's name: case-sensitive, exact. A class
//! hierarchy resolves events through an [`OverrideChain`] built once at
//! class-registration time, most-derived first, so a derived class's
//! redefinition shadows its base. Events flagged static are additionally
//! registered into the per-context [`StaticEventTable`], which
//! deduplicates by (class name, event name).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptor for one method exposed by an agent class.
///
/// Only methods flagged as named events participate in event resolution;
/// the static flag marks events registered globally for their declaring
/// class on first resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MethodDesc {
    name: String,
    class_name: String,
    named_event: bool,
    is_static: bool,
}

impl MethodDesc {
    /// Plain method: not an event, never registered globally.
    pub fn method(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: class_name.into(),
            named_event: false,
            is_static: false,
        }
    }

    /// Named event bound to instances of its declaring class.
    pub fn event(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            named_event: true,
            ..Self::method(name, class_name)
        }
    }

    /// Named event shared by the whole declaring class; resolved copies
    /// are registered into the static event table.
    pub fn static_event(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            named_event: true,
            is_static: true,
            ..Self::method(name, class_name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class the method was declared on.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn is_named_event(&self) -> bool {
        self.named_event
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

/// Method resolution order for one agent class, most-derived first.
///
/// Built once at class-registration time from the base-to-derived method
/// list registration naturally produces; lookups are a first-match walk.
#[derive(Debug, Clone, Default)]
pub struct OverrideChain {
    methods: Vec<MethodDesc>,
}

impl OverrideChain {
    /// Build from a method list ordered base class first, most-derived
    /// class last.
    pub fn from_base_to_derived<I>(methods: I) -> Self
    where
        I: IntoIterator<Item = MethodDesc>,
    {
        let mut methods: Vec<MethodDesc> = methods.into_iter().collect();
        methods.reverse();
        Self { methods }
    }

    /// First named-event method matching `event_name`; derived
    /// definitions shadow base ones. Methods matching by name but not
    /// flagged as named events are skipped, not shadowing.
    pub fn resolve(&self, event_name: &str) -> Option<&MethodDesc> {
        self.methods
            .iter()
            .find(|method| method.name() == event_name && method.is_named_event())
    }

    /// Methods in resolution order (most-derived first).
    pub fn methods(&self) -> &[MethodDesc] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Class-scoped, deduplicated global event registrations.
///
/// The table owns independent clones of everything inserted; entries live
/// until the table is cleared at context teardown.
#[derive(Debug, Default)]
pub struct StaticEventTable {
    classes: HashMap<String, HashMap<String, MethodDesc>>,
}

impl StaticEventTable {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Exact per-class lookup; no fallback to base classes.
    pub fn find(&self, class_name: &str, event_name: &str) -> Option<&MethodDesc> {
        self.classes
            .get(class_name)?
            .get(event_name)
    }

    /// Insert a clone of `event` under `class_name`, keyed by the event's
    /// own name, unless an entry with that name already resolves for the
    /// class. Duplicate registration is a silent no-op; returns whether a
    /// clone was stored.
    pub fn insert(&mut self, class_name: &str, event: &MethodDesc) -> bool {
        if self.find(class_name, event.name()).is_some() {
            return false;
        }

        self.classes
            .entry(class_name.to_string())
            .or_default()
            .insert(event.name().to_string(), event.clone());

        true
    }

    /// Class names with at least one registered event.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Total registered events across all classes.
    pub fn len(&self) -> usize {
        self.classes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Release every registration; teardown path.
    pub fn clear(&mut self) {
        self.classes.clear();
    }
}
