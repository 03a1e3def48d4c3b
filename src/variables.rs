//! Class-scoped variable collections.
//!
//! A `VariableSet` holds the named slots shared by all instances of one
//! agent class within a context. Each slot carries a declared default and
//! a current value; values are opaque JSON payloads whose serialization
//! format is decided by the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

/// One named slot: declared default plus current value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableSlot {
    pub default: Value,
    pub value: Value,
}

impl VariableSlot {
    /// New slot whose current value starts at the declared default.
    pub fn new(default: Value) -> Self {
        Self {
            value: default.clone(),
            default,
        }
    }

    /// Whether the current value has diverged from the declared default.
    pub fn is_changed(&self) -> bool {
        self.value != self.default
    }

    /// Restore the current value to the declared default.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }
}

/// Named variable slots for one agent class.
///
/// Enumeration is name-ordered so diagnostic output and snapshots are
/// deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VariableSet {
    slots: BTreeMap<String, VariableSlot>,
}

impl VariableSet {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// Declare a slot with its default; the current value starts at the
    /// default. Re-declaring an existing slot replaces it wholesale.
    pub fn define(&mut self, name: impl Into<String>, default: Value) {
        self.slots.insert(name.into(), VariableSlot::new(default));
    }

    /// Set the current value of a slot. A plain `set` on an undeclared
    /// name creates the slot, adopting the value as its declared default.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.slots.get_mut(&name) {
            Some(slot) => slot.value = value,
            None => {
                self.slots.insert(name, VariableSlot::new(value));
            }
        }
    }

    /// Current value of a slot.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).map(|slot| &slot.value)
    }

    /// The full slot (default and current value).
    pub fn slot(&self, name: &str) -> Option<&VariableSlot> {
        self.slots.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariableSlot)> {
        self.slots.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    /// Drop every slot, values and definitions alike.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Restore every slot to its declared default; slot definitions
    /// survive, so re-registration of the schema is not needed.
    pub fn reset(&mut self) {
        for slot in self.slots.values_mut() {
            slot.reset();
        }
    }

    /// Replace `target`'s slots with deep copies of this set's slots.
    pub fn copy_to(&self, target: &mut VariableSet) {
        target.slots = self.slots.clone();
    }

    /// Emit one diagnostic event per slot, current values only.
    pub fn log(&self, class_name: &str) {
        for (name, slot) in self.iter() {
            info!(
                class_name,
                variable = display_name(name),
                value = %slot.value,
                changed = slot.is_changed(),
                "static variable"
            );
        }
    }
}

/// Slot display name without a leading `Class::` qualifier.
pub fn display_name(variable_name: &str) -> &str {
    match variable_name.rfind("::") {
        Some(idx) => &variable_name[idx + 2..],
        None => variable_name,
    }
}
