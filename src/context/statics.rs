//! Per-class static variable sets owned by one execution context.
//!
//! Statics here are class-scoped, not process-scoped: every context
//! carries its own store, so two contexts never observe each other's
//! writes. Class entries are created lazily on first access and ordered
//! by class name for deterministic enumeration.

use crate::state::{ClassState, StateSnapshot};
use crate::variables::VariableSet;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Class-name-keyed variable sets for one context.
#[derive(Debug, Default)]
pub struct StaticVariableStore {
    classes: BTreeMap<String, VariableSet>,
}

impl StaticVariableStore {
    pub fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
        }
    }

    /// Variable set for `class_name`, if the class has one.
    pub fn vars(&self, class_name: &str) -> Option<&VariableSet> {
        self.classes.get(class_name)
    }

    /// Variable set for `class_name`, created empty on first access.
    pub fn vars_mut(&mut self, class_name: &str) -> &mut VariableSet {
        self.classes.entry(class_name.to_string()).or_default()
    }

    /// Write one static variable, creating the class entry if needed.
    pub fn set(&mut self, class_name: &str, variable_name: &str, value: Value) {
        self.vars_mut(class_name).set(variable_name, value);
    }

    /// Read one static variable.
    pub fn get(&self, class_name: &str, variable_name: &str) -> Option<&Value> {
        self.vars(class_name)?.get(variable_name)
    }

    /// Class names with a variable set, in name order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Log current values, one record per variable, for `class_name` or
    /// for every class when `None`. Unknown classes log nothing.
    pub fn log_static_variables(&self, class_name: Option<&str>) {
        match class_name {
            Some(class_name) => {
                if let Some(vars) = self.classes.get(class_name) {
                    vars.log(class_name);
                }
            }
            None => {
                for (class_name, vars) in &self.classes {
                    vars.log(class_name);
                }
            }
        }
    }

    /// Empty every class's variable set, then drop the class entries.
    pub fn cleanup_static_variables(&mut self) {
        for vars in self.classes.values_mut() {
            vars.clear();
        }
        self.classes.clear();
    }

    /// Restore every changed variable to its default, across all
    /// classes. Class entries survive with their declarations intact.
    pub fn reset_changed_variables(&mut self) {
        for vars in self.classes.values_mut() {
            vars.reset();
        }
    }

    /// Capture every tracked class into `snapshot`, replacing entries
    /// for classes tracked here and leaving any others untouched.
    pub fn save_into(&self, snapshot: &mut StateSnapshot) {
        for (class_name, vars) in &self.classes {
            let mut state = ClassState::new();
            vars.copy_to(&mut state.vars);
            snapshot.insert_class(class_name, state);
        }
    }

    /// Capture every tracked class into a fresh snapshot.
    pub fn save(&self) -> StateSnapshot {
        let mut snapshot = StateSnapshot::new();
        self.save_into(&mut snapshot);
        snapshot
    }

    /// Restore tracked classes from `snapshot`, wholesale.
    ///
    /// A class present in the snapshot but not tracked here is skipped;
    /// restore never introduces classes the store does not know.
    pub fn load(&mut self, snapshot: &StateSnapshot) {
        for (class_name, state) in snapshot.classes() {
            match self.classes.get_mut(class_name) {
                Some(vars) => state.vars.copy_to(vars),
                None => {
                    debug!(class_name, "snapshot class not tracked, skipping");
                }
            }
        }
    }
}
