//! Snapshot shapes for static-variable save/load.
//!
//! A snapshot is a class-keyed capture of a context's static variables:
//! opaque to this crate beyond save/load, serde-serializable so an
//! external serializer can persist it. No I/O happens here.

use crate::variables::VariableSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Captured static variables of one agent class.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassState {
    pub vars: VariableSet,
}

impl ClassState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Class-keyed capture of a context's static variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// When the snapshot was captured. Diagnostic metadata only; loading
    /// ignores it.
    pub captured_at: DateTime<Utc>,
    classes: BTreeMap<String, ClassState>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self {
            captured_at: Utc::now(),
            classes: BTreeMap::new(),
        }
    }

    /// Captured state for one class.
    pub fn class(&self, class_name: &str) -> Option<&ClassState> {
        self.classes.get(class_name)
    }

    /// Insert (or replace) the captured state for one class. Entries for
    /// other class names are untouched.
    pub fn insert_class(&mut self, class_name: impl Into<String>, state: ClassState) {
        self.classes.insert(class_name.into(), state);
    }

    pub fn contains_class(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Captured classes in name order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &ClassState)> {
        self.classes
            .iter()
            .map(|(class_name, state)| (class_name.as_str(), state))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
