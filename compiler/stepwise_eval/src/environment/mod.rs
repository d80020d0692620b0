//! Variable store for one trace run.
//!
//! A single flat namespace: there is no block scoping, so loop counters,
//! declarations and arrays all live side by side and a re-declaration
//! overwrites the previous binding.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::value::{Snapshot, Value};

/// Environment for the interpreter.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    /// Bindings (`FxHashMap` for faster hashing with short string keys).
    bindings: FxHashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Bind `name`, replacing any existing binding.
    #[inline]
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Look up a variable by name.
    ///
    /// Array values come back as another handle to the same array.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Assign to a variable, creating it if it was never declared.
    #[inline]
    pub fn assign(&mut self, name: &str, value: Value) {
        match self.bindings.get_mut(name) {
            Some(slot) => *slot = value,
            None => self.define(name, value),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Deep copy of every binding, ordered by name.
    pub fn snapshot(&self) -> BTreeMap<String, Snapshot> {
        self.bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.snapshot()))
            .collect()
    }
}

#[cfg(test)]
mod tests;
