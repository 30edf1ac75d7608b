//! Name-keyed world state.

use std::collections::BTreeMap;

use planforge_core::{Domain, Value, Variable};

/// A world where every variable is stored under its name.
///
/// Unset variables read as `false` or `0` through the helpers below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldState {
    facts: BTreeMap<String, Value>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.facts.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.facts.get(name)
    }

    pub fn bool(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn int(&self, name: &str) -> i64 {
        self.get(name).and_then(Value::as_int).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Adds a boolean variable that reads `name` from the world.
pub fn bool_variable<B>(domain: &mut Domain<WorldState, B>, name: &str) -> Variable<bool> {
    let key = name.to_string();
    domain.add_variable(name, move |world: &WorldState| world.bool(&key))
}

/// Adds an integer variable that reads `name` from the world.
pub fn int_variable<B>(domain: &mut Domain<WorldState, B>, name: &str) -> Variable<i64> {
    let key = name.to_string();
    domain.add_variable(name, move |world: &WorldState| world.int(&key))
}
