//! RotorPool: the immutable set of rotors a machine can be fitted with.

use std::collections::HashMap;

use crate::error::{EnigmaError, Result};
use crate::rotor::Rotor;

/// Name-indexed table of available rotor definitions.
///
/// Built once at configuration time and shared read-only (behind an `Arc`)
/// by every machine drawn from it. Machines clone the rotors they insert, so
/// the pool's rotors always stay at setting 0.
#[derive(Debug, Clone, Default)]
pub struct RotorPool {
    rotors: HashMap<String, Rotor>,
    order: Vec<String>,
}

impl RotorPool {
    /// Builds a pool from `rotors`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadRotorAssignment`] if two rotors share a name.
    pub fn new(rotors: impl IntoIterator<Item = Rotor>) -> Result<Self> {
        let mut pool = RotorPool::default();
        for rotor in rotors {
            let name = rotor.name().to_string();
            if pool.rotors.contains_key(&name) {
                return Err(EnigmaError::assignment(format!(
                    "rotor {} defined twice",
                    name
                )));
            }
            pool.order.push(name.clone());
            pool.rotors.insert(name, rotor);
        }
        Ok(pool)
    }

    /// Looks a rotor up by name.
    pub fn get(&self, name: &str) -> Option<&Rotor> {
        self.rotors.get(name)
    }

    /// True iff a rotor named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.rotors.contains_key(name)
    }

    /// Number of rotors.
    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    /// True iff the pool holds no rotors.
    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }

    /// Rotor names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
