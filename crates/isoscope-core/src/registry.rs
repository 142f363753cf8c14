//! Structure registry for managing registered structures.

use std::collections::HashMap;

use crate::error::{IsoscopeError, Result};
use crate::structure::Structure;

/// Holds every registered structure.
///
/// Structures are organized by type name and then by instance name.
#[derive(Default)]
pub struct Registry {
    /// Map from type name -> (instance name -> structure)
    structures: HashMap<&'static str, HashMap<String, Box<dyn Structure>>>,
}

impl Registry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a structure.
    ///
    /// Returns an error if a structure with the same type and name exists.
    pub fn register(&mut self, structure: Box<dyn Structure>) -> Result<()> {
        let name = structure.name().to_string();
        let type_map = self.structures.entry(structure.type_name()).or_default();
        if type_map.contains_key(&name) {
            return Err(IsoscopeError::StructureExists(name));
        }
        type_map.insert(name, structure);
        Ok(())
    }

    /// Gets a reference to a structure by type and name.
    #[must_use]
    pub fn get(&self, type_name: &str, name: &str) -> Option<&dyn Structure> {
        self.structures
            .get(type_name)
            .and_then(|m| m.get(name))
            .map(|s| s.as_ref())
    }

    /// Gets a mutable reference to a structure by type and name.
    pub fn get_mut(&mut self, type_name: &str, name: &str) -> Option<&mut Box<dyn Structure>> {
        self.structures.get_mut(type_name)?.get_mut(name)
    }

    /// Checks if a structure with the given type and name exists.
    #[must_use]
    pub fn contains(&self, type_name: &str, name: &str) -> bool {
        self.structures
            .get(type_name)
            .is_some_and(|m| m.contains_key(name))
    }

    /// Removes a structure by type and name.
    pub fn remove(&mut self, type_name: &str, name: &str) -> Option<Box<dyn Structure>> {
        self.structures
            .get_mut(type_name)
            .and_then(|m| m.remove(name))
    }

    /// Removes all structures from the registry.
    pub fn clear(&mut self) {
        self.structures.clear();
    }

    /// Returns an iterator over all structures.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Structure> {
        self.structures
            .values()
            .flat_map(HashMap::values)
            .map(|s| s.as_ref())
    }

    /// Returns a mutable iterator over all structures.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Structure>> + '_ {
        self.structures.values_mut().flat_map(HashMap::values_mut)
    }

    /// Returns the total number of registered structures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.structures.values().map(HashMap::len).sum()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structures.values().all(HashMap::is_empty)
    }

    /// Runs [`Structure::update`] on every enabled structure.
    ///
    /// Returns the number of structures that re-extracted.
    pub fn update_all(&mut self) -> usize {
        self.iter_mut()
            .filter(|s| s.is_enabled())
            .map(|s| usize::from(s.update()))
            .sum()
    }
}
