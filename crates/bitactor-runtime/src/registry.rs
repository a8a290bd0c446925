//! Symbolic actor addressing.
//!
//! The registry maps short names to actor references so the entanglement
//! layer and embedders can address actors symbolically. It is array-backed
//! with a linear scan: N is at most 256 and the entries are contiguous,
//! which beats a hash map at this size and keeps lookup allocation-free.
//!
//! Mutated only during setup; read-only once ticking begins. Entries are
//! non-owning — the registry never outlives the actors it names.

use bitactor_foundation::{ActorRef, MAX_NAME_LEN, MAX_REGISTRY_ENTRIES};

use crate::error::{Result, RuntimeError};

#[derive(Debug, Clone)]
struct RegistryEntry {
    name: String,
    actor: ActorRef,
}

/// Array-backed name → actor map.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name to an actor reference.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::NameTooLong`] past 64 bytes.
    /// - [`RuntimeError::DuplicateName`] if the name is already bound.
    /// - [`RuntimeError::CapacityExceeded`] past 256 entries.
    pub fn register(&mut self, name: &str, actor: ActorRef) -> Result<()> {
        if name.len() > MAX_NAME_LEN {
            return Err(RuntimeError::NameTooLong {
                len: name.len(),
                max: MAX_NAME_LEN,
            });
        }
        if self.entries.iter().any(|e| e.name == name) {
            return Err(RuntimeError::DuplicateName(name.to_string()));
        }
        if self.entries.len() >= MAX_REGISTRY_ENTRIES {
            return Err(RuntimeError::CapacityExceeded {
                what: "registry entries",
                capacity: MAX_REGISTRY_ENTRIES,
            });
        }
        self.entries.push(RegistryEntry {
            name: name.to_string(),
            actor,
        });
        Ok(())
    }

    /// Resolve a name to its actor reference.
    pub fn lookup(&self, name: &str) -> Option<ActorRef> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.actor)
    }

    /// Bound entry count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
