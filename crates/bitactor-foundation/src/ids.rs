//! Typed index identifiers for runtime entities.
//!
//! Actors, domains, connections, and patterns live in fixed-capacity pools
//! owned by their parents. References between components are therefore
//! plain indices wrapped in typed newtypes — never pointers. The wrappers
//! keep cross-component addressing type-safe while staying `Copy` and free
//! to pass through the hot path.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_index {
    ($(#[$meta:meta])* $name:ident($repr:ty)) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
            Deserialize,
        )]
        pub struct $name(pub $repr);

        impl $name {
            /// Creates a new identifier from a raw index.
            pub const fn new(index: $repr) -> Self {
                Self(index)
            }

            /// Returns the raw index.
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$repr> for $name {
            fn from(index: $repr) -> Self {
                Self(index)
            }
        }
    };
}

define_index! {
    /// Index of a domain within its matrix (`< MAX_DOMAINS`).
    DomainId(u8)
}

define_index! {
    /// Index of an actor slot within its domain pool (`< MAX_ACTORS_PER_DOMAIN`).
    ActorSlot(u16)
}

define_index! {
    /// Index of an entanglement connection within its oracle (`< MAX_CONNECTIONS`).
    ConnectionId(u8)
}

define_index! {
    /// Index of a learning pattern within its actor (`< MAX_PATTERNS_PER_ACTOR`).
    PatternId(u8)
}

define_index! {
    /// Slot of a dark triple within the dark-triple system (`< MAX_DARK_TRIPLES`).
    TripleSlot(u8)
}

/// Fully qualified actor address: domain plus slot.
///
/// Registry entries and telemetry spans address actors with this form;
/// within a domain the bare [`ActorSlot`] suffices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorRef {
    /// Owning domain.
    pub domain: DomainId,
    /// Slot within the domain's actor pool.
    pub slot: ActorSlot,
}

impl ActorRef {
    /// Creates an actor reference from a domain and slot.
    pub const fn new(domain: DomainId, slot: ActorSlot) -> Self {
        Self { domain, slot }
    }
}

impl fmt::Display for ActorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.slot)
    }
}
