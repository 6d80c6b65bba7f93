//! Read-only access to IP personas.

use compact_str::CompactString;
use parking_lot::RwLock;
use persona::PersonaProfile;
use std::collections::BTreeMap;

/// Looks up persona snapshots owned by an external project store.
pub trait PersonaStore: Send + Sync {
    /// The persona stored under `id`, if any.
    fn lookup(&self, id: &str) -> Option<PersonaProfile>;
}

/// A persona store backed by a map, loaded from configuration.
#[derive(Debug, Default)]
pub struct MemoryPersonaStore {
    personas: RwLock<BTreeMap<CompactString, PersonaProfile>>,
}

impl MemoryPersonaStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the persona stored under `id`.
    pub fn insert(&self, id: impl Into<CompactString>, persona: PersonaProfile) {
        self.personas.write().insert(id.into(), persona);
    }

    /// Stored identifiers.
    pub fn ids(&self) -> Vec<CompactString> {
        self.personas.read().keys().cloned().collect()
    }
}

impl<K: Into<CompactString>> FromIterator<(K, PersonaProfile)> for MemoryPersonaStore {
    fn from_iter<I: IntoIterator<Item = (K, PersonaProfile)>>(iter: I) -> Self {
        Self {
            personas: RwLock::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

impl PersonaStore for MemoryPersonaStore {
    fn lookup(&self, id: &str) -> Option<PersonaProfile> {
        self.personas.read().get(id.trim()).cloned()
    }
}
