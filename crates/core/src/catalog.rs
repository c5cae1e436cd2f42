//! Tag catalog: where the display engine looks tags up.
//!
//! Registered tags come with a full [`TagDefinition`]. Anything else on an
//! item is an unrecognised (vanilla or foreign) tag, described only by the
//! host facts in a [`HostTag`].

use crate::error::CatalogError;
use crate::tag::{HostTag, TagDefinition, TagKey};
use std::collections::HashMap;

/// Read-only view of the tag catalog.
pub trait TagCatalog: Send + Sync {
    /// The registered definition for a tag, or `None` if unrecognised.
    fn definition(&self, key: &TagKey) -> Option<&TagDefinition>;

    /// Host facts for a tag, or `None` if the host does not know it either.
    fn host_tag(&self, key: &TagKey) -> Option<&HostTag>;
}

/// An in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    definitions: HashMap<TagKey, TagDefinition>,
    host: HashMap<TagKey, HostTag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Keys must be unique.
    pub fn register(&mut self, definition: TagDefinition) -> Result<(), CatalogError> {
        definition.validate()?;
        if self.definitions.contains_key(&definition.key) {
            return Err(CatalogError::DuplicateKey(definition.key.to_string()));
        }
        tracing::debug!(key = %definition.key, category = %definition.category, "Registered tag");
        self.definitions.insert(definition.key.clone(), definition);
        Ok(())
    }

    /// Record host facts for a tag. Replaces any earlier entry.
    pub fn register_host(&mut self, host: HostTag) {
        self.host.insert(host.key.clone(), host);
    }

    /// Replace the host's maximum level for a tag, creating the entry if needed.
    pub fn override_max_level(&mut self, key: &TagKey, max_level: i32) {
        self.host
            .entry(key.clone())
            .or_insert_with(|| HostTag::unknown(key.clone()))
            .max_level = max_level;
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> Vec<&TagKey> {
        let mut keys: Vec<&TagKey> = self.definitions.keys().collect();
        keys.sort();
        keys
    }
}

impl TagCatalog for TagRegistry {
    fn definition(&self, key: &TagKey) -> Option<&TagDefinition> {
        self.definitions.get(key)
    }

    fn host_tag(&self, key: &TagKey) -> Option<&HostTag> {
        self.host.get(key)
    }
}
