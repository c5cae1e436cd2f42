//! Catalog files: registered tags and host facts declared in TOML.
//!
//! ```toml
//! [[enchants]]
//! key = "ecoenchants:cubism"
//! category = "normal"
//! max-level = 5
//! name = "Cubism"
//! description = ["Deals more damage to slimes"]
//! rarity-color = "&9"
//!
//! [[vanilla]]
//! key = "sharpness"
//! max-level = 5
//!
//! [[vanilla]]
//! key = "binding_curse"
//! max-level = 1
//! cursed = true
//! ```

use crate::ConfigError;
use crate::color::translate_color_codes;
use enchantlore_core::{HostTag, TagDefinition, TagKey, TagRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The parsed contents of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub enchants: Vec<TagDefinition>,

    #[serde(default)]
    pub vanilla: Vec<VanillaEntry>,
}

/// Host facts for one tag, with an optional configured max-level override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VanillaEntry {
    pub key: TagKey,

    #[serde(default)]
    pub max_level: i32,

    #[serde(default)]
    pub cursed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_level_override: Option<i32>,
}

impl CatalogFile {
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<inline>".into(),
            reason: e.to_string(),
        })
    }

    /// Load a catalog file. Unlike settings, a missing catalog is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Build a registry, translating `&` colour codes in names, descriptions
    /// and rarity colours.
    pub fn into_registry(self) -> Result<TagRegistry, ConfigError> {
        let mut registry = TagRegistry::new();
        for mut definition in self.enchants {
            definition.name = translate_color_codes('&', &definition.name);
            definition.description = definition
                .description
                .iter()
                .map(|line| translate_color_codes('&', line))
                .collect();
            definition.rarity_color = definition
                .rarity_color
                .as_deref()
                .map(|c| translate_color_codes('&', c));
            registry.register(definition)?;
        }
        for entry in self.vanilla {
            let mut host = HostTag::new(entry.key.clone(), entry.max_level);
            host.cursed = entry.cursed;
            registry.register_host(host);
            if let Some(max_level) = entry.max_level_override {
                registry.override_max_level(&entry.key, max_level);
            }
        }
        tracing::info!(tags = registry.len(), "Catalog loaded");
        Ok(registry)
    }
}
