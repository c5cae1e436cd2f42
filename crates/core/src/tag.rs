//! Tag types: the enchantment-like properties carried by items.
//!
//! A tag is identified by a [`TagKey`]. Tags known to the catalog carry a
//! full [`TagDefinition`]; every tag (known or not) may also have host-side
//! facts in a [`HostTag`].

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Namespace applied to keys written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Ordered mapping of tag → level as stored on an item.
///
/// Iteration order is the order tags are rendered in.
pub type TagMap = BTreeMap<TagKey, i32>;

/// A namespaced tag identifier, e.g. `minecraft:sharpness`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagKey {
    namespace: String,
    key: String,
}

impl TagKey {
    /// Parse `namespace:key` or a bare `key` (namespace defaults to `minecraft`).
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let (namespace, key) = match raw.split_once(':') {
            Some((ns, key)) => (ns, key),
            None => (DEFAULT_NAMESPACE, raw),
        };
        if !is_valid_part(namespace) || !is_valid_part(key) {
            return Err(CatalogError::InvalidKey(raw.to_string()));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            key: key.to_string(),
        })
    }

    /// A key in the default namespace, for known constants.
    ///
    /// Input is lowercased and must otherwise be a valid key. Use
    /// [`TagKey::parse`] for anything read from outside the program.
    pub fn minecraft(key: &str) -> Self {
        let key = key.to_ascii_lowercase();
        debug_assert!(is_valid_part(&key), "invalid tag key constant: {key:?}");
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            key,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The raw key without its namespace. Vanilla localisation is keyed by this.
    pub fn key(&self) -> &str {
        &self.key
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.' | '/'))
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.key)
    }
}

impl TryFrom<String> for TagKey {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TagKey> for String {
    fn from(key: TagKey) -> Self {
        key.to_string()
    }
}

/// The closed set of tag categories. Drives colour and ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Normal,
    Curse,
    Special,
    Artifact,
}

impl Category {
    pub fn is_curse(self) -> bool {
        matches!(self, Category::Curse)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Normal => "normal",
            Category::Curse => "curse",
            Category::Special => "special",
            Category::Artifact => "artifact",
        };
        f.write_str(name)
    }
}

/// A tag registered with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TagDefinition {
    pub key: TagKey,

    #[serde(default)]
    pub category: Category,

    #[serde(default = "default_max_level")]
    pub max_level: i32,

    /// Localised display name.
    pub name: String,

    /// Localised description, one entry per line.
    #[serde(default)]
    pub description: Vec<String>,

    /// Colour of the tag's rarity, overriding the category colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity_color: Option<String>,

    /// Disabled tags are stripped from items instead of being displayed.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_max_level() -> i32 {
    1
}
fn default_true() -> bool {
    true
}

impl TagDefinition {
    pub fn new(key: TagKey, category: Category, name: impl Into<String>) -> Self {
        Self {
            key,
            category,
            max_level: default_max_level(),
            name: name.into(),
            description: Vec::new(),
            rarity_color: None,
            enabled: true,
        }
    }

    pub fn with_max_level(mut self, max_level: i32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_description<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.description = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rarity_color(mut self, color: impl Into<String>) -> Self {
        self.rarity_color = Some(color.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.max_level < 1 {
            return Err(CatalogError::InvalidDefinition {
                key: self.key.to_string(),
                reason: "max level must be at least 1".into(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidDefinition {
                key: self.key.to_string(),
                reason: "name cannot be empty".into(),
            });
        }
        Ok(())
    }
}

/// Facts the host knows about any tag, registered or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HostTag {
    pub key: TagKey,

    /// `0` when the host does not know the tag.
    #[serde(default)]
    pub max_level: i32,

    #[serde(default)]
    pub cursed: bool,
}

impl HostTag {
    pub fn new(key: TagKey, max_level: i32) -> Self {
        Self {
            key,
            max_level,
            cursed: false,
        }
    }

    pub fn cursed(mut self) -> Self {
        self.cursed = true;
        self
    }

    /// Placeholder for tags the host has never heard of.
    pub fn unknown(key: TagKey) -> Self {
        Self::new(key, 0)
    }
}
