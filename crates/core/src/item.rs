//! Item model: snapshots of host items the display engine transforms.
//!
//! The engine never holds a live item. It receives an [`Item`] snapshot,
//! works on a copy and hands back the result. Hosts that share items across
//! threads expose them through [`ItemStore`].

use crate::tag::TagMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::RwLock;

/// Persisted per-item key/value data.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// An item as seen by the display engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Host material identifier, e.g. `diamond_sword`.
    pub material: String,

    /// Display metadata. Items without it are never annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ItemMeta>,
}

impl Item {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            meta: Some(ItemMeta::default()),
        }
    }

    /// An item of a storage kind (enchanted-book-like): its tags are stored
    /// rather than applied.
    pub fn storage(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            meta: Some(ItemMeta {
                kind: MetaKind::Storage,
                ..ItemMeta::default()
            }),
        }
    }

    /// An item with no display metadata at all.
    pub fn bare(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            meta: None,
        }
    }

    pub fn with_tag(mut self, key: crate::tag::TagKey, level: i32) -> Self {
        self.meta_mut().tags.insert(key, level);
        self
    }

    pub fn with_lore<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta_mut().lore = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Tags on the item; empty when there is no metadata.
    pub fn tags(&self) -> TagMap {
        self.meta.as_ref().map(|m| m.tags.clone()).unwrap_or_default()
    }

    /// Lore lines; empty when there is no metadata.
    pub fn lore(&self) -> &[String] {
        self.meta.as_ref().map(|m| m.lore.as_slice()).unwrap_or(&[])
    }

    /// Metadata, created on demand.
    pub fn meta_mut(&mut self) -> &mut ItemMeta {
        self.meta.get_or_insert_with(ItemMeta::default)
    }
}

/// Where an item keeps its tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaKind {
    /// Tags are applied to the item itself.
    #[default]
    Standard,
    /// Tags are stored for later application (enchanted books).
    Storage,
}

/// Display metadata of an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    #[serde(default)]
    pub kind: MetaKind,

    /// Applied (or stored, for [`MetaKind::Storage`]) tags and their levels.
    #[serde(default)]
    pub tags: TagMap,

    #[serde(default)]
    pub lore: Vec<String>,

    #[serde(default)]
    pub data: Metadata,

    #[serde(default)]
    pub flags: BTreeSet<ItemFlag>,
}

impl ItemMeta {
    /// Flags that hide the host's own tag listing for this kind of meta.
    pub fn hide_flags(&self) -> &'static [ItemFlag] {
        match self.kind {
            MetaKind::Standard => &[ItemFlag::HideEnchants],
            MetaKind::Storage => &[ItemFlag::HideEnchants, ItemFlag::HidePotionEffects],
        }
    }

    /// An integer stored under `key`, if present and well-formed.
    pub fn int(&self, key: &str) -> Option<i32> {
        self.data
            .get(key)
            .and_then(serde_json::Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
    }
}

/// Visibility flags understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemFlag {
    HideEnchants,
    HideAttributes,
    HideUnbreakable,
    HideDestroys,
    HidePlacedOn,
    HidePotionEffects,
    HideDye,
}

/// Materials the engine is allowed to annotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet {
    materials: HashSet<String>,
}

const TOOL_TIERS: &[&str] = &["wooden", "stone", "iron", "golden", "diamond", "netherite"];
const TOOLS: &[&str] = &["sword", "pickaxe", "axe", "shovel", "hoe"];
const ARMOR_TIERS: &[&str] = &["leather", "chainmail", "iron", "golden", "diamond", "netherite"];
const ARMOR: &[&str] = &["helmet", "chestplate", "leggings", "boots"];
const MISC: &[&str] = &[
    "book",
    "enchanted_book",
    "bow",
    "crossbow",
    "trident",
    "fishing_rod",
    "shears",
    "flint_and_steel",
    "carrot_on_a_stick",
    "warped_fungus_on_a_stick",
    "shield",
    "elytra",
    "turtle_helmet",
    "carved_pumpkin",
    "player_head",
];

impl TargetSet {
    pub fn new<I, S>(materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            materials: materials
                .into_iter()
                .map(|m| m.into().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, material: &str) -> bool {
        self.materials.contains(&material.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for TargetSet {
    /// Every enchantable tool, weapon and armour piece, plus books.
    fn default() -> Self {
        let tools = TOOL_TIERS
            .iter()
            .flat_map(|tier| TOOLS.iter().map(move |tool| format!("{tier}_{tool}")));
        let armor = ARMOR_TIERS
            .iter()
            .flat_map(|tier| ARMOR.iter().map(move |piece| format!("{tier}_{piece}")));
        let misc = MISC.iter().map(|m| m.to_string());
        Self::new(tools.chain(armor).chain(misc))
    }
}

/// Host-side access to a live, possibly shared, item.
///
/// Reads may observe changes made by other parties between calls; the
/// engine relies on that to detect stale tag sets.
pub trait ItemStore {
    /// A snapshot of the item as it is right now.
    fn read(&self) -> Item;

    /// Replace the item with a transformed copy.
    fn write(&self, item: Item);
}

impl ItemStore for RwLock<Item> {
    fn read(&self) -> Item {
        match RwLock::read(self) {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn write(&self, item: Item) {
        match RwLock::write(self) {
            Ok(mut guard) => *guard = item,
            Err(poisoned) => *poisoned.into_inner() = item,
        }
    }
}
