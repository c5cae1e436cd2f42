//! Resolved display settings: the read-only context of a render pass.
//!
//! Produced by the configuration layer; colours are already translated to
//! the host's `§` codes.

use crate::item::TargetSet;
use crate::tag::Category;
use std::collections::BTreeMap;

/// Everything a render pass needs besides the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub numerals: NumeralPolicy,
    pub describe: DescribePolicy,
    pub shrink: ShrinkPolicy,
    pub palette: Palette,
    /// Localised text for unrecognised tags, keyed by raw tag key.
    pub vanilla: BTreeMap<String, LocalizedText>,
    pub targets: TargetSet,
}

impl DisplaySettings {
    pub fn vanilla_text(&self, raw_key: &str) -> Option<&LocalizedText> {
        self.vanilla.get(raw_key)
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            numerals: NumeralPolicy::default(),
            describe: DescribePolicy::default(),
            shrink: ShrinkPolicy::default(),
            palette: Palette::default(),
            vanilla: BTreeMap::new(),
            targets: TargetSet::default(),
        }
    }
}

/// Roman numerals for levels below `threshold`, decimals otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumeralPolicy {
    pub enabled: bool,
    pub threshold: i32,
}

impl Default for NumeralPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 10,
        }
    }
}

/// Long-form descriptions for items carrying at most `threshold` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescribePolicy {
    pub enabled: bool,
    pub threshold: usize,
    /// Column at which vanilla descriptions are wrapped.
    pub wrap: usize,
}

impl DescribePolicy {
    pub fn applies_to(&self, total_tags: usize) -> bool {
        self.enabled && total_tags <= self.threshold
    }
}

impl Default for DescribePolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 5,
            wrap: 30,
        }
    }
}

/// Comma-packing of tag lines for items carrying more than `threshold` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkPolicy {
    pub enabled: bool,
    pub threshold: usize,
    pub per_line: usize,
}

impl ShrinkPolicy {
    pub fn applies_to(&self, total_tags: usize) -> bool {
        self.enabled && total_tags > self.threshold
    }
}

impl Default for ShrinkPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 10,
            per_line: 2,
        }
    }
}

/// Colour codes, one per category plus descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub normal: String,
    pub curse: String,
    pub special: String,
    pub artifact: String,
    pub description: String,
}

impl Palette {
    pub fn category(&self, category: Category) -> &str {
        match category {
            Category::Normal => &self.normal,
            Category::Curse => &self.curse,
            Category::Special => &self.special,
            Category::Artifact => &self.artifact,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            normal: "§7".into(),
            curse: "§c".into(),
            special: "§d".into(),
            artifact: "§e".into(),
            description: "§8".into(),
        }
    }
}

/// Name and description of a tag in the active language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText {
    pub name: Option<String>,
    pub description: Option<String>,
}
