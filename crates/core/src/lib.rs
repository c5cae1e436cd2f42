//! # enchantlore core
//!
//! Domain types, traits, and error definitions for the enchantlore display
//! engine. This crate defines the model the configuration and display crates
//! work against:
//! - items, their lore, metadata and visibility flags
//! - tags, their categories, and the catalog they are looked up in
//! - the resolved settings a render pass reads

pub mod catalog;
pub mod error;
pub mod item;
pub mod settings;
pub mod tag;

// Re-export key types at crate root for ergonomics
pub use catalog::{TagCatalog, TagRegistry};
pub use error::CatalogError;
pub use item::{Item, ItemFlag, ItemMeta, ItemStore, MetaKind, Metadata, TargetSet};
pub use settings::{DescribePolicy, DisplaySettings, LocalizedText, NumeralPolicy, Palette, ShrinkPolicy};
pub use tag::{Category, HostTag, TagDefinition, TagKey, TagMap};
