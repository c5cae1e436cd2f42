//! Enchantment lore display: a reversible overlay on item lore.
//!
//! The engine writes a formatted listing of an item's tags to the top of its
//! lore and can remove exactly what it wrote. Lines it owns carry an
//! invisible prefix, so user-written lore is never touched.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌─────────────┐    ┌─────────────┐
//! │  revert  │───▶│  render  │───▶│  partition  │───▶│  write back │
//! │ (ledger) │    │ each tag │    │ (if many)   │    │ lore+flags  │
//! └──────────┘    └──────────┘    └─────────────┘    └─────────────┘
//!       │
//!  tag set changed? ──▶ abort, original kept
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use enchantlore_core::{DisplaySettings, HostTag, Item, TagKey, TagRegistry};
//! use enchantlore_display::OverlayEngine;
//!
//! let mut registry = TagRegistry::new();
//! registry.register_host(HostTag::new(TagKey::minecraft("sharpness"), 5));
//! let engine = OverlayEngine::new(Arc::new(registry), DisplaySettings::default());
//!
//! let sword = Item::new("diamond_sword")
//!     .with_tag(TagKey::minecraft("sharpness"), 4)
//!     .with_lore(["Forged in fire"]);
//! let shown = engine.apply(&sword);
//! assert_eq!(shown.lore(), &["§w§7sharpness IV", "Forged in fire"]);
//! assert_eq!(engine.revert(&shown).lore(), sword.lore());
//! ```

mod engine;
pub mod ledger;
pub mod marker;
pub mod numeral;
pub mod partition;
pub mod renderer;
pub mod wrap;

pub use engine::{ApplyOutcome, OverlayEngine};
pub use ledger::AnnotationState;
pub use marker::{MARKER_PREFIX, MarkerLine};
pub use numeral::format_level;
pub use partition::partition;
pub use renderer::{RenderContext, RenderedTag, TagRenderer};

/// Why an apply left an item alone.
///
/// Never surfaced to callers as an error: the engine logs it and returns the
/// input unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    #[error("material '{0}' is not a display target")]
    Unsupported(String),

    #[error("item has no display metadata")]
    MissingMeta,

    #[error("item is marked to skip annotation")]
    SkipMarked,

    #[error("tag set changed during render ({before} tags before, {after} after)")]
    Stale { before: usize, after: usize },
}

impl DisplayError {
    pub fn outcome(&self) -> ApplyOutcome {
        match self {
            DisplayError::Unsupported(_) => ApplyOutcome::Unsupported,
            DisplayError::MissingMeta => ApplyOutcome::MissingMeta,
            DisplayError::SkipMarked => ApplyOutcome::SkipMarked,
            DisplayError::Stale { .. } => ApplyOutcome::Stale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_outcomes() {
        assert_eq!(
            DisplayError::Stale { before: 2, after: 1 }.outcome(),
            ApplyOutcome::Stale
        );
        assert_eq!(
            DisplayError::Unsupported("dirt".into()).outcome(),
            ApplyOutcome::Unsupported
        );
    }

    #[test]
    fn stale_message_mentions_counts() {
        let msg = DisplayError::Stale { before: 3, after: 2 }.to_string();
        assert!(msg.contains("3 tags before"));
        assert!(msg.contains("2 after"));
    }
}
