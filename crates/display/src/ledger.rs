//! Annotation ledger: what the engine has written to an item and how to
//! undo it.
//!
//! Marker prefixes are the single record of engine-owned lines. Older
//! releases also stored a leading-line count under [`LEGACY_LENGTH_KEY`];
//! that count is honoured once during revert, removed, and never written.

use crate::marker::{is_marker, strip_markers};
use enchantlore_core::{Item, ItemMeta};
use tracing::{debug, warn};

/// Deprecated metadata key holding the number of leading engine-owned lines.
pub const LEGACY_LENGTH_KEY: &str = "lore-len";

/// Metadata key that opts an item out of annotation.
pub const SKIP_KEY: &str = "lore-skip";

/// Where an item stands with respect to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationState {
    Unannotated,
    Annotated,
    SkipMarked,
}

impl AnnotationState {
    /// Classify an item's metadata. The skip marker takes precedence.
    pub fn of(meta: &ItemMeta) -> Self {
        if is_skip_marked(meta) {
            AnnotationState::SkipMarked
        } else if has_annotations(meta) {
            AnnotationState::Annotated
        } else {
            AnnotationState::Unannotated
        }
    }
}

/// Whether the item carries an integer skip marker.
pub fn is_skip_marked(meta: &ItemMeta) -> bool {
    meta.int(SKIP_KEY).is_some()
}

/// Whether anything the engine wrote is still on the item.
pub fn has_annotations(meta: &ItemMeta) -> bool {
    meta.data.contains_key(LEGACY_LENGTH_KEY) || meta.lore.iter().any(|l| is_marker(l))
}

/// Opt an item out of annotation.
pub fn mark_skip(item: &mut Item) {
    item.meta_mut()
        .data
        .insert(SKIP_KEY.to_string(), serde_json::Value::from(1));
}

/// Opt an item back in. Returns whether a marker was present.
pub fn clear_skip(item: &mut Item) -> bool {
    match item.meta.as_mut() {
        Some(meta) => meta.data.remove(SKIP_KEY).is_some(),
        None => false,
    }
}

/// Honour and remove a legacy line count.
///
/// Deletes that many leading lore lines, never more than exist. Negative or
/// malformed counts delete nothing. The key is removed in every case.
/// Returns the number of lines deleted.
pub fn consume_legacy(meta: &mut ItemMeta) -> usize {
    let Some(raw) = meta.data.remove(LEGACY_LENGTH_KEY) else {
        return 0;
    };

    let count = match raw.as_i64() {
        Some(n) => usize::try_from(n).unwrap_or(0),
        None => {
            warn!(value = %raw, "Ignoring malformed legacy lore length");
            return 0;
        }
    };

    let removed = count.min(meta.lore.len());
    if removed < count {
        debug!(count, lore = meta.lore.len(), "Legacy lore length exceeds lore, clamping");
    }
    meta.lore.drain(..removed);
    removed
}

/// Remove everything the engine wrote: the legacy ledger, every marker line,
/// and the hide flags. User lore and metadata are left alone.
pub fn erase(meta: &mut ItemMeta) {
    let legacy = consume_legacy(meta);
    let markers = strip_markers(&mut meta.lore);
    for flag in meta.hide_flags() {
        meta.flags.remove(flag);
    }
    debug!(legacy, markers, "Erased annotation");
}

#[cfg(test)]
mod tests {
    use super::*;
    use enchantlore_core::ItemFlag;
    use serde_json::json;

    fn meta_with(lore: &[&str]) -> ItemMeta {
        ItemMeta {
            lore: lore.iter().map(|s| s.to_string()).collect(),
            ..ItemMeta::default()
        }
    }

    #[test]
    fn state_classification() {
        let mut meta = meta_with(&["user"]);
        assert_eq!(AnnotationState::of(&meta), AnnotationState::Unannotated);

        meta.lore.insert(0, "§w§7Sharpness V".into());
        assert_eq!(AnnotationState::of(&meta), AnnotationState::Annotated);

        meta.data.insert(SKIP_KEY.into(), json!(1));
        assert_eq!(AnnotationState::of(&meta), AnnotationState::SkipMarked);
    }

    #[test]
    fn legacy_key_alone_counts_as_annotated() {
        let mut meta = meta_with(&["Sharpness V"]);
        meta.data.insert(LEGACY_LENGTH_KEY.into(), json!(1));
        assert_eq!(AnnotationState::of(&meta), AnnotationState::Annotated);
    }

    #[test]
    fn non_integer_skip_marker_is_ignored() {
        let mut meta = ItemMeta::default();
        meta.data.insert(SKIP_KEY.into(), json!("yes"));
        assert!(!is_skip_marked(&meta));
    }

    #[test]
    fn legacy_count_removes_leading_lines() {
        let mut meta = meta_with(&["Sharpness V", "Unbreaking III", "user"]);
        meta.data.insert(LEGACY_LENGTH_KEY.into(), json!(2));
        assert_eq!(consume_legacy(&mut meta), 2);
        assert_eq!(meta.lore, vec!["user"]);
        assert!(!meta.data.contains_key(LEGACY_LENGTH_KEY));
    }

    #[test]
    fn oversized_legacy_count_is_clamped() {
        let mut meta = meta_with(&["a", "b"]);
        meta.data.insert(LEGACY_LENGTH_KEY.into(), json!(7));
        assert_eq!(consume_legacy(&mut meta), 2);
        assert!(meta.lore.is_empty());
        assert!(!meta.data.contains_key(LEGACY_LENGTH_KEY));
    }

    #[test]
    fn malformed_or_negative_legacy_count_deletes_nothing() {
        for value in [json!(-1), json!("three"), json!(null)] {
            let mut meta = meta_with(&["a"]);
            meta.data.insert(LEGACY_LENGTH_KEY.into(), value);
            assert_eq!(consume_legacy(&mut meta), 0);
            assert_eq!(meta.lore, vec!["a"]);
            assert!(!meta.data.contains_key(LEGACY_LENGTH_KEY));
        }
    }

    #[test]
    fn erase_handles_mixed_legacy_and_markers() {
        let mut meta = meta_with(&["Old Line", "user one", "§w§7New Line", "user two"]);
        meta.data.insert(LEGACY_LENGTH_KEY.into(), json!(1));
        meta.flags.insert(ItemFlag::HideEnchants);
        meta.flags.insert(ItemFlag::HideAttributes);

        erase(&mut meta);

        assert_eq!(meta.lore, vec!["user one", "user two"]);
        assert!(!meta.flags.contains(&ItemFlag::HideEnchants));
        assert!(meta.flags.contains(&ItemFlag::HideAttributes));
    }

    #[test]
    fn skip_helpers() {
        let mut item = Item::new("diamond_sword");
        mark_skip(&mut item);
        assert!(is_skip_marked(item.meta.as_ref().unwrap()));
        assert!(clear_skip(&mut item));
        assert!(!clear_skip(&mut item));
        assert!(!clear_skip(&mut Item::bare("diamond_sword")));
    }
}
