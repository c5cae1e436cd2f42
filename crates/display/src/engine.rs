//! Overlay engine: writes and removes the tag listing in an item's lore.
//!
//! Every apply first reverts whatever the engine wrote before, then renders
//! the current tags from scratch, so applying twice gives the same lore as
//! applying once. If the tag set seen after the revert differs from the one
//! seen before it, the item changed underneath us and nothing is written.

use crate::DisplayError;
use crate::ledger::{self, AnnotationState};
use crate::partition::partition;
use crate::renderer::{RenderContext, TagRenderer};
use enchantlore_core::{DisplaySettings, Item, ItemStore, TagCatalog, TagKey};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// What an apply did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Lore and flags were rewritten.
    Annotated,
    /// The material is not a display target.
    Unsupported,
    /// The item has no display metadata.
    MissingMeta,
    /// The item opted out of annotation.
    SkipMarked,
    /// The tag set changed mid-pass; the original was kept.
    Stale,
}

/// The overlay engine.
///
/// Holds the catalog and the current settings. Settings are swapped whole by
/// [`OverlayEngine::update`]; each pass works against the snapshot it
/// started with.
pub struct OverlayEngine {
    catalog: Arc<dyn TagCatalog>,
    settings: RwLock<Arc<DisplaySettings>>,
}

impl OverlayEngine {
    pub fn new(catalog: Arc<dyn TagCatalog>, settings: DisplaySettings) -> Self {
        Self {
            catalog,
            settings: RwLock::new(Arc::new(settings)),
        }
    }

    /// Replace the settings used by subsequent passes.
    pub fn update(&self, settings: DisplaySettings) {
        let settings = Arc::new(settings);
        match self.settings.write() {
            Ok(mut guard) => *guard = settings,
            Err(poisoned) => *poisoned.into_inner() = settings,
        }
        info!("Display settings reloaded");
    }

    /// The current settings snapshot.
    pub fn settings(&self) -> Arc<DisplaySettings> {
        match self.settings.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Annotation state of an item, `None` if it has no display metadata.
    pub fn state(&self, item: &Item) -> Option<AnnotationState> {
        item.meta.as_ref().map(AnnotationState::of)
    }

    /// Remove everything the engine wrote to `item`.
    ///
    /// Unsupported, meta-less and unannotated items come back unchanged.
    pub fn revert(&self, item: &Item) -> Item {
        let settings = self.settings();
        revert_with(&settings, item.clone())
    }

    /// Annotate `item`, returning the original on any abort.
    pub fn apply(&self, item: &Item) -> Item {
        self.apply_with_outcome(item).0
    }

    /// [`OverlayEngine::apply`], also reporting what happened.
    pub fn apply_with_outcome(&self, item: &Item) -> (Item, ApplyOutcome) {
        let settings = self.settings();
        let result = precheck(&settings, item)
            .and_then(|()| self.annotate(&settings, item, revert_with(&settings, item.clone())));
        match result {
            Ok(annotated) => (annotated, ApplyOutcome::Annotated),
            Err(reason) => {
                debug!(material = %item.material, %reason, "Lore left unchanged");
                (item.clone(), reason.outcome())
            }
        }
    }

    /// Annotate a live item in place.
    ///
    /// The store is read twice: once for the reference tag set and once for
    /// the copy that gets reverted and rebuilt. Nothing is written unless both
    /// reads agree on the tags.
    pub fn apply_to<S: ItemStore + ?Sized>(&self, store: &S) -> ApplyOutcome {
        let settings = self.settings();
        let original = store.read();
        let result = precheck(&settings, &original)
            .and_then(|()| self.annotate(&settings, &original, revert_with(&settings, store.read())));
        match result {
            Ok(annotated) => {
                store.write(annotated);
                ApplyOutcome::Annotated
            }
            Err(reason) => {
                debug!(material = %original.material, %reason, "Live item left unchanged");
                reason.outcome()
            }
        }
    }

    /// Revert a live item in place. Returns whether anything was removed.
    pub fn revert_in<S: ItemStore + ?Sized>(&self, store: &S) -> bool {
        let settings = self.settings();
        let item = store.read();
        let reverted = revert_with(&settings, item.clone());
        let changed = reverted != item;
        if changed {
            store.write(reverted);
        }
        changed
    }

    /// Render the tags of `working` (already reverted) on top of its user lore.
    ///
    /// Describe and shrink thresholds count the tags left after disabled ones
    /// are removed, so a second pass sees the same total as the first.
    fn annotate(
        &self,
        settings: &DisplaySettings,
        original: &Item,
        mut working: Item,
    ) -> Result<Item, DisplayError> {
        let before = original.tags();
        let meta = working.meta.as_mut().ok_or(DisplayError::MissingMeta)?;
        if meta.tags != before {
            return Err(DisplayError::Stale {
                before: before.len(),
                after: meta.tags.len(),
            });
        }

        let (shown, disabled): (Vec<(&TagKey, &i32)>, Vec<(&TagKey, &i32)>) = meta
            .tags
            .iter()
            .partition(|(key, _)| self.catalog.definition(key).is_none_or(|d| d.enabled));

        let renderer = TagRenderer::new(self.catalog.as_ref());
        let ctx = RenderContext::new(settings, shown.len());

        let mut lines = Vec::new();
        let mut curse_lines = Vec::new();
        for (key, &level) in shown.iter().copied() {
            let rendered = renderer.render(key, level, &ctx);
            if rendered.category.is_curse() {
                curse_lines.extend(rendered.lines);
            } else {
                lines.extend(rendered.lines);
            }
        }
        lines.extend(curse_lines);

        if settings.shrink.applies_to(shown.len()) {
            lines = partition(&lines, settings.shrink.per_line);
        }

        let disabled: Vec<TagKey> = disabled.into_iter().map(|(key, _)| key.clone()).collect();
        for key in &disabled {
            meta.tags.remove(key);
        }
        if !disabled.is_empty() {
            debug!(count = disabled.len(), "Removed disabled tags");
        }

        let user_lore = std::mem::take(&mut meta.lore);
        if !lines.is_empty() {
            for flag in meta.hide_flags() {
                meta.flags.insert(*flag);
            }
        }
        meta.lore = lines.into_iter().map(String::from).chain(user_lore).collect();

        debug!(material = %working.material, tags = before.len(), "Annotated item");
        Ok(working)
    }
}

/// Reasons an item is not annotated at all, checked before any work.
fn precheck(settings: &DisplaySettings, item: &Item) -> Result<(), DisplayError> {
    if !settings.targets.contains(&item.material) {
        return Err(DisplayError::Unsupported(item.material.clone()));
    }
    let meta = item.meta.as_ref().ok_or(DisplayError::MissingMeta)?;
    if ledger::is_skip_marked(meta) {
        return Err(DisplayError::SkipMarked);
    }
    Ok(())
}

fn revert_with(settings: &DisplaySettings, mut item: Item) -> Item {
    if !settings.targets.contains(&item.material) {
        return item;
    }
    let Some(meta) = item.meta.as_mut() else {
        return item;
    };
    if ledger::has_annotations(meta) {
        ledger::erase(meta);
    }
    item
}
