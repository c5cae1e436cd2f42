//! Tag rendering: one applied tag into its lore lines.
//!
//! Category and colour resolution are plain lookups over the closed
//! [`Category`] set; the renderer then builds the name line (with a level
//! suffix where one applies) and, when the describe policy allows it, the
//! description lines.

use crate::marker::MarkerLine;
use crate::numeral::format_with;
use crate::wrap::wrap_words;
use enchantlore_core::{Category, DisplaySettings, HostTag, Palette, TagCatalog, TagDefinition, TagKey};
use tracing::trace;

/// Per-pass context shared by every tag on an item.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub settings: &'a DisplaySettings,
    /// Number of tags on the item being rendered.
    pub total_tags: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(settings: &'a DisplaySettings, total_tags: usize) -> Self {
        Self {
            settings,
            total_tags,
        }
    }

    /// Whether description lines are emitted for this item.
    pub fn describe(&self) -> bool {
        self.settings.describe.applies_to(self.total_tags)
    }
}

/// The lines produced for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTag {
    pub category: Category,
    /// Name line first, then description lines.
    pub lines: Vec<MarkerLine>,
}

/// Category of a tag: the registered one, otherwise `Curse` if the host
/// marks it cursed and `Normal` if not.
pub fn resolve_category(definition: Option<&TagDefinition>, host: Option<&HostTag>) -> Category {
    match definition {
        Some(def) => def.category,
        None if host.is_some_and(|h| h.cursed) => Category::Curse,
        None => Category::Normal,
    }
}

/// Colour of a tag's name. Curses always use the curse colour.
pub fn resolve_color<'a>(category: Category, palette: &'a Palette, rarity_color: Option<&'a str>) -> &'a str {
    match rarity_color {
        Some(color) if !category.is_curse() => color,
        _ => palette.category(category),
    }
}

/// Whether a level suffix follows the name.
pub fn shows_level(category: Category, max_level: i32, level: i32) -> bool {
    !(category.is_curse() || (max_level == 1 && level == 1))
}

/// Renders tags against a catalog.
pub struct TagRenderer<'a> {
    catalog: &'a dyn TagCatalog,
}

impl<'a> TagRenderer<'a> {
    pub fn new(catalog: &'a dyn TagCatalog) -> Self {
        Self { catalog }
    }

    pub fn render(&self, key: &TagKey, level: i32, ctx: &RenderContext<'_>) -> RenderedTag {
        let settings = ctx.settings;
        let definition = self.catalog.definition(key);
        let host = self.catalog.host_tag(key);

        let category = resolve_category(definition, host);
        let color = resolve_color(
            category,
            &settings.palette,
            definition.and_then(|d| d.rarity_color.as_deref()),
        );

        let (mut name, description, max_level) = match definition {
            Some(def) => (def.name.clone(), def.description.clone(), def.max_level),
            None => {
                let text = settings.vanilla_text(key.key());
                let name = text
                    .and_then(|t| t.name.clone())
                    .unwrap_or_else(|| key.key().to_string());
                let description = text
                    .and_then(|t| t.description.as_deref())
                    .map(|d| wrap_words(d, settings.describe.wrap))
                    .unwrap_or_default();
                (name, description, host.map_or(0, |h| h.max_level))
            }
        };

        if shows_level(category, max_level, level) {
            name.push(' ');
            name.push_str(&format_with(level, &settings.numerals));
        }

        let mut lines = vec![MarkerLine::colored(color, &name)];
        if ctx.describe() {
            lines.extend(
                description
                    .iter()
                    .map(|line| MarkerLine::colored(&settings.palette.description, line)),
            );
        }

        trace!(tag = %key, level, category = %category, lines = lines.len(), "Rendered tag");

        RenderedTag { category, lines }
    }
}
