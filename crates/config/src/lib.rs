//! Configuration loading, validation, and management for enchantlore.
//!
//! Loads display configuration from `~/.enchantlore/config.toml` (or the file
//! named by `ENCHANTLORE_CONFIG`), validates it, and resolves it into the
//! [`DisplaySettings`] the display engine reads during a render pass.

pub mod catalog;
pub mod color;

pub use catalog::{CatalogFile, VanillaEntry};
pub use color::translate_color_codes;

use enchantlore_core::{
    CatalogError, DescribePolicy, DisplaySettings, LocalizedText, NumeralPolicy, Palette,
    ShrinkPolicy, TargetSet,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Materials that may be annotated. Omitted = built-in set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,

    /// Lore formatting options
    #[serde(default)]
    pub lore: LoreConfig,

    /// Language strings and colours
    #[serde(default)]
    pub lang: LangConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoreConfig {
    #[serde(default = "default_true")]
    pub use_numerals: bool,

    #[serde(default = "default_numbers_threshold")]
    pub use_numbers_above_threshold: i32,

    #[serde(default)]
    pub describe: DescribeConfig,

    #[serde(default)]
    pub shrink: ShrinkConfig,
}

fn default_true() -> bool {
    true
}
fn default_numbers_threshold() -> i32 {
    10
}

impl Default for LoreConfig {
    fn default() -> Self {
        Self {
            use_numerals: true,
            use_numbers_above_threshold: default_numbers_threshold(),
            describe: DescribeConfig::default(),
            shrink: ShrinkConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DescribeConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_describe_before")]
    pub before_lines: usize,

    #[serde(default = "default_wrap")]
    pub wrap: usize,
}

fn default_describe_before() -> usize {
    5
}
fn default_wrap() -> usize {
    30
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            before_lines: default_describe_before(),
            wrap: default_wrap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShrinkConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_shrink_after")]
    pub after_lines: usize,

    #[serde(default = "default_per_line")]
    pub maximum_per_line: usize,
}

fn default_shrink_after() -> usize {
    10
}
fn default_per_line() -> usize {
    2
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            after_lines: default_shrink_after(),
            maximum_per_line: default_per_line(),
        }
    }
}

/// Language file contents: colours use `&` codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LangConfig {
    #[serde(default = "default_description_color")]
    pub description_color: String,

    #[serde(default = "default_curse_color")]
    pub curse_color: String,

    #[serde(default = "default_special_color")]
    pub special_color: String,

    #[serde(default = "default_artifact_color")]
    pub artifact_color: String,

    #[serde(default = "default_normal_color")]
    pub not_curse_color: String,

    /// Names and descriptions of unrecognised tags, keyed by raw key.
    #[serde(default)]
    pub vanilla: BTreeMap<String, VanillaLang>,
}

fn default_description_color() -> String {
    "&8".into()
}
fn default_curse_color() -> String {
    "&c".into()
}
fn default_special_color() -> String {
    "&d".into()
}
fn default_artifact_color() -> String {
    "&e".into()
}
fn default_normal_color() -> String {
    "&7".into()
}

impl Default for LangConfig {
    fn default() -> Self {
        Self {
            description_color: default_description_color(),
            curse_color: default_curse_color(),
            special_color: default_special_color(),
            artifact_color: default_artifact_color(),
            not_curse_color: default_normal_color(),
            vanilla: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VanillaLang {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DisplayConfig {
    /// Load configuration from `ENCHANTLORE_CONFIG` or the default path.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("ENCHANTLORE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::config_dir().join("config.toml"));
        Self::load_from(&path)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<inline>".into(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".enchantlore")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lore.shrink.maximum_per_line == 0 {
            return Err(ConfigError::ValidationError(
                "lore.shrink.maximum-per-line must be at least 1".into(),
            ));
        }

        if self.lore.describe.wrap == 0 {
            return Err(ConfigError::ValidationError(
                "lore.describe.wrap must be at least 1".into(),
            ));
        }

        if self.lore.use_numbers_above_threshold < 0 {
            return Err(ConfigError::ValidationError(
                "lore.use-numbers-above-threshold cannot be negative".into(),
            ));
        }

        Ok(())
    }

    /// Resolve into render settings, translating `&` colour codes.
    pub fn settings(&self) -> DisplaySettings {
        let lang = &self.lang;
        let palette = Palette {
            normal: translate_color_codes('&', &lang.not_curse_color),
            curse: translate_color_codes('&', &lang.curse_color),
            special: translate_color_codes('&', &lang.special_color),
            artifact: translate_color_codes('&', &lang.artifact_color),
            description: translate_color_codes('&', &lang.description_color),
        };

        let vanilla = lang
            .vanilla
            .iter()
            .map(|(key, text)| {
                let text = LocalizedText {
                    name: text.name.as_deref().map(|n| translate_color_codes('&', n)),
                    description: text
                        .description
                        .as_deref()
                        .map(|d| translate_color_codes('&', d)),
                };
                (key.clone(), text)
            })
            .collect();

        let targets = match &self.targets {
            Some(materials) => TargetSet::new(materials.iter().cloned()),
            None => TargetSet::default(),
        };

        DisplaySettings {
            numerals: NumeralPolicy {
                enabled: self.lore.use_numerals,
                threshold: self.lore.use_numbers_above_threshold,
            },
            describe: DescribePolicy {
                enabled: self.lore.describe.enabled,
                threshold: self.lore.describe.before_lines,
                wrap: self.lore.describe.wrap,
            },
            shrink: ShrinkPolicy {
                enabled: self.lore.shrink.enabled,
                threshold: self.lore.shrink.after_lines,
                per_line: self.lore.shrink.maximum_per_line,
            },
            palette,
            vanilla,
            targets,
        }
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Catalog rejected: {0}")]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = DisplayConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.lore.use_numerals);
        assert_eq!(config.lore.shrink.maximum_per_line, 2);
    }

    #[test]
    fn default_settings_match_default_palette() {
        let settings = DisplayConfig::default().settings();
        assert_eq!(settings.palette, Palette::default());
        assert_eq!(settings.numerals.threshold, 10);
        assert!(settings.targets.contains("diamond_sword"));
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = DisplayConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: DisplayConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.lore.describe.wrap, config.lore.describe.wrap);
        assert_eq!(parsed.lang.curse_color, config.lang.curse_color);
    }

    #[test]
    fn kebab_case_options_parse() {
        let config = DisplayConfig::from_toml(
            r#"
targets = ["stick"]

[lore]
use-numerals = false
use-numbers-above-threshold = 4

[lore.describe]
enabled = true
before-lines = 2
wrap = 20

[lore.shrink]
enabled = true
after-lines = 6
maximum-per-line = 3

[lang]
curse-color = "&4&l"

[lang.vanilla.sharpness]
name = "&fSharpness"
description = "Increases melee damage."
"#,
        )
        .unwrap();

        let settings = config.settings();
        assert!(!settings.numerals.enabled);
        assert_eq!(settings.numerals.threshold, 4);
        assert!(settings.describe.enabled);
        assert_eq!(settings.describe.threshold, 2);
        assert_eq!(settings.describe.wrap, 20);
        assert_eq!(settings.shrink.threshold, 6);
        assert_eq!(settings.shrink.per_line, 3);
        assert_eq!(settings.palette.curse, "§4§l");
        assert_eq!(settings.palette.normal, "§7");
        assert!(settings.targets.contains("stick"));
        assert!(!settings.targets.contains("diamond_sword"));

        let sharpness = settings.vanilla_text("sharpness").unwrap();
        assert_eq!(sharpness.name.as_deref(), Some("§fSharpness"));
        assert_eq!(sharpness.description.as_deref(), Some("Increases melee damage."));
    }

    #[test]
    fn zero_per_line_rejected() {
        let result = DisplayConfig::from_toml("[lore.shrink]\nmaximum-per-line = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn zero_wrap_rejected() {
        let result = DisplayConfig::from_toml("[lore.describe]\nwrap = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = DisplayConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert!(result.unwrap().lore.shrink.enabled);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lore]\nuse-numerals = false").unwrap();
        let config = DisplayConfig::load_from(file.path()).unwrap();
        assert!(!config.lore.use_numerals);
    }

    #[test]
    fn unparsable_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lore\nbroken").unwrap();
        let err = DisplayConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = DisplayConfig::default_toml();
        assert!(toml_str.contains("use-numerals"));
        assert!(toml_str.contains("maximum-per-line"));
    }
}
