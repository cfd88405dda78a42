//! Filter configuration for the build command

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use simdb::{FilterConfig, FilterSettings};
use std::fs;
use std::path::Path;

/// File name of the filter configuration inside the inputs directory
pub const FILTERS_FILE: &str = "filters.toml";

/// Extra icon lists, the `[icons]` table of `filters.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsSection {
    pub extra_item_icons: Vec<i32>,
    pub shared_spell_icons: Vec<i32>,
}

/// Contents of `filters.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersFile {
    #[serde(flatten)]
    pub settings: FilterSettings,
    pub icons: IconsSection,
}

impl FiltersFile {
    /// Load `filters.toml` from the inputs directory
    pub fn load(inputs_dir: &Path) -> Result<Self> {
        let path = inputs_dir.join(FILTERS_FILE);
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read filters from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse filters file {}", path.display()))
    }

    /// Compile the deny patterns
    pub fn compile(&self) -> Result<FilterConfig> {
        FilterConfig::try_from(self.settings.clone()).context("Invalid filter configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simdb::filters::DEFAULT_MAX_ITEM_LEVEL;

    #[test]
    fn test_parse_full_file() {
        let file: FiltersFile = toml::from_str(
            r#"
            max_item_level = 300
            item_deny_list = [1, 2]
            item_allow_list = [3]
            deny_name_patterns = ["^Test ", "Deprecated"]

            [icons]
            extra_item_icons = [40000]
            shared_spell_icons = [1000]
            "#,
        )
        .unwrap();

        assert_eq!(file.settings.max_item_level, 300);
        assert_eq!(file.settings.item_deny_list, vec![1, 2]);
        assert_eq!(file.icons.extra_item_icons, vec![40000]);

        let config = file.compile().unwrap();
        assert!(config.is_denied_name("Test Sword"));
        assert!(!config.is_denied_name("Sword"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file: FiltersFile = toml::from_str("").unwrap();
        assert_eq!(file.settings.max_item_level, DEFAULT_MAX_ITEM_LEVEL);
        assert!(file.icons.shared_spell_icons.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let file: FiltersFile = toml::from_str(r#"deny_name_patterns = ["("]"#).unwrap();
        assert!(file.compile().is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = FiltersFile::load(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains(FILTERS_FILE));
    }
}
