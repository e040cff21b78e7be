use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Layout settings for generated documents.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub page: PageConfig,
    pub text: TextConfig,
    pub heading: HeadingConfig,
    pub table: TableConfig,
    pub rule: RuleConfig,
}

/// Page geometry in twips.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

/// Body text, inline code and bullet lines.
#[derive(Debug, Clone, Deserialize)]
pub struct TextConfig {
    /// Run size in half-points.
    pub size: u32,
    pub code_font: String,
    pub bullet: String,
    pub bullet_indent: u32,
    pub spacing_before: u32,
    pub spacing_after: u32,
    pub line: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadingConfig {
    pub top_size: u32,
    pub base_size: u32,
    pub min_size: u32,
    pub step: u32,
    pub top_spacing_before: u32,
    pub spacing_before: u32,
    pub spacing_after: u32,
    pub line: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub width: u32,
    pub header_fill: String,
    pub border_size: u32,
    pub cell_spacing: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub glyph: String,
    pub length: usize,
    pub spacing: u32,
}

impl HeadingConfig {
    /// Font size in points for a heading depth.
    pub fn size_for_depth(&self, depth: u8) -> u32 {
        if depth <= 1 {
            return self.top_size;
        }
        let shrink = self.step * (u32::from(depth) - 1);
        self.base_size.saturating_sub(shrink).max(self.min_size)
    }

    pub fn spacing_before_for_depth(&self, depth: u8) -> u32 {
        if depth <= 1 {
            self.top_spacing_before
        } else {
            self.spacing_before
        }
    }
}

impl Config {
    /// The defaults bundled into the binary from `default_config.toml`.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("bundled default_config.toml must match Config")
    }

    /// Load a TOML file and layer it over the compiled defaults.
    ///
    /// Only the keys present in the file are overridden, so a file holding a
    /// single `[table]` entry is a valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let overrides: toml::Table = toml::from_str(content)?;
        let mut merged: toml::Table = toml::from_str(DEFAULT_CONFIG)?;
        merge_tables(&mut merged, overrides);
        toml::Value::Table(merged).try_into()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::compiled_default()
    }
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_bundled_values() {
        let config = Config::compiled_default();
        assert_eq!(config.page.width, 11906);
        assert_eq!(config.text.size, 20);
        assert_eq!(config.text.code_font, "Courier New");
        assert_eq!(config.text.bullet, "• ");
        assert_eq!(config.table.width, 9000);
        assert_eq!(config.table.header_fill, "E7E6E6");
        assert_eq!(config.rule.glyph, "⎯");
        assert_eq!(config.rule.length, 50);
    }

    #[test]
    fn heading_sizes_shrink_to_minimum() {
        let heading = Config::compiled_default().heading;
        assert_eq!(heading.size_for_depth(1), 20);
        assert_eq!(heading.size_for_depth(2), 14);
        assert_eq!(heading.size_for_depth(3), 12);
        assert_eq!(heading.size_for_depth(4), 12);
        assert_eq!(heading.size_for_depth(6), 12);
    }

    #[test]
    fn heading_spacing_by_depth() {
        let heading = Config::compiled_default().heading;
        assert_eq!(heading.spacing_before_for_depth(1), 300);
        assert_eq!(heading.spacing_before_for_depth(2), 150);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = Config::from_toml_str("[table]\nheader_fill = \"FFCC00\"\n").unwrap();
        assert_eq!(config.table.header_fill, "FFCC00");
        assert_eq!(config.table.width, 9000);
        assert_eq!(config.text.size, 20);
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(Config::from_toml_str("[text]\nsize = \"large\"\n").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/mddocx.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
